mod endpoints;
mod model_impls;

use actix_web::{web, Scope};
pub use endpoints::*;



#[rustfmt::skip]
pub fn categories_router() -> Scope {
    web::scope("/category")
        .service(list_categories)
        .service(new_category_form)
        .service(create_category)
        .service(show_category)
        .service(edit_category_form)
        .service(update_category)
        .service(delete_category_confirmation)
        .service(delete_category)
}
