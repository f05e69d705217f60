mod endpoints;
mod model_impls;

use actix_web::{web, Scope};
pub use endpoints::*;



#[rustfmt::skip]
pub fn recipes_router() -> Scope {
    web::scope("/recipe")
        .service(list_recipes)
        .service(new_recipe_form)
        .service(create_recipe)
        .service(show_recipe)
        .service(edit_recipe_form)
        .service(update_recipe)
        .service(delete_recipe_confirmation)
        .service(delete_recipe)
}
