use recipes_core::api_models::{Category, CategorySummary};
use recipes_database::entities;

use crate::api::traits::IntoApiModel;



impl IntoApiModel<Category> for entities::CategoryModel {
    fn into_api_model(self) -> Category {
        Category {
            id: self.id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl IntoApiModel<CategorySummary> for entities::CategoryModel {
    fn into_api_model(self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            title: self.title,
        }
    }
}
