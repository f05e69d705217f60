use recipes_core::api_models::{CategorySummary, Recipe};
use recipes_database::entities;

use crate::api::traits::IntoApiModel;



impl IntoApiModel<Recipe> for entities::RecipeModel {
    fn into_api_model(self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title,
            content: self.content,
            category: CategorySummary {
                id: self.category_id,
                title: self.category_title,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
