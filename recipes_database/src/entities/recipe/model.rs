use chrono::{DateTime, Utc};
use recipes_core::ids::{CategoryId, RecipeId};

use crate::IntoExternalModel;


/// A recipe, along with the title of the category it belongs to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RecipeModel {
    pub id: RecipeId,

    pub title: String,

    pub content: String,

    pub category_id: CategoryId,

    pub category_title: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalRecipeModel {
    pub(crate) id: i32,

    pub(crate) title: String,

    pub(crate) content: String,

    pub(crate) category_id: i32,

    pub(crate) category_title: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,
}

impl IntoExternalModel for InternalRecipeModel {
    type ExternalModel = RecipeModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: RecipeId::new(self.id),
            title: self.title,
            content: self.content,
            category_id: CategoryId::new(self.category_id),
            category_title: self.category_title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
