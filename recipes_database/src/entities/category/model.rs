use chrono::{DateTime, Utc};
use recipes_core::ids::CategoryId;

use crate::IntoExternalModel;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryModel {
    pub id: CategoryId,

    pub title: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalCategoryModel {
    pub(crate) id: i32,

    pub(crate) title: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,
}

impl IntoExternalModel for InternalCategoryModel {
    type ExternalModel = CategoryModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: CategoryId::new(self.id),
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
