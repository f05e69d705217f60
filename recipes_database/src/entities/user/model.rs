use chrono::{DateTime, Utc};
use recipes_core::ids::UserId;

use crate::IntoExternalModel;



pub struct UserModel {
    pub id: UserId,

    pub email: String,

    /// Argon2id hash in PHC string format.
    pub password_hash: String,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalUserModel {
    pub(crate) id: i32,

    pub(crate) email: String,

    pub(crate) password_hash: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) last_modified_at: DateTime<Utc>,
}

impl IntoExternalModel for InternalUserModel {
    type ExternalModel = UserModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: UserId::new(self.id),
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        }
    }
}
