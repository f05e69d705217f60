use chrono::Utc;
use recipes_auth::ArgonHasher;
use sqlx::PgConnection;

use super::{InternalUserModel, UserModel, UserQueryResult};
use crate::IntoExternalModel;



pub struct NewUser {
    pub email: String,
    pub password: String,
}



pub struct UserMutation;

impl UserMutation {
    /// Creates a new user, hashing the given plain-text password.
    pub async fn create(
        database_connection: &mut PgConnection,
        hasher: &ArgonHasher,
        new_user: NewUser,
    ) -> UserQueryResult<UserModel> {
        let password_hash = hasher.hash_password(&new_user.password)?;
        let created_at = Utc::now();

        let newly_created_user = sqlx::query_as::<_, InternalUserModel>(
            "INSERT INTO recipes.user \
                (email, password_hash, created_at, last_modified_at) \
                VALUES ($1, $2, $3, $4) \
                RETURNING id, email, password_hash, created_at, last_modified_at",
        )
        .bind(new_user.email)
        .bind(password_hash)
        .bind(created_at)
        .bind(created_at)
        .fetch_one(database_connection)
        .await?;

        Ok(newly_created_user.into_external_model())
    }
}
