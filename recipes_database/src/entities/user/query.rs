use recipes_auth::ArgonHasher;
use recipes_core::ids::UserId;
use sqlx::PgConnection;

use super::{InternalUserModel, UserModel, UserQueryError, UserQueryResult};
use crate::{IntoExternalModel, QueryResult};



pub struct UserQuery;

impl UserQuery {
    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        user_id: UserId,
    ) -> QueryResult<Option<UserModel>> {
        let internal_user = sqlx::query_as::<_, InternalUserModel>(
            "SELECT id, email, password_hash, created_at, last_modified_at \
                FROM recipes.user \
                WHERE id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_user.map(IntoExternalModel::into_external_model))
    }

    pub async fn get_by_email(
        database_connection: &mut PgConnection,
        email: &str,
    ) -> QueryResult<Option<UserModel>> {
        let internal_user = sqlx::query_as::<_, InternalUserModel>(
            "SELECT id, email, password_hash, created_at, last_modified_at \
                FROM recipes.user \
                WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_user.map(IntoExternalModel::into_external_model))
    }

    pub async fn exists_by_email(
        database_connection: &mut PgConnection,
        email: &str,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM recipes.user WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    /// Returns the user if the email exists and the password matches its hash.
    pub async fn validate_credentials(
        database_connection: &mut PgConnection,
        hasher: &ArgonHasher,
        email: &str,
        password: &str,
    ) -> UserQueryResult<Option<UserModel>> {
        let Some(user) = Self::get_by_email(database_connection, email).await? else {
            return Ok(None);
        };

        let is_valid_password = hasher
            .verify_password_against_hash(password, &user.password_hash)
            .map_err(|error| UserQueryError::HasherError { error })?;

        if is_valid_password {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
