use std::collections::HashSet;

use recipes_auth::{Role, RoleSet};
use recipes_core::ids::UserId;
use sqlx::PgConnection;

use crate::{QueryError, QueryResult};



pub struct UserRoleQuery;

impl UserRoleQuery {
    pub async fn roles_for_user(
        database_connection: &mut PgConnection,
        user_id: UserId,
    ) -> QueryResult<RoleSet> {
        let raw_role_ids = sqlx::query_scalar::<_, i32>(
            "SELECT DISTINCT role_id \
                FROM recipes.user_role \
                WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_all(database_connection)
        .await?;


        let mut role_hash_set = HashSet::with_capacity(raw_role_ids.len());
        for raw_role_id in raw_role_ids {
            let Some(role) = Role::from_id(raw_role_id) else {
                return Err(QueryError::model_error(format!(
                    "unexpected internal role ID: {}",
                    raw_role_id
                )));
            };

            role_hash_set.insert(role);
        }

        Ok(RoleSet::from_role_set(role_hash_set))
    }
}
