use recipes_auth::Role;
use recipes_core::ids::UserId;
use sqlx::PgConnection;

use crate::QueryResult;



pub struct UserRoleMutation;

impl UserRoleMutation {
    /// Gives the user the listed roles. Roles the user already has are left alone.
    pub async fn add_roles_to_user(
        database_connection: &mut PgConnection,
        user_id: UserId,
        roles: &[Role],
    ) -> QueryResult<()> {
        let role_ids = roles.iter().map(Role::id).collect::<Vec<_>>();

        sqlx::query(
            "INSERT INTO recipes.user_role (user_id, role_id) \
                SELECT $1::integer, role_ids.role_id FROM UNNEST($2::integer[]) AS role_ids(role_id) \
                ON CONFLICT DO NOTHING",
        )
        .bind(user_id.into_inner())
        .bind(role_ids)
        .execute(database_connection)
        .await?;

        Ok(())
    }
}
