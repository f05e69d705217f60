use actix_web::{post, web};
use chrono::{Duration, Utc};
use recipes_auth::{JWTClaims, JWTTokenType, JWTValidationError, Role};
use recipes_core::api_models::{
    UserLoginRefreshRequest,
    UserLoginRefreshResponse,
    UserLoginRequest,
    UserLoginResponse,
};
use recipes_core::ids::UserId;
use recipes_database::entities;
use recipes_database::QueryResult;
use sqlx::PgConnection;
use tracing::{debug, warn};

use crate::api::errors::{EndpointResponseBuilder, EndpointResult, LoginErrorReason};
use crate::state::ApplicationState;



const ACCESS_TOKEN_VALIDITY_HOURS: i64 = 2;
const REFRESH_TOKEN_VALIDITY_DAYS: i64 = 7;


async fn current_roles_for_user(
    database_connection: &mut PgConnection,
    user_id: UserId,
) -> QueryResult<Vec<Role>> {
    let role_set = entities::UserRoleQuery::roles_for_user(database_connection, user_id).await?;

    Ok(role_set.into_roles().into_iter().collect())
}



/// Login
///
/// Validates the credentials (e-mail and password) and gives the user an access token
/// they can use in future requests to authenticate themselves.
///
/// In addition to the access token, a refresh token is provided to the user so they can request
/// a new access token when it expires. The refresh token is valid for longer than the access token,
/// but only the access token can be used in the *Authorization* header.
///
/// For login refreshing, see the `POST /login/refresh` endpoint.
#[post("")]
pub async fn login(
    state: ApplicationState,
    login_info: web::Json<UserLoginRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;


    // Validate user login credentials.
    let login_result = entities::UserQuery::validate_credentials(
        &mut database_connection,
        state.hasher(),
        &login_info.email,
        &login_info.password,
    )
    .await?;

    let Some(logged_in_user) = login_result else {
        return EndpointResponseBuilder::forbidden()
            .with_error_reason(LoginErrorReason::invalid_login_credentials())
            .build();
    };

    let roles = current_roles_for_user(&mut database_connection, logged_in_user.id).await?;


    // Generate access and refresh token.
    let logged_in_at = Utc::now();

    let access_token_claims = JWTClaims::create(
        logged_in_user.id,
        roles.clone(),
        logged_in_at,
        Duration::hours(ACCESS_TOKEN_VALIDITY_HOURS),
        JWTTokenType::Access,
    );

    let refresh_token_claims = JWTClaims::create(
        logged_in_user.id,
        roles,
        logged_in_at,
        Duration::days(REFRESH_TOKEN_VALIDITY_DAYS),
        JWTTokenType::Refresh,
    );


    let access_token = state.jwt_manager().create_token(access_token_claims)?;
    let refresh_token = state.jwt_manager().create_token(refresh_token_claims)?;


    debug!(
        user_id = %logged_in_user.id,
        "User has successfully logged in."
    );


    EndpointResponseBuilder::ok()
        .with_json_body(UserLoginResponse {
            access_token,
            refresh_token,
        })
        .build()
}




/// Refresh a login
///
/// The user must provide a refresh token given to them on an initial call to `/login`.
/// "Refreshing a login" does not invalidate the refresh token.
///
/// The result of this is a new access token, carrying the roles the user has *now*.
#[post("/refresh")]
pub async fn refresh_login(
    state: ApplicationState,
    refresh_info: web::Json<UserLoginRefreshRequest>,
) -> EndpointResult {
    // Parse and validate provided refresh token.
    let refresh_token_claims = match state
        .jwt_manager()
        .decode_token(&refresh_info.refresh_token)
    {
        Ok(token_claims) => token_claims,
        Err(error) => {
            return match error {
                JWTValidationError::Expired { expired_token } => {
                    debug!(
                        user_id = %expired_token.user_id,
                        "Refusing to refresh expired token.",
                    );

                    EndpointResponseBuilder::bad_request()
                        .with_error_reason(LoginErrorReason::expired_refresh_token())
                        .build()
                }
                JWTValidationError::InvalidToken { reason } => {
                    warn!(error = %reason, "Failed to parse refresh token.");

                    EndpointResponseBuilder::bad_request()
                        .with_error_reason(LoginErrorReason::invalid_refresh_json_web_token())
                        .build()
                }
            };
        }
    };

    if refresh_token_claims.token_type != JWTTokenType::Refresh {
        return EndpointResponseBuilder::bad_request()
            .with_error_reason(LoginErrorReason::not_a_refresh_token())
            .build();
    }


    let mut database_connection = state.acquire_database_connection().await?;

    let roles =
        current_roles_for_user(&mut database_connection, refresh_token_claims.user_id).await?;


    // Refresh token is valid, create new access token.
    let access_token_claims = JWTClaims::create(
        refresh_token_claims.user_id,
        roles,
        Utc::now(),
        Duration::hours(ACCESS_TOKEN_VALIDITY_HOURS),
        JWTTokenType::Access,
    );

    let access_token = state.jwt_manager().create_token(access_token_claims)?;


    debug!(
        user_id = %refresh_token_claims.user_id,
        "User has successfully refreshed access token."
    );


    EndpointResponseBuilder::ok()
        .with_json_body(UserLoginRefreshResponse { access_token })
        .build()
}
