//! Authentication-related code.

use actix_utils::future::{self, Ready};
use actix_web::dev::Payload;
use actix_web::http::{header, StatusCode};
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use recipes_auth::{JWTClaims, JWTTokenType, JWTValidationError, Role};
use recipes_core::ids::UserId;
use tracing::{debug, error, info};

use crate::state::ApplicationStateInner;



/// User authentication extractor.
///
/// **Holding this struct doesn't automatically mean the user is authenticated!**
///
/// Add an `authentication: UserAuthenticationExtractor` parameter to an endpoint function,
/// then use [`require_authentication`] inside the handler body to get an [`AuthenticatedUser`],
/// early-returning a `401 Unauthorized` if the caller did not provide authentication.
///
/// Extraction itself fails (and the endpoint never runs) when the `Authorization` header
/// is present but unusable: a malformed header or an invalid token results in
/// `400 Bad Request`, and an expired token results in `403 Forbidden`.
///
/// [`require_authentication`]: crate::require_authentication
pub enum UserAuthenticationExtractor {
    /// No user authentication provided.
    Unauthenticated,

    /// Valid access token provided as authentication.
    Authenticated { token: JWTClaims },
}

impl UserAuthenticationExtractor {
    /// Returns an `Some(`[`AuthenticatedUser`]`)` if the API caller
    /// provided a valid access token with the request.
    pub fn authenticated_user(&self) -> Option<AuthenticatedUser> {
        match self {
            UserAuthenticationExtractor::Unauthenticated => None,
            UserAuthenticationExtractor::Authenticated { token } => Some(AuthenticatedUser {
                token: token.clone(),
            }),
        }
    }
}

impl FromRequest for UserAuthenticationExtractor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(authorization_header_value) = req.headers().get(header::AUTHORIZATION) else {
            return future::ok(Self::Unauthenticated);
        };

        let jwt_manager = match req.app_data::<Data<ApplicationStateInner>>() {
            Some(app_state) => app_state.jwt_manager(),
            None => {
                error!("BUG: No application state injected, all `UserAuthenticationExtractor`s will fail!");

                return future::err(
                    actix_web::error::InternalError::new(
                        "Missing application state.",
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )
                    .into(),
                );
            }
        };

        let Ok(header_value) = authorization_header_value.to_str() else {
            return future::err(actix_web::error::ParseError::Header.into());
        };

        let Some(token_string) = header_value.strip_prefix("Bearer ") else {
            return future::err(actix_web::error::ParseError::Header.into());
        };


        let token = match jwt_manager.decode_token(token_string) {
            Ok(token) => token,
            Err(error) => {
                return match error {
                    JWTValidationError::Expired { expired_token } => {
                        debug!(
                            user_id = %expired_token.user_id,
                            "User tried authenticating with expired token."
                        );

                        future::err(actix_web::error::ErrorForbidden(
                            "Authentication token expired.",
                        ))
                    }
                    JWTValidationError::InvalidToken { reason } => {
                        info!(
                            reason = %reason,
                            "User tried authenticating with invalid token."
                        );

                        future::err(actix_web::error::ErrorBadRequest(
                            "Invalid token.",
                        ))
                    }
                };
            }
        };

        if token.token_type != JWTTokenType::Access {
            info!(
                user_id = %token.user_id,
                "User tried authenticating with a refresh token."
            );

            return future::err(actix_web::error::ErrorBadRequest(
                "Invalid token.",
            ));
        }

        future::ok(Self::Authenticated { token })
    }
}



/// An authenticated user with a valid access token.
pub struct AuthenticatedUser {
    token: JWTClaims,
}

impl AuthenticatedUser {
    /// Returns the ID of the user who owns the token.
    pub fn user_id(&self) -> UserId {
        self.token.user_id
    }

    /// Returns `true` if the user had the given role when the token was issued.
    ///
    /// No database lookup is performed, roles are read from the token.
    pub fn has_role(&self, role: Role) -> bool {
        self.token.has_role(role)
    }
}
