//! Provides ways of handling errors in API endpoint functions
//! and ways to have those errors automatically turned into correct
//! HTTP error responses when returned as `Err(error)` from those functions.

use std::borrow::Cow;

use actix_http::header::{HeaderName, HeaderValue};
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use recipes_auth::{JWTCreationError, Role};
use recipes_database::entities::UserQueryError;
use recipes_database::fixtures::FixtureError;
use recipes_database::QueryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;



/// Pertains to all endpoints under `/category`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "category-error-type")]
#[non_exhaustive]
pub enum CategoryErrorReason {
    #[serde(rename = "category-not-found")]
    CategoryNotFound,
}

impl CategoryErrorReason {
    pub const fn category_not_found() -> Self {
        Self::CategoryNotFound
    }
}


/// Pertains to all endpoints under `/recipe`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "recipe-error-type")]
#[non_exhaustive]
pub enum RecipeErrorReason {
    #[serde(rename = "recipe-not-found")]
    RecipeNotFound,
}

impl RecipeErrorReason {
    pub const fn recipe_not_found() -> Self {
        Self::RecipeNotFound
    }
}


/// Pertains to all endpoints under `/login`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "login-error-type")]
#[non_exhaustive]
pub enum LoginErrorReason {
    #[serde(rename = "invalid-login-credentials")]
    InvalidLoginCredentials,

    #[serde(rename = "expired-refresh-token")]
    ExpiredRefreshToken,

    /// Not in the sense that is has expired or that it is *not* a refresh token,
    /// but in the sense that the given JWT couldn't be parsed or decoded.
    #[serde(rename = "invalid-refresh-json-web-token")]
    InvalidRefreshJsonWebToken,

    /// Expected a refresh token, but got an access JWT instead.
    #[serde(rename = "not-a-refresh-token")]
    NotARefreshToken,
}

impl LoginErrorReason {
    pub const fn invalid_login_credentials() -> Self {
        Self::InvalidLoginCredentials
    }

    pub const fn expired_refresh_token() -> Self {
        Self::ExpiredRefreshToken
    }

    pub const fn invalid_refresh_json_web_token() -> Self {
        Self::InvalidRefreshJsonWebToken
    }

    pub const fn not_a_refresh_token() -> Self {
        Self::NotARefreshToken
    }
}



#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum ErrorReason {
    /*
     * General
     */
    #[serde(rename = "missing-authentication")]
    MissingAuthentication,

    #[serde(rename = "missing-role")]
    MissingRole { role: Role },

    #[serde(rename = "invalid-json-body")]
    InvalidJsonBody { reason: InvalidJsonBodyReason },

    #[serde(rename = "invalid-page")]
    InvalidPage { page: i64 },

    /*
     * `/category`-related
     */
    #[serde(rename = "category")]
    Category(CategoryErrorReason),

    /*
     * `/recipe`-related
     */
    #[serde(rename = "recipe")]
    Recipe(RecipeErrorReason),

    /*
     * `/login`-related
     */
    #[serde(rename = "login")]
    Login(LoginErrorReason),
}

impl ErrorReason {
    pub const fn missing_authentication() -> Self {
        Self::MissingAuthentication
    }

    pub const fn missing_role(role: Role) -> Self {
        Self::MissingRole { role }
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub const fn invalid_page(page: i64) -> Self {
        Self::InvalidPage { page }
    }
}

impl From<CategoryErrorReason> for ErrorReason {
    fn from(value: CategoryErrorReason) -> Self {
        Self::Category(value)
    }
}

impl From<RecipeErrorReason> for ErrorReason {
    fn from(value: RecipeErrorReason) -> Self {
        Self::Recipe(value)
    }
}

impl From<LoginErrorReason> for ErrorReason {
    fn from(value: LoginErrorReason) -> Self {
        Self::Login(value)
    }
}



/// JSON body of all error responses that carry a reason.
#[derive(Serialize, PartialEq, Eq, Clone, Debug)]
#[cfg_attr(test, derive(Deserialize))]
pub struct ErrorResponseWithReason {
    pub reason: ErrorReason,
}

impl ErrorResponseWithReason {
    pub fn new<R>(reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        Self {
            reason: reason.into(),
        }
    }
}



#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidJsonBodyReason {
    #[serde(rename = "not-json")]
    NotJson,

    #[serde(rename = "invalid-data")]
    InvalidData,

    #[serde(rename = "too-large")]
    TooLarge,
}

impl From<&JsonPayloadError> for InvalidJsonBodyReason {
    fn from(value: &JsonPayloadError) -> Self {
        match value {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                Self::TooLarge
            }
            JsonPayloadError::ContentType => Self::NotJson,
            _ => Self::InvalidData,
        }
    }
}


/// Error handler for the actix JSON extractor, making invalid JSON bodies
/// result in the same error format as the rest of the API.
pub fn json_payload_error_handler(
    error: JsonPayloadError,
    _request: &HttpRequest,
) -> actix_web::Error {
    EndpointError::invalid_json_body(InvalidJsonBodyReason::from(&error)).into()
}



#[derive(Debug, Error)]
pub enum EndpointError {
    /*
     * Client errors.
     *
     * Prefer returning early with an `EndpointResponseBuilder` that carries
     * an `ErrorReason` over adding variants here.
     */
    #[error("invalid JSON body: {:?}", .reason)]
    InvalidJsonBody { reason: InvalidJsonBodyReason },

    /*
     * Server errors.
     *
     * Reasons are logged, but never shown externally.
     */
    #[error("internal server error: {}", .reason)]
    InternalErrorWithReason { reason: Cow<'static, str> },

    #[error("internal server error")]
    InternalGenericError {
        #[from]
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("internal database error")]
    InternalDatabaseError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("inconsistent internal database state: {}", .problem)]
    InvalidDatabaseState { problem: Cow<'static, str> },
}

impl EndpointError {
    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub fn internal_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InternalGenericError {
            error: Box::new(error),
        }
    }

    #[inline]
    pub fn internal_error_with_reason<S>(reason: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::InternalErrorWithReason {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn invalid_database_state<S>(problem: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::InvalidDatabaseState {
            problem: problem.into(),
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJsonBody { .. } => StatusCode::BAD_REQUEST,
            Self::InternalErrorWithReason { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalGenericError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalDatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidDatabaseState { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let fallibly_built_response = match self {
            Self::InvalidJsonBody { reason } => EndpointResponseBuilder::bad_request()
                .with_error_reason(ErrorReason::invalid_json_body(*reason))
                .build(),
            Self::InternalErrorWithReason { .. }
            | Self::InternalGenericError { .. }
            | Self::InternalDatabaseError { .. }
            | Self::InvalidDatabaseState { .. } => {
                error!(error = ?self, "Internal error while handling request: {}", self);

                EndpointResponseBuilder::internal_server_error().build()
            }
        };


        fallibly_built_response.unwrap_or_else(|_| HttpResponse::InternalServerError().finish())
    }
}


impl From<QueryError> for EndpointError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::SqlxError { error } => Self::InternalDatabaseError { error },
            QueryError::ModelError { reason } => Self::InternalErrorWithReason { reason },
            QueryError::DatabaseInconsistencyError { problem } => {
                Self::InvalidDatabaseState { problem }
            }
        }
    }
}

impl From<UserQueryError> for EndpointError {
    fn from(value: UserQueryError) -> Self {
        match value {
            UserQueryError::SqlxError { error } => Self::InternalDatabaseError { error },
            UserQueryError::ModelError { reason } => Self::InternalErrorWithReason { reason },
            UserQueryError::HasherError { error } => Self::internal_error(error),
            UserQueryError::DatabaseConsistencyError { reason } => {
                Self::InvalidDatabaseState { problem: reason }
            }
        }
    }
}

impl From<JWTCreationError> for EndpointError {
    fn from(value: JWTCreationError) -> Self {
        match value {
            JWTCreationError::JWTError { error } => Self::internal_error(error),
        }
    }
}

impl From<FixtureError> for EndpointError {
    fn from(value: FixtureError) -> Self {
        match value {
            FixtureError::QueryError { error } => Self::from(error),
            FixtureError::UserError { error } => Self::from(error),
            FixtureError::SqlxError { error } => Self::InternalDatabaseError { error },
        }
    }
}



pub struct EndpointResponseBuilder {
    status_code: StatusCode,

    body: Option<Result<Vec<u8>, serde_json::Error>>,

    additional_headers: Vec<(HeaderName, HeaderValue)>,

    cookies: Vec<Cookie<'static>>,
}

impl EndpointResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            additional_headers: Vec::with_capacity(1),
            cookies: Vec::new(),
        }
    }

    #[inline]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// A `302 Found` redirect to `location`.
    pub fn found(location: &'static str) -> Self {
        let mut builder = Self::new(StatusCode::FOUND);

        builder
            .additional_headers
            .push((header::LOCATION, HeaderValue::from_static(location)));

        builder
    }

    #[inline]
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    #[inline]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED)
    }

    #[inline]
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN)
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    #[inline]
    pub fn unprocessable_entity() -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY)
    }

    #[inline]
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_json_body<S>(mut self, data: S) -> Self
    where
        S: Serialize,
    {
        self.body = Some(serde_json::to_vec(&data));

        self.additional_headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        ));

        self
    }

    pub fn with_error_reason<R>(self, reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        self.with_json_body(ErrorResponseWithReason::new(reason))
    }

    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn build(self) -> Result<HttpResponse<BoxBody>, EndpointError> {
        let optional_body = match self.body {
            Some(body_or_error) => match body_or_error {
                Ok(body) => Some(body),
                Err(serialization_error) => {
                    return Err(EndpointError::internal_error(serialization_error))
                }
            },
            None => None,
        };


        let mut response_builder = HttpResponse::build(self.status_code);

        for (header_name, header_value) in self.additional_headers {
            response_builder.insert_header((header_name, header_value));
        }

        for cookie in self.cookies {
            response_builder.cookie(cookie);
        }


        match optional_body {
            Some(body) => Ok(response_builder.body(body)),
            None => Ok(response_builder.finish()),
        }
    }
}




pub type EndpointResult<Body = BoxBody> = Result<HttpResponse<Body>, EndpointError>;



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_reasons_serialize_with_type_tags() {
        let serialized =
            serde_json::to_value(ErrorResponseWithReason::new(ErrorReason::missing_role(
                Role::Administrator,
            )))
            .unwrap();

        assert_eq!(
            serialized,
            serde_json::json!({
                "reason": {
                    "type": "missing-role",
                    "data": { "role": "administrator" }
                }
            })
        );

        let serialized = serde_json::to_value(ErrorResponseWithReason::new(
            CategoryErrorReason::category_not_found(),
        ))
        .unwrap();

        assert_eq!(
            serialized,
            serde_json::json!({
                "reason": {
                    "type": "category",
                    "data": { "category-error-type": "category-not-found" }
                }
            })
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let error = EndpointError::internal_error_with_reason("secret detail");

        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body());
        let body = futures_util::FutureExt::now_or_never(body)
            .unwrap()
            .unwrap();

        assert!(body.is_empty());
    }

    #[test]
    fn redirect_sets_location_header() {
        let response = EndpointResponseBuilder::found("/category")
            .build()
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/category"
        );
    }

    #[test]
    fn maps_json_payload_errors_to_reasons() {
        assert_eq!(
            InvalidJsonBodyReason::from(&JsonPayloadError::ContentType),
            InvalidJsonBodyReason::NotJson
        );
        assert_eq!(
            InvalidJsonBodyReason::from(&JsonPayloadError::Overflow { limit: 10 }),
            InvalidJsonBodyReason::TooLarge
        );
    }
}
