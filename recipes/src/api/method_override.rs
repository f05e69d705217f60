//! HTTP method override, for clients that can only send `GET` and `POST` (e.g. HTML forms).
//!
//! A `POST` request carrying either the `X-HTTP-Method-Override` header or
//! the `_method` query parameter is routed as the requested method,
//! as long as that method is `PUT`, `PATCH` or `DELETE`.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::web;
use serde::Deserialize;
use tracing::debug;


pub const METHOD_OVERRIDE_HEADER_NAME: &str = "x-http-method-override";


#[derive(Deserialize)]
struct MethodOverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}


fn parse_overridable_method(raw_method: &str) -> Option<Method> {
    match raw_method.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Returns the method a `POST` request asks to be routed as, if any.
/// The header takes precedence over the query parameter.
pub fn requested_method_override(headers: &HeaderMap, query_string: &str) -> Option<Method> {
    if let Some(header_value) = headers.get(METHOD_OVERRIDE_HEADER_NAME) {
        return header_value
            .to_str()
            .ok()
            .and_then(parse_overridable_method);
    }

    let query = web::Query::<MethodOverrideQuery>::from_query(query_string).ok()?;

    query
        .into_inner()
        .method
        .as_deref()
        .and_then(parse_overridable_method)
}


/// Middleware (see [`actix_web::middleware::from_fn`]) that applies the method override.
/// It must wrap the router, so the overridden method is the one used for routing.
pub async fn method_override(
    mut request: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if *request.method() == Method::POST {
        if let Some(overridden_method) =
            requested_method_override(request.headers(), request.query_string())
        {
            debug!(
                path = request.path(),
                method = %overridden_method,
                "Overriding POST request method."
            );

            request.head_mut().method = overridden_method;
        }
    }

    next.call(request).await
}
