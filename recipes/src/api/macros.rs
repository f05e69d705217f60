/// A macro that takes a [`UserAuthenticationExtractor`][crate::authentication::UserAuthenticationExtractor]
/// and evaluates to the [`AuthenticatedUser`][crate::authentication::AuthenticatedUser].
///
/// # Early-return values
/// If the caller did not provide authentication, the macro early-returns
/// a `401 Unauthorized` response with the `missing-authentication` error reason.
///
/// # Example
/// ```ignore
/// #[get("/secret")]
/// async fn secret(authentication: UserAuthenticationExtractor) -> EndpointResult {
///     let authenticated_user = require_authentication!(authentication);
///
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! require_authentication {
    ($authentication:expr) => {
        match $authentication.authenticated_user() {
            Some(authenticated_user) => authenticated_user,
            None => {
                return $crate::api::errors::EndpointResponseBuilder::unauthorized()
                    .with_error_reason($crate::api::errors::ErrorReason::missing_authentication())
                    .build();
            }
        }
    };
}


/// A macro that early-returns a `403 Forbidden` response with the `missing-role`
/// error reason if the given [`AuthenticatedUser`][crate::authentication::AuthenticatedUser]
/// does not have the required [`Role`][recipes_auth::Role].
///
/// Roles are read from the access token, so no database lookup is performed.
#[macro_export]
macro_rules! require_role {
    ($authenticated_user:expr, $required_role:expr) => {
        if !$authenticated_user.has_role($required_role) {
            return $crate::api::errors::EndpointResponseBuilder::forbidden()
                .with_error_reason($crate::api::errors::ErrorReason::missing_role(
                    $required_role,
                ))
                .build();
        }
    };
}


/// Shorthand for [`require_authentication`] followed by [`require_role`]
/// with the role that is allowed to create, edit and delete recipes and categories.
///
/// Evaluates to the [`AuthenticatedUser`][crate::authentication::AuthenticatedUser].
#[macro_export]
macro_rules! require_content_management_role {
    ($authentication:expr) => {{
        let authenticated_user = $crate::require_authentication!($authentication);
        $crate::require_role!(authenticated_user, recipes_auth::CONTENT_MANAGEMENT_ROLE);

        authenticated_user
    }};
}
