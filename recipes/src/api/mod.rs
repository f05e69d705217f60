//! HTTP API of the recipes backend.
//!
//! Every page-like endpoint responds with a JSON view model (see [`flash::PendingFlashMessages::render`]),
//! and every successful form submission redirects back to the relevant listing.

use actix_web::web;

use self::categories::categories_router;
use self::errors::json_payload_error_handler;
use self::health::health_router;
use self::login::login_router;
use self::recipes::recipes_router;

pub mod errors;
pub mod macros;
pub mod traits;

pub mod flash;
pub mod forms;
pub mod method_override;
pub mod pagination;

pub mod categories;
pub mod health;
pub mod login;
pub mod recipes;



/// Registers all public routes on the application.
///
/// The routers are mounted directly on the application (as opposed to under a common scope),
/// so other top-level scopes (such as `/testing`) can coexist with them.
#[rustfmt::skip]
pub fn configure_api_routes(service_config: &mut web::ServiceConfig) {
    service_config
        .service(categories_router())
        .service(recipes_router())
        .service(login_router())
        .service(health_router());
}


/// JSON extractor configuration that reports malformed bodies in the API's error format.
pub fn json_extractor_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_payload_error_handler)
}



#[cfg(test)]
mod test {
    use std::path::{Path, PathBuf};

    use actix_web::body::MessageBody;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::{header, Method, StatusCode};
    use actix_web::middleware::from_fn;
    use actix_web::{test, App};
    use chrono::{Duration, Utc};
    use recipes_auth::{JWTClaims, JWTTokenType, Role};
    use recipes_configuration::Configuration;
    use recipes_core::api_models::PingResponse;
    use recipes_core::ids::UserId;

    use super::*;
    use crate::api::errors::{ErrorReason, ErrorResponseWithReason, InvalidJsonBodyReason};
    use crate::api::method_override::{method_override, METHOD_OVERRIDE_HEADER_NAME};
    use crate::establish_lazy_database_connection_pool;
    use crate::state::{ApplicationState, ApplicationStateInner};


    const TEST_CONFIGURATION: &str = r#"
        [logging]
        console_output_level_filter = "info"
        log_file_output_level_filter = "debug"
        log_file_output_directory = "data/logs"

        [http]
        host = "127.0.0.1"
        port = 8866

        [database]
        host = "127.0.0.1"
        port = 5432
        username = "recipes"
        password = "recipes"
        database_name = "recipes"

        [secrets]
        hash_salt = "c29tZXNhbHRzb21lc2FsdA"

        [json_web_token]
        secret = "api-test-secret"
    "#;


    /// Application state whose database pool never connects unless used.
    /// Only requests that are answered before touching the database can be tested with it.
    fn test_state() -> ApplicationState {
        let configuration = Configuration::load_from_str(
            TEST_CONFIGURATION,
            PathBuf::from("/nonexistent-recipes-directory/data/configuration.toml"),
            Path::new("/nonexistent-recipes-directory"),
        )
        .unwrap();

        let database_pool = establish_lazy_database_connection_pool(&configuration.database);

        ApplicationState::new(
            ApplicationStateInner::with_database_pool(configuration, database_pool).unwrap(),
        )
    }

    async fn test_app(
        state: ApplicationState,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .wrap(from_fn(method_override))
                .app_data(json_extractor_config())
                .app_data(state)
                .configure(configure_api_routes),
        )
        .await
    }

    fn access_token(state: &ApplicationState, roles: Vec<Role>) -> String {
        state
            .jwt_manager()
            .create_token(JWTClaims::create(
                UserId::new(1),
                roles,
                Utc::now(),
                Duration::hours(1),
                JWTTokenType::Access,
            ))
            .unwrap()
    }

    fn bearer(token: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    async fn error_reason_of<B>(response: ServiceResponse<B>) -> ErrorReason
    where
        B: MessageBody,
    {
        let body: ErrorResponseWithReason = test::read_body_json(response).await;
        body.reason
    }



    #[actix_web::test]
    async fn ping_responds() {
        let app = test_app(test_state()).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health/ping").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);

        let body: PingResponse = test::read_body_json(response).await;
        assert!(body.ok);
    }

    #[actix_web::test]
    async fn invalid_pages_are_not_found() {
        let app = test_app(test_state()).await;

        for uri in [
            "/category?page=0",
            "/category?page=-3",
            "/category?page=abc",
            "/recipe?page=0",
            "/recipe?page=abc&filters_category_id=2",
        ] {
            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "for {}", uri);
            assert!(matches!(
                error_reason_of(response).await,
                ErrorReason::InvalidPage { .. }
            ));
        }
    }

    #[actix_web::test]
    async fn non_positive_or_non_numeric_ids_do_not_route() {
        let app = test_app(test_state()).await;

        for uri in [
            "/category/abc",
            "/category/0",
            "/category/-1/edit",
            "/recipe/abc",
            "/recipe/0/delete",
        ] {
            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "for {}", uri);
        }
    }

    #[actix_web::test]
    async fn content_management_requires_authentication() {
        let app = test_app(test_state()).await;

        let requests = [
            test::TestRequest::get().uri("/category/create"),
            test::TestRequest::post().uri("/category/create"),
            test::TestRequest::get().uri("/category/4/edit"),
            test::TestRequest::put().uri("/category/4/edit"),
            test::TestRequest::get().uri("/category/4/delete"),
            test::TestRequest::delete().uri("/category/4/delete"),
            test::TestRequest::get().uri("/recipe/create"),
            test::TestRequest::post().uri("/recipe/create"),
            test::TestRequest::put().uri("/recipe/9/edit"),
            test::TestRequest::delete().uri("/recipe/9/delete"),
        ];

        for request in requests {
            let response = test::call_service(&app, request.to_request()).await;

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                error_reason_of(response).await,
                ErrorReason::missing_authentication()
            );
        }
    }

    #[actix_web::test]
    async fn content_management_requires_administrator_role() {
        let state = test_state();
        let user_token = access_token(&state, vec![Role::User]);
        let app = test_app(state).await;

        for request in [
            test::TestRequest::get().uri("/category/create"),
            test::TestRequest::delete().uri("/recipe/9/delete"),
        ] {
            let response = test::call_service(
                &app,
                request.insert_header(bearer(&user_token)).to_request(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            assert_eq!(
                error_reason_of(response).await,
                ErrorReason::missing_role(Role::Administrator)
            );
        }
    }

    #[actix_web::test]
    async fn rejects_unusable_tokens() {
        let state = test_state();

        let expired_token = state
            .jwt_manager()
            .create_token(JWTClaims::create(
                UserId::new(1),
                vec![Role::Administrator],
                Utc::now() - Duration::hours(3),
                Duration::hours(1),
                JWTTokenType::Access,
            ))
            .unwrap();

        let refresh_token = state
            .jwt_manager()
            .create_token(JWTClaims::create(
                UserId::new(1),
                vec![Role::Administrator],
                Utc::now(),
                Duration::hours(1),
                JWTTokenType::Refresh,
            ))
            .unwrap();

        let app = test_app(state).await;


        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/category/create")
                .insert_header(bearer("definitely-not-a-token"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/category/create")
                .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/category/create")
                .insert_header(bearer(&refresh_token))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/category/create")
                .insert_header(bearer(&expired_token))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn post_is_routed_as_overridden_method() {
        let app = test_app(test_state()).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/category/5/delete?_method=DELETE")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/recipe/5/edit")
                .insert_header((METHOD_OVERRIDE_HEADER_NAME, "PUT"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);


        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/category/5/delete")
                .to_request(),
        )
        .await;
        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn get_is_never_overridden() {
        let app = test_app(test_state()).await;

        let response = test::call_service(
            &app,
            test::TestRequest::default()
                .method(Method::GET)
                .uri("/category/create?_method=DELETE")
                .to_request(),
        )
        .await;

        // Routed as GET, so this reaches the creation form instead of an unknown DELETE route.
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn malformed_json_bodies_are_reported() {
        let app = test_app(test_state()).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .set_payload("{ this is not json")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_reason_of(response).await,
            ErrorReason::invalid_json_body(InvalidJsonBodyReason::InvalidData)
        );
    }
}
