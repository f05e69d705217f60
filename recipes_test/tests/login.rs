use recipes_core::api_models::{UserLoginRefreshRequest, UserLoginRefreshResponse, UserLoginRequest};
use recipes_test_util::prelude::*;


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn login_rejects_invalid_credentials() {
    let server = initialize_test_server().await;

    let response = server
        .request(Method::POST, "/login")
        .with_json_body(UserLoginRequest {
            email: SampleUser::Administrator.email().to_string(),
            password: "definitely-not-the-password".to_string(),
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::FORBIDDEN);

    let body = response.json_body::<serde_json::Value>();
    assert_eq!(body["reason"]["type"], "login");
    assert_eq!(
        body["reason"]["data"]["login-error-type"],
        "invalid-login-credentials"
    );
}


#[tokio::test]
#[ignore = "requires a running test server at TEST_API_SERVER_URL"]
async fn refresh_token_yields_usable_access_token() {
    let server = initialize_test_server().await;

    let tokens = SampleUser::Administrator.login_with_tokens(&server).await;


    let response = server
        .request(Method::POST, "/login/refresh")
        .with_json_body(UserLoginRefreshRequest {
            refresh_token: tokens.refresh_token.clone(),
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);
    let refreshed_access_token = response.json_body::<UserLoginRefreshResponse>().access_token;


    let response = server
        .request(Method::GET, "/category/create")
        .with_access_token(&refreshed_access_token)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);


    // A refresh token can't be used for authentication, and vice versa.
    let response = server
        .request(Method::GET, "/category/create")
        .with_access_token(&tokens.refresh_token)
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);

    let response = server
        .request(Method::POST, "/login/refresh")
        .with_json_body(UserLoginRefreshRequest {
            refresh_token: tokens.access_token,
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
}
