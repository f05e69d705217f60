use reqwest::header::{self, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use serde::Serialize;

use crate::{TestResponse, FLASH_COOKIE_NAME};


pub const TEST_USER_AGENT: &str = concat!("recipes-e2e-test/", env!("CARGO_PKG_VERSION"));

const TEST_API_SERVER_ENV_VAR_NAME: &str = "TEST_API_SERVER_URL";


pub struct TestServer {
    base_api_url: String,

    client: Client,
}

impl TestServer {
    pub fn new(base_api_url: String) -> Self {
        // Redirects are part of what we test, so they must not be followed.
        let client = ClientBuilder::new()
            .user_agent(TEST_USER_AGENT)
            .redirect(Policy::none())
            .build()
            .expect("failed to set up reqwest client");

        Self {
            client,
            base_api_url,
        }
    }

    /// Wipes the database and loads the fixtures again.
    pub async fn reset_server(&self) {
        let response = self
            .request(Method::POST, "/testing/full-reset")
            .send()
            .await;

        response.assert_status_equals(StatusCode::OK);
    }

    pub fn request<U>(&self, method: Method, endpoint: U) -> TestRequestBuilder
    where
        U: AsRef<str>,
    {
        let request_builder = self.client.request(
            method,
            format!("{}{}", self.base_api_url, endpoint.as_ref()),
        );

        TestRequestBuilder { request_builder }
    }
}


pub struct TestRequestBuilder {
    request_builder: RequestBuilder,
}

impl TestRequestBuilder {
    pub fn with_access_token<S>(mut self, token: S) -> Self
    where
        S: AsRef<str>,
    {
        self.request_builder = self.request_builder.bearer_auth(token.as_ref());
        self
    }

    pub fn with_json_body<V>(mut self, value: V) -> Self
    where
        V: Serialize,
    {
        let serialized_body = serde_json::to_vec(&value).expect("failed to serialize value to JSON");

        self.request_builder = self.request_builder.body(serialized_body);
        self.request_builder = self.request_builder.header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        self
    }

    /// Sends `value` as an `application/x-www-form-urlencoded` body.
    pub fn with_form_body<V>(mut self, value: &V) -> Self
    where
        V: Serialize + ?Sized,
    {
        self.request_builder = self.request_builder.form(value);
        self
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.request_builder = self.request_builder.header(name, value);
        self
    }

    /// Sends the flash message cookie, as a browser would after a redirect.
    pub fn with_flash_cookie(mut self, cookie_value: &str) -> Self {
        self.request_builder = self.request_builder.header(
            header::COOKIE,
            format!("{}={}", FLASH_COOKIE_NAME, cookie_value),
        );
        self
    }

    pub async fn send(self) -> TestResponse {
        let response = self
            .request_builder
            .send()
            .await
            .expect("failed to perform HTTP request");

        TestResponse::from_reqwest_response(response).await
    }
}


/// Connects to the server at `TEST_API_SERVER_URL` and resets it to fixtures.
pub async fn initialize_test_server() -> TestServer {
    let test_server_url = std::env::var(TEST_API_SERVER_ENV_VAR_NAME).unwrap_or_else(|_| {
        panic!(
            "Unexpected test environment! Expected a {} environment variable, found none (or invalid unicode).",
            TEST_API_SERVER_ENV_VAR_NAME
        )
    });

    let server = TestServer::new(test_server_url);
    server.reset_server().await;

    server
}
