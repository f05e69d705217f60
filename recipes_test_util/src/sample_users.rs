use recipes_core::api_models::{UserLoginRequest, UserLoginResponse};
use reqwest::{Method, StatusCode};

use crate::TestServer;


/// A user loaded by the server's fixtures.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SampleUser {
    /// Has the `administrator` role and can manage content.
    Administrator,

    /// Has only the `user` role.
    RegularUser,
}

impl SampleUser {
    pub fn email(&self) -> &'static str {
        match self {
            SampleUser::Administrator => "admin@example.com",
            SampleUser::RegularUser => "user@example.com",
        }
    }

    pub fn password(&self) -> &'static str {
        match self {
            SampleUser::Administrator => "admin1234",
            SampleUser::RegularUser => "user1234",
        }
    }

    pub fn into_login_request_model(self) -> UserLoginRequest {
        UserLoginRequest {
            email: self.email().to_string(),
            password: self.password().to_string(),
        }
    }

    /// Logs in, returning both tokens.
    pub async fn login_with_tokens(&self, server: &TestServer) -> UserLoginResponse {
        let login_response = server
            .request(Method::POST, "/login")
            .with_json_body(self.into_login_request_model())
            .send()
            .await;

        login_response.assert_status_equals(StatusCode::OK);

        login_response.json_body::<UserLoginResponse>()
    }

    /// Returns the access token.
    pub async fn login(&self, server: &TestServer) -> String {
        self.login_with_tokens(server).await.access_token
    }
}
