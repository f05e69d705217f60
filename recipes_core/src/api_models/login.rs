use serde::{Deserialize, Serialize};


#[derive(Deserialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}


/// Response on successful login.
///
/// The access token is the one to send in the `Authorization: Bearer <token>` header.
/// The refresh token can only be exchanged for a new access token at `POST /login/refresh`.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct UserLoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}


#[derive(Deserialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
pub struct UserLoginRefreshRequest {
    pub refresh_token: String,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct UserLoginRefreshResponse {
    pub access_token: String,
}
