pub use reqwest::{header, Method, StatusCode};

pub use super::sample_categories::*;
pub use super::sample_recipes::*;
pub use super::sample_users::*;
pub use super::server::{initialize_test_server, TestServer};
pub use super::TestResponse;
