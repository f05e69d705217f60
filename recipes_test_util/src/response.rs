use std::fmt::Debug;

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderName};
use reqwest::{Response, StatusCode};
use serde::Deserialize;


/// Name of the cookie the server keeps pending flash messages in.
pub const FLASH_COOKIE_NAME: &str = "flashes";


pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
}

impl TestResponse {
    pub(crate) async fn from_reqwest_response(response: Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().to_owned(),
            body_bytes: response
                .bytes()
                .await
                .expect("failed to extract body from response"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn assert_status_equals(&self, status_code: StatusCode) {
        assert_eq!(
            self.status,
            status_code,
            "unexpected status, response body: {}",
            String::from_utf8_lossy(&self.body_bytes)
        );
    }

    pub fn assert_header_exists<N>(&self, header_name: N)
    where
        N: Into<HeaderName>,
    {
        let header_name: HeaderName = header_name.into();

        self.headers.get(&header_name).unwrap_or_else(|| {
            panic!(
                "header {} does not exist on response",
                header_name.as_str()
            )
        });
    }

    pub fn assert_header_matches_value<N>(&self, header_name: N, expected_header_value: &str)
    where
        N: Into<HeaderName>,
    {
        let header_name: HeaderName = header_name.into();

        let actual_header_value = self.headers.get(&header_name).unwrap_or_else(|| {
            panic!(
                "header {} does not exist on response",
                header_name.as_str()
            )
        });

        assert_eq!(actual_header_value, expected_header_value);
    }

    /// Asserts this is a `302 Found` redirect to `location`.
    pub fn assert_redirects_to(&self, location: &str) {
        self.assert_status_equals(StatusCode::FOUND);
        self.assert_header_matches_value(header::LOCATION, location);
    }

    /// Value of the flash message cookie set by this response, if any.
    pub fn flash_cookie_value(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|header_value| header_value.to_str().ok())
            .find_map(|set_cookie| {
                let name_and_value = set_cookie.split(';').next()?;
                let (name, value) = name_and_value.split_once('=')?;

                (name.trim() == FLASH_COOKIE_NAME).then(|| value.trim().to_string())
            })
    }

    pub fn json_body<'de, D>(&'de self) -> D
    where
        D: Deserialize<'de>,
    {
        serde_json::from_slice::<D>(&self.body_bytes).expect("failed to deserialize body as JSON")
    }

    pub fn assert_json_body_matches<'de, D>(&'de self, expected_content: D)
    where
        D: Deserialize<'de> + PartialEq + Debug,
    {
        let data = self.json_body::<D>();

        assert_eq!(data, expected_content);
    }
}
