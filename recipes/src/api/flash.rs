//! One-shot flash messages, carried between a redirect and the next rendered view
//! in the `flashes` cookie.
//!
//! The cookie value is a `|`-separated list of `type:message` entries, e.g.
//! `success:message.created_successfully|warning:message.category_contains_recipes`.

use actix_utils::future::{self, Ready};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest};
use recipes_core::api_models::RenderedView;
use recipes_core::messages::{FlashMessage, FlashType, MessageId};
use serde::Serialize;
use tracing::debug;

use super::errors::{EndpointResponseBuilder, EndpointResult};


pub const FLASH_COOKIE_NAME: &str = "flashes";

const ENTRY_SEPARATOR: char = '|';
const TYPE_SEPARATOR: char = ':';


pub fn encode_flash_messages(messages: &[FlashMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            format!(
                "{}{}{}",
                message.flash_type.name(),
                TYPE_SEPARATOR,
                message.message.key()
            )
        })
        .collect::<Vec<_>>()
        .join(&ENTRY_SEPARATOR.to_string())
}

/// Decodes a `flashes` cookie value. Malformed or unknown entries are skipped.
pub fn decode_flash_messages(cookie_value: &str) -> Vec<FlashMessage> {
    cookie_value
        .split(ENTRY_SEPARATOR)
        .filter_map(|entry| {
            let (flash_type, message) = entry.split_once(TYPE_SEPARATOR)?;

            Some(FlashMessage {
                flash_type: FlashType::from_name(flash_type.trim())?,
                message: MessageId::from_key(message.trim())?,
            })
        })
        .collect()
}


fn flash_cookie(messages: &[FlashMessage]) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE_NAME, encode_flash_messages(messages))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

fn flash_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE_NAME, "").path("/").finish();
    cookie.make_removal();

    cookie
}



/// Flash messages that were added by previous requests, but not yet shown.
///
/// This is an actix extractor: add a `flashes: PendingFlashMessages` parameter to an
/// endpoint function, then finish the request with either [`Self::redirect_with`]
/// or [`Self::render`].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PendingFlashMessages {
    messages: Vec<FlashMessage>,
}

impl PendingFlashMessages {
    /// Redirects (`302 Found`) to `location`, adding `message` to the pending flash messages.
    pub fn redirect_with(mut self, location: &'static str, message: FlashMessage) -> EndpointResult {
        self.messages.push(message);

        EndpointResponseBuilder::found(location)
            .with_cookie(flash_cookie(&self.messages))
            .build()
    }

    /// Responds with the given view, consuming all pending flash messages.
    pub fn render<V>(self, status_code: StatusCode, view: V) -> EndpointResult
    where
        V: Serialize,
    {
        let had_pending_messages = !self.messages.is_empty();

        let mut response_builder =
            EndpointResponseBuilder::new(status_code).with_json_body(RenderedView {
                view,
                flashes: self.messages,
            });

        if had_pending_messages {
            response_builder = response_builder.with_cookie(flash_removal_cookie());
        }

        response_builder.build()
    }
}

impl FromRequest for PendingFlashMessages {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let messages = match req.cookie(FLASH_COOKIE_NAME) {
            Some(cookie) => decode_flash_messages(cookie.value()),
            None => Vec::new(),
        };

        if !messages.is_empty() {
            debug!(
                pending_flash_messages = messages.len(),
                "Loaded pending flash messages."
            );
        }

        future::ok(Self { messages })
    }
}



#[cfg(test)]
mod test {
    use actix_web::http::header;
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn encodes_and_decodes_messages() {
        let messages = vec![
            FlashMessage::success(MessageId::CreatedSuccessfully),
            FlashMessage::warning(MessageId::CategoryContainsRecipes),
        ];

        let encoded = encode_flash_messages(&messages);
        assert_eq!(
            encoded,
            "success:message.created_successfully|warning:message.category_contains_recipes"
        );

        assert_eq!(decode_flash_messages(&encoded), messages);
    }

    #[test]
    fn ignores_malformed_entries() {
        let decoded = decode_flash_messages(
            "garbage|success:message.deleted_successfully|error:message.created_successfully|warning:unknown||",
        );

        assert_eq!(
            decoded,
            vec![FlashMessage::success(MessageId::DeletedSuccessfully)]
        );

        assert!(decode_flash_messages("").is_empty());
    }

    #[actix_web::test]
    async fn extracts_messages_from_cookie() {
        let request = TestRequest::default()
            .cookie(Cookie::new(
                FLASH_COOKIE_NAME,
                "success:message.edited_successfully",
            ))
            .to_http_request();

        let pending = PendingFlashMessages::extract(&request).await.unwrap();

        assert_eq!(
            pending.messages,
            vec![FlashMessage::success(MessageId::EditedSuccessfully)]
        );
    }

    #[test]
    fn redirect_appends_to_pending_messages() {
        let pending = PendingFlashMessages {
            messages: vec![FlashMessage::success(MessageId::CreatedSuccessfully)],
        };

        let response = pending
            .redirect_with(
                "/category",
                FlashMessage::success(MessageId::DeletedSuccessfully),
            )
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/category"
        );

        let cookie = response
            .cookies()
            .find(|cookie| cookie.name() == FLASH_COOKIE_NAME)
            .unwrap();

        assert_eq!(
            cookie.value(),
            "success:message.created_successfully|success:message.deleted_successfully"
        );
    }

    #[test]
    fn rendering_consumes_pending_messages() {
        let pending = PendingFlashMessages {
            messages: vec![FlashMessage::warning(MessageId::CategoryContainsRecipes)],
        };

        let response = pending
            .render(StatusCode::OK, serde_json::json!({ "hello": "world" }))
            .unwrap();

        let removal_cookie = response
            .cookies()
            .find(|cookie| cookie.name() == FLASH_COOKIE_NAME)
            .unwrap();
        assert_eq!(removal_cookie.value(), "");
        assert_eq!(
            removal_cookie.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );


        let response = PendingFlashMessages::default()
            .render(StatusCode::OK, serde_json::json!({}))
            .unwrap();

        assert!(response.cookies().next().is_none());
    }
}
