use actix_web::get;
use recipes_core::api_models::PingResponse;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};


/// Ping the server.
#[get("/ping")]
pub async fn ping() -> EndpointResult {
    EndpointResponseBuilder::ok()
        .with_json_body(PingResponse { ok: true })
        .build()
}
