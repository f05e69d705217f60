//! A test-only API. Compiled into the binary and enabled only when
//! the `with_test_facilities` feature flag is enabled.

use actix_web::{post, web, Scope};
use recipes_database::fixtures::{AppFixtures, LoadedFixtures};
use serde::{Deserialize, Serialize};
use sqlx::Connection;
use tracing::warn;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;



/// What a full reset left in the database.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct FullResetResponse {
    pub users: usize,
    pub categories: usize,
    pub recipes: usize,
}

impl From<LoadedFixtures> for FullResetResponse {
    fn from(value: LoadedFixtures) -> Self {
        Self {
            users: value.users,
            categories: value.categories,
            recipes: value.recipes,
        }
    }
}


/// Wipes all users, categories and recipes, then loads the fixtures again.
#[post("/full-reset")]
pub async fn reset_server(state: ApplicationState) -> EndpointResult {
    warn!("Resetting database to fixtures.");

    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    AppFixtures::purge(&mut transaction).await?;
    let loaded_fixtures = AppFixtures::load(&mut transaction, state.hasher()).await?;

    transaction.commit().await?;


    EndpointResponseBuilder::ok()
        .with_json_body(FullResetResponse::from(loaded_fixtures))
        .build()
}


#[rustfmt::skip]
pub fn testing_router() -> Scope {
    web::scope("/testing")
        .service(reset_server)
}
