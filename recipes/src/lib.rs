use std::time::Duration;

use recipes_configuration::DatabaseConfiguration;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

pub mod api;
pub mod authentication;
pub mod cli;
pub mod logging;
pub mod state;

#[cfg(feature = "with_test_facilities")]
pub mod testing;


/// Builds connection options for the given database configuration
/// (without connecting to the database).
pub fn database_connect_options(database_configuration: &DatabaseConfiguration) -> PgConnectOptions {
    let mut connection_options = PgConnectOptions::new_without_pgpass()
        .application_name(&format!(
            "recipes-backend_v{}",
            env!("CARGO_PKG_VERSION")
        ))
        .statement_cache_capacity(
            database_configuration
                .statement_cache_capacity
                .unwrap_or(200),
        )
        .host(&database_configuration.host)
        .port(database_configuration.port)
        .username(&database_configuration.username)
        .database(&database_configuration.database_name);

    if let Some(password) = &database_configuration.password {
        connection_options = connection_options.password(password.as_str());
    }

    connection_options
}


fn database_pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .min_connections(1)
        .max_connections(10)
        .test_before_acquire(true)
}


pub async fn establish_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, sqlx::Error> {
    database_pool_options()
        .connect_with(database_connect_options(database_configuration))
        .await
}

/// Like [`establish_database_connection_pool`], but no connection is opened
/// until the pool is first used.
pub fn establish_lazy_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> PgPool {
    database_pool_options()
        .min_connections(0)
        .connect_lazy_with(database_connect_options(database_configuration))
}
