//! Application-wide state (shared between endpoint functions).

use actix_web::web::Data;
use recipes_auth::{ArgonHasher, ArgonHasherError, JsonWebTokenManager};
use recipes_configuration::Configuration;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use thiserror::Error;

use crate::establish_database_connection_pool;



#[derive(Debug, Error)]
pub enum ApplicationStateError {
    #[error("failed to initialize password hasher")]
    FailedToInitializePasswordHasher {
        #[from]
        #[source]
        error: ArgonHasherError,
    },

    #[error("unable to connect to database")]
    UnableToConnectToDatabase {
        #[from]
        #[source]
        error: sqlx::Error,
    },
}



/// Central application state.
///
/// Use [`ApplicationState`] instead as it already wraps this struct
/// in [`actix_web::web::Data`]!
///
/// The struct is shared between all actix workers (it is essentially wrapped in an `Arc`),
/// so any mutable state added here needs interior mutability.
pub struct ApplicationStateInner {
    /// The configuration that this server was loaded with.
    pub configuration: Configuration,

    /// Password hasher helper struct.
    pub hasher: ArgonHasher,

    /// PostgreSQL database connection pool.
    pub database_pool: PgPool,

    /// Authentication and confirmation token manager (JSON Web Token).
    pub jwt_manager: JsonWebTokenManager,
}

impl ApplicationStateInner {
    pub async fn new(configuration: Configuration) -> Result<Self, ApplicationStateError> {
        let database_pool = establish_database_connection_pool(&configuration.database).await?;

        Self::with_database_pool(configuration, database_pool)
    }

    /// Builds the state around an existing (possibly lazily-connecting) pool.
    pub fn with_database_pool(
        configuration: Configuration,
        database_pool: PgPool,
    ) -> Result<Self, ApplicationStateError> {
        let hasher = ArgonHasher::new(&configuration.secrets.hash_salt)?;
        let jwt_manager = JsonWebTokenManager::new(&configuration.json_web_token.secret);

        Ok(Self {
            configuration,
            hasher,
            database_pool,
            jwt_manager,
        })
    }

    pub async fn acquire_database_connection(
        &self,
    ) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.database_pool.acquire().await
    }

    #[inline]
    pub fn hasher(&self) -> &ArgonHasher {
        &self.hasher
    }

    #[inline]
    pub fn jwt_manager(&self) -> &JsonWebTokenManager {
        &self.jwt_manager
    }

    /// How many categories or recipes a single listing page shows.
    #[inline]
    pub fn items_per_page(&self) -> u32 {
        self.configuration.pagination.items_per_page
    }
}


/// Central application state, wrapped in an actix [`Data`] wrapper.
///
/// This enables usage in endpoint functions.
/// See <https://actix.rs/docs/application#state> for more information.
pub type ApplicationState = Data<ApplicationStateInner>;
