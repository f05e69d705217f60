//! Database migrations for the recipes backend.
//!
//! Migrations are reversible SQL scripts in `./migrations`, embedded into the binary at compile time.

use std::borrow::Cow;

use sqlx::migrate::{Migrate, MigrateError, Migrator};
use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::info;


/// All migrations, embedded from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");



#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("unable to access database")]
    UnableToAccessDatabase {
        #[source]
        error: sqlx::Error,
    },

    #[error("failed to list applied migrations")]
    UnableToListAppliedMigrations {
        #[source]
        error: MigrateError,
    },

    #[error("failed to apply migrations")]
    UnableToApplyMigrations {
        #[source]
        error: MigrateError,
    },

    #[error("failed to roll back migrations")]
    UnableToRollBackMigrations {
        #[source]
        error: MigrateError,
    },

    #[error("invalid target version {}: {}", .version, .reason)]
    InvalidTargetVersion {
        version: i64,

        reason: Cow<'static, str>,
    },
}



#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MigrationStatus {
    Applied,
    Pending,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MigrationWithStatus {
    pub version: i64,

    pub description: String,

    pub status: MigrationStatus,
}

impl MigrationWithStatus {
    #[inline]
    pub fn is_applied(&self) -> bool {
        self.status == MigrationStatus::Applied
    }
}



pub async fn connect_to_database(database_url: &str) -> Result<PgConnection, MigrationError> {
    PgConnection::connect(database_url)
        .await
        .map_err(|error| MigrationError::UnableToAccessDatabase { error })
}


/// Returns every embedded migration along with whether it has been applied, in version order.
pub async fn migrations_with_status(
    database_connection: &mut PgConnection,
) -> Result<Vec<MigrationWithStatus>, MigrationError> {
    database_connection
        .ensure_migrations_table()
        .await
        .map_err(|error| MigrationError::UnableToListAppliedMigrations { error })?;

    let applied_versions = database_connection
        .list_applied_migrations()
        .await
        .map_err(|error| MigrationError::UnableToListAppliedMigrations { error })?
        .into_iter()
        .map(|applied_migration| applied_migration.version)
        .collect::<Vec<_>>();

    Ok(MIGRATOR
        .iter()
        .filter(|migration| !migration.migration_type.is_down_migration())
        .map(|migration| MigrationWithStatus {
            version: migration.version,
            description: migration.description.to_string(),
            status: if applied_versions.contains(&migration.version) {
                MigrationStatus::Applied
            } else {
                MigrationStatus::Pending
            },
        })
        .collect())
}


/// Applies all pending migrations.
pub async fn apply_pending_migrations(
    database_connection: &mut PgConnection,
) -> Result<(), MigrationError> {
    MIGRATOR
        .run(&mut *database_connection)
        .await
        .map_err(|error| MigrationError::UnableToApplyMigrations { error })?;

    info!("Database migrations are up to date.");

    Ok(())
}


/// Rolls back all applied migrations with a version larger than `target_version`.
/// A `target_version` of 0 rolls back everything.
pub async fn roll_back_to_version(
    database_connection: &mut PgConnection,
    target_version: i64,
) -> Result<(), MigrationError> {
    let is_known_version = target_version == 0
        || MIGRATOR
            .iter()
            .any(|migration| migration.version == target_version);

    if !is_known_version {
        return Err(MigrationError::InvalidTargetVersion {
            version: target_version,
            reason: Cow::from("no migration has this version"),
        });
    }

    MIGRATOR
        .undo(&mut *database_connection, target_version)
        .await
        .map_err(|error| MigrationError::UnableToRollBackMigrations { error })?;

    info!(target_version, "Rolled back database migrations.");

    Ok(())
}
