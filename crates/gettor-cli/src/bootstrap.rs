//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: settings are resolved, the database pool is opened
//! through `gettor-db`, and the stores are assembled into an `AppCore`.
//!
//! Command handlers receive the fully-composed context and delegate work to it.

use std::path::PathBuf;

use anyhow::Result;
use gettor_core::{AppCore, Settings, expand_tilde, resolve_config_path, validate_settings};
use gettor_db::{CoreFactory, DbOptions, SqlitePool, close_database, setup_database};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Loaded (and possibly overridden) settings.
    pub settings: Settings,
    /// Resolved database file.
    pub db_path: PathBuf,
}

impl CliConfig {
    /// Resolve settings from the global CLI options.
    ///
    /// `--db` wins over `dbname` from the settings file.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config_path = resolve_config_path(cli.config.as_deref())?;
        let mut settings = Settings::load(&config_path)?;

        if let Some(db) = &cli.db {
            settings.dbname.clone_from(db);
            validate_settings(&settings)?;
        }

        let db_path = settings.db_path()?;
        Ok(Self { settings, db_path })
    }

    /// Config for an explicit database path with default settings.
    pub fn for_database(db_path: &str) -> Result<Self, CliError> {
        let settings = Settings {
            dbname: db_path.to_string(),
            ..Settings::with_defaults()
        };
        validate_settings(&settings)?;
        Ok(Self {
            db_path: expand_tilde(db_path)?,
            settings,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    app: AppCore,
    pool: SqlitePool,
    settings: Settings,
    db_path: PathBuf,
}

impl CliContext {
    /// Access the AppCore.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    /// Access the loaded settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Access the database path.
    pub const fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    #[cfg(test)]
    pub(crate) const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database pool.
    pub async fn shutdown(self) {
        close_database(&self.pool).await;
    }
}

/// Bootstrap the CLI application.
///
/// Opens (and if needed creates) the database, then builds the stores on
/// the shared pool.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let options = DbOptions::from_settings(&config.settings);
    let pool = setup_database(&config.db_path, &options).await?;
    let app = CoreFactory::build_app_core(pool.clone());

    Ok(CliContext {
        app,
        pool,
        settings: config.settings,
        db_path: config.db_path,
    })
}
