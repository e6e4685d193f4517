//! Configuration for sqlbuilder.
//!
//! TOML-based: picks the rendering dialect and the log filter used by
//! binaries embedding the builder.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialect::{Dialect, PlainDialect};
use crate::error::{Result, SqlBuilderError};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SqlBuilderConfig {
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Rendering settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Target dialect (default: plain).
    pub dialect: DialectKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// Identity quoting, `%s` placeholders.
    #[default]
    Plain,
    Postgres,
    Sqlite,
}

impl DialectKind {
    /// Build the dialect; fails if its cargo feature is compiled out.
    pub fn build(self) -> Result<Box<dyn Dialect>> {
        match self {
            DialectKind::Plain => Ok(Box::new(PlainDialect)),
            #[cfg(feature = "postgres")]
            DialectKind::Postgres => Ok(Box::new(crate::dialect::PostgresDialect)),
            #[cfg(not(feature = "postgres"))]
            DialectKind::Postgres => Err(SqlBuilderError::Config(
                "postgres dialect requires the `postgres` feature".to_string(),
            )),
            #[cfg(feature = "sqlite")]
            DialectKind::Sqlite => Ok(Box::new(crate::dialect::SqliteDialect)),
            #[cfg(not(feature = "sqlite"))]
            DialectKind::Sqlite => Err(SqlBuilderError::Config(
                "sqlite dialect requires the `sqlite` feature".to_string(),
            )),
        }
    }
}

/// Logging settings, consumed by whoever installs the subscriber.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (default: "info").
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl SqlBuilderConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| SqlBuilderError::Config(format!("failed to parse config: {e}")))
    }

    /// Load from default locations (env var, cwd, user config dir, or defaults).
    ///
    /// Search order:
    /// 1. `SQLBUILDER_CONFIG` environment variable
    /// 2. `./sqlbuilder.toml` (current directory)
    /// 3. `~/.config/sqlbuilder/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("SQLBUILDER_CONFIG") {
            match Self::from_file(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "loaded config from SQLBUILDER_CONFIG");
                    return cfg;
                }
                Err(err) => tracing::warn!(path = %path, error = %err, "ignoring SQLBUILDER_CONFIG"),
            }
        }

        if let Ok(cfg) = Self::from_file("sqlbuilder.toml") {
            tracing::info!("loaded config from ./sqlbuilder.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlbuilder").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }

    /// The configured dialect.
    pub fn dialect(&self) -> Result<Box<dyn Dialect>> {
        self.render.dialect.build()
    }
}
