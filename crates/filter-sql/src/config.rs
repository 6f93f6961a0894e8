//! Serde-decoded settings that select a dialect and a catalog.

use crate::{
    filter::{catalog::Entity, compiler::SqlFilterCompiler},
    query::dialect::dialect_for,
};
use model::core::dialect::SqlDialect;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors raised when decoding filter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid filter config: {0}")]
    Json(#[from] serde_json::Error),

    /// Numbered placeholders are 1-based.
    #[error("Invalid start index: {0} (must be >= 1)")]
    InvalidStartIndex(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub dialect: SqlDialect,
    pub entity: Entity,
    #[serde(default = "default_start_index")]
    pub start_index: usize,
}

fn default_start_index() -> usize {
    1
}

impl FilterConfig {
    pub fn new(dialect: SqlDialect, entity: Entity) -> Self {
        FilterConfig {
            dialect,
            entity,
            start_index: default_start_index(),
        }
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: FilterConfig = serde_json::from_str(source)?;
        config.validate()?;
        info!(
            "Loaded filter config: {} on {}, params from {}",
            config.entity, config.dialect, config.start_index
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_index == 0 {
            return Err(ConfigError::InvalidStartIndex(self.start_index));
        }
        Ok(())
    }

    /// A compiler bound to the shared dialect descriptor and entity catalog.
    pub fn compiler(&self) -> SqlFilterCompiler<'static> {
        SqlFilterCompiler::new(self.entity.catalog(), dialect_for(self.dialect))
            .with_start_index(self.start_index)
    }
}
