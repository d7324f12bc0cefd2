use crate::criteria::Operator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaConfig {
    pub params: ParamNames,
    /// Operators a `searchFields` override may select
    pub accepted_operators: Vec<Operator>,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            params: ParamNames::default(),
            accepted_operators: vec![Operator::Eq, Operator::Like],
        }
    }
}

/// Request parameter names. Hosts that already use these names for
/// something else remap them here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamNames {
    pub search: String,
    pub search_fields: String,
    pub filter: String,
    pub order_by: String,
    pub sorted_by: String,
    pub with: String,
}

impl Default for ParamNames {
    fn default() -> Self {
        Self {
            search: "search".to_string(),
            search_fields: "searchFields".to_string(),
            filter: "filter".to_string(),
            order_by: "orderBy".to_string(),
            sorted_by: "sortedBy".to_string(),
            with: "with".to_string(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<CriteriaConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<CriteriaConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<CriteriaConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static CriteriaConfig {
    static DEFAULT_CONFIG: LazyLock<CriteriaConfig> = LazyLock::new(CriteriaConfig::default);
    &DEFAULT_CONFIG
}
