//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading settlement
//! policy from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::validate_policy;
use crate::error::{EngineError, EngineResult};

use super::types::{ClearanceConfig, NoticePolicy, SettlementConfig, SettlementPolicy};

/// Loads and provides access to settlement configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and checks that the values can drive the settlement formulas.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── settlement.yaml   # Day conventions, gratuity, bonus and TDS rates
/// ├── notice.yaml       # Notice-period days and designation keywords
/// └── clearance.yaml    # Departments on the clearance checklist
/// ```
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("TDS rate: {}", loader.settlement().tds_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SettlementConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or unusable values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settlement_path = path.join("settlement.yaml");
        let settlement = Self::load_yaml::<SettlementPolicy>(&settlement_path)?;
        Self::validate_settlement(&settlement, &settlement_path)?;

        let notice_path = path.join("notice.yaml");
        let notice = Self::load_yaml::<NoticePolicy>(&notice_path)?;

        let clearance_path = path.join("clearance.yaml");
        let clearance = Self::load_yaml::<ClearanceConfig>(&clearance_path)?;
        Self::validate_clearance(&clearance, &clearance_path)?;

        tracing::debug!(
            path = %path.display(),
            departments = clearance.departments.len(),
            "Loaded settlement configuration"
        );

        Ok(Self {
            config: SettlementConfig::new(settlement, notice, clearance),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settlement(policy: &SettlementPolicy, path: &Path) -> EngineResult<()> {
        validate_policy(policy).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn validate_clearance(config: &ClearanceConfig, path: &Path) -> EngineResult<()> {
        if config.departments.iter().any(|d| d.trim().is_empty()) {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "department names must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying settlement configuration.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Returns the settlement formula policy.
    pub fn settlement(&self) -> &SettlementPolicy {
        self.config.settlement()
    }

    /// Returns the notice-period policy.
    pub fn notice(&self) -> &NoticePolicy {
        self.config.notice()
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> SettlementConfig {
        self.config
    }
}
