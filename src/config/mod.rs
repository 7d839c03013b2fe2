//! Configuration loading and management for the Settlement Engine.
//!
//! This module provides functionality to load settlement policy from YAML files,
//! including the formula rates, notice-period rules and the clearance checklist.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Gratuity after {} years", config.settlement().gratuity.min_years);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClearanceConfig, GratuityPolicy, NoticePolicy, SettlementConfig, SettlementPolicy,
};
