//! Configuration loading and management for the Income Accrual Engine.
//!
//! This module loads the engine settings from YAML: the semi-annual payment
//! convention and the date range accepted for income sources.
//!
//! # Example
//!
//! ```no_run
//! use accrual_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Years accepted from {}", config.config().validation.min_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ArrearsConvention, EngineConfig, MAX_AMOUNT_CEILING, ValidationRules};
