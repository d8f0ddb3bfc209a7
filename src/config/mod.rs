//! Configuration loading and management for the household tax engine.
//!
//! This module provides functionality to load a rate set from YAML files:
//! income tax brackets, Medicare levy thresholds, superannuation rates and
//! the Division 293 threshold.
//!
//! # Example
//!
//! ```no_run
//! use household_tax_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/au_2024_25").unwrap();
//! println!("Loaded rates for {}", loader.config().metadata().label);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Division293Config, IncomeTaxConfig, LevyThresholds, MedicareConfig, SuperannuationConfig,
    TaxBracket, TaxConfig, TaxYearMetadata,
};
