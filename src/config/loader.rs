//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate tables
//! from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    IncomeTaxConfig, LevyThresholds, MedicareConfig, SuperannuationConfig, TaxConfig,
    TaxYearMetadata,
};

/// Loads and provides access to a rate set.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/au_2024_25/
/// ├── tax_year.yaml        # Rate set metadata
/// ├── income_tax.yaml      # Progressive bracket table
/// ├── medicare.yaml        # Levy rates and thresholds
/// └── superannuation.yaml  # Guarantee, fund tax and Division 293
/// ```
///
/// # Example
///
/// ```no_run
/// use household_tax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/au_2024_25").unwrap();
/// println!("Loaded rates: {}", loader.config().metadata().label);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rate tables are inconsistent (see [`ConfigLoader::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;
        let income_tax = Self::load_yaml::<IncomeTaxConfig>(&path.join("income_tax.yaml"))?;
        let medicare = Self::load_yaml::<MedicareConfig>(&path.join("medicare.yaml"))?;
        let superannuation =
            Self::load_yaml::<SuperannuationConfig>(&path.join("superannuation.yaml"))?;

        let config = TaxConfig::new(metadata, income_tax.brackets, medicare, superannuation);
        Self::validate(&config)?;

        info!(
            tax_year = %config.metadata().label,
            brackets = config.brackets().len(),
            path = %path.display(),
            "Loaded tax configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: TaxConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
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

    /// Checks that a rate set can be evaluated by the pipeline.
    ///
    /// Brackets must start at zero with strictly increasing thresholds, every
    /// rate must lie in `[0, 1]` and every lower levy threshold must not exceed
    /// its upper threshold.
    pub fn validate(config: &TaxConfig) -> EngineResult<()> {
        let brackets = config.brackets();
        let first = brackets
            .first()
            .ok_or_else(|| invalid("income_tax.brackets", "at least one bracket is required"))?;
        if !first.threshold.is_zero() {
            return Err(invalid(
                "income_tax.brackets[0].threshold",
                format!("first bracket must start at 0, found {}", first.threshold),
            ));
        }
        for (i, pair) in brackets.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(invalid(
                    format!("income_tax.brackets[{}].threshold", i + 1),
                    "thresholds must be strictly increasing",
                ));
            }
        }
        for (i, bracket) in brackets.iter().enumerate() {
            check_rate(&format!("income_tax.brackets[{}].rate", i), bracket.rate)?;
        }

        let medicare = config.medicare();
        check_rate("medicare.rate", medicare.rate)?;
        check_rate("medicare.phase_in_rate", medicare.phase_in_rate)?;
        check_thresholds("medicare.individual", &medicare.individual)?;
        check_thresholds("medicare.family", &medicare.family)?;
        check_thresholds("medicare.per_child", &medicare.per_child)?;

        let superannuation = config.superannuation();
        check_rate("superannuation.guarantee_rate", superannuation.guarantee_rate)?;
        check_rate(
            "superannuation.contributions_tax_rate",
            superannuation.contributions_tax_rate,
        )?;
        check_rate(
            "superannuation.division_293.rate",
            superannuation.division_293.rate,
        )?;
        if superannuation.division_293.threshold < Decimal::ZERO {
            return Err(invalid(
                "superannuation.division_293.threshold",
                "threshold cannot be negative",
            ));
        }

        Ok(())
    }

    /// Returns the underlying rate set.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.into(),
        message: message.into(),
    }
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(field, format!("rate {} is outside [0, 1]", rate)));
    }
    Ok(())
}

fn check_thresholds(field: &str, thresholds: &LevyThresholds) -> EngineResult<()> {
    if thresholds.lower < Decimal::ZERO {
        return Err(invalid(format!("{}.lower", field), "threshold cannot be negative"));
    }
    if thresholds.lower > thresholds.upper {
        return Err(invalid(
            field,
            format!(
                "lower threshold {} exceeds upper threshold {}",
                thresholds.lower, thresholds.upper
            ),
        ));
    }
    Ok(())
}
