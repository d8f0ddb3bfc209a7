//! Configuration types for tax calculation.
//!
//! This module contains the strongly-typed rate tables that are deserialized
//! from the YAML files of a rate directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the rate set.
///
/// The label is informational only; it never selects different rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearMetadata {
    /// The financial year label (e.g., "2024-25").
    pub label: String,
    /// A human-readable description of the rate set.
    pub description: String,
    /// URL to the published rates.
    pub source_url: String,
}

/// One step of a progressive income tax schedule.
///
/// The bracket applies from `threshold` up to the next bracket's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Income at which this marginal rate starts to apply.
    pub threshold: Decimal,
    /// The marginal rate (e.g., 0.30 for 30%).
    pub rate: Decimal,
}

/// Income tax configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// Brackets ordered from lowest threshold to highest.
    pub brackets: Vec<TaxBracket>,
}

/// A pair of Medicare levy thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevyThresholds {
    /// Test income at or below which no levy is payable.
    pub lower: Decimal,
    /// Test income at or above which the full levy is payable.
    pub upper: Decimal,
}

/// Medicare levy configuration from medicare.yaml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicareConfig {
    /// The full levy rate applied to taxable income (e.g., 0.02).
    pub rate: Decimal,
    /// The rate applied to test income above the lower threshold (e.g., 0.10).
    pub phase_in_rate: Decimal,
    /// Thresholds for a single person.
    pub individual: LevyThresholds,
    /// Base thresholds for a family, before dependent-child increments.
    pub family: LevyThresholds,
    /// Increments added to the family thresholds for each dependent child.
    pub per_child: LevyThresholds,
}

/// Division 293 configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division293Config {
    /// Division 293 income above which additional tax applies (e.g., 250,000).
    pub threshold: Decimal,
    /// Additional tax rate on the affected contributions (e.g., 0.15).
    pub rate: Decimal,
}

/// Superannuation configuration from superannuation.yaml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperannuationConfig {
    /// Superannuation guarantee rate applied to ordinary time earnings.
    pub guarantee_rate: Decimal,
    /// Flat tax withheld by the fund on concessional contributions.
    pub contributions_tax_rate: Decimal,
    /// Additional tax for high-income earners.
    pub division_293: Division293Config,
}

/// The complete rate set loaded from YAML files.
///
/// All rates and thresholds are fixed for the lifetime of a calculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxConfig {
    metadata: TaxYearMetadata,
    brackets: Vec<TaxBracket>,
    medicare: MedicareConfig,
    superannuation: SuperannuationConfig,
}

impl TaxConfig {
    /// Creates a new TaxConfig from its component parts.
    ///
    /// Brackets are sorted by threshold, lowest first.
    pub fn new(
        metadata: TaxYearMetadata,
        brackets: Vec<TaxBracket>,
        medicare: MedicareConfig,
        superannuation: SuperannuationConfig,
    ) -> Self {
        let mut sorted_brackets = brackets;
        sorted_brackets.sort_by(|a, b| a.threshold.cmp(&b.threshold));
        Self {
            metadata,
            brackets: sorted_brackets,
            medicare,
            superannuation,
        }
    }

    /// Returns the rate set metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the income tax brackets, lowest threshold first.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the Medicare levy configuration.
    pub fn medicare(&self) -> &MedicareConfig {
        &self.medicare
    }

    /// Returns the superannuation configuration.
    pub fn superannuation(&self) -> &SuperannuationConfig {
        &self.superannuation
    }

    /// Returns the Division 293 configuration.
    pub fn division_293(&self) -> &Division293Config {
        &self.superannuation.division_293
    }
}
