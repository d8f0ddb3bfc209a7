//! Calculation logic for the household tax engine.
//!
//! This module contains the pure pipeline that turns a household's raw
//! inputs into tax and benefit figures: income projection, superannuation,
//! investment aggregation, income tax, the Medicare levy, Division 293 tax,
//! the negative gearing counterfactual and the household totals.

mod division_293;
mod household;
mod income_projection;
mod income_tax;
mod investments;
mod medicare_levy;
mod superannuation;
mod tax_components;

use rust_decimal::Decimal;

pub use division_293::{Division293Result, calculate_division_293};
pub use household::{MONTHS_PER_YEAR, calculate_household, input_warnings};
pub use income_projection::{IncomeProjection, base_ote, project_income, uplift_amount};
pub use income_tax::{IncomeTaxResult, calculate_income_tax, income_tax, marginal_rate};
pub use investments::{
    InvestmentAggregation, aggregate_investments, allocate, investment_position,
};
pub use medicare_levy::{
    FamilyLevyResult, LevyParty, LevyZone, MedicareLevyResult, allocate_family_levy,
    calculate_family_levy, calculate_individual_levy, family_thresholds, levy_on_test_income,
};
pub use superannuation::{SuperannuationResult, calculate_superannuation, guarantee_contribution};
pub use tax_components::{
    HouseholdTaxResult, NegativeGearingResult, PersonTaxInput, TaxScenarioResult, TaxableParty,
    calculate_tax_components, calculate_tax_scenarios, negative_gearing_benefit,
};

/// Formats an amount for audit output: two decimal places, trailing zeros dropped.
pub(crate) fn display_amount(amount: Decimal) -> String {
    amount.round_dp(2).normalize().to_string()
}
