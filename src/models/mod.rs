//! Core data models for the household tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod household;
mod investment;
mod person;
mod tax_components;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, HouseholdCalculation, HouseholdTotals,
    InvestmentPosition, InvestmentTotals, OwnerShare, PersonResult, SuperannuationBreakdown,
};
pub use household::{Household, HouseholdInput};
pub use investment::{Investment, InvestmentType, WEEKS_PER_YEAR};
pub use person::Person;
pub use tax_components::TaxComponents;
