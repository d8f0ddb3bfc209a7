//! Household model and the immutable calculation input.
//!
//! This module contains the [`Household`] settings and [`HouseholdInput`], the
//! complete input set handed to the calculation pipeline once per pass.

use serde::{Deserialize, Serialize};

use super::{Investment, Person};

/// Household-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    /// Whether the household has two earners.
    pub is_couple: bool,
    /// Number of dependent children.
    #[serde(default)]
    pub dependent_children: u32,
    /// Tax-year label. Informational only; it never selects rates.
    #[serde(default)]
    pub tax_year: String,
}

impl Default for Household {
    fn default() -> Self {
        Self {
            is_couple: true,
            dependent_children: 0,
            tax_year: String::new(),
        }
    }
}

/// The complete input set for one calculation pass.
///
/// Constructed once from validated inputs and passed by reference into
/// [`calculate_household`](crate::calculation::calculate_household). In single
/// mode `person_b` is ignored.
///
/// # Example
///
/// ```
/// use household_tax_engine::models::{Household, HouseholdInput, Person};
/// use rust_decimal::Decimal;
///
/// let input = HouseholdInput {
///     household: Household { is_couple: false, ..Household::default() },
///     person_a: Person { base_salary: Decimal::new(100_000, 0), ..Person::default() },
///     person_b: Person::default(),
///     investments: vec![],
/// };
/// assert!(!input.household.is_couple);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdInput {
    /// Household settings.
    pub household: Household,
    /// The first earner.
    pub person_a: Person,
    /// The second earner (couple mode only).
    #[serde(default)]
    pub person_b: Person,
    /// Investments held by the household.
    #[serde(default)]
    pub investments: Vec<Investment>,
}
