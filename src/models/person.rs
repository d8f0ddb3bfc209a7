//! Income earner model.
//!
//! This module defines the [`Person`] struct: the salary, remote uplift and
//! superannuation inputs for one of up to two earners in a household.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents one income earner.
///
/// All figures are annual. A freshly created person has zero income and no
/// uplift, matching an empty input form.
///
/// # Example
///
/// ```
/// use household_tax_engine::models::Person;
/// use rust_decimal::Decimal;
///
/// let person = Person {
///     base_salary: Decimal::new(100_000, 0),
///     ..Person::default()
/// };
/// assert!(!person.salary_includes_guarantee);
/// assert_eq!(person.weeks_away, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Annual base salary.
    pub base_salary: Decimal,
    /// Whether `base_salary` is a package that already includes the
    /// superannuation guarantee.
    #[serde(default)]
    pub salary_includes_guarantee: bool,
    /// Weeks worked remotely during the year (0 to 52).
    #[serde(default)]
    pub weeks_away: Decimal,
    /// Remote uplift as a percentage of base salary (e.g., 25 for 25%).
    #[serde(default)]
    pub uplift_pct: Decimal,
    /// Whether the uplift counts as ordinary time earnings for the guarantee.
    #[serde(default)]
    pub uplift_is_ote: bool,
    /// Voluntary concessional (pre-tax) contributions on top of the guarantee.
    #[serde(default)]
    pub extra_concessional: Decimal,
    /// Reportable fringe benefits amount.
    #[serde(default)]
    pub reportable_fringe_benefits: Decimal,
}
