//! Per-person tax components.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three taxes paid by an individual for one scenario.
///
/// Contributions tax withheld inside a superannuation fund is not
/// a component: it is paid by the fund, not the person.
///
/// # Example
///
/// ```
/// use household_tax_engine::models::TaxComponents;
/// use rust_decimal::Decimal;
///
/// let components = TaxComponents {
///     income_tax: Decimal::new(20_788, 0),
///     medicare_levy: Decimal::new(2_000, 0),
///     division_293: Decimal::ZERO,
/// };
/// assert_eq!(components.total(), Decimal::new(22_788, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponents {
    /// Progressive income tax.
    pub income_tax: Decimal,
    /// Medicare levy (the person's share, for couples).
    pub medicare_levy: Decimal,
    /// Division 293 additional tax on concessional contributions.
    pub division_293: Decimal,
}

impl TaxComponents {
    /// Sum of all three components.
    pub fn total(&self) -> Decimal {
        self.income_tax + self.medicare_levy + self.division_293
    }
}
