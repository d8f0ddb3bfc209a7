//! Investment model and related types.
//!
//! This module defines the [`Investment`] struct and [`InvestmentType`] enum
//! for income-producing assets held by one or both members of a household.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weeks in a year, used to annualise weekly rent.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// The kind of investment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// Rental property. Gross income is derived from weekly rent and vacancy.
    Property,
    /// Listed shares or managed funds.
    #[serde(alias = "shares", alias = "funds")]
    SharesOrFunds,
    /// Term deposit or savings account.
    #[serde(alias = "cash")]
    CashDeposit,
    /// Anything else.
    #[default]
    #[serde(other)]
    Other,
}

/// Represents one investment.
///
/// `ownership_pct` is the first person's share. The second person owns the
/// complement in couple mode; in single mode the first person owns it all.
///
/// # Example
///
/// ```
/// use household_tax_engine::models::{Investment, InvestmentType};
/// use rust_decimal::Decimal;
///
/// let property = Investment {
///     name: "Unit 4".to_string(),
///     kind: InvestmentType::Property,
///     rent_per_week: Decimal::new(500, 0),
///     vacancy_weeks: Decimal::new(4, 0),
///     ..Investment::default()
/// };
/// assert_eq!(property.annual_gross_income(), Decimal::new(24_000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    /// Display name of the investment.
    #[serde(default)]
    pub name: String,
    /// The kind of investment.
    #[serde(default)]
    pub kind: InvestmentType,
    /// Annual gross income. Ignored for property.
    #[serde(default)]
    pub gross_income: Decimal,
    /// Weekly rent (property only).
    #[serde(default)]
    pub rent_per_week: Decimal,
    /// Weeks the property is not let (property only).
    #[serde(default)]
    pub vacancy_weeks: Decimal,
    /// Deductible interest on borrowings.
    #[serde(default)]
    pub interest: Decimal,
    /// Other deductible costs.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// The first person's ownership share, as a percentage.
    #[serde(default = "default_ownership_pct")]
    pub ownership_pct: Decimal,
}

fn default_ownership_pct() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl Default for Investment {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: InvestmentType::default(),
            gross_income: Decimal::ZERO,
            rent_per_week: Decimal::ZERO,
            vacancy_weeks: Decimal::ZERO,
            interest: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            ownership_pct: default_ownership_pct(),
        }
    }
}

impl Investment {
    /// Returns true for rental property.
    pub fn is_property(&self) -> bool {
        self.kind == InvestmentType::Property
    }

    /// Annual gross income.
    ///
    /// Property income is always recomputed as rent per week times the weeks
    /// actually let, so a stale `gross_income` never leaks through.
    pub fn annual_gross_income(&self) -> Decimal {
        if self.is_property() {
            let vacancy = self.vacancy_weeks.clamp(Decimal::ZERO, WEEKS_PER_YEAR);
            let weeks_let = WEEKS_PER_YEAR - vacancy;
            self.rent_per_week * weeks_let
        } else {
            self.gross_income
        }
    }

    /// Total deductions: interest plus other deductible costs.
    pub fn deductions(&self) -> Decimal {
        self.interest + self.other_deductions
    }

    /// Gross income less deductions. Negative when the investment makes a loss.
    pub fn net_taxable(&self) -> Decimal {
        self.annual_gross_income() - self.deductions()
    }
}
