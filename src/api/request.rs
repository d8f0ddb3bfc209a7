//! Request types for the household tax engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint. Every numeric field is read leniently: numbers, numeric strings,
//! `null` and garbage are all accepted, and anything that is not a number
//! becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{Household, HouseholdInput, Investment, InvestmentType, Person};

/// Largest magnitude accepted for any numeric input.
pub const MAX_INPUT_MAGNITUDE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Coerces an arbitrary JSON value to a decimal.
///
/// Numbers are taken as written. Strings are trimmed and stripped of
/// thousands separators, currency signs and underscores before parsing,
/// with scientific notation accepted. Everything else is zero. The result
/// is clamped to plus or minus [`MAX_INPUT_MAGNITUDE`].
///
/// # Examples
///
/// ```
/// use household_tax_engine::api::coerce_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal(&json!("1,250.50")), Decimal::new(125_050, 2));
/// assert_eq!(coerce_decimal(&json!("1e3")), Decimal::new(1_000, 0));
/// assert_eq!(coerce_decimal(&json!("abc")), Decimal::ZERO);
/// assert_eq!(coerce_decimal(&json!(null)), Decimal::ZERO);
/// ```
pub fn coerce_decimal(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| !matches!(c, ',' | '$' | '_' | ' '))
                .collect();
            parse_decimal(&cleaned)
        }
        _ => None,
    };

    parsed
        .unwrap_or(Decimal::ZERO)
        .clamp(-MAX_INPUT_MAGNITUDE, MAX_INPUT_MAGNITUDE)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(&text.to_lowercase()))
        .ok()
}

/// Coerces an arbitrary JSON value to a flag.
///
/// Accepts booleans, numbers (non-zero is true) and the strings `true`,
/// `yes`, `y`, `on` and `1` in any case. Everything else is false.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(_) => !coerce_decimal(value).is_zero(),
        Value::String(text) => matches!(
            text.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "1"
        ),
        _ => false,
    }
}

/// Coerces an arbitrary JSON value to a non-negative whole count.
pub fn coerce_count(value: &Value) -> u32 {
    coerce_decimal(value)
        .floor()
        .max(Decimal::ZERO)
        .to_u32()
        .unwrap_or(u32::MAX)
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_flag(&value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_investment_type<'de, D>(deserializer: D) -> Result<InvestmentType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => {
            let normalised = text.trim().to_lowercase().replace(['-', ' '], "_");
            serde_json::from_value(Value::String(normalised)).unwrap_or_default()
        }
        _ => InvestmentType::Other,
    })
}

fn default_true() -> bool {
    true
}

fn default_ownership() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// Request body for the `/calculate` endpoint.
///
/// Only `person_a` is required. A missing household defaults to a couple
/// with no children, and a missing `person_b` or investment list is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Household settings.
    #[serde(default)]
    pub household: HouseholdRequest,
    /// The first earner.
    pub person_a: PersonRequest,
    /// The second earner. Ignored in single mode.
    #[serde(default)]
    pub person_b: PersonRequest,
    /// The household's investments.
    #[serde(default)]
    pub investments: Vec<InvestmentRequest>,
}

/// Household settings in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdRequest {
    /// Whether the household has two earners.
    #[serde(default = "default_true", deserialize_with = "lenient_flag")]
    pub is_couple: bool,
    /// Number of dependent children, floored to a whole number.
    #[serde(default, deserialize_with = "lenient_count")]
    pub dependent_children: u32,
    /// Tax-year label, echoed back unchanged.
    #[serde(default, deserialize_with = "lenient_text")]
    pub tax_year: String,
}

impl Default for HouseholdRequest {
    fn default() -> Self {
        Self {
            is_couple: true,
            dependent_children: 0,
            tax_year: String::new(),
        }
    }
}

/// One earner in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonRequest {
    /// Annual base salary or package.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub base_salary: Decimal,
    /// Whether `base_salary` already includes the guarantee.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub salary_includes_guarantee: bool,
    /// Weeks worked remotely.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub weeks_away: Decimal,
    /// Remote uplift percentage.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub uplift_pct: Decimal,
    /// Whether the uplift counts as ordinary time earnings.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub uplift_is_ote: bool,
    /// Voluntary concessional contributions.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub extra_concessional: Decimal,
    /// Reportable fringe benefits.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub reportable_fringe_benefits: Decimal,
}

/// One investment in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRequest {
    /// Display name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Investment type. Unknown values become `other`.
    #[serde(default, alias = "type", deserialize_with = "lenient_investment_type")]
    pub kind: InvestmentType,
    /// Annual gross income for non-property investments.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gross_income: Decimal,
    /// Weekly rent for property.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rent_per_week: Decimal,
    /// Weeks the property was vacant.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub vacancy_weeks: Decimal,
    /// Deductible interest.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub interest: Decimal,
    /// Other deductible costs.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub other_deductions: Decimal,
    /// The first person's ownership percentage.
    #[serde(default = "default_ownership", deserialize_with = "lenient_decimal")]
    pub ownership_pct: Decimal,
}

impl From<HouseholdRequest> for Household {
    fn from(req: HouseholdRequest) -> Self {
        Household {
            is_couple: req.is_couple,
            dependent_children: req.dependent_children,
            tax_year: req.tax_year,
        }
    }
}

impl From<PersonRequest> for Person {
    fn from(req: PersonRequest) -> Self {
        Person {
            base_salary: req.base_salary,
            salary_includes_guarantee: req.salary_includes_guarantee,
            weeks_away: req.weeks_away,
            uplift_pct: req.uplift_pct,
            uplift_is_ote: req.uplift_is_ote,
            extra_concessional: req.extra_concessional,
            reportable_fringe_benefits: req.reportable_fringe_benefits,
        }
    }
}

impl From<InvestmentRequest> for Investment {
    fn from(req: InvestmentRequest) -> Self {
        Investment {
            name: req.name,
            kind: req.kind,
            gross_income: req.gross_income,
            rent_per_week: req.rent_per_week,
            vacancy_weeks: req.vacancy_weeks,
            interest: req.interest,
            other_deductions: req.other_deductions,
            ownership_pct: req.ownership_pct,
        }
    }
}

impl From<CalculationRequest> for HouseholdInput {
    fn from(req: CalculationRequest) -> Self {
        HouseholdInput {
            household: req.household.into(),
            person_a: req.person_a.into(),
            person_b: req.person_b.into(),
            investments: req.investments.into_iter().map(Into::into).collect(),
        }
    }
}
