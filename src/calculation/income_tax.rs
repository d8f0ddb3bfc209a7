//! Progressive income tax functionality.
//!
//! This module applies a bracket table to a taxable income figure.

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::models::AuditStep;

use super::display_amount;

/// The result of calculating income tax, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Income tax payable.
    pub tax: Decimal,
    /// The marginal rate of the bracket containing the income.
    pub marginal_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the income tax on `taxable_income` for a bracket table.
///
/// Walks the brackets from lowest to highest: every fully consumed bracket
/// contributes its width times its rate, and the bracket containing the
/// income contributes the remainder times its rate. The result is continuous
/// at every threshold and non-decreasing in income. Negative income is
/// treated as zero. Brackets must be sorted by threshold.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::income_tax;
/// use household_tax_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = [
///     TaxBracket { threshold: dec("0"), rate: dec("0") },
///     TaxBracket { threshold: dec("18200"), rate: dec("0.16") },
///     TaxBracket { threshold: dec("45000"), rate: dec("0.30") },
///     TaxBracket { threshold: dec("135000"), rate: dec("0.37") },
///     TaxBracket { threshold: dec("190000"), rate: dec("0.45") },
/// ];
///
/// // (45,000 - 18,200) x 0.16 + (100,000 - 45,000) x 0.30
/// assert_eq!(income_tax(dec("100000"), &brackets), dec("20788"));
/// ```
pub fn income_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let income = taxable_income.max(Decimal::ZERO);
    let mut tax = Decimal::ZERO;

    for (i, bracket) in brackets.iter().enumerate() {
        if income <= bracket.threshold {
            break;
        }
        let top = match brackets.get(i + 1) {
            Some(next) => income.min(next.threshold),
            None => income,
        };
        tax += (top - bracket.threshold) * bracket.rate;
    }

    tax
}

/// Returns the marginal rate applying to the last dollar of `taxable_income`.
pub fn marginal_rate(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let income = taxable_income.max(Decimal::ZERO);
    brackets
        .iter()
        .rev()
        .find(|b| income > b.threshold)
        .map(|b| b.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Calculates income tax with an audit step.
///
/// # Arguments
///
/// * `taxable_income` - The taxable income (negative values are taxed as zero)
/// * `brackets` - The bracket table, lowest threshold first
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_income_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> IncomeTaxResult {
    let tax = income_tax(taxable_income, brackets);
    let marginal_rate = marginal_rate(taxable_income, brackets);

    let reasoning = if taxable_income <= Decimal::ZERO {
        format!(
            "Taxable income ${} is not positive; no income tax",
            display_amount(taxable_income)
        )
    } else {
        format!(
            "Tax on ${} = ${} (marginal rate {}%)",
            display_amount(taxable_income),
            display_amount(tax),
            (marginal_rate * Decimal::ONE_HUNDRED).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        legislation_ref: "Income Tax Rates Act 1986 Sch 7".to_string(),
        input: serde_json::json!({
            "taxable_income": display_amount(taxable_income),
            "brackets": brackets.len()
        }),
        output: serde_json::json!({
            "income_tax": display_amount(tax),
            "marginal_rate": marginal_rate.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        tax,
        marginal_rate,
        audit_step,
    }
}
