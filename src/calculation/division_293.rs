//! Division 293 tax functionality.
//!
//! This module calculates the additional tax on concessional contributions
//! for people whose Division 293 income exceeds the threshold.

use rust_decimal::Decimal;

use crate::config::Division293Config;
use crate::models::AuditStep;

use super::display_amount;

/// The result of calculating Division 293 tax.
#[derive(Debug, Clone)]
pub struct Division293Result {
    /// Additional tax payable.
    pub tax: Decimal,
    /// Taxable income plus fringe benefits plus concessional contributions.
    pub division_293_income: Decimal,
    /// Division 293 income above the threshold (zero if below).
    pub excess: Decimal,
    /// Contributions the tax was charged on: the lesser of contributions and excess.
    pub taxed_contributions: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates Division 293 tax for one person.
///
/// The tax is the Division 293 rate on the lesser of the concessional
/// contributions and the excess over the threshold, so it can never exceed
/// the rate applied to the contributions themselves.
///
/// # Arguments
///
/// * `taxable_income` - The person's taxable income
/// * `fringe_benefits` - Reportable fringe benefits
/// * `concessional_contributions` - Total concessional contributions
/// * `config` - Threshold and rate
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::calculate_division_293;
/// use household_tax_engine::config::Division293Config;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = Division293Config {
///     threshold: Decimal::new(250_000, 0),
///     rate: Decimal::from_str("0.15").unwrap(),
/// };
///
/// let result = calculate_division_293(
///     Decimal::new(260_000, 0),
///     Decimal::ZERO,
///     Decimal::new(30_000, 0),
///     &config,
///     1,
/// );
/// assert_eq!(result.excess, Decimal::new(40_000, 0));
/// assert_eq!(result.tax, Decimal::new(4_500, 0));
/// ```
pub fn calculate_division_293(
    taxable_income: Decimal,
    fringe_benefits: Decimal,
    concessional_contributions: Decimal,
    config: &Division293Config,
    step_number: u32,
) -> Division293Result {
    let contributions = concessional_contributions.max(Decimal::ZERO);
    let division_293_income = taxable_income + fringe_benefits + contributions;
    let excess = (division_293_income - config.threshold).max(Decimal::ZERO);
    let taxed_contributions = contributions.min(excess);
    let tax = config.rate * taxed_contributions;

    let reasoning = if excess.is_zero() {
        format!(
            "Division 293 income ${} does not exceed threshold ${}; no additional tax",
            display_amount(division_293_income),
            display_amount(config.threshold)
        )
    } else {
        format!(
            "Division 293 income ${} exceeds ${} by ${}; {} x min(${} contributions, ${} excess) = ${}",
            display_amount(division_293_income),
            display_amount(config.threshold),
            display_amount(excess),
            config.rate.normalize(),
            display_amount(contributions),
            display_amount(excess),
            display_amount(tax)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "division_293".to_string(),
        rule_name: "Division 293 Tax".to_string(),
        legislation_ref: "ITAA 1997 Div 293".to_string(),
        input: serde_json::json!({
            "taxable_income": display_amount(taxable_income),
            "fringe_benefits": display_amount(fringe_benefits),
            "concessional_contributions": display_amount(contributions),
            "threshold": display_amount(config.threshold)
        }),
        output: serde_json::json!({
            "division_293_income": display_amount(division_293_income),
            "excess": display_amount(excess),
            "tax": display_amount(tax)
        }),
        reasoning,
    };

    Division293Result {
        tax,
        division_293_income,
        excess,
        taxed_contributions,
        audit_step,
    }
}
