//! Superannuation contribution functionality.
//!
//! This module calculates the employer guarantee contribution, total
//! concessional contributions and the contributions tax withheld by the fund.

use rust_decimal::Decimal;

use crate::config::SuperannuationConfig;
use crate::models::{AuditStep, Person, SuperannuationBreakdown};

use super::display_amount;
use super::income_projection::IncomeProjection;

/// The result of calculating superannuation contributions.
#[derive(Debug, Clone)]
pub struct SuperannuationResult {
    /// Contribution figures.
    pub breakdown: SuperannuationBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the superannuation guarantee contribution.
///
/// The guarantee applies to the OTE base, plus the uplift when the uplift
/// counts as ordinary time earnings. A negative earnings base yields zero.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::guarantee_contribution;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("0.12").unwrap();
/// let sg = guarantee_contribution(Decimal::new(100_000, 0), Decimal::new(10_000, 0), false, rate);
/// assert_eq!(sg, Decimal::new(12_000, 0));
/// ```
pub fn guarantee_contribution(
    base_ote: Decimal,
    uplift: Decimal,
    uplift_is_ote: bool,
    guarantee_rate: Decimal,
) -> Decimal {
    let ote_uplift = if uplift_is_ote { uplift } else { Decimal::ZERO };
    (base_ote + ote_uplift).max(Decimal::ZERO) * guarantee_rate
}

/// Calculates a person's concessional contributions and fund tax.
///
/// Contributions tax is reported for information only. It is paid inside the
/// fund and is never part of the person's total tax.
///
/// # Arguments
///
/// * `projection` - The person's projected salary
/// * `person` - The person, for the uplift flag and voluntary contributions
/// * `config` - Guarantee and contributions tax rates
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_superannuation(
    projection: &IncomeProjection,
    person: &Person,
    config: &SuperannuationConfig,
    step_number: u32,
) -> SuperannuationResult {
    let guarantee = guarantee_contribution(
        projection.base_ote,
        projection.uplift,
        person.uplift_is_ote,
        config.guarantee_rate,
    );
    let extra_concessional = person.extra_concessional.max(Decimal::ZERO);
    let total_concessional = guarantee + extra_concessional;
    let contributions_tax = total_concessional * config.contributions_tax_rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "superannuation".to_string(),
        rule_name: "Superannuation Contributions".to_string(),
        legislation_ref: "SGAA 1992 s 19; ITAA 1997 s 295-160".to_string(),
        input: serde_json::json!({
            "base_ote": display_amount(projection.base_ote),
            "uplift": display_amount(projection.uplift),
            "uplift_is_ote": person.uplift_is_ote,
            "guarantee_rate": config.guarantee_rate.normalize().to_string(),
            "extra_concessional": display_amount(person.extra_concessional)
        }),
        output: serde_json::json!({
            "guarantee": display_amount(guarantee),
            "total_concessional": display_amount(total_concessional),
            "contributions_tax": display_amount(contributions_tax)
        }),
        reasoning: format!(
            "${} guarantee + ${} voluntary = ${} concessional; fund withholds ${} (not personal tax)",
            display_amount(guarantee),
            display_amount(extra_concessional),
            display_amount(total_concessional),
            display_amount(contributions_tax)
        ),
    };

    SuperannuationResult {
        breakdown: SuperannuationBreakdown {
            guarantee,
            extra_concessional,
            total_concessional,
            contributions_tax,
        },
        audit_step,
    }
}
