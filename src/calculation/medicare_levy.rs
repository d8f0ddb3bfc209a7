//! Medicare levy calculation functionality.
//!
//! This module applies the individual or family threshold regime to a levy
//! test income (taxable income plus reportable fringe benefits), including
//! the linear phase-in between the lower and upper thresholds.
//!
//! For couples the levy is computed once on the combined test income against
//! the family thresholds and then allocated between the two persons in
//! proportion to their taxable incomes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{LevyThresholds, MedicareConfig};
use crate::models::AuditStep;

use super::display_amount;

/// Decimal places kept on a person's share of the family levy.
const SHARE_DECIMAL_PLACES: u32 = 12;

/// Which part of the levy schedule a test income falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevyZone {
    /// At or below the lower threshold: no levy.
    Exempt,
    /// Between the thresholds: phase-in rate on the excess over the lower threshold.
    PhaseIn,
    /// At or above the upper threshold: full rate on taxable income.
    Full,
}

/// The income figures the levy is assessed on for one party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevyParty {
    /// Taxable income. Negative values count as zero.
    pub taxable_income: Decimal,
    /// Reportable fringe benefits. Negative values count as zero.
    pub fringe_benefits: Decimal,
}

impl LevyParty {
    /// Taxable income floored at zero.
    pub fn levy_taxable_income(&self) -> Decimal {
        self.taxable_income.max(Decimal::ZERO)
    }

    /// Taxable income plus reportable fringe benefits.
    pub fn test_income(&self) -> Decimal {
        self.levy_taxable_income() + self.fringe_benefits.max(Decimal::ZERO)
    }
}

/// The result of an individual levy calculation.
#[derive(Debug, Clone)]
pub struct MedicareLevyResult {
    /// Levy payable.
    pub levy: Decimal,
    /// The schedule zone the test income fell in.
    pub zone: LevyZone,
    /// Taxable income plus fringe benefits.
    pub test_income: Decimal,
    /// The thresholds applied.
    pub thresholds: LevyThresholds,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of a family levy calculation.
#[derive(Debug, Clone)]
pub struct FamilyLevyResult {
    /// Levy payable by the household as a whole.
    pub household_levy: Decimal,
    /// The first person's share.
    pub share_a: Decimal,
    /// The second person's share.
    pub share_b: Decimal,
    /// The schedule zone the combined test income fell in.
    pub zone: LevyZone,
    /// Combined test income.
    pub test_income: Decimal,
    /// The family thresholds applied, including child increments.
    pub thresholds: LevyThresholds,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the family thresholds for a number of dependent children.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::family_thresholds;
/// use household_tax_engine::config::{LevyThresholds, MedicareConfig};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let config = MedicareConfig {
///     rate: dec("0.02"),
///     phase_in_rate: dec("0.10"),
///     individual: LevyThresholds { lower: dec("27222"), upper: dec("34027") },
///     family: LevyThresholds { lower: dec("45907"), upper: dec("57383") },
///     per_child: LevyThresholds { lower: dec("4216"), upper: dec("5270") },
/// };
///
/// let thresholds = family_thresholds(&config, 2);
/// assert_eq!(thresholds.lower, dec("54339"));
/// assert_eq!(thresholds.upper, dec("67923"));
/// ```
pub fn family_thresholds(config: &MedicareConfig, dependent_children: u32) -> LevyThresholds {
    let children = Decimal::from(dependent_children);
    LevyThresholds {
        lower: config.family.lower + config.per_child.lower * children,
        upper: config.family.upper + config.per_child.upper * children,
    }
}

/// Returns the levy for a test income against a pair of thresholds.
///
/// Below the upper threshold the levy is the phase-in rate on the excess of
/// test income over the lower threshold. From the upper threshold the full
/// rate applies to taxable income only, not to fringe benefits.
pub fn levy_on_test_income(
    test_income: Decimal,
    taxable_income: Decimal,
    thresholds: &LevyThresholds,
    config: &MedicareConfig,
) -> (Decimal, LevyZone) {
    if test_income <= thresholds.lower {
        (Decimal::ZERO, LevyZone::Exempt)
    } else if test_income < thresholds.upper {
        (
            config.phase_in_rate * (test_income - thresholds.lower),
            LevyZone::PhaseIn,
        )
    } else {
        (
            config.rate * taxable_income.max(Decimal::ZERO),
            LevyZone::Full,
        )
    }
}

/// Splits a household levy in proportion to each person's taxable income.
///
/// Negative taxable incomes count as zero. When combined taxable income is
/// zero both shares are zero. Otherwise the shares sum exactly to `levy`.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::allocate_family_levy;
/// use rust_decimal::Decimal;
///
/// let (a, b) = allocate_family_levy(
///     Decimal::new(3_000, 0),
///     Decimal::new(100_000, 0),
///     Decimal::new(50_000, 0),
/// );
/// assert_eq!(a, Decimal::new(2_000, 0));
/// assert_eq!(b, Decimal::new(1_000, 0));
/// ```
pub fn allocate_family_levy(
    levy: Decimal,
    taxable_a: Decimal,
    taxable_b: Decimal,
) -> (Decimal, Decimal) {
    let a = taxable_a.max(Decimal::ZERO);
    let b = taxable_b.max(Decimal::ZERO);
    let combined = a + b;
    if combined.is_zero() {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    // Ratio first: `levy * a` can exceed the Decimal range for large incomes.
    // Rounded so the remainder is exact and the shares sum to `levy`.
    let share_a = (levy * (a / combined)).round_dp(SHARE_DECIMAL_PLACES);
    (share_a, levy - share_a)
}

fn zone_reasoning(
    zone: LevyZone,
    test_income: Decimal,
    taxable_income: Decimal,
    thresholds: &LevyThresholds,
    config: &MedicareConfig,
    levy: Decimal,
) -> String {
    match zone {
        LevyZone::Exempt => format!(
            "Test income ${} is at or below lower threshold ${}; no levy",
            display_amount(test_income),
            display_amount(thresholds.lower)
        ),
        LevyZone::PhaseIn => format!(
            "Test income ${} is in the phase-in zone: {} x (${} - ${}) = ${}",
            display_amount(test_income),
            config.phase_in_rate.normalize(),
            display_amount(test_income),
            display_amount(thresholds.lower),
            display_amount(levy)
        ),
        LevyZone::Full => format!(
            "Test income ${} reaches upper threshold ${}: {} x ${} taxable = ${}",
            display_amount(test_income),
            display_amount(thresholds.upper),
            config.rate.normalize(),
            display_amount(taxable_income),
            display_amount(levy)
        ),
    }
}

fn zone_name(zone: LevyZone) -> &'static str {
    match zone {
        LevyZone::Exempt => "exempt",
        LevyZone::PhaseIn => "phase_in",
        LevyZone::Full => "full",
    }
}

/// Calculates the Medicare levy for a single person.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::{calculate_individual_levy, LevyParty, LevyZone};
/// use household_tax_engine::config::{LevyThresholds, MedicareConfig};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let config = MedicareConfig {
///     rate: dec("0.02"),
///     phase_in_rate: dec("0.10"),
///     individual: LevyThresholds { lower: dec("27222"), upper: dec("34027") },
///     family: LevyThresholds { lower: dec("45907"), upper: dec("57383") },
///     per_child: LevyThresholds { lower: dec("4216"), upper: dec("5270") },
/// };
///
/// let party = LevyParty { taxable_income: dec("100000"), fringe_benefits: dec("0") };
/// let result = calculate_individual_levy(&party, &config, 1);
/// assert_eq!(result.zone, LevyZone::Full);
/// assert_eq!(result.levy, dec("2000"));
/// ```
pub fn calculate_individual_levy(
    party: &LevyParty,
    config: &MedicareConfig,
    step_number: u32,
) -> MedicareLevyResult {
    let thresholds = config.individual;
    let test_income = party.test_income();
    let taxable_income = party.levy_taxable_income();
    let (levy, zone) = levy_on_test_income(test_income, taxable_income, &thresholds, config);

    let audit_step = AuditStep {
        step_number,
        rule_id: "medicare_levy_individual".to_string(),
        rule_name: "Medicare Levy (Individual)".to_string(),
        legislation_ref: "Medicare Levy Act 1986 s 7".to_string(),
        input: serde_json::json!({
            "taxable_income": display_amount(party.taxable_income),
            "fringe_benefits": display_amount(party.fringe_benefits),
            "lower_threshold": display_amount(thresholds.lower),
            "upper_threshold": display_amount(thresholds.upper)
        }),
        output: serde_json::json!({
            "test_income": display_amount(test_income),
            "zone": zone_name(zone),
            "levy": display_amount(levy)
        }),
        reasoning: zone_reasoning(zone, test_income, taxable_income, &thresholds, config, levy),
    };

    MedicareLevyResult {
        levy,
        zone,
        test_income,
        thresholds,
        audit_step,
    }
}

/// Calculates the Medicare levy for a couple.
///
/// The phase-in and thresholds apply to the combined test income, so the
/// levy is computed once for the household and then allocated by taxable
/// income share (not test income share).
///
/// # Arguments
///
/// * `a` - The first person's levy incomes
/// * `b` - The second person's levy incomes
/// * `dependent_children` - Number of dependent children for threshold increments
/// * `config` - Levy rates and thresholds
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_family_levy(
    a: &LevyParty,
    b: &LevyParty,
    dependent_children: u32,
    config: &MedicareConfig,
    step_number: u32,
) -> FamilyLevyResult {
    let thresholds = family_thresholds(config, dependent_children);
    let test_income = a.test_income() + b.test_income();
    let taxable_income = a.levy_taxable_income() + b.levy_taxable_income();
    let (household_levy, zone) =
        levy_on_test_income(test_income, taxable_income, &thresholds, config);
    let (share_a, share_b) =
        allocate_family_levy(household_levy, a.taxable_income, b.taxable_income);

    let mut reasoning =
        zone_reasoning(zone, test_income, taxable_income, &thresholds, config, household_levy);
    if !household_levy.is_zero() {
        reasoning.push_str(&format!(
            "; split by taxable income: A ${}, B ${}",
            display_amount(share_a),
            display_amount(share_b)
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "medicare_levy_family".to_string(),
        rule_name: "Medicare Levy (Family)".to_string(),
        legislation_ref: "Medicare Levy Act 1986 s 8".to_string(),
        input: serde_json::json!({
            "taxable_income_a": display_amount(a.taxable_income),
            "taxable_income_b": display_amount(b.taxable_income),
            "fringe_benefits_a": display_amount(a.fringe_benefits),
            "fringe_benefits_b": display_amount(b.fringe_benefits),
            "dependent_children": dependent_children,
            "lower_threshold": display_amount(thresholds.lower),
            "upper_threshold": display_amount(thresholds.upper)
        }),
        output: serde_json::json!({
            "test_income": display_amount(test_income),
            "zone": zone_name(zone),
            "household_levy": display_amount(household_levy),
            "share_a": display_amount(share_a),
            "share_b": display_amount(share_b)
        }),
        reasoning,
    };

    FamilyLevyResult {
        household_levy,
        share_a,
        share_b,
        zone,
        test_income,
        thresholds,
        audit_step,
    }
}
