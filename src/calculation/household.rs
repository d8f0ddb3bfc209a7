//! Household pipeline and aggregation.
//!
//! This module runs the full calculation for one household: each person's
//! income projection and superannuation, the investment allocation, both
//! tax scenarios and the household totals.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, HouseholdCalculation, HouseholdInput, HouseholdTotals,
    OwnerShare, Person, PersonResult, TaxComponents, WEEKS_PER_YEAR,
};

use super::income_projection::{IncomeProjection, project_income};
use super::investments::aggregate_investments;
use super::superannuation::{SuperannuationResult, calculate_superannuation};
use super::tax_components::{NegativeGearingResult, PersonTaxInput, calculate_tax_scenarios};

/// Months in a year, for the monthly display figures.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

struct PersonStage {
    projection: IncomeProjection,
    superannuation: SuperannuationResult,
}

fn person_stage(person: &Person, config: &TaxConfig, step_number: u32) -> PersonStage {
    let superannuation_config = config.superannuation();
    let projection = project_income(person, superannuation_config.guarantee_rate, step_number);
    let superannuation =
        calculate_superannuation(&projection, person, superannuation_config, step_number + 1);
    PersonStage {
        projection,
        superannuation,
    }
}

fn person_tax_input(stage: &PersonStage, person: &Person, share: &OwnerShare) -> PersonTaxInput {
    PersonTaxInput {
        total_salary: stage.projection.total_salary,
        investment_net_taxable: share.net_taxable,
        fringe_benefits: person.reportable_fringe_benefits,
        concessional_contributions: stage.superannuation.breakdown.total_concessional,
    }
}

fn person_result(
    stage: &PersonStage,
    share: &OwnerShare,
    tax: TaxComponents,
    negative_gearing: &NegativeGearingResult,
) -> PersonResult {
    let total_salary = stage.projection.total_salary;
    let total_tax = tax.total();
    let after_tax_income = (total_salary - total_tax).max(Decimal::ZERO);

    PersonResult {
        base_ote: stage.projection.base_ote,
        uplift: stage.projection.uplift,
        total_salary,
        superannuation: stage.superannuation.breakdown,
        investment_gross: share.gross,
        investment_net_taxable: share.net_taxable,
        taxable_income: total_salary + share.net_taxable,
        tax,
        total_tax,
        negative_gearing_benefit: negative_gearing.benefit,
        after_tax_income,
        monthly_after_tax_income: after_tax_income / MONTHS_PER_YEAR,
    }
}

fn warning(code: &str, message: String) -> AuditWarning {
    AuditWarning {
        code: code.to_string(),
        message,
        severity: "low".to_string(),
    }
}

fn person_warnings(label: &str, person: &Person, warnings: &mut Vec<AuditWarning>) {
    if person.weeks_away < Decimal::ZERO || person.weeks_away > WEEKS_PER_YEAR {
        warnings.push(warning(
            "WEEKS_AWAY_CLAMPED",
            format!(
                "Person {} weeks away {} clamped to the range 0 to 52",
                label, person.weeks_away
            ),
        ));
    }
    if person.uplift_pct < Decimal::ZERO {
        warnings.push(warning(
            "NEGATIVE_UPLIFT",
            format!(
                "Person {} uplift {}% treated as zero",
                label, person.uplift_pct
            ),
        ));
    }
    if person.extra_concessional < Decimal::ZERO {
        warnings.push(warning(
            "NEGATIVE_CONTRIBUTION",
            format!(
                "Person {} extra concessional contribution {} treated as zero",
                label, person.extra_concessional
            ),
        ));
    }
}

/// Lists the inputs that the pipeline silently clamps into range.
///
/// Warnings never change the result; they let a caller flag inputs that
/// were not used as given.
pub fn input_warnings(input: &HouseholdInput) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    person_warnings("A", &input.person_a, &mut warnings);
    if input.household.is_couple {
        person_warnings("B", &input.person_b, &mut warnings);
    }

    for investment in &input.investments {
        let pct = investment.ownership_pct;
        if input.household.is_couple && (pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED) {
            warnings.push(warning(
                "OWNERSHIP_CLAMPED",
                format!(
                    "Investment '{}' ownership {}% clamped to the range 0 to 100",
                    investment.name, pct
                ),
            ));
        }
        let vacancy = investment.vacancy_weeks;
        if investment.is_property() && (vacancy < Decimal::ZERO || vacancy > WEEKS_PER_YEAR) {
            warnings.push(warning(
                "VACANCY_CLAMPED",
                format!(
                    "Investment '{}' vacancy of {} weeks clamped to the range 0 to {}",
                    investment.name, vacancy, WEEKS_PER_YEAR
                ),
            ));
        }
    }

    warnings
}

/// Runs the complete household calculation.
///
/// In single mode person B is ignored entirely and every investment belongs
/// to person A. The result carries the audit steps of the actual scenario
/// in pipeline order, followed by one negative gearing step per person.
///
/// # Arguments
///
/// * `input` - The household's raw inputs
/// * `config` - The rate set for this pass
///
/// # Examples
///
/// ```no_run
/// use household_tax_engine::calculation::calculate_household;
/// use household_tax_engine::config::ConfigLoader;
/// use household_tax_engine::models::{Household, HouseholdInput, Person};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/au_2024_25").unwrap();
/// let input = HouseholdInput {
///     household: Household { is_couple: false, ..Household::default() },
///     person_a: Person { base_salary: Decimal::new(100_000, 0), ..Person::default() },
///     ..HouseholdInput::default()
/// };
///
/// let result = calculate_household(&input, loader.config());
/// assert_eq!(result.person_a.total_salary, Decimal::new(100_000, 0));
/// assert_eq!(result.person_a.tax.income_tax, Decimal::new(20_788, 0));
/// assert!(result.person_b.is_none());
/// ```
pub fn calculate_household(input: &HouseholdInput, config: &TaxConfig) -> HouseholdCalculation {
    let is_couple = input.household.is_couple;
    let dependent_children = input.household.dependent_children;
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let stage_a = person_stage(&input.person_a, config, step_number);
    steps.push(stage_a.projection.audit_step.clone());
    steps.push(stage_a.superannuation.audit_step.clone());
    step_number += 2;

    let stage_b = if is_couple {
        let stage = person_stage(&input.person_b, config, step_number);
        steps.push(stage.projection.audit_step.clone());
        steps.push(stage.superannuation.audit_step.clone());
        step_number += 2;
        Some(stage)
    } else {
        None
    };

    let investments = aggregate_investments(&input.investments, is_couple, step_number);
    steps.push(investments.audit_step.clone());
    step_number += 1;

    let share_a = investments.totals.owner_a;
    let share_b = investments.totals.owner_b;

    let tax_input_a = person_tax_input(&stage_a, &input.person_a, &share_a);
    let tax_input_b = stage_b
        .as_ref()
        .map(|stage| person_tax_input(stage, &input.person_b, &share_b));

    let scenarios = calculate_tax_scenarios(
        &tax_input_a,
        tax_input_b.as_ref(),
        dependent_children,
        config,
        step_number,
    );
    steps.extend(scenarios.audit_steps());

    let person_a = person_result(
        &stage_a,
        &share_a,
        scenarios.actual.person_a,
        &scenarios.negative_gearing_a,
    );

    let person_b = match (&stage_b, &scenarios.negative_gearing_b) {
        (Some(stage), Some(negative_gearing)) => Some(person_result(
            stage,
            &share_b,
            scenarios.actual.person_b.unwrap_or_default(),
            negative_gearing,
        )),
        _ => None,
    };

    let people: Vec<&PersonResult> = std::iter::once(&person_a).chain(person_b.as_ref()).collect();
    let sum = |f: fn(&PersonResult) -> Decimal| -> Decimal { people.iter().map(|p| f(p)).sum() };

    let after_tax_income = sum(|p| p.after_tax_income);
    let household_pay = after_tax_income + investments.totals.gross_total;

    let totals = HouseholdTotals {
        total_salary: sum(|p| p.total_salary),
        total_super: sum(|p| p.superannuation.guarantee + p.superannuation.extra_concessional),
        total_contributions_tax: sum(|p| p.superannuation.contributions_tax),
        taxable_income: sum(|p| p.taxable_income),
        total_tax: sum(|p| p.total_tax),
        negative_gearing_benefit: sum(|p| p.negative_gearing_benefit),
        after_tax_income,
        gross_investment_income: investments.totals.gross_total,
        net_investment_income: investments.totals.net_taxable_total,
        household_pay,
        household_pay_monthly: household_pay / MONTHS_PER_YEAR,
    };

    HouseholdCalculation {
        tax_year: input.household.tax_year.clone(),
        is_couple,
        dependent_children,
        person_a,
        person_b,
        investments: investments.positions,
        investment_totals: investments.totals,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings: input_warnings(input),
        },
    }
}
