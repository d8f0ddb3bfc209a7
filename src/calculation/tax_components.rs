//! Tax component orchestration and negative gearing.
//!
//! This module composes income tax, the Medicare levy and Division 293 into a
//! single "taxable income to tax components" pipeline, and evaluates that
//! pipeline twice per person to isolate the tax benefit of investment losses:
//! once with the actual net taxable investment allocation, and once with
//! losses suppressed (gains kept). The benefit is the difference.
//!
//! The double evaluation picks up every bracket and phase-in nonlinearity,
//! including a partner's share of the family levy shifting when one
//! person's taxable income changes.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxConfig;
use crate::models::{AuditStep, TaxComponents};

use super::display_amount;
use super::division_293::calculate_division_293;
use super::income_tax::calculate_income_tax;
use super::medicare_levy::{LevyParty, calculate_family_levy, calculate_individual_levy};

/// One person's inputs to the tax pipeline for a single scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxableParty {
    /// Taxable income for the scenario.
    pub taxable_income: Decimal,
    /// Reportable fringe benefits.
    pub fringe_benefits: Decimal,
    /// Total concessional contributions.
    pub concessional_contributions: Decimal,
}

impl TaxableParty {
    fn levy_party(&self) -> LevyParty {
        LevyParty {
            taxable_income: self.taxable_income,
            fringe_benefits: self.fringe_benefits,
        }
    }
}

/// One person's scenario-independent inputs.
///
/// Taxable income is derived per scenario from total salary and the net
/// taxable investment allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonTaxInput {
    /// Total salary (OTE base plus uplift).
    pub total_salary: Decimal,
    /// Allocated net taxable investment position. Negative for a loss.
    pub investment_net_taxable: Decimal,
    /// Reportable fringe benefits.
    pub fringe_benefits: Decimal,
    /// Total concessional contributions.
    pub concessional_contributions: Decimal,
}

impl PersonTaxInput {
    /// The actual scenario: investment losses reduce taxable income.
    pub fn actual(&self) -> TaxableParty {
        self.party(self.investment_net_taxable)
    }

    /// The loss-free scenario: losses are suppressed but gains are kept.
    pub fn loss_free(&self) -> TaxableParty {
        self.party(self.investment_net_taxable.max(Decimal::ZERO))
    }

    fn party(&self, investment_net_taxable: Decimal) -> TaxableParty {
        TaxableParty {
            taxable_income: self.total_salary + investment_net_taxable,
            fringe_benefits: self.fringe_benefits,
            concessional_contributions: self.concessional_contributions,
        }
    }
}

/// Tax components for everyone in the household for one scenario.
#[derive(Debug, Clone)]
pub struct HouseholdTaxResult {
    /// The first person's components.
    pub person_a: TaxComponents,
    /// The second person's components (couple mode only).
    pub person_b: Option<TaxComponents>,
    /// The Medicare levy before any allocation between persons.
    pub household_levy: Decimal,
    /// Audit steps in pipeline order.
    pub audit_steps: Vec<AuditStep>,
}

/// The negative gearing benefit for one person.
#[derive(Debug, Clone)]
pub struct NegativeGearingResult {
    /// Components with investment losses deducted.
    pub actual: TaxComponents,
    /// Components with investment losses suppressed.
    pub loss_free: TaxComponents,
    /// Tax saved by deducting the losses; never negative.
    pub benefit: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Both scenarios evaluated for the household.
#[derive(Debug, Clone)]
pub struct TaxScenarioResult {
    /// The actual scenario.
    pub actual: HouseholdTaxResult,
    /// The first person's negative gearing benefit.
    pub negative_gearing_a: NegativeGearingResult,
    /// The second person's negative gearing benefit (couple mode only).
    pub negative_gearing_b: Option<NegativeGearingResult>,
}

impl TaxScenarioResult {
    /// All audit steps: the actual scenario followed by the benefit steps.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        let mut steps = self.actual.audit_steps.clone();
        steps.push(self.negative_gearing_a.audit_step.clone());
        if let Some(ng) = &self.negative_gearing_b {
            steps.push(ng.audit_step.clone());
        }
        steps
    }
}

/// Runs income tax, Medicare levy and Division 293 for one scenario.
///
/// With a second person the family levy regime applies and the household
/// levy is shared by taxable income. Without one, the individual regime
/// applies and dependent children are ignored.
///
/// # Examples
///
/// ```no_run
/// use household_tax_engine::calculation::{calculate_tax_components, TaxableParty};
/// use household_tax_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/au_2024_25").unwrap();
/// let party = TaxableParty {
///     taxable_income: Decimal::new(100_000, 0),
///     ..TaxableParty::default()
/// };
///
/// let result = calculate_tax_components(&party, None, 0, loader.config(), 1);
/// assert_eq!(result.person_a.income_tax, Decimal::new(20_788, 0));
/// assert_eq!(result.person_a.medicare_levy, Decimal::new(2_000, 0));
/// ```
pub fn calculate_tax_components(
    a: &TaxableParty,
    b: Option<&TaxableParty>,
    dependent_children: u32,
    config: &TaxConfig,
    step_number: u32,
) -> HouseholdTaxResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step = step_number;

    let income_tax_a = calculate_income_tax(a.taxable_income, config.brackets(), step);
    steps.push(income_tax_a.audit_step);
    step += 1;

    let income_tax_b = b.map(|party| {
        let result = calculate_income_tax(party.taxable_income, config.brackets(), step);
        steps.push(result.audit_step);
        step += 1;
        result.tax
    });

    let (levy_a, levy_b, household_levy) = match b {
        Some(party_b) => {
            let family = calculate_family_levy(
                &a.levy_party(),
                &party_b.levy_party(),
                dependent_children,
                config.medicare(),
                step,
            );
            steps.push(family.audit_step);
            (family.share_a, Some(family.share_b), family.household_levy)
        }
        None => {
            let individual = calculate_individual_levy(&a.levy_party(), config.medicare(), step);
            steps.push(individual.audit_step);
            (individual.levy, None, individual.levy)
        }
    };
    step += 1;

    let div293_a = calculate_division_293(
        a.taxable_income,
        a.fringe_benefits,
        a.concessional_contributions,
        config.division_293(),
        step,
    );
    steps.push(div293_a.audit_step);
    step += 1;

    let div293_b = b.map(|party| {
        let result = calculate_division_293(
            party.taxable_income,
            party.fringe_benefits,
            party.concessional_contributions,
            config.division_293(),
            step,
        );
        steps.push(result.audit_step);
        result.tax
    });

    let person_a = TaxComponents {
        income_tax: income_tax_a.tax,
        medicare_levy: levy_a,
        division_293: div293_a.tax,
    };

    let person_b = match (income_tax_b, levy_b, div293_b) {
        (Some(income_tax), Some(medicare_levy), Some(division_293)) => Some(TaxComponents {
            income_tax,
            medicare_levy,
            division_293,
        }),
        _ => None,
    };

    HouseholdTaxResult {
        person_a,
        person_b,
        household_levy,
        audit_steps: steps,
    }
}

/// Returns the tax saved by deducting investment losses.
///
/// Zero whenever the loss-free scenario costs no more than the actual one.
pub fn negative_gearing_benefit(actual: &TaxComponents, loss_free: &TaxComponents) -> Decimal {
    (loss_free.total() - actual.total()).max(Decimal::ZERO)
}

fn negative_gearing_result(
    label: &str,
    input: &PersonTaxInput,
    actual: TaxComponents,
    loss_free: TaxComponents,
    step_number: u32,
) -> NegativeGearingResult {
    let benefit = negative_gearing_benefit(&actual, &loss_free);

    debug!(
        person = label,
        investment_net_taxable = %input.investment_net_taxable,
        actual_tax = %actual.total(),
        loss_free_tax = %loss_free.total(),
        benefit = %benefit,
        "Negative gearing counterfactual evaluated"
    );

    let reasoning = if input.investment_net_taxable >= Decimal::ZERO {
        format!(
            "Person {} has no investment loss (net ${}); no negative gearing benefit",
            label,
            display_amount(input.investment_net_taxable)
        )
    } else {
        format!(
            "Person {}: tax without ${} loss ${} - actual tax ${} = ${} benefit",
            label,
            display_amount(-input.investment_net_taxable),
            display_amount(loss_free.total()),
            display_amount(actual.total()),
            display_amount(benefit)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "negative_gearing".to_string(),
        rule_name: format!("Negative Gearing Benefit ({})", label),
        legislation_ref: "ITAA 1997 s 8-1".to_string(),
        input: serde_json::json!({
            "person": label,
            "investment_net_taxable": display_amount(input.investment_net_taxable),
            "actual_taxable_income": display_amount(input.actual().taxable_income),
            "loss_free_taxable_income": display_amount(input.loss_free().taxable_income)
        }),
        output: serde_json::json!({
            "actual_tax": display_amount(actual.total()),
            "loss_free_tax": display_amount(loss_free.total()),
            "benefit": display_amount(benefit)
        }),
        reasoning,
    };

    NegativeGearingResult {
        actual,
        loss_free,
        benefit,
        audit_step,
    }
}

/// Evaluates the actual scenario and each person's loss-free counterfactual.
///
/// A person's counterfactual replaces only that person's taxable income; the
/// partner keeps their actual figures, and the person's components are read
/// from the re-run household pipeline.
///
/// # Arguments
///
/// * `a` - The first person's inputs
/// * `b` - The second person's inputs (couple mode only)
/// * `dependent_children` - Number of dependent children for the family levy
/// * `config` - The rate set
/// * `step_number` - The step number of the first audit step
pub fn calculate_tax_scenarios(
    a: &PersonTaxInput,
    b: Option<&PersonTaxInput>,
    dependent_children: u32,
    config: &TaxConfig,
    step_number: u32,
) -> TaxScenarioResult {
    let actual_a = a.actual();
    let actual_b = b.map(PersonTaxInput::actual);

    let actual = calculate_tax_components(
        &actual_a,
        actual_b.as_ref(),
        dependent_children,
        config,
        step_number,
    );
    let mut step = step_number + actual.audit_steps.len() as u32;

    let loss_free_a = calculate_tax_components(
        &a.loss_free(),
        actual_b.as_ref(),
        dependent_children,
        config,
        step,
    );
    let negative_gearing_a =
        negative_gearing_result("A", a, actual.person_a, loss_free_a.person_a, step);
    step += 1;

    let negative_gearing_b = b.map(|input_b| {
        let loss_free_b = calculate_tax_components(
            &actual_a,
            Some(&input_b.loss_free()),
            dependent_children,
            config,
            step,
        );
        negative_gearing_result(
            "B",
            input_b,
            actual.person_b.unwrap_or_default(),
            loss_free_b.person_b.unwrap_or_default(),
            step,
        )
    });

    TaxScenarioResult {
        actual,
        negative_gearing_a,
        negative_gearing_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> TaxConfig {
        ConfigLoader::load("./config/au_2024_25")
            .expect("Failed to load config")
            .config()
            .clone()
    }

    fn input(salary: &str, net_taxable: &str) -> PersonTaxInput {
        PersonTaxInput {
            total_salary: dec(salary),
            investment_net_taxable: dec(net_taxable),
            fringe_benefits: Decimal::ZERO,
            concessional_contributions: dec(salary) * dec("0.12"),
        }
    }

    #[test]
    fn test_single_components_for_100000() {
        let party = TaxableParty {
            taxable_income: dec("100000"),
            fringe_benefits: Decimal::ZERO,
            concessional_contributions: dec("12000"),
        };

        let result = calculate_tax_components(&party, None, 0, &config(), 1);
        assert_eq!(result.person_a.income_tax, dec("20788"));
        assert_eq!(result.person_a.medicare_levy, dec("2000"));
        assert_eq!(result.person_a.division_293, Decimal::ZERO);
        assert_eq!(result.person_a.total(), dec("22788"));
        assert!(result.person_b.is_none());

        let rule_ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec!["income_tax", "medicare_levy_individual", "division_293"]
        );
    }

    #[test]
    fn test_couple_components_use_family_levy() {
        let a = TaxableParty {
            taxable_income: dec("150000"),
            ..TaxableParty::default()
        };
        let b = TaxableParty {
            taxable_income: dec("50000"),
            ..TaxableParty::default()
        };

        let result = calculate_tax_components(&a, Some(&b), 0, &config(), 1);
        let person_b = result.person_b.unwrap();
        assert_eq!(result.household_levy, dec("4000"));
        assert_eq!(result.person_a.medicare_levy, dec("3000"));
        assert_eq!(person_b.medicare_levy, dec("1000"));
        assert_eq!(person_b.income_tax, dec("5788"));

        let step_numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_dependents_ignored_for_single() {
        let party = TaxableParty {
            taxable_income: dec("30000"),
            ..TaxableParty::default()
        };
        let without = calculate_tax_components(&party, None, 0, &config(), 1);
        let with_kids = calculate_tax_components(&party, None, 3, &config(), 1);
        assert_eq!(without.person_a, with_kids.person_a);
    }

    #[test]
    fn test_loss_reduces_tax_and_yields_benefit() {
        // 10,000 loss at a 30% marginal rate plus 2% levy
        let result = calculate_tax_scenarios(&input("100000", "-10000"), None, 0, &config(), 1);

        assert_eq!(result.actual.person_a.income_tax, dec("17788"));
        assert_eq!(result.negative_gearing_a.loss_free.income_tax, dec("20788"));
        assert_eq!(result.negative_gearing_a.benefit, dec("3200"));
        assert!(result.negative_gearing_b.is_none());
    }

    #[test]
    fn test_no_benefit_for_positive_investment_income() {
        let result = calculate_tax_scenarios(&input("100000", "5000"), None, 0, &config(), 1);
        assert_eq!(result.negative_gearing_a.benefit, Decimal::ZERO);
        assert_eq!(
            result.negative_gearing_a.actual,
            result.negative_gearing_a.loss_free
        );
        assert!(
            result
                .negative_gearing_a
                .audit_step
                .reasoning
                .contains("no investment loss")
        );
    }

    #[test]
    fn test_benefit_spans_bracket_boundary() {
        // Loss takes income from 50,000 to 40,000: 5,000 at 30% and 5,000 at 16%
        let result = calculate_tax_scenarios(&input("50000", "-10000"), None, 0, &config(), 1);
        let expected_income_tax_saving = dec("2300");
        let expected_levy_saving = dec("200");
        assert_eq!(
            result.negative_gearing_a.benefit,
            expected_income_tax_saving + expected_levy_saving
        );
    }

    #[test]
    fn test_loss_larger_than_salary_is_capped_by_tax_paid() {
        let result = calculate_tax_scenarios(&input("30000", "-50000"), None, 0, &config(), 1);
        assert_eq!(result.actual.person_a.income_tax, Decimal::ZERO);
        assert_eq!(result.actual.person_a.medicare_levy, Decimal::ZERO);
        assert_eq!(
            result.negative_gearing_a.benefit,
            result.negative_gearing_a.loss_free.total()
        );
    }

    #[test]
    fn test_couple_counterfactual_changes_only_one_person() {
        let a = input("120000", "-15000");
        let b = input("60000", "0");

        let result = calculate_tax_scenarios(&a, Some(&b), 0, &config(), 1);
        let ng_b = result.negative_gearing_b.as_ref().unwrap();
        assert!(result.negative_gearing_a.benefit > Decimal::ZERO);
        assert_eq!(ng_b.benefit, Decimal::ZERO);
        assert_eq!(
            result.negative_gearing_a.loss_free.income_tax,
            dec("26788")
        );
    }

    #[test]
    fn test_scenario_audit_steps_are_sequential() {
        let result =
            calculate_tax_scenarios(&input("90000", "-2000"), Some(&input("40000", "-2000")), 1, &config(), 3);
        let steps = result.audit_steps();
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(steps[5].rule_id, "negative_gearing");
        assert_eq!(steps[6].rule_name, "Negative Gearing Benefit (B)");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_benefit_non_negative_and_zero_without_loss(
            salary_a in 0i64..400_000,
            net_a in -120_000i64..60_000,
            salary_b in 0i64..400_000,
            net_b in -120_000i64..60_000,
            fringe_a in 0i64..20_000,
            children in 0u32..4,
            couple in any::<bool>()
        ) {
            let config = config();
            let a = PersonTaxInput {
                total_salary: Decimal::from(salary_a),
                investment_net_taxable: Decimal::from(net_a),
                fringe_benefits: Decimal::from(fringe_a),
                concessional_contributions: Decimal::from(salary_a) * dec("0.12"),
            };
            let b = PersonTaxInput {
                total_salary: Decimal::from(salary_b),
                investment_net_taxable: Decimal::from(net_b),
                fringe_benefits: Decimal::ZERO,
                concessional_contributions: Decimal::from(salary_b) * dec("0.12"),
            };
            let result = calculate_tax_scenarios(
                &a,
                if couple { Some(&b) } else { None },
                children,
                &config,
                1,
            );

            prop_assert!(result.negative_gearing_a.benefit >= Decimal::ZERO);
            if net_a >= 0 {
                prop_assert_eq!(result.negative_gearing_a.benefit, Decimal::ZERO);
            }
            if let Some(ng_b) = &result.negative_gearing_b {
                prop_assert!(ng_b.benefit >= Decimal::ZERO);
                if net_b >= 0 {
                    prop_assert_eq!(ng_b.benefit, Decimal::ZERO);
                }
            }
        }
    }
}
