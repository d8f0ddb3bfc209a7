//! Calculation result models for the household tax engine.
//!
//! This module contains the [`HouseholdCalculation`] type and its associated
//! structures that capture all outputs from a calculation pass: per-person
//! salary, superannuation and tax figures, investment allocations, household
//! totals and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{InvestmentType, TaxComponents};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the legislation behind this rule.
    pub legislation_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were silently clamped into range. They never
/// stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use household_tax_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps, in pipeline order.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Superannuation figures for one person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperannuationBreakdown {
    /// Employer superannuation guarantee contribution.
    pub guarantee: Decimal,
    /// Voluntary concessional contributions.
    pub extra_concessional: Decimal,
    /// Guarantee plus voluntary concessional contributions.
    pub total_concessional: Decimal,
    /// Contributions tax withheld by the fund. Informational only.
    pub contributions_tax: Decimal,
}

/// One owner's share of an investment figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerShare {
    /// Allocated gross income.
    pub gross: Decimal,
    /// Allocated net taxable position (negative for a loss).
    pub net_taxable: Decimal,
}

/// A single investment after gross income derivation and owner allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentPosition {
    /// Display name of the investment.
    pub name: String,
    /// The kind of investment.
    pub kind: InvestmentType,
    /// Annual gross income.
    pub gross_income: Decimal,
    /// Interest plus other deductions.
    pub deductions: Decimal,
    /// Gross income less deductions.
    pub net_taxable: Decimal,
    /// The first person's ownership share after clamping, as a percentage.
    pub ownership_pct: Decimal,
    /// Amounts allocated to the first person.
    pub owner_a: OwnerShare,
    /// Amounts allocated to the second person.
    pub owner_b: OwnerShare,
}

/// Household investment totals.
///
/// For both gross and net taxable, `owner_a + owner_b` equals the household
/// total exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentTotals {
    /// Total gross investment income.
    pub gross_total: Decimal,
    /// Total deductions.
    pub deductions_total: Decimal,
    /// Total net taxable position.
    pub net_taxable_total: Decimal,
    /// The first person's totals.
    pub owner_a: OwnerShare,
    /// The second person's totals.
    pub owner_b: OwnerShare,
}

/// All outputs for one person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResult {
    /// Ordinary-time-equivalent base salary.
    pub base_ote: Decimal,
    /// Remote uplift for the weeks worked away.
    pub uplift: Decimal,
    /// Base OTE plus uplift.
    pub total_salary: Decimal,
    /// Superannuation figures.
    pub superannuation: SuperannuationBreakdown,
    /// Allocated gross investment income.
    pub investment_gross: Decimal,
    /// Allocated net taxable investment position.
    pub investment_net_taxable: Decimal,
    /// Total salary plus allocated net taxable investment position.
    pub taxable_income: Decimal,
    /// Tax components for the actual scenario.
    pub tax: TaxComponents,
    /// Income tax plus Medicare levy plus Division 293.
    pub total_tax: Decimal,
    /// Tax saved by deducting investment losses.
    pub negative_gearing_benefit: Decimal,
    /// Total salary less total tax, floored at zero.
    pub after_tax_income: Decimal,
    /// After-tax income divided by twelve.
    pub monthly_after_tax_income: Decimal,
}

/// Household-level totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdTotals {
    /// Total salary across both persons.
    pub total_salary: Decimal,
    /// Total concessional contributions across both persons.
    pub total_super: Decimal,
    /// Total fund contributions tax. Excluded from `total_tax`.
    pub total_contributions_tax: Decimal,
    /// Total taxable income across both persons.
    pub taxable_income: Decimal,
    /// Total of income tax, Medicare levy and Division 293.
    pub total_tax: Decimal,
    /// Combined negative gearing benefit.
    pub negative_gearing_benefit: Decimal,
    /// Sum of after-tax income across both persons.
    pub after_tax_income: Decimal,
    /// Total gross investment income.
    pub gross_investment_income: Decimal,
    /// Total net taxable investment position.
    pub net_investment_income: Decimal,
    /// After-tax income plus gross investment income.
    pub household_pay: Decimal,
    /// Household pay divided by twelve.
    pub household_pay_monthly: Decimal,
}

/// The complete result of a household calculation pass.
///
/// Produced fresh by every pass; nothing is cached between passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdCalculation {
    /// The tax-year label echoed from the input.
    pub tax_year: String,
    /// Whether the calculation ran in couple mode.
    pub is_couple: bool,
    /// Number of dependent children used for the levy thresholds.
    pub dependent_children: u32,
    /// The first person's results.
    pub person_a: PersonResult,
    /// The second person's results, present in couple mode only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub person_b: Option<PersonResult>,
    /// Per-investment positions.
    pub investments: Vec<InvestmentPosition>,
    /// Investment totals.
    pub investment_totals: InvestmentTotals,
    /// Household totals.
    pub totals: HouseholdTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_step(step_number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: "Test rule".to_string(),
            legislation_ref: "ITAA 1997 s 4-10".to_string(),
            input: serde_json::json!({}),
            output: serde_json::json!({}),
            reasoning: "Test reasoning".to_string(),
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = sample_step(1, "income_tax");

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"income_tax\""));
        assert!(json.contains("\"legislation_ref\":\"ITAA 1997 s 4-10\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "WEEKS_AWAY_CLAMPED".to_string(),
            message: "Weeks away 60 clamped to 52".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"WEEKS_AWAY_CLAMPED\""));
        assert!(json.contains("\"severity\":\"low\""));
    }

    #[test]
    fn test_person_result_serializes_decimals_as_strings() {
        let result = PersonResult {
            total_salary: dec("100000"),
            taxable_income: dec("100000"),
            tax: TaxComponents {
                income_tax: dec("20788"),
                ..TaxComponents::default()
            },
            ..PersonResult::default()
        };

        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["total_salary"], "100000");
        assert_eq!(json["tax"]["income_tax"], "20788");
    }

    #[test]
    fn test_single_household_omits_person_b() {
        let calculation = HouseholdCalculation {
            tax_year: "2024-25".to_string(),
            is_couple: false,
            dependent_children: 0,
            person_a: PersonResult::default(),
            person_b: None,
            investments: vec![],
            investment_totals: InvestmentTotals::default(),
            totals: HouseholdTotals::default(),
            audit_trace: AuditTrace::default(),
        };

        let json = serde_json::to_value(&calculation).unwrap();
        assert!(json.get("person_b").is_none());
        assert_eq!(json["tax_year"], "2024-25");

        let back: HouseholdCalculation = serde_json::from_value(json).unwrap();
        assert_eq!(back.person_b, None);
    }

    #[test]
    fn test_audit_steps_ordered() {
        let trace = AuditTrace {
            steps: vec![
                sample_step(1, "income_projection"),
                sample_step(2, "superannuation"),
                sample_step(3, "income_tax"),
            ],
            warnings: vec![],
        };

        let step_numbers: Vec<u32> = trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3]);
    }
}
