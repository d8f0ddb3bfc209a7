//! Salary projection functionality.
//!
//! This module derives a person's ordinary-time-equivalent base salary and
//! the remote uplift earned for the weeks actually worked away.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Person, WEEKS_PER_YEAR};

use super::display_amount;

/// The result of projecting a person's salary, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeProjection {
    /// Ordinary-time-equivalent base salary, with any guarantee backed out.
    pub base_ote: Decimal,
    /// Remote uplift for the weeks worked away.
    pub uplift: Decimal,
    /// Base OTE plus uplift.
    pub total_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the ordinary-time-equivalent base salary.
///
/// When the stated salary is a package that already includes the guarantee,
/// the contribution is backed out: `salary / (1 + guarantee_rate)`.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::base_ote;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("0.12").unwrap();
/// assert_eq!(base_ote(Decimal::new(112_000, 0), true, rate), Decimal::new(100_000, 0));
/// assert_eq!(base_ote(Decimal::new(112_000, 0), false, rate), Decimal::new(112_000, 0));
/// ```
pub fn base_ote(base_salary: Decimal, includes_guarantee: bool, guarantee_rate: Decimal) -> Decimal {
    if includes_guarantee {
        base_salary / (Decimal::ONE + guarantee_rate)
    } else {
        base_salary
    }
}

/// Returns the remote uplift earned for the year.
///
/// The uplift accrues only for the fraction of the year worked away:
/// `base_salary × uplift_pct / 100 × weeks_away / 52`. Weeks are clamped to
/// `[0, 52]` and a negative percentage is treated as zero.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::uplift_amount;
/// use rust_decimal::Decimal;
///
/// // 25% uplift for half the year
/// let uplift = uplift_amount(Decimal::new(100_000, 0), Decimal::new(25, 0), Decimal::new(26, 0));
/// assert_eq!(uplift, Decimal::new(12_500, 0));
/// ```
pub fn uplift_amount(base_salary: Decimal, uplift_pct: Decimal, weeks_away: Decimal) -> Decimal {
    let pct = uplift_pct.max(Decimal::ZERO);
    let weeks = weeks_away.clamp(Decimal::ZERO, WEEKS_PER_YEAR);

    // Single division keeps whole-dollar results exact.
    base_salary * pct * weeks / (Decimal::ONE_HUNDRED * WEEKS_PER_YEAR)
}

/// Projects a person's total salary for the year.
///
/// Total salary is the ordinary-time-equivalent base plus the uplift. The
/// uplift is calculated on the stated base salary, not the OTE figure.
///
/// # Arguments
///
/// * `person` - The person to project salary for
/// * `guarantee_rate` - The superannuation guarantee rate (e.g., 0.12)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::project_income;
/// use household_tax_engine::models::Person;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let person = Person {
///     base_salary: Decimal::new(100_000, 0),
///     ..Person::default()
/// };
///
/// let result = project_income(&person, Decimal::from_str("0.12").unwrap(), 1);
/// assert_eq!(result.total_salary, Decimal::new(100_000, 0));
/// ```
pub fn project_income(person: &Person, guarantee_rate: Decimal, step_number: u32) -> IncomeProjection {
    let base_ote = base_ote(
        person.base_salary,
        person.salary_includes_guarantee,
        guarantee_rate,
    );
    let uplift = uplift_amount(person.base_salary, person.uplift_pct, person.weeks_away);
    let total_salary = base_ote + uplift;

    let reasoning = if person.salary_includes_guarantee {
        format!(
            "${} package / {} = ${} OTE base, plus ${} uplift = ${}",
            display_amount(person.base_salary),
            (Decimal::ONE + guarantee_rate).normalize(),
            display_amount(base_ote),
            display_amount(uplift),
            display_amount(total_salary)
        )
    } else {
        format!(
            "${} base, plus ${} uplift = ${}",
            display_amount(base_ote),
            display_amount(uplift),
            display_amount(total_salary)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_projection".to_string(),
        rule_name: "Salary Projection".to_string(),
        legislation_ref: "SGAA 1992 s 6(1)".to_string(),
        input: serde_json::json!({
            "base_salary": display_amount(person.base_salary),
            "salary_includes_guarantee": person.salary_includes_guarantee,
            "uplift_pct": person.uplift_pct.normalize().to_string(),
            "weeks_away": person.weeks_away.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_ote": display_amount(base_ote),
            "uplift": display_amount(uplift),
            "total_salary": display_amount(total_salary)
        }),
        reasoning,
    };

    IncomeProjection {
        base_ote,
        uplift,
        total_salary,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn person(base_salary: &str) -> Person {
        Person {
            base_salary: dec(base_salary),
            ..Person::default()
        }
    }

    #[test]
    fn test_plain_salary_is_total_salary() {
        let result = project_income(&person("100000"), dec("0.12"), 1);

        assert_eq!(result.base_ote, dec("100000"));
        assert_eq!(result.uplift, Decimal::ZERO);
        assert_eq!(result.total_salary, dec("100000"));
        assert_eq!(result.audit_step.rule_id, "income_projection");
    }

    #[test]
    fn test_package_backs_out_guarantee() {
        let mut p = person("112000");
        p.salary_includes_guarantee = true;

        let result = project_income(&p, dec("0.12"), 1);
        assert_eq!(result.base_ote, dec("100000"));
        assert!(result.audit_step.reasoning.contains("1.12"));
    }

    #[test]
    fn test_uplift_uses_stated_salary_not_ote() {
        let mut p = person("112000");
        p.salary_includes_guarantee = true;
        p.uplift_pct = dec("10");
        p.weeks_away = dec("52");

        let result = project_income(&p, dec("0.12"), 1);
        assert_eq!(result.uplift, dec("11200"));
        assert_eq!(result.total_salary, dec("111200"));
    }

    #[test]
    fn test_uplift_prorated_by_weeks() {
        assert_eq!(
            uplift_amount(dec("104000"), dec("20"), dec("13")),
            dec("5200")
        );
    }

    #[test]
    fn test_weeks_clamped_to_year() {
        assert_eq!(
            uplift_amount(dec("100000"), dec("25"), dec("60")),
            uplift_amount(dec("100000"), dec("25"), dec("52"))
        );
        assert_eq!(
            uplift_amount(dec("100000"), dec("25"), dec("-4")),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_negative_uplift_pct_treated_as_zero() {
        assert_eq!(
            uplift_amount(dec("100000"), dec("-25"), dec("26")),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_zero_salary_projects_zero() {
        let result = project_income(&Person::default(), dec("0.12"), 3);
        assert_eq!(result.total_salary, Decimal::ZERO);
        assert_eq!(result.audit_step.step_number, 3);
    }
}
