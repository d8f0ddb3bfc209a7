//! Investment aggregation functionality.
//!
//! This module derives each investment's gross income and net taxable
//! position, allocates both between the two owners by ownership percentage
//! and sums the household totals.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, Investment, InvestmentPosition, InvestmentTotals, InvestmentType, OwnerShare,
};

use super::display_amount;

/// The result of aggregating the household's investments.
#[derive(Debug, Clone)]
pub struct InvestmentAggregation {
    /// One position per input investment, in input order.
    pub positions: Vec<InvestmentPosition>,
    /// Household totals and per-owner totals.
    pub totals: InvestmentTotals,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits an amount between two owners.
///
/// The first owner receives `amount × pct / 100` (with `pct` clamped to
/// `[0, 100]`) and the second owner receives the remainder, so the two
/// shares always sum exactly to `amount`.
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::allocate;
/// use rust_decimal::Decimal;
///
/// let (a, b) = allocate(Decimal::new(24_000, 0), Decimal::new(50, 0));
/// assert_eq!(a, Decimal::new(12_000, 0));
/// assert_eq!(b, Decimal::new(12_000, 0));
/// ```
pub fn allocate(amount: Decimal, ownership_pct: Decimal) -> (Decimal, Decimal) {
    let pct = ownership_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let first = amount * pct / Decimal::ONE_HUNDRED;
    (first, amount - first)
}

/// Builds the allocated position for one investment.
///
/// In single mode the first person owns the whole investment regardless of
/// the stated ownership percentage.
pub fn investment_position(investment: &Investment, is_couple: bool) -> InvestmentPosition {
    let ownership_pct = if is_couple {
        investment
            .ownership_pct
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    } else {
        Decimal::ONE_HUNDRED
    };

    let gross_income = investment.annual_gross_income();
    let deductions = investment.deductions();
    let net_taxable = investment.net_taxable();

    let (a_gross, b_gross) = allocate(gross_income, ownership_pct);
    let (a_net, b_net) = allocate(net_taxable, ownership_pct);

    InvestmentPosition {
        name: investment.name.clone(),
        kind: investment.kind,
        gross_income,
        deductions,
        net_taxable,
        ownership_pct,
        owner_a: OwnerShare {
            gross: a_gross,
            net_taxable: a_net,
        },
        owner_b: OwnerShare {
            gross: b_gross,
            net_taxable: b_net,
        },
    }
}

/// Aggregates all investments into positions and household totals.
///
/// # Arguments
///
/// * `investments` - The household's investments
/// * `is_couple` - Whether allocations to the second person are allowed
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use household_tax_engine::calculation::aggregate_investments;
/// use household_tax_engine::models::{Investment, InvestmentType};
/// use rust_decimal::Decimal;
///
/// let property = Investment {
///     kind: InvestmentType::Property,
///     rent_per_week: Decimal::new(500, 0),
///     vacancy_weeks: Decimal::new(4, 0),
///     ownership_pct: Decimal::new(50, 0),
///     ..Investment::default()
/// };
///
/// let result = aggregate_investments(&[property], true, 1);
/// assert_eq!(result.totals.gross_total, Decimal::new(24_000, 0));
/// assert_eq!(result.totals.owner_a.gross, Decimal::new(12_000, 0));
/// assert_eq!(result.totals.owner_b.gross, Decimal::new(12_000, 0));
/// ```
pub fn aggregate_investments(
    investments: &[Investment],
    is_couple: bool,
    step_number: u32,
) -> InvestmentAggregation {
    let positions: Vec<InvestmentPosition> = investments
        .iter()
        .map(|investment| investment_position(investment, is_couple))
        .collect();

    let totals = positions
        .iter()
        .fold(InvestmentTotals::default(), |mut totals, position| {
            totals.gross_total += position.gross_income;
            totals.deductions_total += position.deductions;
            totals.net_taxable_total += position.net_taxable;
            totals.owner_a.gross += position.owner_a.gross;
            totals.owner_a.net_taxable += position.owner_a.net_taxable;
            totals.owner_b.gross += position.owner_b.gross;
            totals.owner_b.net_taxable += position.owner_b.net_taxable;
            totals
        });

    let property_count = positions
        .iter()
        .filter(|p| p.kind == InvestmentType::Property)
        .count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "investment_aggregation".to_string(),
        rule_name: "Investment Aggregation".to_string(),
        legislation_ref: "ITAA 1997 s 6-5, s 8-1".to_string(),
        input: serde_json::json!({
            "investments": positions.len(),
            "properties": property_count,
            "is_couple": is_couple
        }),
        output: serde_json::json!({
            "gross_total": display_amount(totals.gross_total),
            "deductions_total": display_amount(totals.deductions_total),
            "net_taxable_total": display_amount(totals.net_taxable_total),
            "owner_a_net_taxable": display_amount(totals.owner_a.net_taxable),
            "owner_b_net_taxable": display_amount(totals.owner_b.net_taxable)
        }),
        reasoning: format!(
            "{} investment(s): ${} gross - ${} deductions = ${} net taxable (A ${}, B ${})",
            positions.len(),
            display_amount(totals.gross_total),
            display_amount(totals.deductions_total),
            display_amount(totals.net_taxable_total),
            display_amount(totals.owner_a.net_taxable),
            display_amount(totals.owner_b.net_taxable)
        ),
    };

    InvestmentAggregation {
        positions,
        totals,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn property(rent: &str, vacancy: &str, interest: &str, ownership: &str) -> Investment {
        Investment {
            name: "Rental".to_string(),
            kind: InvestmentType::Property,
            rent_per_week: dec(rent),
            vacancy_weeks: dec(vacancy),
            interest: dec(interest),
            ownership_pct: dec(ownership),
            ..Investment::default()
        }
    }

    #[test]
    fn test_property_split_50_50_in_couple_mode() {
        let result = aggregate_investments(&[property("500", "4", "0", "50")], true, 1);

        assert_eq!(result.positions[0].gross_income, dec("24000"));
        assert_eq!(result.totals.owner_a.gross, dec("12000"));
        assert_eq!(result.totals.owner_b.gross, dec("12000"));
    }

    #[test]
    fn test_position_net_taxable_matches_investment() {
        let investment = property("500", "4", "30000", "60");
        let position = investment_position(&investment, true);

        assert_eq!(position.net_taxable, investment.net_taxable());
        assert_eq!(position.net_taxable, dec("-6000"));
        assert_eq!(position.owner_a.net_taxable, dec("-3600"));
        assert_eq!(position.owner_b.net_taxable, dec("-2400"));
    }

    #[test]
    fn test_single_mode_forces_full_ownership() {
        let result = aggregate_investments(&[property("500", "4", "30000", "25")], false, 1);

        let position = &result.positions[0];
        assert_eq!(position.ownership_pct, dec("100"));
        assert_eq!(position.owner_a.net_taxable, dec("-6000"));
        assert_eq!(position.owner_b.gross, Decimal::ZERO);
        assert_eq!(position.owner_b.net_taxable, Decimal::ZERO);
    }

    #[test]
    fn test_ownership_clamped_into_range() {
        let over = aggregate_investments(&[property("500", "0", "0", "150")], true, 1);
        assert_eq!(over.positions[0].ownership_pct, dec("100"));
        assert_eq!(over.totals.owner_b.gross, Decimal::ZERO);

        let under = aggregate_investments(&[property("500", "0", "0", "-20")], true, 1);
        assert_eq!(under.positions[0].ownership_pct, Decimal::ZERO);
        assert_eq!(under.totals.owner_a.gross, Decimal::ZERO);
        assert_eq!(under.totals.owner_b.gross, dec("26000"));
    }

    #[test]
    fn test_totals_across_mixed_investments() {
        let shares = Investment {
            name: "ETF".to_string(),
            kind: InvestmentType::SharesOrFunds,
            gross_income: dec("4000"),
            other_deductions: dec("500"),
            ownership_pct: dec("100"),
            ..Investment::default()
        };
        let result = aggregate_investments(
            &[property("600", "2", "35000", "60"), shares],
            true,
            4,
        );

        // Property: 600 x 50 = 30,000 gross, -5,000 net
        assert_eq!(result.totals.gross_total, dec("34000"));
        assert_eq!(result.totals.deductions_total, dec("35500"));
        assert_eq!(result.totals.net_taxable_total, dec("-1500"));
        assert_eq!(result.totals.owner_a.net_taxable, dec("500"));
        assert_eq!(result.totals.owner_b.net_taxable, dec("-2000"));
        assert_eq!(result.audit_step.step_number, 4);
    }

    #[test]
    fn test_no_investments_yields_zero_totals() {
        let result = aggregate_investments(&[], true, 1);
        assert!(result.positions.is_empty());
        assert_eq!(result.totals, InvestmentTotals::default());
    }

    #[test]
    fn test_allocation_with_fractional_percentage() {
        let (a, b) = allocate(dec("1000"), dec("33.3333"));
        assert_eq!(a + b, dec("1000"));
        assert_eq!(a, dec("333.333"));
    }

    proptest! {
        #[test]
        fn prop_allocation_conserves_total(
            cents in -10_000_000i64..10_000_000,
            pct_hundredths in 0u32..=10_000
        ) {
            let amount = Decimal::new(cents, 2);
            let pct = Decimal::new(pct_hundredths as i64, 2);
            let (a, b) = allocate(amount, pct);
            prop_assert_eq!(a + b, amount);
        }

        #[test]
        fn prop_positions_conserve_gross_and_net(
            rent in 0u32..2_000,
            vacancy in 0u32..60,
            interest in 0u32..80_000,
            pct in 0u32..=100
        ) {
            let investment = property(
                &rent.to_string(),
                &vacancy.to_string(),
                &interest.to_string(),
                &pct.to_string(),
            );
            let position = investment_position(&investment, true);
            prop_assert_eq!(position.owner_a.gross + position.owner_b.gross, position.gross_income);
            prop_assert_eq!(
                position.owner_a.net_taxable + position.owner_b.net_taxable,
                position.net_taxable
            );
        }
    }
}
