use super::fire::years_to_fire_with;
use super::projection::{calculate_investment_projection, future_value, monthly_rate};
use super::types::{RaioXInput, Scenario, ScenarioKind, WhatIfKey, WhatIfScenario};

/// Percentage points between the base rate and the conservative/optimistic rates.
pub const SCENARIO_SPREAD: f64 = 3.0;

const SAVINGS_BOOST: f64 = 0.10;
const EXPENSE_CUT: f64 = 0.10;
const RETURN_BOOST: f64 = 2.0;

impl WhatIfKey {
    /// Every sensitivity scenario, in the order they are reported.
    pub const ALL: [WhatIfKey; 4] = [
        WhatIfKey::MoreSavings,
        WhatIfKey::LowerExpenses,
        WhatIfKey::HigherReturn,
        WhatIfKey::AccelerateDebtPayoff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WhatIfKey::MoreSavings => "+10% de poupança",
            WhatIfKey::LowerExpenses => "-10% de despesas",
            WhatIfKey::HigherReturn => "+2 p.p. de rentabilidade",
            WhatIfKey::AccelerateDebtPayoff => "Quitar dívidas mais rápido",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WhatIfKey::MoreSavings => "Aumenta em 10% o valor poupado todo mês.",
            WhatIfKey::LowerExpenses => {
                "Corta 10% das despesas mensais e investe a diferença."
            }
            WhatIfKey::HigherReturn => "Soma 2 pontos percentuais à rentabilidade anual.",
            WhatIfKey::AccelerateDebtPayoff => {
                "Dobra a parcela das dívidas até quitá-las e depois investe a parcela liberada."
            }
        }
    }
}

/// Monthly contribution over time for one projected path.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ContributionPlan {
    Flat(f64),
    /// `first` for the first `months` months, `after` from then on.
    Switch { first: f64, after: f64, months: u32 },
}

impl ContributionPlan {
    fn at(self, month: u32) -> f64 {
        match self {
            ContributionPlan::Flat(amount) => amount,
            ContributionPlan::Switch {
                first,
                after,
                months,
            } => {
                if month <= months {
                    first
                } else {
                    after
                }
            }
        }
    }

    fn final_value(self, initial: f64, annual_rate: f64, years: u32) -> f64 {
        match self {
            ContributionPlan::Flat(amount) => {
                calculate_investment_projection(initial, amount, annual_rate, years)
            }
            ContributionPlan::Switch {
                first,
                after,
                months,
            } => {
                let m = monthly_rate(annual_rate);
                let total = years.saturating_mul(12);
                let switch_at = months.min(total);
                let midway = future_value(initial, first, m, switch_at);
                future_value(midway, after, m, total - switch_at)
            }
        }
    }

    fn total_contributed(self, years: u32) -> f64 {
        let total = years.saturating_mul(12);
        match self {
            ContributionPlan::Flat(amount) => amount * total as f64,
            ContributionPlan::Switch {
                first,
                after,
                months,
            } => {
                let switch_at = months.min(total);
                first * switch_at as f64 + after * (total - switch_at) as f64
            }
        }
    }
}

/// Conservative, base and optimistic projections of current net worth over
/// `years_to_goal`, in ascending rate order.
pub fn build_scenarios(input: &RaioXInput) -> Vec<Scenario> {
    let base = input.annual_return_rate;
    [
        (ScenarioKind::Conservative, (base - SCENARIO_SPREAD).max(0.0)),
        (ScenarioKind::Base, base),
        (ScenarioKind::Optimistic, base + SCENARIO_SPREAD),
    ]
    .into_iter()
    .map(|(name, annual_rate)| Scenario {
        name,
        annual_rate,
        final_value: calculate_investment_projection(
            input.current_net_worth,
            input.monthly_contribution(),
            annual_rate,
            input.years_to_goal,
        ),
    })
    .collect()
}

/// Base-scenario value after taxing the gain over everything put in.
/// Losses are not taxed.
pub fn projected_after_tax(input: &RaioXInput, final_value: f64) -> f64 {
    let principal = input.current_net_worth
        + ContributionPlan::Flat(input.monthly_contribution()).total_contributed(input.years_to_goal);
    let gain = final_value - principal;
    if gain > 0.0 {
        final_value - gain * input.effective_tax_rate / 100.0
    } else {
        final_value
    }
}

fn perturbation(key: WhatIfKey, input: &RaioXInput) -> (f64, ContributionPlan) {
    let rate = input.annual_return_rate;
    let contribution = input.monthly_contribution();
    match key {
        WhatIfKey::MoreSavings => (
            rate,
            ContributionPlan::Flat(contribution + input.monthly_savings * SAVINGS_BOOST),
        ),
        WhatIfKey::LowerExpenses => (
            rate,
            ContributionPlan::Flat(contribution + input.monthly_expenses * EXPENSE_CUT),
        ),
        WhatIfKey::HigherReturn => (rate + RETURN_BOOST, ContributionPlan::Flat(contribution)),
        WhatIfKey::AccelerateDebtPayoff => {
            let payment = input.monthly_debt_payments;
            if input.total_debt <= 0.0 || payment <= 0.0 {
                return (rate, ContributionPlan::Flat(contribution));
            }
            // The extra payment comes out of the monthly contribution until the
            // debt is gone, then the whole old payment is invested.
            let months = (input.total_debt / (2.0 * payment)).ceil().min(u32::MAX as f64) as u32;
            (
                rate,
                ContributionPlan::Switch {
                    first: contribution - payment,
                    after: contribution + payment,
                    months,
                },
            )
        }
    }
}

/// One-input-at-a-time sensitivity scenarios against the base projection.
pub fn build_what_if_scenarios(input: &RaioXInput, base_projected: f64) -> Vec<WhatIfScenario> {
    WhatIfKey::ALL
        .into_iter()
        .map(|key| {
            let (rate, plan) = perturbation(key, input);
            let projected_net_worth =
                plan.final_value(input.current_net_worth, rate, input.years_to_goal);
            let estimated_years_to_fire =
                years_to_fire_with(input, input.current_net_worth, rate, |month| plan.at(month));
            WhatIfScenario {
                key,
                label: key.label().to_string(),
                description: key.description().to_string(),
                projected_net_worth,
                delta_vs_base: projected_net_worth - base_projected,
                estimated_years_to_fire,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{default_raiox_input, estimate_years_to_fire};
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn scenarios_spread_three_points_around_base() {
        let mut input = default_raiox_input();
        input.annual_return_rate = 6.0;
        let scenarios = build_scenarios(&input);
        let names: Vec<_> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                ScenarioKind::Conservative,
                ScenarioKind::Base,
                ScenarioKind::Optimistic
            ]
        );
        assert_approx(scenarios[0].annual_rate, 3.0);
        assert_approx(scenarios[1].annual_rate, 6.0);
        assert_approx(scenarios[2].annual_rate, 9.0);
    }

    #[test]
    fn conservative_rate_never_goes_negative() {
        let mut input = default_raiox_input();
        input.annual_return_rate = 1.5;
        let scenarios = build_scenarios(&input);
        assert_approx(scenarios[0].annual_rate, 0.0);
    }

    #[test]
    fn what_ifs_come_in_fixed_order() {
        let input = default_raiox_input();
        let base = build_scenarios(&input)[1].final_value;
        let keys: Vec<_> = build_what_if_scenarios(&input, base)
            .iter()
            .map(|w| w.key)
            .collect();
        assert_eq!(keys, WhatIfKey::ALL.to_vec());
    }

    #[test]
    fn savings_and_return_what_ifs_beat_base() {
        let input = default_raiox_input();
        let base = build_scenarios(&input)[1].final_value;
        let what_ifs = build_what_if_scenarios(&input, base);
        for what_if in &what_ifs[..3] {
            assert!(what_if.delta_vs_base > 0.0, "{:?} should improve", what_if.key);
            assert_approx(what_if.projected_net_worth - base, what_if.delta_vs_base);
        }
    }

    #[test]
    fn expense_cut_adds_freed_cash_to_contribution() {
        let input = default_raiox_input();
        let base = build_scenarios(&input)[1].final_value;
        let what_if = &build_what_if_scenarios(&input, base)[1];
        let expected = calculate_investment_projection(
            input.current_net_worth,
            input.monthly_contribution() + input.monthly_expenses * 0.1,
            input.annual_return_rate,
            input.years_to_goal,
        );
        assert_approx(what_if.projected_net_worth, expected);
    }

    #[test]
    fn debt_payoff_without_debt_matches_base() {
        let mut input = default_raiox_input();
        input.total_debt = 0.0;
        let base = build_scenarios(&input)[1].final_value;
        let payoff = &build_what_if_scenarios(&input, base)[3];
        assert_eq!(payoff.key, WhatIfKey::AccelerateDebtPayoff);
        assert_approx(payoff.delta_vs_base, 0.0);
        assert_eq!(payoff.estimated_years_to_fire, estimate_years_to_fire(&input));
    }

    #[test]
    fn debt_payoff_switches_contribution_after_payoff() {
        let mut input = default_raiox_input();
        input.current_net_worth = 0.0;
        input.annual_return_rate = 0.0;
        input.years_to_goal = 1;
        input.monthly_savings = 300.0;
        input.monthly_investments = 200.0;
        input.monthly_debt_payments = 100.0;
        input.total_debt = 600.0;
        // Paid off in 3 months at 200: 3 * 400 + 9 * 600.
        let base = build_scenarios(&input)[1].final_value;
        let payoff = &build_what_if_scenarios(&input, base)[3];
        assert_approx(payoff.projected_net_worth, 3.0 * 400.0 + 9.0 * 600.0);
        assert_approx(payoff.delta_vs_base, 6_600.0 - 6_000.0);
    }

    #[test]
    fn after_tax_only_taxes_gains() {
        let mut input = default_raiox_input();
        input.current_net_worth = 1_000.0;
        input.monthly_savings = 0.0;
        input.monthly_investments = 0.0;
        input.years_to_goal = 1;
        input.effective_tax_rate = 20.0;
        assert_approx(projected_after_tax(&input, 1_100.0), 1_080.0);
        assert_approx(projected_after_tax(&input, 900.0), 900.0);
    }

    proptest! {
        #[test]
        fn prop_scenarios_are_ordered_by_rate_and_value(
            net_worth in -200_000i64..2_000_000,
            savings in 0u32..20_000,
            investments in 0u32..20_000,
            rate_bp in 0u32..2_000,
            years in 1u32..50
        ) {
            let mut input = default_raiox_input();
            input.current_net_worth = net_worth as f64;
            input.monthly_savings = savings as f64;
            input.monthly_investments = investments as f64;
            input.annual_return_rate = rate_bp as f64 / 100.0;
            input.years_to_goal = years;

            let scenarios = build_scenarios(&input);
            prop_assert!(scenarios.len() == 3);
            for pair in scenarios.windows(2) {
                prop_assert!(pair[0].annual_rate <= pair[1].annual_rate);
                if input.current_net_worth >= 0.0 {
                    let tol = 1e-9 * pair[1].final_value.abs().max(1.0);
                    prop_assert!(pair[0].final_value <= pair[1].final_value + tol);
                }
            }
        }
    }
}
