use super::types::ProjectionPoint;

const ZERO_RATE_EPS: f64 = 1e-12;

/// Effective monthly rate equivalent to a nominal annual rate in percent.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    (1.0 + annual_rate_percent / 100.0).powf(1.0 / 12.0) - 1.0
}

/// One month of growth followed by the monthly contribution.
pub(crate) fn step(balance: f64, monthly_rate: f64, monthly_contribution: f64) -> f64 {
    balance * (1.0 + monthly_rate) + monthly_contribution
}

/// Final balance after `years` of monthly compounding with a fixed contribution,
/// using the closed-form future value of an annuity.
///
/// Negative balances and negative contributions are carried through untouched.
pub fn calculate_investment_projection(
    initial_amount: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: u32,
) -> f64 {
    if years == 0 {
        return initial_amount;
    }
    future_value(
        initial_amount,
        monthly_contribution,
        monthly_rate(annual_rate_percent),
        years.saturating_mul(12),
    )
}

/// Closed-form balance after `months` steps at monthly rate `m`.
pub(crate) fn future_value(initial_amount: f64, monthly_contribution: f64, m: f64, months: u32) -> f64 {
    if months == 0 {
        return initial_amount;
    }
    if m.abs() < ZERO_RATE_EPS {
        return initial_amount + monthly_contribution * months as f64;
    }

    let growth = match i32::try_from(months) {
        Ok(n) => (1.0 + m).powi(n),
        Err(_) => (1.0 + m).powf(f64::from(months)),
    };
    initial_amount * growth + monthly_contribution * ((growth - 1.0) / m)
}

/// Month-by-month projection sampled at every year boundary, starting with year 0.
pub fn project_series(
    initial_amount: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: u32,
) -> Vec<ProjectionPoint> {
    let m = monthly_rate(annual_rate_percent);
    let mut points = Vec::with_capacity(years as usize + 1);
    let mut balance = initial_amount;
    let mut contributed = initial_amount;
    points.push(ProjectionPoint {
        year: 0,
        balance,
        contributed,
    });

    for year in 1..=years {
        for _ in 0..12 {
            balance = step(balance, m, monthly_contribution);
            contributed += monthly_contribution;
        }
        points.push(ProjectionPoint {
            year,
            balance,
            contributed,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn monthly_rate_compounds_back_to_annual() {
        let m = monthly_rate(12.0);
        assert_approx((1.0 + m).powi(12), 1.12);
        assert_approx(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn lump_sum_grows_by_annual_rate() {
        assert_approx(calculate_investment_projection(1_000.0, 0.0, 12.0, 1), 1_120.0);
        assert_approx(
            calculate_investment_projection(1_000.0, 0.0, 10.0, 3),
            1_331.0,
        );
    }

    #[test]
    fn zero_rate_is_linear_in_contributions() {
        assert_approx(
            calculate_investment_projection(500.0, 100.0, 0.0, 2),
            500.0 + 2_400.0,
        );
    }

    #[test]
    fn negative_amounts_are_not_clamped() {
        let value = calculate_investment_projection(-10_000.0, 0.0, 0.0, 5);
        assert_approx(value, -10_000.0);

        let paydown = calculate_investment_projection(1_000.0, -50.0, 0.0, 1);
        assert_approx(paydown, 400.0);
    }

    #[test]
    fn series_starts_at_initial_and_ends_at_closed_form() {
        let points = project_series(10_000.0, 500.0, 6.0, 20);
        assert_eq!(points.len(), 21);
        assert_eq!(points[0].year, 0);
        assert_approx(points[0].balance, 10_000.0);

        let closed = calculate_investment_projection(10_000.0, 500.0, 6.0, 20);
        let last = points.last().expect("series has points");
        assert_eq!(last.year, 20);
        assert!((last.balance - closed).abs() <= 1e-6 * closed.abs().max(1.0));
        assert_approx(last.contributed, 10_000.0 + 500.0 * 240.0);
    }

    #[test]
    fn month_counts_beyond_i32_keep_compounding() {
        let grown = calculate_investment_projection(1.0, 0.0, 1.0, u32::MAX);
        assert!(grown.is_infinite() && grown > 0.0, "got {grown}");

        let months = i32::MAX as u32 + 1;
        let shrunk = future_value(1.0, 0.0, -1e-3, months);
        assert!((0.0..1e-300).contains(&shrunk), "got {shrunk}");
    }

    proptest! {
        #[test]
        fn prop_zero_horizon_is_identity(
            initial in -1_000_000i64..1_000_000,
            contribution in -5_000i64..5_000,
            rate_bp in -5_000i32..3_000
        ) {
            let initial = initial as f64;
            let value = calculate_investment_projection(
                initial,
                contribution as f64,
                rate_bp as f64 / 100.0,
                0,
            );
            prop_assert!(value == initial);
        }

        #[test]
        fn prop_closed_form_matches_iteration(
            initial in -100_000i64..1_000_000,
            contribution in -2_000i64..10_000,
            rate_bp in -1_000i32..2_000,
            years in 0u32..45
        ) {
            let rate = rate_bp as f64 / 100.0;
            let closed = calculate_investment_projection(initial as f64, contribution as f64, rate, years);
            let iterated = project_series(initial as f64, contribution as f64, rate, years)
                .last()
                .map(|p| p.balance)
                .unwrap_or(initial as f64);
            let tol = 1e-7 * closed.abs().max(iterated.abs()).max(1.0);
            prop_assert!((closed - iterated).abs() <= tol, "closed {closed}, iterated {iterated}");
        }

        #[test]
        fn prop_non_decreasing_in_rate(
            initial in 0i64..1_000_000,
            contribution in 0i64..10_000,
            rate_bp in -1_000i32..2_000,
            bump_bp in 0i32..500,
            years in 0u32..50
        ) {
            let low = calculate_investment_projection(initial as f64, contribution as f64, rate_bp as f64 / 100.0, years);
            let high = calculate_investment_projection(initial as f64, contribution as f64, (rate_bp + bump_bp) as f64 / 100.0, years);
            prop_assert!(high + 1e-9 * high.abs().max(1.0) >= low);
        }

        #[test]
        fn prop_non_decreasing_in_contribution(
            initial in -500_000i64..1_000_000,
            contribution in -5_000i64..10_000,
            bump in 0i64..5_000,
            rate_bp in -1_000i32..2_000,
            years in 0u32..50
        ) {
            let rate = rate_bp as f64 / 100.0;
            let low = calculate_investment_projection(initial as f64, contribution as f64, rate, years);
            let high = calculate_investment_projection(initial as f64, (contribution + bump) as f64, rate, years);
            prop_assert!(high + 1e-9 * high.abs().max(1.0) >= low);
        }
    }
}
