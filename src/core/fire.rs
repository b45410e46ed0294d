use super::projection::{monthly_rate, step};
use super::types::RaioXInput;

/// Longest horizon searched for the FIRE crossing.
pub const FIRE_HORIZON_YEARS: u32 = 60;

/// Net worth whose sustainable withdrawals cover `fire_annual_expenses` today.
pub fn fire_target_today(input: &RaioXInput) -> f64 {
    input.fire_annual_expenses * (100.0 / input.fire_withdrawal_rate)
}

/// FIRE target grown by inflation over `years_to_goal`.
pub fn fire_target_adjusted(input: &RaioXInput) -> f64 {
    inflate(
        fire_target_today(input),
        input.annual_inflation_rate,
        input.years_to_goal as f64,
    )
}

fn inflate(amount: f64, annual_inflation_rate: f64, years: f64) -> f64 {
    amount * (1.0 + annual_inflation_rate / 100.0).powf(years)
}

/// Years until net worth catches the inflation-growing FIRE target, rounded to
/// one decimal. `None` means the target is not reached within
/// [`FIRE_HORIZON_YEARS`].
pub fn estimate_years_to_fire(input: &RaioXInput) -> Option<f64> {
    let contribution = input.monthly_contribution();
    years_to_fire_with(
        input,
        input.current_net_worth,
        input.annual_return_rate,
        |_| contribution,
    )
}

/// Month-by-month FIRE search with a per-month contribution schedule.
/// `contribution_for_month` receives the 1-based month index.
pub(crate) fn years_to_fire_with<F>(
    input: &RaioXInput,
    start_balance: f64,
    annual_return_rate: f64,
    contribution_for_month: F,
) -> Option<f64>
where
    F: Fn(u32) -> f64,
{
    let target_today = fire_target_today(input);
    if start_balance >= target_today {
        return Some(0.0);
    }

    let m = monthly_rate(annual_return_rate);
    let mut balance = start_balance;
    for month in 1..=FIRE_HORIZON_YEARS * 12 {
        balance = step(balance, m, contribution_for_month(month));
        let elapsed_years = month as f64 / 12.0;
        let target = inflate(target_today, input.annual_inflation_rate, elapsed_years);
        if balance >= target {
            return Some(round_to_tenth(elapsed_years));
        }
    }
    None
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
