use crate::error::ValidationError;

use super::advice::build_recommendations;
use super::fire::{estimate_years_to_fire, fire_target_adjusted, fire_target_today};
use super::metrics::{build_metric, composite_score, raw_value};
use super::projection::project_series;
use super::scenarios::{build_scenarios, build_what_if_scenarios, projected_after_tax};
use super::types::{MetricKey, ProjectionPoint, RaioXInput, RaioXSummary, ScenarioKind};

// Bounds the yearly chart series and keeps month counts far from `i32::MAX`.
const MAX_YEARS_TO_GOAL: u32 = 100;

const REQUIRED_FIELDS: [&str; 14] = [
    "monthlyIncome",
    "monthlyExpenses",
    "monthlySavings",
    "monthlyInvestments",
    "monthlyDebtPayments",
    "currentNetWorth",
    "totalDebt",
    "currentEmergencyFund",
    "fireAnnualExpenses",
    "yearsToGoal",
    "annualReturnRate",
    "annualInflationRate",
    "effectiveTaxRate",
    "fireWithdrawalRate",
];

const NON_FINITE_RESULT: &str = "is not a finite number for this input";

/// Baseline figures used to seed a fresh diagnostic.
pub fn default_raiox_input() -> RaioXInput {
    RaioXInput {
        monthly_income: 8_000.0,
        monthly_expenses: 5_000.0,
        monthly_savings: 1_000.0,
        monthly_investments: 800.0,
        monthly_debt_payments: 600.0,
        current_net_worth: 50_000.0,
        total_debt: 15_000.0,
        current_emergency_fund: 20_000.0,
        fire_annual_expenses: 60_000.0,
        years_to_goal: 20,
        annual_return_rate: 8.0,
        annual_inflation_rate: 4.0,
        effective_tax_rate: 15.0,
        fire_withdrawal_rate: 4.0,
    }
}

impl RaioXInput {
    /// Parses a JSON input, reporting missing or mistyped fields.
    ///
    /// Required keys are checked on the raw object before typed decoding, so a
    /// missing key is reported by name and unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(fields) = value.as_object() else {
            return Err(ValidationError::Malformed(
                "expected a JSON object".to_string(),
            ));
        };
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !fields.contains_key(**key)) {
            return Err(ValidationError::MissingField(missing.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let amounts = [
            ("monthlyIncome", self.monthly_income),
            ("monthlyExpenses", self.monthly_expenses),
            ("monthlySavings", self.monthly_savings),
            ("monthlyInvestments", self.monthly_investments),
            ("monthlyDebtPayments", self.monthly_debt_payments),
            ("totalDebt", self.total_debt),
            ("currentEmergencyFund", self.current_emergency_fund),
            ("fireAnnualExpenses", self.fire_annual_expenses),
            ("annualReturnRate", self.annual_return_rate),
            ("annualInflationRate", self.annual_inflation_rate),
            ("effectiveTaxRate", self.effective_tax_rate),
            ("fireWithdrawalRate", self.fire_withdrawal_rate),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ValidationError::OutOfRange {
                    field,
                    reason: "must be a finite number",
                });
            }
            if value < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field,
                    reason: "must be >= 0",
                });
            }
        }

        if !self.current_net_worth.is_finite() {
            return Err(ValidationError::OutOfRange {
                field: "currentNetWorth",
                reason: "must be a finite number",
            });
        }
        if !(1..=MAX_YEARS_TO_GOAL).contains(&self.years_to_goal) {
            return Err(ValidationError::OutOfRange {
                field: "yearsToGoal",
                reason: "must be between 1 and 100",
            });
        }
        if self.effective_tax_rate >= 100.0 {
            return Err(ValidationError::OutOfRange {
                field: "effectiveTaxRate",
                reason: "must be below 100",
            });
        }
        if self.fire_withdrawal_rate <= 0.0 || self.fire_withdrawal_rate > 100.0 {
            return Err(ValidationError::OutOfRange {
                field: "fireWithdrawalRate",
                reason: "must be in (0, 100]",
            });
        }
        Ok(())
    }
}

/// Full diagnostic for one input. Pure: identical inputs give identical summaries.
pub fn build_raiox_summary(input: &RaioXInput) -> Result<RaioXSummary, ValidationError> {
    input.validate()?;

    let fire_target_today = fire_target_today(input);
    let fire_target_adjusted = fire_target_adjusted(input);

    let readings = MetricKey::ALL.map(|key| (key, raw_value(key, input, fire_target_adjusted)));
    let reading = |wanted: MetricKey| {
        readings
            .iter()
            .find(|(key, _)| *key == wanted)
            .and_then(|(_, value)| *value)
            .unwrap_or(0.0)
    };
    let metrics: Vec<_> = readings
        .iter()
        .map(|&(key, value)| build_metric(key, value))
        .collect();
    let score = composite_score(&readings);

    let scenarios = build_scenarios(input);
    let base_projected = scenarios
        .iter()
        .find(|scenario| scenario.name == ScenarioKind::Base)
        .map(|scenario| scenario.final_value)
        .unwrap_or(input.current_net_worth);
    let what_if_scenarios = build_what_if_scenarios(input, base_projected);

    let recommendations = build_recommendations(input, &metrics);

    let summary = RaioXSummary {
        score,
        monthly_free_cash_flow: input.monthly_free_cash_flow(),
        fire_target_today,
        fire_target_adjusted,
        fire_progress: reading(MetricKey::FireProgress),
        projected_net_worth_after_tax: projected_after_tax(input, base_projected),
        estimated_years_to_fire: estimate_years_to_fire(input),
        debt_to_income_ratio: reading(MetricKey::Dti),
        emergency_fund_months: reading(MetricKey::EmergencyFund),
        metrics,
        scenarios,
        what_if_scenarios,
        recommendations,
    };
    if let Some(field) = summary.non_finite_field() {
        return Err(ValidationError::OutOfRange {
            field,
            reason: NON_FINITE_RESULT,
        });
    }
    Ok(summary)
}

/// Yearly balances of the base scenario, for charting.
pub fn base_projection_series(input: &RaioXInput) -> Result<Vec<ProjectionPoint>, ValidationError> {
    input.validate()?;
    let series = project_series(
        input.current_net_worth,
        input.monthly_contribution(),
        input.annual_return_rate,
        input.years_to_goal,
    );
    if series
        .iter()
        .any(|point| !point.balance.is_finite() || !point.contributed.is_finite())
    {
        return Err(ValidationError::OutOfRange {
            field: "balance",
            reason: NON_FINITE_RESULT,
        });
    }
    Ok(series)
}
