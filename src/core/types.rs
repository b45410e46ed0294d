use serde::{Deserialize, Serialize};

/// Monthly figures a user enters in the diagnostic wizard. Percentages are
/// expressed in percent (6.0 means 6%), not as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaioXInput {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_savings: f64,
    pub monthly_investments: f64,
    pub monthly_debt_payments: f64,
    pub current_net_worth: f64,
    pub total_debt: f64,
    pub current_emergency_fund: f64,
    pub fire_annual_expenses: f64,
    pub years_to_goal: u32,
    pub annual_return_rate: f64,
    pub annual_inflation_rate: f64,
    pub effective_tax_rate: f64,
    pub fire_withdrawal_rate: f64,
}

impl RaioXInput {
    /// Amount added to the portfolio every month.
    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_savings + self.monthly_investments
    }

    pub fn monthly_free_cash_flow(&self) -> f64 {
        self.monthly_income - self.monthly_expenses - self.monthly_debt_payments
    }

    /// First field holding NaN or an infinity, by its JSON name.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("monthlyIncome", self.monthly_income),
            ("monthlyExpenses", self.monthly_expenses),
            ("monthlySavings", self.monthly_savings),
            ("monthlyInvestments", self.monthly_investments),
            ("monthlyDebtPayments", self.monthly_debt_payments),
            ("currentNetWorth", self.current_net_worth),
            ("totalDebt", self.total_debt),
            ("currentEmergencyFund", self.current_emergency_fund),
            ("fireAnnualExpenses", self.fire_annual_expenses),
            ("annualReturnRate", self.annual_return_rate),
            ("annualInflationRate", self.annual_inflation_rate),
            ("effectiveTaxRate", self.effective_tax_rate),
            ("fireWithdrawalRate", self.fire_withdrawal_rate),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKey {
    SavingsRate,
    InvestmentRate,
    EmergencyFund,
    Dti,
    FireProgress,
}

impl MetricKey {
    /// Every tracked metric, in display order.
    pub const ALL: [MetricKey; 5] = [
        MetricKey::SavingsRate,
        MetricKey::InvestmentRate,
        MetricKey::EmergencyFund,
        MetricKey::Dti,
        MetricKey::FireProgress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricKey::SavingsRate => "Taxa de poupança",
            MetricKey::InvestmentRate => "Taxa de investimento",
            MetricKey::EmergencyFund => "Reserva de emergência",
            MetricKey::Dti => "Comprometimento com dívidas",
            MetricKey::FireProgress => "Progresso FIRE",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Attention,
    Risk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    pub key: MetricKey,
    pub label: String,
    pub value: f64,
    pub status: MetricStatus,
    pub helper: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Conservative,
    Base,
    Optimistic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: ScenarioKind,
    pub annual_rate: f64,
    pub final_value: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhatIfKey {
    #[serde(rename = "savings-plus-10")]
    MoreSavings,
    #[serde(rename = "expenses-minus-10")]
    LowerExpenses,
    #[serde(rename = "return-plus-2pp")]
    HigherReturn,
    AccelerateDebtPayoff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    pub key: WhatIfKey,
    pub label: String,
    pub description: String,
    pub projected_net_worth: f64,
    pub delta_vs_base: f64,
    pub estimated_years_to_fire: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaioXSummary {
    pub score: u8,
    pub monthly_free_cash_flow: f64,
    pub fire_target_today: f64,
    pub fire_target_adjusted: f64,
    pub fire_progress: f64,
    pub projected_net_worth_after_tax: f64,
    pub estimated_years_to_fire: Option<f64>,
    pub debt_to_income_ratio: f64,
    pub emergency_fund_months: f64,
    pub metrics: Vec<HealthMetric>,
    pub scenarios: Vec<Scenario>,
    pub what_if_scenarios: Vec<WhatIfScenario>,
    pub recommendations: Vec<String>,
}

impl RaioXSummary {
    /// First number that JSON cannot carry (NaN or an infinity), by its JSON name.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let headline = [
            ("monthlyFreeCashFlow", Some(self.monthly_free_cash_flow)),
            ("fireTargetToday", Some(self.fire_target_today)),
            ("fireTargetAdjusted", Some(self.fire_target_adjusted)),
            ("fireProgress", Some(self.fire_progress)),
            ("projectedNetWorthAfterTax", Some(self.projected_net_worth_after_tax)),
            ("estimatedYearsToFire", self.estimated_years_to_fire),
            ("debtToIncomeRatio", Some(self.debt_to_income_ratio)),
            ("emergencyFundMonths", Some(self.emergency_fund_months)),
        ];
        let metrics = self.metrics.iter().map(|m| ("metrics.value", Some(m.value)));
        let scenarios = self.scenarios.iter().flat_map(|s| {
            [
                ("scenarios.annualRate", Some(s.annual_rate)),
                ("scenarios.finalValue", Some(s.final_value)),
            ]
        });
        let what_ifs = self.what_if_scenarios.iter().flat_map(|w| {
            [
                ("whatIfScenarios.projectedNetWorth", Some(w.projected_net_worth)),
                ("whatIfScenarios.deltaVsBase", Some(w.delta_vs_base)),
                ("whatIfScenarios.estimatedYearsToFire", w.estimated_years_to_fire),
            ]
        });

        headline
            .into_iter()
            .chain(metrics)
            .chain(scenarios)
            .chain(what_ifs)
            .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
            .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub balance: f64,
    pub contributed: f64,
}
