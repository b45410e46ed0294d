//! Health metric classification and the composite score.
//!
//! All thresholds and weights live in [`metric_table`]. A raw value maps to a
//! status by comparing it against the `attention` and `good` boundaries, and to
//! a sub-score in `[0, 1]` by linear interpolation over three anchors:
//! `floor` scores 0, `attention` scores 0.5 and `good` scores 1.

use super::types::{HealthMetric, MetricKey, MetricStatus, RaioXInput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricThresholds {
    pub floor: f64,
    pub attention: f64,
    pub good: f64,
    pub weight: f64,
    pub higher_is_better: bool,
}

pub const fn metric_table(key: MetricKey) -> MetricThresholds {
    match key {
        MetricKey::SavingsRate => MetricThresholds {
            floor: 0.0,
            attention: 10.0,
            good: 20.0,
            weight: 0.25,
            higher_is_better: true,
        },
        MetricKey::InvestmentRate => MetricThresholds {
            floor: 0.0,
            attention: 5.0,
            good: 15.0,
            weight: 0.25,
            higher_is_better: true,
        },
        MetricKey::EmergencyFund => MetricThresholds {
            floor: 0.0,
            attention: 3.0,
            good: 6.0,
            weight: 0.20,
            higher_is_better: true,
        },
        MetricKey::Dti => MetricThresholds {
            floor: 70.0,
            attention: 35.0,
            good: 20.0,
            weight: 0.15,
            higher_is_better: false,
        },
        MetricKey::FireProgress => MetricThresholds {
            floor: 0.0,
            attention: 40.0,
            good: 80.0,
            weight: 0.15,
            higher_is_better: true,
        },
    }
}

/// `numerator / denominator`, or `None` when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Raw value of a metric for one input. `None` marks an undefined ratio
/// (zero income, zero expenses or a zero FIRE target).
pub fn raw_value(key: MetricKey, input: &RaioXInput, fire_target_adjusted: f64) -> Option<f64> {
    match key {
        MetricKey::SavingsRate => {
            ratio(input.monthly_savings, input.monthly_income).map(|r| r * 100.0)
        }
        MetricKey::InvestmentRate => {
            ratio(input.monthly_investments, input.monthly_income).map(|r| r * 100.0)
        }
        MetricKey::EmergencyFund => ratio(input.current_emergency_fund, input.monthly_expenses),
        MetricKey::Dti => {
            ratio(input.monthly_debt_payments, input.monthly_income).map(|r| r * 100.0)
        }
        MetricKey::FireProgress => ratio(input.current_net_worth, fire_target_adjusted)
            .map(|r| (r * 100.0).clamp(0.0, 100.0)),
    }
}

pub fn classify(key: MetricKey, value: Option<f64>) -> MetricStatus {
    let Some(value) = value else {
        return MetricStatus::Risk;
    };
    let t = metric_table(key);
    let (good, attention) = if t.higher_is_better {
        (value >= t.good, value >= t.attention)
    } else {
        (value <= t.good, value <= t.attention)
    };
    if good {
        MetricStatus::Good
    } else if attention {
        MetricStatus::Attention
    } else {
        MetricStatus::Risk
    }
}

pub fn sub_score(key: MetricKey, value: Option<f64>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let t = metric_table(key);
    // Lower-is-better metrics are mirrored so the same interpolation applies.
    let (v, floor, attention, good) = if t.higher_is_better {
        (value, t.floor, t.attention, t.good)
    } else {
        (-value, -t.floor, -t.attention, -t.good)
    };

    let score = if v >= good {
        1.0
    } else if v <= floor {
        0.0
    } else if v < attention {
        0.5 * (v - floor) / (attention - floor)
    } else {
        0.5 + 0.5 * (v - attention) / (good - attention)
    };
    score.clamp(0.0, 1.0)
}

/// Weighted composite of all five sub-scores, 0 to 100.
///
/// 100 is reserved for the case where every sub-score is saturated, so a
/// near-perfect profile that rounds up is held at 99.
pub fn composite_score(values: &[(MetricKey, Option<f64>)]) -> u8 {
    let mut total = 0.0;
    let mut saturated = true;
    for &(key, value) in values {
        let s = sub_score(key, value);
        saturated &= s >= 1.0;
        total += metric_table(key).weight * s;
    }

    let score = (100.0 * total).round().clamp(0.0, 100.0) as u8;
    if score == 100 && !saturated { 99 } else { score }
}

pub fn helper_text(key: MetricKey, status: MetricStatus) -> &'static str {
    use MetricKey::*;
    use MetricStatus::*;
    match (key, status) {
        (SavingsRate, Good) => "Você poupa 20% ou mais da renda. Mantenha o ritmo.",
        (SavingsRate, Attention) => "Poupança entre 10% e 20% da renda. Dá para chegar a 20%.",
        (SavingsRate, Risk) => "Poupança abaixo de 10% da renda. Revise gastos variáveis.",
        (InvestmentRate, Good) => "Você investe 15% ou mais da renda todo mês.",
        (InvestmentRate, Attention) => "Investimento entre 5% e 15% da renda. Tente aumentar aos poucos.",
        (InvestmentRate, Risk) => "Investimento abaixo de 5% da renda. Comece com um valor fixo mensal.",
        (EmergencyFund, Good) => "Reserva cobre 6 meses ou mais de despesas.",
        (EmergencyFund, Attention) => "Reserva cobre de 3 a 6 meses de despesas. Complete até 6.",
        (EmergencyFund, Risk) => "Reserva cobre menos de 3 meses de despesas.",
        (Dti, Good) => "Parcelas de dívidas consomem até 20% da renda.",
        (Dti, Attention) => "Parcelas de dívidas entre 20% e 35% da renda. Evite novas dívidas.",
        (Dti, Risk) => "Parcelas de dívidas acima de 35% da renda. Priorize a quitação.",
        (FireProgress, Good) => "Patrimônio já cobre 80% ou mais da meta FIRE ajustada.",
        (FireProgress, Attention) => "Patrimônio entre 40% e 80% da meta FIRE ajustada.",
        (FireProgress, Risk) => "Patrimônio abaixo de 40% da meta FIRE ajustada.",
    }
}

pub fn build_metric(key: MetricKey, value: Option<f64>) -> HealthMetric {
    let status = classify(key, value);
    HealthMetric {
        key,
        label: key.label().to_string(),
        value: value.unwrap_or(0.0),
        status,
        helper: helper_text(key, status).to_string(),
    }
}
