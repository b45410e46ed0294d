use super::types::{HealthMetric, MetricKey, MetricStatus, RaioXInput};

pub const MAX_RECOMMENDATIONS: usize = 5;

struct Rule {
    key: MetricKey,
    status: MetricStatus,
    applies: fn(&RaioXInput) -> bool,
    message: &'static str,
}

fn always(_: &RaioXInput) -> bool {
    true
}

fn has_debt_service(input: &RaioXInput) -> bool {
    input.monthly_debt_payments > 0.0
}

fn has_free_cash_flow(input: &RaioXInput) -> bool {
    input.monthly_free_cash_flow() > 0.0
}

// Priority order: every risk rule before any attention rule.
const RULES: [Rule; 10] = [
    Rule {
        key: MetricKey::EmergencyFund,
        status: MetricStatus::Risk,
        applies: always,
        message: "Monte uma reserva de emergência de pelo menos 3 meses de despesas antes de novos investimentos.",
    },
    Rule {
        key: MetricKey::Dti,
        status: MetricStatus::Risk,
        applies: has_debt_service,
        message: "Reduza o peso das parcelas de dívidas: renegocie juros ou quite primeiro as mais caras.",
    },
    Rule {
        key: MetricKey::SavingsRate,
        status: MetricStatus::Risk,
        applies: always,
        message: "Corte gastos não essenciais para poupar pelo menos 10% da renda.",
    },
    Rule {
        key: MetricKey::InvestmentRate,
        status: MetricStatus::Risk,
        applies: always,
        message: "Comece a investir um valor fixo todo mês, mesmo que pequeno.",
    },
    Rule {
        key: MetricKey::FireProgress,
        status: MetricStatus::Risk,
        applies: has_free_cash_flow,
        message: "Direcione parte da sobra mensal para os investimentos e aumente o aporte.",
    },
    Rule {
        key: MetricKey::EmergencyFund,
        status: MetricStatus::Attention,
        applies: always,
        message: "Complete a reserva de emergência até 6 meses de despesas.",
    },
    Rule {
        key: MetricKey::Dti,
        status: MetricStatus::Attention,
        applies: has_debt_service,
        message: "Evite assumir novas parcelas até o comprometimento cair abaixo de 20% da renda.",
    },
    Rule {
        key: MetricKey::SavingsRate,
        status: MetricStatus::Attention,
        applies: always,
        message: "Tente elevar a poupança mensal para 20% da renda.",
    },
    Rule {
        key: MetricKey::InvestmentRate,
        status: MetricStatus::Attention,
        applies: always,
        message: "Aumente os aportes aos poucos até investir 15% da renda.",
    },
    Rule {
        key: MetricKey::FireProgress,
        status: MetricStatus::Attention,
        applies: has_free_cash_flow,
        message: "Mantenha os aportes constantes para acelerar a independência financeira.",
    },
];

/// Ranked advice for the metrics that are not yet `good`, capped at
/// [`MAX_RECOMMENDATIONS`].
pub fn build_recommendations(input: &RaioXInput, metrics: &[HealthMetric]) -> Vec<String> {
    let status_of = |key: MetricKey| {
        metrics
            .iter()
            .find(|metric| metric.key == key)
            .map(|metric| metric.status)
    };

    RULES
        .iter()
        .filter(|rule| status_of(rule.key) == Some(rule.status) && (rule.applies)(input))
        .take(MAX_RECOMMENDATIONS)
        .map(|rule| rule.message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::default_raiox_input;
    use crate::core::metrics::build_metric;

    fn metrics_with(statuses: [(MetricKey, MetricStatus); 5]) -> Vec<HealthMetric> {
        statuses
            .into_iter()
            .map(|(key, status)| {
                let mut metric = build_metric(key, Some(0.0));
                metric.status = status;
                metric
            })
            .collect()
    }

    fn all(status: MetricStatus) -> Vec<HealthMetric> {
        metrics_with(MetricKey::ALL.map(|key| (key, status)))
    }

    #[test]
    fn healthy_profile_gets_no_advice() {
        let input = default_raiox_input();
        assert!(build_recommendations(&input, &all(MetricStatus::Good)).is_empty());
    }

    #[test]
    fn risk_rules_fire_in_priority_order() {
        let input = default_raiox_input();
        let advice = build_recommendations(&input, &all(MetricStatus::Risk));
        assert_eq!(advice.len(), 5);
        assert_eq!(advice[0], RULES[0].message);
        assert_eq!(advice[1], RULES[1].message);
        assert_eq!(advice[4], RULES[4].message);
    }

    #[test]
    fn risk_advice_ranks_before_attention_advice() {
        let input = default_raiox_input();
        let metrics = metrics_with([
            (MetricKey::SavingsRate, MetricStatus::Attention),
            (MetricKey::InvestmentRate, MetricStatus::Good),
            (MetricKey::EmergencyFund, MetricStatus::Attention),
            (MetricKey::Dti, MetricStatus::Good),
            (MetricKey::FireProgress, MetricStatus::Risk),
        ]);
        let advice = build_recommendations(&input, &metrics);
        assert_eq!(
            advice,
            vec![
                RULES[4].message.to_string(),
                RULES[5].message.to_string(),
                RULES[7].message.to_string(),
            ]
        );
    }

    #[test]
    fn output_is_capped() {
        let input = default_raiox_input();
        let metrics = metrics_with([
            (MetricKey::SavingsRate, MetricStatus::Risk),
            (MetricKey::InvestmentRate, MetricStatus::Risk),
            (MetricKey::EmergencyFund, MetricStatus::Risk),
            (MetricKey::Dti, MetricStatus::Risk),
            (MetricKey::FireProgress, MetricStatus::Risk),
        ]);
        assert!(build_recommendations(&input, &metrics).len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn fire_rule_needs_positive_free_cash_flow() {
        let mut input = default_raiox_input();
        input.monthly_expenses = input.monthly_income;
        let metrics = metrics_with([
            (MetricKey::SavingsRate, MetricStatus::Good),
            (MetricKey::InvestmentRate, MetricStatus::Good),
            (MetricKey::EmergencyFund, MetricStatus::Good),
            (MetricKey::Dti, MetricStatus::Good),
            (MetricKey::FireProgress, MetricStatus::Risk),
        ]);
        assert!(build_recommendations(&input, &metrics).is_empty());
    }

    #[test]
    fn debt_rule_skipped_without_debt_service() {
        let mut input = default_raiox_input();
        input.monthly_debt_payments = 0.0;
        let metrics = metrics_with([
            (MetricKey::SavingsRate, MetricStatus::Good),
            (MetricKey::InvestmentRate, MetricStatus::Good),
            (MetricKey::EmergencyFund, MetricStatus::Good),
            (MetricKey::Dti, MetricStatus::Risk),
            (MetricKey::FireProgress, MetricStatus::Good),
        ]);
        assert!(build_recommendations(&input, &metrics).is_empty());
    }
}
