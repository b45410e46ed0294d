mod advice;
mod fire;
pub mod metrics;
mod projection;
mod scenarios;
mod summary;
mod types;

pub use advice::{MAX_RECOMMENDATIONS, build_recommendations};
pub use fire::{FIRE_HORIZON_YEARS, estimate_years_to_fire, fire_target_adjusted, fire_target_today};
pub use projection::{calculate_investment_projection, monthly_rate, project_series};
pub use scenarios::{SCENARIO_SPREAD, build_scenarios, build_what_if_scenarios};
pub use summary::{base_projection_series, build_raiox_summary, default_raiox_input};
pub use types::{
    HealthMetric, MetricKey, MetricStatus, ProjectionPoint, RaioXInput, RaioXSummary, Scenario,
    ScenarioKind, WhatIfKey, WhatIfScenario,
};
