use super::CalculationAssumptions;

/// Full-precision cash-flow aggregates. `None` ratios carry a matching
/// warning pushed by [`project`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CashFlowProjection {
    pub year1_savings: f64,
    pub cumulative_savings: f64,
    pub simple_payback_years: Option<f64>,
    pub roi_percent: Option<f64>,
    pub approximate_irr_percent: Option<f64>,
}

/// Simulate the projection horizon year by year: the utility rate escalates
/// compounded from year 1 while production degrades compounded from year 1.
/// Year-1 savings are reported at the undegraded, unescalated nominal figure.
pub(crate) fn project(
    year1_production_kwh: f64,
    base_rate_per_kwh: f64,
    rate_escalation_percent: f64,
    net_system_cost: f64,
    total_project_cost: f64,
    assumptions: &CalculationAssumptions,
    warnings: &mut Vec<String>,
) -> CashFlowProjection {
    let escalation = rate_escalation_percent / 100.0;
    let degradation = assumptions.annual_production_degradation;

    let mut cumulative_savings = 0.0;
    for year in 1..=assumptions.projection_years {
        let year_rate = base_rate_per_kwh * (1.0 + escalation).powi(year as i32 - 1);
        let year_production = year1_production_kwh * (1.0 - degradation).powi(year as i32 - 1);
        cumulative_savings += year_production * year_rate;
    }

    let year1_savings = year1_production_kwh * base_rate_per_kwh;

    let simple_payback_years = if year1_savings > 0.0 {
        Some(net_system_cost / year1_savings)
    } else {
        warnings.push("year-1 savings are not positive; simple payback is undefined".to_string());
        None
    };

    let (roi_percent, approximate_irr_percent) = if total_project_cost > 0.0 {
        (
            Some((cumulative_savings - total_project_cost) / total_project_cost * 100.0),
            Some(approximate_irr(
                cumulative_savings,
                total_project_cost,
                assumptions.projection_years,
            )),
        )
    } else {
        warnings.push("total project cost is not positive; ROI and IRR are undefined".to_string());
        (None, None)
    };

    CashFlowProjection {
        year1_savings,
        cumulative_savings,
        simple_payback_years,
        roi_percent,
        approximate_irr_percent,
    }
}

/// Geometric-mean IRR approximation: ((savings / cost)^(1/n) - 1) × 100.
/// This is not a discounted cash-flow solve; swap this function for an NPV
/// root-find if higher fidelity is ever required.
pub(crate) fn approximate_irr(cumulative_savings: f64, total_project_cost: f64, years: u32) -> f64 {
    ((cumulative_savings / total_project_cost).powf(1.0 / f64::from(years)) - 1.0) * 100.0
}
