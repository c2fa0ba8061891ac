use super::super::domain::{RegionalWeather, UtilityRatePlan};
use super::CalculationAssumptions;

/// Full-precision sizing intermediates threaded through the rest of the
/// pipeline.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SystemSizing {
    pub system_size_kw: f64,
    pub year1_production_kwh: f64,
    pub achieved_offset_percent: f64,
    pub gross_system_cost: f64,
    pub roof_area_sqft: f64,
}

/// Solve the sizing formula directly: consumption from the bill, target
/// production from the offset goal, system size from the regional yield.
pub(crate) fn size_system(
    monthly_electric_bill: f64,
    offset_target_percent: f64,
    utility: &UtilityRatePlan,
    weather: &RegionalWeather,
    assumptions: &CalculationAssumptions,
) -> SystemSizing {
    let monthly_consumption_kwh = monthly_electric_bill / utility.base_rate_per_kwh;
    let annual_consumption_kwh = monthly_consumption_kwh * 12.0;
    let target_production_kwh = annual_consumption_kwh * offset_target_percent / 100.0;

    // kWh produced per installed kW per year at this site.
    let annual_yield_per_kw =
        weather.peak_sun_hours_per_day * 365.0 * assumptions.system_efficiency;

    let system_size_kw = target_production_kwh / annual_yield_per_kw;
    let year1_production_kwh = system_size_kw * annual_yield_per_kw;

    // Solved directly rather than iterated, so this can drift a hair from the
    // requested target.
    let achieved_offset_percent = if annual_consumption_kwh > 0.0 {
        year1_production_kwh / annual_consumption_kwh * 100.0
    } else {
        0.0
    };

    let gross_system_cost = system_size_kw * 1000.0 * assumptions.cost_per_watt;
    let roof_area_sqft = system_size_kw * assumptions.roof_sqft_per_kw;

    SystemSizing {
        system_size_kw,
        year1_production_kwh,
        achieved_offset_percent,
        gross_system_cost,
        roof_area_sqft,
    }
}
