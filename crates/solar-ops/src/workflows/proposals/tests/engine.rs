use super::common::*;
use crate::workflows::proposals::engine::ProposalError;
use crate::workflows::proposals::reference::ReferenceBundle;

#[test]
fn golden_regression_for_the_documented_scenario() {
    // Rate $0.185/kWh, bill $150/mo, 100% offset, 5.2 peak sun hours,
    // $350 + $200 authority baselines.
    let utility = utility();
    let authority = authority();
    let weather = weather();
    let bundle = ReferenceBundle {
        utility: Some(&utility),
        authority: Some(&authority),
        weather: Some(&weather),
        incentives: &[],
        financing: None,
    };

    let result = engine()
        .calculate(&cash_request(150.0), &bundle, today())
        .expect("calculation succeeds");

    assert_eq!(result.system_size_kw, 6.03);
    assert_eq!(result.annual_production_kwh, 9730);
    assert_eq!(result.offset_percent, 100);
    assert_eq!(result.roof_area_sqft, 392);

    assert_eq!(result.costs.gross_system_cost, 16585);
    assert_eq!(result.costs.federal_tax_credit, 4976);
    assert_eq!(result.costs.state_incentives, 0);
    assert_eq!(result.costs.utility_rebates, 0);
    assert_eq!(result.costs.total_incentives, 4976);
    assert_eq!(result.costs.net_system_cost, 11610);
    assert_eq!(result.costs.permitting_cost, 550);
    assert_eq!(result.costs.total_project_cost, 12160);

    assert_eq!(result.cash_flow.year1_savings, 1800);
    assert_eq!(result.cash_flow.simple_payback_years, Some(6.45));
    assert!(result.cash_flow.total_25_year_savings > 25 * 1800);
    let roi = result.cash_flow.roi_25_year_percent.expect("roi defined");
    assert!(roi > 0);
    let irr = result
        .cash_flow
        .approximate_irr_percent
        .expect("irr defined");
    assert!((1..=20).contains(&irr));

    assert_eq!(result.financing.cash_price, 11610);
    assert!(result.financing.loan.is_none());
    assert!(result.financing.lease.is_none());

    assert_eq!(result.environmental.annual_co2_offset_metric_tons, 8.95);
    assert_eq!(result.environmental.net_metered_production_kwh, 1459);

    assert_eq!(result.assumptions.utility_rate_per_kwh, 0.185);
    assert_eq!(result.assumptions.rate_escalation_percent, 3.8);
    assert_eq!(result.assumptions.production_degradation_percent, 0.5);
    assert_eq!(result.assumptions.peak_sun_hours_per_day, 5.2);

    assert!(result.warnings.is_empty());
    assert!(result.incentive_expirations.is_empty());
}

#[test]
fn identical_inputs_produce_identical_results() {
    let utility = utility();
    let authority = authority();
    let weather = weather();
    let bundle = ReferenceBundle {
        utility: Some(&utility),
        authority: Some(&authority),
        weather: Some(&weather),
        incentives: &[],
        financing: None,
    };

    let first = engine()
        .calculate(&cash_request(175.0), &bundle, today())
        .expect("calculation succeeds");
    let second = engine()
        .calculate(&cash_request(175.0), &bundle, today())
        .expect("calculation succeeds");

    assert_eq!(first, second);
}

#[test]
fn missing_records_are_named_in_the_error() {
    let authority = authority();
    let bundle = ReferenceBundle {
        utility: None,
        authority: Some(&authority),
        weather: None,
        incentives: &[],
        financing: None,
    };

    let error = engine()
        .calculate(&cash_request(150.0), &bundle, today())
        .expect_err("mandatory records are missing");

    let ProposalError::MissingReferenceData { missing } = error;
    assert_eq!(missing, vec!["utility", "weather"]);
}

#[test]
fn entirely_empty_bundle_lists_all_three_records() {
    let error = engine()
        .calculate(&cash_request(150.0), &ReferenceBundle::default(), today())
        .expect_err("mandatory records are missing");

    assert_eq!(
        error.to_string(),
        "missing required reference data: utility, authority, weather"
    );
}

#[test]
fn zero_bill_yields_a_degenerate_but_complete_result() {
    let utility = utility();
    let authority = authority();
    let weather = weather();
    let bundle = ReferenceBundle {
        utility: Some(&utility),
        authority: Some(&authority),
        weather: Some(&weather),
        incentives: &[],
        financing: None,
    };

    let result = engine()
        .calculate(&cash_request(0.0), &bundle, today())
        .expect("calculation succeeds");

    assert_eq!(result.system_size_kw, 0.0);
    assert_eq!(result.cash_flow.year1_savings, 0);
    assert_eq!(result.cash_flow.simple_payback_years, None);
    assert!(result
        .warnings
        .iter()
        .any(|warning| warning.contains("payback")));
    // Permitting still applies, so the project keeps a positive total cost.
    assert_eq!(result.costs.total_project_cost, 550);
}

#[test]
fn offset_target_scales_the_system() {
    let utility = utility();
    let authority = authority();
    let weather = weather();
    let bundle = ReferenceBundle {
        utility: Some(&utility),
        authority: Some(&authority),
        weather: Some(&weather),
        incentives: &[],
        financing: None,
    };

    let mut request = cash_request(150.0);
    request.offset_target_percent = 50.0;

    let result = engine()
        .calculate(&request, &bundle, today())
        .expect("calculation succeeds");

    assert_eq!(result.offset_percent, 50);
    assert_eq!(result.system_size_kw, 3.02);
}

#[test]
fn net_metering_credit_requires_an_eligible_plan() {
    let utility = texas_utility();
    let authority = authority();
    let weather = texas_weather();
    let bundle = ReferenceBundle {
        utility: Some(&utility),
        authority: Some(&authority),
        weather: Some(&weather),
        incentives: &[],
        financing: None,
    };

    let result = engine()
        .calculate(&cash_request(150.0), &bundle, today())
        .expect("calculation succeeds");

    assert_eq!(result.environmental.net_metered_production_kwh, 0);
}
