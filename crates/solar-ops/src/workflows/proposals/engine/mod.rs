mod financing;
mod incentives;
mod projection;
mod sizing;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    AssumptionSet, CashFlowSummary, CostBreakdown, EnvironmentalImpact, FinancingMode,
    FinancingOptions, LeaseQuote, LoanQuote, ProposalRequest, ProposalResult,
};
use super::reference::ReferenceBundle;

#[cfg(test)]
pub(crate) use financing::amortized_monthly_payment;
#[cfg(test)]
pub(crate) use projection::approximate_irr;

/// Fixed modeling constants behind every proposal. Defaults are the industry
/// baselines the sales team quotes against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationAssumptions {
    pub system_efficiency: f64,
    pub cost_per_watt: f64,
    pub roof_sqft_per_kw: f64,
    pub annual_production_degradation: f64,
    pub federal_itc_rate: f64,
    pub co2_tons_per_mwh: f64,
    pub net_metering_export_share: f64,
    pub lease_annual_price_factor: f64,
    pub lease_term_years: u32,
    pub projection_years: u32,
}

impl Default for CalculationAssumptions {
    fn default() -> Self {
        Self {
            system_efficiency: 0.85,
            cost_per_watt: 2.75,
            roof_sqft_per_kw: 65.0,
            annual_production_degradation: 0.005,
            federal_itc_rate: 0.30,
            co2_tons_per_mwh: 0.92,
            net_metering_export_share: 0.15,
            lease_annual_price_factor: 0.0075,
            lease_term_years: 20,
            projection_years: 25,
        }
    }
}

/// Error raised when the mandatory reference records are absent. The engine
/// never fabricates utility, authority, or weather data.
#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    #[error("missing required reference data: {}", .missing.join(", "))]
    MissingReferenceData { missing: Vec<&'static str> },
}

/// Stateless calculator producing a complete proposal from one reference-data
/// snapshot. Every anomaly short of missing mandatory data is a warning in
/// the result, never an error.
#[derive(Debug, Clone, Default)]
pub struct ProposalEngine {
    assumptions: CalculationAssumptions,
}

impl ProposalEngine {
    pub fn new(assumptions: CalculationAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &CalculationAssumptions {
        &self.assumptions
    }

    pub fn calculate(
        &self,
        request: &ProposalRequest,
        reference: &ReferenceBundle<'_>,
        today: NaiveDate,
    ) -> Result<ProposalResult, ProposalError> {
        let mut missing = Vec::new();
        if reference.utility.is_none() {
            missing.push("utility");
        }
        if reference.authority.is_none() {
            missing.push("authority");
        }
        if reference.weather.is_none() {
            missing.push("weather");
        }
        let (Some(utility), Some(authority), Some(weather)) =
            (reference.utility, reference.authority, reference.weather)
        else {
            return Err(ProposalError::MissingReferenceData { missing });
        };

        let mut warnings = Vec::new();

        let sizing = sizing::size_system(
            request.monthly_electric_bill,
            request.offset_target_percent,
            utility,
            weather,
            &self.assumptions,
        );

        let ledger = incentives::apply(
            sizing.gross_system_cost,
            &utility.region,
            reference.incentives,
            today,
            self.assumptions.federal_itc_rate,
        );

        let net_system_cost = sizing.gross_system_cost - ledger.total();
        if net_system_cost < 0.0 {
            warnings
                .push("incentives exceed the gross system cost; net system cost is negative".to_string());
        }
        let permitting_cost = authority.permit_fee_baseline + authority.inspection_fee_baseline;
        let total_project_cost = net_system_cost + permitting_cost;

        let projection = projection::project(
            sizing.year1_production_kwh,
            utility.base_rate_per_kwh,
            utility.rate_escalation_percent,
            net_system_cost,
            total_project_cost,
            &self.assumptions,
            &mut warnings,
        );

        let cash_price = net_system_cost;
        let loan = match (request.financing, reference.financing) {
            (FinancingMode::Loan, Some(program)) => financing::loan_quote(
                net_system_cost,
                ledger.total(),
                program,
                request.credit_tier,
                &mut warnings,
            ),
            _ => None,
        };
        let lease = if request.financing == FinancingMode::Lease {
            financing::lease_quote(cash_price, &self.assumptions, &mut warnings)
        } else {
            None
        };

        let net_metered_production_kwh = if utility.net_metering_available {
            sizing.year1_production_kwh * self.assumptions.net_metering_export_share
        } else {
            0.0
        };
        let annual_co2_offset_metric_tons =
            sizing.year1_production_kwh / 1000.0 * self.assumptions.co2_tons_per_mwh;

        Ok(ProposalResult {
            system_size_kw: round_two(sizing.system_size_kw),
            annual_production_kwh: round_whole(sizing.year1_production_kwh),
            offset_percent: round_whole(sizing.achieved_offset_percent),
            roof_area_sqft: round_whole(sizing.roof_area_sqft),
            costs: CostBreakdown {
                gross_system_cost: round_whole(sizing.gross_system_cost),
                federal_tax_credit: round_whole(ledger.federal_tax_credit),
                state_incentives: round_whole(ledger.state_rebates),
                utility_rebates: round_whole(ledger.utility_rebates),
                total_incentives: round_whole(ledger.total()),
                net_system_cost: round_whole(net_system_cost),
                permitting_cost: round_whole(permitting_cost),
                total_project_cost: round_whole(total_project_cost),
            },
            cash_flow: CashFlowSummary {
                year1_savings: round_whole(projection.year1_savings),
                total_25_year_savings: round_whole(projection.cumulative_savings),
                simple_payback_years: projection.simple_payback_years.map(round_two),
                roi_25_year_percent: projection.roi_percent.map(round_whole),
                approximate_irr_percent: projection.approximate_irr_percent.map(round_whole),
            },
            financing: FinancingOptions {
                cash_price: round_whole(cash_price),
                loan: loan.map(|quote| LoanQuote {
                    loan_amount: round_whole(quote.loan_amount),
                    monthly_payment: round_whole(quote.monthly_payment),
                    total_cost: round_whole(quote.total_cost),
                }),
                lease: lease.map(|quote| LeaseQuote {
                    monthly_payment: round_whole(quote.monthly_payment),
                    total_cost: round_whole(quote.total_cost),
                }),
            },
            environmental: EnvironmentalImpact {
                annual_co2_offset_metric_tons: round_two(annual_co2_offset_metric_tons),
                net_metered_production_kwh: round_whole(net_metered_production_kwh),
            },
            assumptions: AssumptionSet {
                utility_rate_per_kwh: utility.base_rate_per_kwh,
                rate_escalation_percent: utility.rate_escalation_percent,
                production_degradation_percent: self.assumptions.annual_production_degradation
                    * 100.0,
                peak_sun_hours_per_day: weather.peak_sun_hours_per_day,
            },
            warnings,
            incentive_expirations: ledger.expiration_notices,
        })
    }
}

// Rounding happens here and only here; the pipeline above runs full precision.
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
