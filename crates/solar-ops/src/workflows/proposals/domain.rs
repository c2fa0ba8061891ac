use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use super::super::leads::domain::CreditTier;

/// Utility tariff snapshot supplied by the reference-data provider.
///
/// `base_rate_per_kwh` is always positive; a zero rate is a data defect the
/// provider must not serve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityRatePlan {
    pub utility_id: String,
    pub name: String,
    pub region: String,
    pub zip_code: String,
    pub base_rate_per_kwh: f64,
    pub rate_escalation_percent: f64,
    pub tiered_rates: bool,
    pub net_metering_available: bool,
    pub net_metering_credit_per_kwh: f64,
}

/// Permitting authority cost baselines. Both fees are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermittingAuthority {
    pub authority_id: String,
    pub county_name: String,
    pub region: String,
    pub permit_fee_baseline: f64,
    pub inspection_fee_baseline: f64,
}

/// Regional irradiance lookup. Peak sun hours are always positive; the value
/// divides the sizing formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalWeather {
    pub location_key: String,
    pub peak_sun_hours_per_day: f64,
}

/// Incentive bucket membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveKind {
    FederalTaxCredit,
    StateRebate,
    UtilityRebate,
}

impl IncentiveKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FederalTaxCredit => "federal_tax_credit",
            Self::StateRebate => "state_rebate",
            Self::UtilityRebate => "utility_rebate",
        }
    }
}

/// How an incentive amount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveAmount {
    Flat(f64),
    PercentOfGross(f64),
}

/// One incentive program record. `region: None` means unrestricted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveProgram {
    pub name: String,
    pub kind: IncentiveKind,
    pub amount: IncentiveAmount,
    pub cap: Option<f64>,
    pub region: Option<String>,
    pub expires_on: NaiveDate,
}

/// Lender program terms for loan-mode proposals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingProgram {
    pub program_id: String,
    pub lender_name: String,
    pub program_name: String,
    pub min_credit_score: u16,
    pub min_loan_amount: f64,
    pub max_loan_amount: f64,
    pub interest_rate_percent: f64,
    pub term_years: u8,
    pub origination_fee_percent: f64,
    pub combinable_with_incentives: bool,
}

/// Financing mode requested for the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingMode {
    #[default]
    Cash,
    Loan,
    Lease,
}

impl FinancingMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Loan => "loan",
            Self::Lease => "lease",
        }
    }
}

/// Engine input describing the prospect's consumption and financing ask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub monthly_electric_bill: f64,
    pub offset_target_percent: f64,
    #[serde(default)]
    pub credit_tier: Option<CreditTier>,
    #[serde(default)]
    pub financing: FinancingMode,
}

/// Complete proposal figures, rounded once at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalResult {
    pub system_size_kw: f64,
    pub annual_production_kwh: i64,
    pub offset_percent: i64,
    pub roof_area_sqft: i64,
    pub costs: CostBreakdown,
    pub cash_flow: CashFlowSummary,
    pub financing: FinancingOptions,
    pub environmental: EnvironmentalImpact,
    pub assumptions: AssumptionSet,
    pub warnings: Vec<String>,
    pub incentive_expirations: Vec<String>,
}

/// Whole-dollar cost ladder from gross hardware cost to total project cost.
/// Net system cost may legitimately go negative when incentives exceed the
/// gross cost; no floor is imposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub gross_system_cost: i64,
    pub federal_tax_credit: i64,
    pub state_incentives: i64,
    pub utility_rebates: i64,
    pub total_incentives: i64,
    pub net_system_cost: i64,
    pub permitting_cost: i64,
    pub total_project_cost: i64,
}

/// 25-year aggregates. Ratios are `None` when their denominator is
/// degenerate; a warning in the result explains each absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub year1_savings: i64,
    pub total_25_year_savings: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_payback_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_25_year_percent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approximate_irr_percent: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingOptions {
    pub cash_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease: Option<LeaseQuote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub loan_amount: i64,
    pub monthly_payment: i64,
    pub total_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseQuote {
    pub monthly_payment: i64,
    pub total_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub annual_co2_offset_metric_tons: f64,
    pub net_metered_production_kwh: i64,
}

/// Inputs echoed back so the caller can show where the numbers came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionSet {
    pub utility_rate_per_kwh: f64,
    pub rate_escalation_percent: f64,
    pub production_degradation_percent: f64,
    pub peak_sun_hours_per_day: f64,
}
