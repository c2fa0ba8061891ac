use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::proposals::domain::{
    FinancingMode, FinancingProgram, IncentiveAmount, IncentiveKind, IncentiveProgram,
    PermittingAuthority, ProposalRequest, RegionalWeather, UtilityRatePlan,
};
use crate::workflows::proposals::engine::ProposalEngine;
use crate::workflows::proposals::reference::{ReferenceDataError, ReferenceDataProvider};
use crate::workflows::proposals::service::ProposalService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date")
}

pub(super) fn utility() -> UtilityRatePlan {
    UtilityRatePlan {
        utility_id: "util-ca-pge".to_string(),
        name: "Pacific Gas & Electric".to_string(),
        region: "CA".to_string(),
        zip_code: "94000".to_string(),
        base_rate_per_kwh: 0.185,
        rate_escalation_percent: 3.8,
        tiered_rates: true,
        net_metering_available: true,
        net_metering_credit_per_kwh: 0.185,
    }
}

pub(super) fn texas_utility() -> UtilityRatePlan {
    UtilityRatePlan {
        utility_id: "util-tx-ercot".to_string(),
        name: "ERCOT Texas".to_string(),
        region: "TX".to_string(),
        zip_code: "75000".to_string(),
        base_rate_per_kwh: 0.12,
        rate_escalation_percent: 2.8,
        tiered_rates: false,
        net_metering_available: false,
        net_metering_credit_per_kwh: 0.0,
    }
}

pub(super) fn authority() -> PermittingAuthority {
    PermittingAuthority {
        authority_id: "ahj-alameda".to_string(),
        county_name: "Alameda".to_string(),
        region: "CA".to_string(),
        permit_fee_baseline: 350.0,
        inspection_fee_baseline: 200.0,
    }
}

pub(super) fn weather() -> RegionalWeather {
    RegionalWeather {
        location_key: "94000".to_string(),
        peak_sun_hours_per_day: 5.2,
    }
}

pub(super) fn texas_weather() -> RegionalWeather {
    RegionalWeather {
        location_key: "75000".to_string(),
        peak_sun_hours_per_day: 5.6,
    }
}

pub(super) fn financing_program() -> FinancingProgram {
    FinancingProgram {
        program_id: "fin-sunloans-std".to_string(),
        lender_name: "Sunloans".to_string(),
        program_name: "Standard Solar Loan".to_string(),
        min_credit_score: 650,
        min_loan_amount: 5000.0,
        max_loan_amount: 100_000.0,
        interest_rate_percent: 7.99,
        term_years: 25,
        origination_fee_percent: 1.5,
        combinable_with_incentives: true,
    }
}

pub(super) fn percent_state_rebate(percent: f64, cap: Option<f64>) -> IncentiveProgram {
    IncentiveProgram {
        name: "CA Solar Initiative".to_string(),
        kind: IncentiveKind::StateRebate,
        amount: IncentiveAmount::PercentOfGross(percent),
        cap,
        region: Some("CA".to_string()),
        expires_on: NaiveDate::from_ymd_opt(2030, 12, 31).expect("valid date"),
    }
}

pub(super) fn flat_state_rebate(amount: f64) -> IncentiveProgram {
    IncentiveProgram {
        name: "CA Equity Rebate".to_string(),
        kind: IncentiveKind::StateRebate,
        amount: IncentiveAmount::Flat(amount),
        cap: None,
        region: Some("CA".to_string()),
        expires_on: NaiveDate::from_ymd_opt(2030, 12, 31).expect("valid date"),
    }
}

pub(super) fn flat_utility_rebate(amount: f64) -> IncentiveProgram {
    IncentiveProgram {
        name: "PG&E Self-Generation".to_string(),
        kind: IncentiveKind::UtilityRebate,
        amount: IncentiveAmount::Flat(amount),
        cap: None,
        region: Some("CA".to_string()),
        expires_on: NaiveDate::from_ymd_opt(2030, 12, 31).expect("valid date"),
    }
}

pub(super) fn expired_state_rebate() -> IncentiveProgram {
    IncentiveProgram {
        name: "Legacy SASH Grant".to_string(),
        kind: IncentiveKind::StateRebate,
        amount: IncentiveAmount::Flat(2500.0),
        cap: None,
        region: Some("CA".to_string()),
        expires_on: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
    }
}

pub(super) fn cash_request(monthly_electric_bill: f64) -> ProposalRequest {
    ProposalRequest {
        monthly_electric_bill,
        offset_target_percent: 100.0,
        credit_tier: None,
        financing: FinancingMode::Cash,
    }
}

pub(super) fn engine() -> ProposalEngine {
    ProposalEngine::default()
}

/// Fixture provider backed by plain vectors, seeded with the California and
/// Texas catalogs.
#[derive(Debug, Clone)]
pub(super) struct StaticProvider {
    pub(super) utilities: Vec<UtilityRatePlan>,
    pub(super) authorities: Vec<PermittingAuthority>,
    pub(super) weather: Vec<RegionalWeather>,
    pub(super) incentives: Vec<IncentiveProgram>,
    pub(super) programs: Vec<FinancingProgram>,
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self {
            utilities: vec![utility(), texas_utility()],
            authorities: vec![authority()],
            weather: vec![weather(), texas_weather()],
            incentives: Vec::new(),
            programs: vec![financing_program()],
        }
    }
}

impl ReferenceDataProvider for StaticProvider {
    fn utility_plan(
        &self,
        utility_id: &str,
    ) -> Result<Option<UtilityRatePlan>, ReferenceDataError> {
        Ok(self
            .utilities
            .iter()
            .find(|plan| plan.utility_id == utility_id)
            .cloned())
    }

    fn permitting_authority(
        &self,
        authority_id: &str,
    ) -> Result<Option<PermittingAuthority>, ReferenceDataError> {
        Ok(self
            .authorities
            .iter()
            .find(|record| record.authority_id == authority_id)
            .cloned())
    }

    fn regional_weather(
        &self,
        location_key: &str,
    ) -> Result<Option<RegionalWeather>, ReferenceDataError> {
        Ok(self
            .weather
            .iter()
            .find(|record| record.location_key == location_key)
            .cloned())
    }

    fn incentive_programs(
        &self,
        region: &str,
    ) -> Result<Vec<IncentiveProgram>, ReferenceDataError> {
        Ok(self
            .incentives
            .iter()
            .filter(|program| {
                program
                    .region
                    .as_deref()
                    .map_or(true, |restriction| restriction.eq_ignore_ascii_case(region))
            })
            .cloned()
            .collect())
    }

    fn financing_program(
        &self,
        program_id: &str,
    ) -> Result<Option<FinancingProgram>, ReferenceDataError> {
        Ok(self
            .programs
            .iter()
            .find(|program| program.program_id == program_id)
            .cloned())
    }
}

pub(super) fn service_with(provider: StaticProvider) -> ProposalService<StaticProvider> {
    ProposalService::new(Arc::new(provider))
}
