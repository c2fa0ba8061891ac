use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use solar_ops::workflows::leads::{
    AlertError, HotLeadAlert, LeadAlertPublisher, LeadId, LeadQuery, LeadRecord, LeadRepository,
    RepositoryError,
};
use solar_ops::workflows::proposals::{
    FinancingProgram, IncentiveAmount, IncentiveKind, IncentiveProgram, PermittingAuthority,
    ReferenceDataError, ReferenceDataProvider, RegionalWeather, UtilityRatePlan,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.lead_id) {
            guard.insert(record.profile.lead_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &LeadQuery) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<LeadRecord> = guard
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.profile.lead_id.0.cmp(&b.profile.lead_id.0));
        records.truncate(query.effective_limit());
        Ok(records)
    }
}

/// Logs hot-lead alerts and keeps them around for the demo output.
#[derive(Default, Clone)]
pub(crate) struct LoggingAlertPublisher {
    events: Arc<Mutex<Vec<HotLeadAlert>>>,
}

impl LoggingAlertPublisher {
    pub(crate) fn events(&self) -> Vec<HotLeadAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl LeadAlertPublisher for LoggingAlertPublisher {
    fn publish(&self, alert: HotLeadAlert) -> Result<(), AlertError> {
        tracing::info!(lead_id = %alert.lead_id.0, template = %alert.template, "hot lead alert");
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

/// In-memory reference catalog mirroring the production seed data.
#[derive(Debug, Clone)]
pub(crate) struct SeededReferenceCatalog {
    utilities: Vec<UtilityRatePlan>,
    authorities: Vec<PermittingAuthority>,
    weather: Vec<RegionalWeather>,
    incentives: Vec<IncentiveProgram>,
    programs: Vec<FinancingProgram>,
}

impl Default for SeededReferenceCatalog {
    fn default() -> Self {
        let date = |year, month, day| {
            NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
        };

        Self {
            utilities: vec![
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
                },
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
                },
            ],
            authorities: vec![PermittingAuthority {
                authority_id: "ahj-alameda".to_string(),
                county_name: "Alameda".to_string(),
                region: "CA".to_string(),
                permit_fee_baseline: 350.0,
                inspection_fee_baseline: 200.0,
            }],
            weather: vec![
                RegionalWeather {
                    location_key: "94000".to_string(),
                    peak_sun_hours_per_day: 5.2,
                },
                RegionalWeather {
                    location_key: "75000".to_string(),
                    peak_sun_hours_per_day: 5.6,
                },
            ],
            incentives: vec![
                IncentiveProgram {
                    name: "Federal ITC 30%".to_string(),
                    kind: IncentiveKind::FederalTaxCredit,
                    amount: IncentiveAmount::PercentOfGross(30.0),
                    cap: None,
                    region: None,
                    expires_on: date(2033, 12, 31),
                },
                IncentiveProgram {
                    name: "CA Self-Generation Incentive".to_string(),
                    kind: IncentiveKind::UtilityRebate,
                    amount: IncentiveAmount::Flat(750.0),
                    cap: None,
                    region: Some("CA".to_string()),
                    expires_on: date(2027, 12, 31),
                },
            ],
            programs: vec![FinancingProgram {
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
            }],
        }
    }
}

impl ReferenceDataProvider for SeededReferenceCatalog {
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
