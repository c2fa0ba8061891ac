use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::leads::domain::{
    ContactInfo, CreditTier, FinancingReadiness, LeadId, LeadSubmission, PropertyCategory,
    ProspectAttributes, SiteAddress,
};
use crate::workflows::leads::qualification::QualificationEngine;
use crate::workflows::leads::repository::{
    AlertError, HotLeadAlert, LeadAlertPublisher, LeadQuery, LeadRecord, LeadRepository,
    RepositoryError,
};
use crate::workflows::leads::router::lead_router;
use crate::workflows::leads::service::LeadQualificationService;

pub(super) fn contact() -> ContactInfo {
    ContactInfo {
        first_name: "Dana".to_string(),
        last_name: "Whitfield".to_string(),
        email: "dana.whitfield@example.com".to_string(),
        phone: "510-555-0144".to_string(),
    }
}

pub(super) fn site() -> SiteAddress {
    SiteAddress {
        street: "1427 Webster St".to_string(),
        city: Some("Oakland".to_string()),
        state: "CA".to_string(),
        zip_code: "94000".to_string(),
    }
}

/// Matches the canonical hot scenario: 40+20+15+25+20+15 = 135.
pub(super) fn hot_attributes() -> ProspectAttributes {
    ProspectAttributes {
        monthly_electric_bill: 250.0,
        home_owner: true,
        property_category: PropertyCategory::Residential,
        financing: FinancingReadiness::Cash,
        appointment_scheduled: true,
        engagement_activity: 5,
        credit_tier: Some(CreditTier::Excellent),
    }
}

/// Matches the canonical cold scenario: -20-30+15-15-10-10 = -70.
pub(super) fn cold_attributes() -> ProspectAttributes {
    ProspectAttributes {
        monthly_electric_bill: 30.0,
        home_owner: false,
        property_category: PropertyCategory::Residential,
        financing: FinancingReadiness::Unknown,
        appointment_scheduled: false,
        engagement_activity: 0,
        credit_tier: None,
    }
}

pub(super) fn submission_with(attributes: ProspectAttributes) -> LeadSubmission {
    LeadSubmission {
        contact: contact(),
        site: site(),
        utility_id: "util-ca-pge".to_string(),
        attributes,
        roof_type: Some("composite shingle".to_string()),
        roof_age_years: Some(9),
        notes: None,
    }
}

pub(super) fn hot_submission() -> LeadSubmission {
    submission_with(hot_attributes())
}

pub(super) fn cold_submission() -> LeadSubmission {
    submission_with(cold_attributes())
}

pub(super) fn engine() -> QualificationEngine {
    QualificationEngine::new()
}

pub(super) fn build_service() -> (
    LeadQualificationService<MemoryRepository, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = LeadQualificationService::new(repository.clone(), alerts.clone());
    (service, repository, alerts)
}

pub(super) fn lead_router_with_service(
    service: LeadQualificationService<MemoryRepository, MemoryAlerts>,
) -> axum::Router {
    lead_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
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
        guard.insert(record.profile.lead_id.clone(), record);
        Ok(())
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

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<HotLeadAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<HotLeadAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl LeadAlertPublisher for MemoryAlerts {
    fn publish(&self, alert: HotLeadAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}
