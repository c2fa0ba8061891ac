use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EngagementActivity, LeadId, LeadProfile, LeadStatus, LeadTier, ObjectionFlag};
use super::qualification::QualificationOutcome;

/// Repository record containing the profile, current qualification, and the
/// engagement trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub profile: LeadProfile,
    pub status: LeadStatus,
    pub qualification: QualificationOutcome,
    pub activities: Vec<EngagementActivity>,
}

impl LeadRecord {
    pub fn view(&self) -> LeadView {
        LeadView {
            lead_id: self.profile.lead_id.clone(),
            name: self.profile.contact.full_name(),
            email: self.profile.contact.email.clone(),
            state: self.profile.site.state.clone(),
            status: self.status.label(),
            tier: self.qualification.tier.label(),
            next_action: self.qualification.next_action.label(),
            total_score: self.qualification.total_score,
            monthly_electric_bill: self.profile.attributes.monthly_electric_bill,
            reason: self.qualification.reason.clone(),
            objection_flags: self.qualification.objection_flags.clone(),
            activity_count: self.activities.len(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn list(&self, query: &LeadQuery) -> Result<Vec<LeadRecord>, RepositoryError>;
}

const DEFAULT_LIST_LIMIT: usize = 50;

/// Filter for lead listings; absent fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadQuery {
    pub tier: Option<LeadTier>,
    pub state: Option<String>,
    pub status: Option<LeadStatus>,
    pub limit: Option<usize>,
}

impl LeadQuery {
    pub fn matches(&self, record: &LeadRecord) -> bool {
        if let Some(tier) = self.tier {
            if record.qualification.tier != tier {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if !record.profile.site.state.eq_ignore_ascii_case(state) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        true
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound alert hooks (e.g., dialer or e-mail adapters)
/// fired when a lead enters the hot tier.
pub trait LeadAlertPublisher: Send + Sync {
    fn publish(&self, alert: HotLeadAlert) -> Result<(), AlertError>;
}

/// Simple alert payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotLeadAlert {
    pub template: String,
    pub lead_id: LeadId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a lead for API responses and listings.
#[derive(Debug, Clone, Serialize)]
pub struct LeadView {
    pub lead_id: LeadId,
    pub name: String,
    pub email: String,
    pub state: String,
    pub status: &'static str,
    pub tier: &'static str,
    pub next_action: &'static str,
    pub total_score: i16,
    pub monthly_electric_bill: f64,
    pub reason: String,
    pub objection_flags: Vec<ObjectionFlag>,
    pub activity_count: usize,
}
