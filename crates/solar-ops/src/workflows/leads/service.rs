use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{
    ActivityKind, EngagementActivity, LeadId, LeadStatus, LeadSubmission, LeadTier,
};
use super::import::{LeadCsvImporter, LeadImportError};
use super::intake::{IntakeError, IntakeGuard};
use super::qualification::{QualificationEngine, QualificationOutcome};
use super::repository::{
    AlertError, HotLeadAlert, LeadAlertPublisher, LeadQuery, LeadRecord, LeadRepository,
    LeadView, RepositoryError,
};

/// Service composing the intake guard, repository, scoring engine, and alert
/// hook.
pub struct LeadQualificationService<R, A> {
    guard: IntakeGuard,
    repository: Arc<R>,
    alerts: Arc<A>,
    engine: QualificationEngine,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, A> LeadQualificationService<R, A>
where
    R: LeadRepository + 'static,
    A: LeadAlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            alerts,
            engine: QualificationEngine::new(),
        }
    }

    /// Validate, score, and persist a new lead. Hot leads fire an alert.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadServiceError> {
        let mut profile = self.guard.profile_from_submission(submission)?;
        profile.lead_id = next_lead_id();

        let qualification = self.engine.score(&profile.attributes);
        let record = LeadRecord {
            profile,
            status: LeadStatus::New,
            qualification,
            activities: Vec::new(),
        };

        let stored = self.repository.insert(record)?;
        if stored.qualification.tier == LeadTier::Hot {
            self.publish_hot_alert(&stored)?;
        }
        Ok(stored)
    }

    /// Log a touchpoint. Engagement feeds the scoring rubric, so the lead is
    /// rescored with the bumped count and the stored tier never goes stale.
    pub fn record_activity(
        &self,
        lead_id: &LeadId,
        activity: EngagementActivity,
    ) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.activities.push(activity);
        record.profile.attributes.engagement_activity += 1;

        let was_hot = record.qualification.tier == LeadTier::Hot;
        record.qualification = self.engine.score(&record.profile.attributes);
        self.repository.update(record.clone())?;

        if !was_hot && record.qualification.tier == LeadTier::Hot {
            self.publish_hot_alert(&record)?;
        }
        Ok(record)
    }

    /// Re-run the scoring engine against the stored attributes.
    pub fn rescore(&self, lead_id: &LeadId) -> Result<QualificationOutcome, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.qualification = self.engine.score(&record.profile.attributes);
        let outcome = record.qualification.clone();
        self.repository.update(record)?;
        Ok(outcome)
    }

    /// Flag the lead as proposed and log the proposal touchpoint.
    pub fn mark_proposed(
        &self,
        lead_id: &LeadId,
        on: NaiveDate,
        reference: &str,
    ) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.status = LeadStatus::Proposed;
        record.activities.push(EngagementActivity {
            kind: ActivityKind::ProposalSent,
            occurred_on: on,
            notes: format!("proposal {reference} generated"),
        });
        record.profile.attributes.engagement_activity += 1;

        let was_hot = record.qualification.tier == LeadTier::Hot;
        record.qualification = self.engine.score(&record.profile.attributes);
        self.repository.update(record.clone())?;

        if !was_hot && record.qualification.tier == LeadTier::Hot {
            self.publish_hot_alert(&record)?;
        }
        Ok(record)
    }

    /// Fetch a lead for API responses.
    pub fn get(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self, query: &LeadQuery) -> Result<Vec<LeadRecord>, LeadServiceError> {
        Ok(self.repository.list(query)?)
    }

    /// Run a dialer CSV export through intake. Unusable rows are reported,
    /// never fatal; infrastructure failures still abort.
    pub fn import_csv(&self, csv_text: &str) -> Result<LeadImportSummary, LeadServiceError> {
        let batch = LeadCsvImporter::from_reader(csv_text.as_bytes())?;

        let mut summary = LeadImportSummary {
            imported: Vec::new(),
            skipped: batch
                .skipped
                .into_iter()
                .map(|row| format!("line {}: {}", row.line, row.reason))
                .collect(),
        };

        for submission in batch.submissions {
            match self.submit(submission) {
                Ok(record) => summary.imported.push(record.view()),
                Err(LeadServiceError::Intake(error)) => summary.skipped.push(error.to_string()),
                Err(other) => return Err(other),
            }
        }

        Ok(summary)
    }

    fn publish_hot_alert(&self, record: &LeadRecord) -> Result<(), LeadServiceError> {
        let mut details = BTreeMap::new();
        details.insert("tier".to_string(), record.qualification.tier.label().to_string());
        details.insert(
            "next_action".to_string(),
            record.qualification.next_action.label().to_string(),
        );
        details.insert(
            "total_score".to_string(),
            record.qualification.total_score.to_string(),
        );

        self.alerts.publish(HotLeadAlert {
            template: "hot_lead_followup".to_string(),
            lead_id: record.profile.lead_id.clone(),
            details,
        })?;
        Ok(())
    }
}

/// Outcome of a CSV import run.
#[derive(Debug, Serialize)]
pub struct LeadImportSummary {
    pub imported: Vec<LeadView>,
    pub skipped: Vec<String>,
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error(transparent)]
    Import(#[from] LeadImportError),
}
