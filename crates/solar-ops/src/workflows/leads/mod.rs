//! Lead intake, deterministic qualification, engagement tracking, and CSV
//! import for the sales pipeline.

pub mod domain;
pub mod import;
pub(crate) mod intake;
pub mod qualification;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ActivityKind, ContactInfo, CreditTier, EngagementActivity, FinancingReadiness, LeadId,
    LeadProfile, LeadStatus, LeadSubmission, LeadTier, NextAction, ObjectionFlag,
    PropertyCategory, ProspectAttributes, SiteAddress,
};
pub use import::{LeadCsvImporter, LeadImportBatch, LeadImportError, SkippedRow};
pub use intake::IntakeError;
pub use qualification::{
    rebuttals, QualificationEngine, QualificationFactor, QualificationOutcome, ScoreComponent,
};
pub use repository::{
    AlertError, HotLeadAlert, LeadAlertPublisher, LeadQuery, LeadRecord, LeadRepository, LeadView,
    RepositoryError,
};
pub use router::lead_router;
pub use service::{LeadImportSummary, LeadQualificationService, LeadServiceError};
