//! Deterministic solar proposal calculation over injected reference data.

pub mod domain;
pub mod engine;
pub mod reference;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssumptionSet, CashFlowSummary, CostBreakdown, CreditTier, EnvironmentalImpact, FinancingMode,
    FinancingOptions, FinancingProgram, IncentiveAmount, IncentiveKind, IncentiveProgram,
    LeaseQuote, LoanQuote, PermittingAuthority, ProposalRequest, ProposalResult, RegionalWeather,
    UtilityRatePlan,
};
pub use engine::{CalculationAssumptions, ProposalEngine, ProposalError};
pub use reference::{ReferenceBundle, ReferenceDataError, ReferenceDataProvider};
pub use router::proposal_router;
pub use service::{ProposalService, ProposalServiceError, QuoteRequest};
