use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for leads tracked by the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Contact details captured at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Service address for the prospective install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAddress {
    pub street: String,
    pub city: Option<String>,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Residential,
    Commercial,
    NonProfit,
}

impl PropertyCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::NonProfit => "non_profit",
        }
    }
}

/// Declared financing posture; `Unknown` is the intake default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingReadiness {
    Cash,
    Loan,
    Lease,
    #[default]
    Unknown,
}

impl FinancingReadiness {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Loan => "loan",
            Self::Lease => "lease",
            Self::Unknown => "unknown",
        }
    }
}

/// Self-reported credit band used by both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Approximate FICO midpoint used when comparing against lender minimums.
    pub const fn approximate_score(self) -> u16 {
        match self {
            Self::Excellent => 750,
            Self::Good => 700,
            Self::Fair => 650,
            Self::Poor => 600,
        }
    }

    pub const fn is_strong(self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

/// Scoring tier ordered hot > warm > cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTier {
    Hot,
    Warm,
    Cold,
}

impl LeadTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    ScheduleSiteSurvey,
    SendProposalRequest,
    NurtureCampaign,
}

impl NextAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ScheduleSiteSurvey => "schedule_site_survey",
            Self::SendProposalRequest => "send_proposal_request",
            Self::NurtureCampaign => "nurture_campaign",
        }
    }
}

/// Named objections raised by the scoring rules, each backed by one canned
/// rebuttal script.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionFlag {
    LowConsumptionLowRoi,
    RenterNoOwnership,
    FinancingStatusUnknown,
    CreditScoreConcern,
}

impl ObjectionFlag {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LowConsumptionLowRoi => "low_consumption_low_roi",
            Self::RenterNoOwnership => "renter_no_ownership",
            Self::FinancingStatusUnknown => "financing_status_unknown",
            Self::CreditScoreConcern => "credit_score_concern",
        }
    }

    /// Lenient label lookup; unrecognized labels resolve to `None` so callers
    /// can drop them silently.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "low_consumption_low_roi" => Some(Self::LowConsumptionLowRoi),
            "renter_no_ownership" => Some(Self::RenterNoOwnership),
            "financing_status_unknown" => Some(Self::FinancingStatusUnknown),
            "credit_score_concern" => Some(Self::CreditScoreConcern),
            _ => None,
        }
    }
}

/// Scoring input for a single qualification pass. Missing optional fields
/// contribute nothing rather than rejecting the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectAttributes {
    pub monthly_electric_bill: f64,
    pub home_owner: bool,
    pub property_category: PropertyCategory,
    #[serde(default)]
    pub financing: FinancingReadiness,
    #[serde(default)]
    pub appointment_scheduled: bool,
    #[serde(default)]
    pub engagement_activity: u32,
    #[serde(default)]
    pub credit_tier: Option<CreditTier>,
}

/// Inbound lead payload before intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub contact: ContactInfo,
    pub site: SiteAddress,
    pub utility_id: String,
    pub attributes: ProspectAttributes,
    #[serde(default)]
    pub roof_type: Option<String>,
    #[serde(default)]
    pub roof_age_years: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Sanitized lead produced by the intake guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub lead_id: LeadId,
    pub contact: ContactInfo,
    pub site: SiteAddress,
    pub utility_id: String,
    pub attributes: ProspectAttributes,
    pub roof_type: Option<String>,
    pub roof_age_years: Option<u8>,
    pub notes: Option<String>,
}

/// High level status tracked across the lead lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Proposed,
    ClosedWon,
    ClosedLost,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Proposed => "proposed",
            Self::ClosedWon => "closed_won",
            Self::ClosedLost => "closed_lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Call,
    Email,
    TextMessage,
    SiteVisit,
    ProposalSent,
}

impl ActivityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::TextMessage => "text_message",
            Self::SiteVisit => "site_visit",
            Self::ProposalSent => "proposal_sent",
        }
    }
}

/// One logged touchpoint with the prospect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementActivity {
    pub kind: ActivityKind,
    pub occurred_on: NaiveDate,
    pub notes: String,
}
