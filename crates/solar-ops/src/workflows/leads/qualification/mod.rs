mod policy;
pub mod rebuttals;
mod rules;

use super::domain::{LeadTier, NextAction, ObjectionFlag, ProspectAttributes};
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the fixed rule table to prospect attributes.
///
/// The weight table is the sales playbook's contract and is deliberately not
/// configurable; changing a weight is a reviewed code change with a test.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualificationEngine;

impl QualificationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, attributes: &ProspectAttributes) -> QualificationOutcome {
        let mut components = Vec::new();
        let mut objection_flags = Vec::new();
        let mut total_score: i16 = 0;

        for hit in rules::evaluate(attributes) {
            total_score += hit.delta;
            if let Some(flag) = hit.flag {
                objection_flags.push(flag);
            }
            components.push(ScoreComponent {
                factor: hit.factor,
                score: hit.delta,
                notes: hit.note,
            });
        }

        let (tier, next_action) = policy::classify(total_score);
        let reason = policy::build_reason(attributes);

        QualificationOutcome {
            tier,
            next_action,
            total_score,
            reason,
            objection_flags,
            components,
        }
    }
}

/// Factors permitted in the qualification rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationFactor {
    Consumption,
    Ownership,
    PropertyCategory,
    FinancingReadiness,
    CreditHistory,
    Appointment,
    Engagement,
}

/// Discrete contribution to a qualification pass, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: QualificationFactor,
    pub score: i16,
    pub notes: String,
}

/// Qualification output describing the tier, recommended action, and the
/// per-rule trail that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationOutcome {
    pub tier: LeadTier,
    pub next_action: NextAction,
    pub total_score: i16,
    pub reason: String,
    pub objection_flags: Vec<ObjectionFlag>,
    pub components: Vec<ScoreComponent>,
}
