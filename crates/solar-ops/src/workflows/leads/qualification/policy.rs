use super::super::domain::{FinancingReadiness, LeadTier, NextAction, ProspectAttributes};

pub(crate) const HOT_SCORE_FLOOR: i16 = 80;
pub(crate) const WARM_SCORE_FLOOR: i16 = 40;

/// Band lower bounds are inclusive; everything below warm is cold.
pub(crate) fn classify(total_score: i16) -> (LeadTier, NextAction) {
    if total_score >= HOT_SCORE_FLOOR {
        (LeadTier::Hot, NextAction::ScheduleSiteSurvey)
    } else if total_score >= WARM_SCORE_FLOOR {
        (LeadTier::Warm, NextAction::SendProposalRequest)
    } else {
        (LeadTier::Cold, NextAction::NurtureCampaign)
    }
}

/// Short human-readable summary of the qualifying observations. Informational
/// only; classification never reads it.
pub(crate) fn build_reason(attributes: &ProspectAttributes) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if attributes.monthly_electric_bill >= 200.0 {
        reasons.push("High electricity consumption ($200+/mo)".to_string());
    } else if attributes.monthly_electric_bill < 80.0 {
        reasons.push("Low electricity consumption - limited ROI".to_string());
    }

    if attributes.home_owner {
        reasons.push("Homeowner (decision maker)".to_string());
    }

    if attributes.financing == FinancingReadiness::Cash {
        reasons.push("Cash buyer (fast close potential)".to_string());
    }

    if attributes.appointment_scheduled {
        reasons.push("Appointment already scheduled".to_string());
    }

    if attributes.engagement_activity >= 5 {
        reasons.push(format!(
            "High engagement ({} activities)",
            attributes.engagement_activity
        ));
    }

    reasons.join(" • ")
}
