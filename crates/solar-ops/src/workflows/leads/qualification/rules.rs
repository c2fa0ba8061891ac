use super::super::domain::{FinancingReadiness, ObjectionFlag, PropertyCategory, ProspectAttributes};
use super::QualificationFactor;

pub(crate) struct RuleHit {
    pub factor: QualificationFactor,
    pub delta: i16,
    pub note: String,
    pub flag: Option<ObjectionFlag>,
}

type Rule = fn(&ProspectAttributes) -> Option<RuleHit>;

/// Rules fire in priority order; each contributes a fixed point delta and may
/// raise an objection flag. A rule returning `None` did not apply.
const RULES: &[Rule] = &[
    consumption_rule,
    ownership_rule,
    property_category_rule,
    financing_rule,
    credit_rule,
    appointment_rule,
    engagement_rule,
];

pub(crate) fn evaluate(attributes: &ProspectAttributes) -> Vec<RuleHit> {
    RULES.iter().filter_map(|rule| rule(attributes)).collect()
}

fn consumption_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    let bill = attributes.monthly_electric_bill;
    let (delta, note, flag) = if bill >= 200.0 {
        (40, format!("monthly bill ${bill:.0} signals high consumption"), None)
    } else if bill >= 120.0 {
        (30, format!("monthly bill ${bill:.0} supports strong savings"), None)
    } else if bill >= 80.0 {
        (15, format!("monthly bill ${bill:.0} supports a modest system"), None)
    } else {
        (
            -20,
            format!("monthly bill ${bill:.0} leaves little room for savings"),
            Some(ObjectionFlag::LowConsumptionLowRoi),
        )
    };

    Some(RuleHit {
        factor: QualificationFactor::Consumption,
        delta,
        note,
        flag,
    })
}

fn ownership_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    let (delta, note, flag) = if attributes.home_owner {
        (20, "homeowner can authorize the install".to_string(), None)
    } else {
        (
            -30,
            "renter cannot authorize a rooftop install".to_string(),
            Some(ObjectionFlag::RenterNoOwnership),
        )
    };

    Some(RuleHit {
        factor: QualificationFactor::Ownership,
        delta,
        note,
        flag,
    })
}

fn property_category_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    let (delta, note) = match attributes.property_category {
        PropertyCategory::Residential => (15, "residential rooftop profile"),
        PropertyCategory::Commercial => (10, "commercial install profile"),
        PropertyCategory::NonProfit => (25, "non-profit qualifies for dedicated incentive programs"),
    };

    Some(RuleHit {
        factor: QualificationFactor::PropertyCategory,
        delta,
        note: note.to_string(),
        flag: None,
    })
}

fn financing_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    let (delta, note, flag) = match attributes.financing {
        FinancingReadiness::Cash => (25, "cash purchase closes fastest".to_string(), None),
        FinancingReadiness::Loan => (20, "loan financing pre-selected".to_string(), None),
        FinancingReadiness::Lease => (10, "lease appetite declared".to_string(), None),
        FinancingReadiness::Unknown => (
            -15,
            "financing posture still unknown".to_string(),
            Some(ObjectionFlag::FinancingStatusUnknown),
        ),
    };

    Some(RuleHit {
        factor: QualificationFactor::FinancingReadiness,
        delta,
        note,
        flag,
    })
}

/// Only fires when financing is not cash and a weak credit tier was supplied.
fn credit_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    if attributes.financing == FinancingReadiness::Cash {
        return None;
    }

    let tier = attributes.credit_tier?;
    if tier.is_strong() {
        return None;
    }

    Some(RuleHit {
        factor: QualificationFactor::CreditHistory,
        delta: -20,
        note: format!("{} credit complicates financing", tier.label()),
        flag: Some(ObjectionFlag::CreditScoreConcern),
    })
}

fn appointment_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    let (delta, note) = if attributes.appointment_scheduled {
        (20, "site survey appointment on the books")
    } else {
        (-10, "no appointment scheduled yet")
    };

    Some(RuleHit {
        factor: QualificationFactor::Appointment,
        delta,
        note: note.to_string(),
        flag: None,
    })
}

fn engagement_rule(attributes: &ProspectAttributes) -> Option<RuleHit> {
    let count = attributes.engagement_activity;
    let (delta, note) = if count >= 5 {
        (15, format!("{count} recent touchpoints show strong intent"))
    } else if count >= 2 {
        (5, format!("{count} recent touchpoints"))
    } else {
        (-10, "little recent engagement".to_string())
    };

    Some(RuleHit {
        factor: QualificationFactor::Engagement,
        delta,
        note,
        flag: None,
    })
}
