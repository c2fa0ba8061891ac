//! Canned rebuttal scripts keyed by objection flag.

use std::collections::BTreeMap;

use super::super::domain::ObjectionFlag;

pub const fn rebuttal_for(flag: ObjectionFlag) -> &'static str {
    match flag {
        ObjectionFlag::LowConsumptionLowRoi => {
            "Solar still provides 15-20 year payback even at lower consumption. \
             Combined with battery backup for outage protection, the value extends \
             beyond just savings."
        }
        ObjectionFlag::RenterNoOwnership => {
            "We specialize in community solar programs for renters. Let's explore \
             alternatives that work for your situation."
        }
        ObjectionFlag::FinancingStatusUnknown => {
            "We work with multiple lenders. Let's discuss your financing comfort \
             level and I'll identify the best programs for you."
        }
        ObjectionFlag::CreditScoreConcern => {
            "Credit score is just one factor. We have programs for fair credit \
             ranges. Let's review your options."
        }
    }
}

pub fn rebuttals_for(flags: &[ObjectionFlag]) -> BTreeMap<ObjectionFlag, &'static str> {
    flags
        .iter()
        .map(|flag| (*flag, rebuttal_for(*flag)))
        .collect()
}

/// Label-based lookup for callers holding raw strings; unrecognized labels
/// are dropped silently.
pub fn rebuttals_for_labels<'a, I>(labels: I) -> BTreeMap<&'static str, &'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .filter_map(ObjectionFlag::parse)
        .map(|flag| (flag.label(), rebuttal_for(flag)))
        .collect()
}
