use chrono::NaiveDate;

use super::super::domain::{IncentiveAmount, IncentiveKind, IncentiveProgram};

/// Accumulated incentive buckets plus notices for expired programs.
#[derive(Debug, Default)]
pub(crate) struct IncentiveLedger {
    pub federal_tax_credit: f64,
    pub state_rebates: f64,
    pub utility_rebates: f64,
    pub expiration_notices: Vec<String>,
}

impl IncentiveLedger {
    pub(crate) fn total(&self) -> f64 {
        self.federal_tax_credit + self.state_rebates + self.utility_rebates
    }
}

/// The federal credit applies unconditionally. Listed programs fold into the
/// state/utility buckets after region, expiry, and cap checks; an expired
/// program contributes nothing and becomes a notice instead.
pub(crate) fn apply(
    gross_system_cost: f64,
    region: &str,
    programs: &[IncentiveProgram],
    today: NaiveDate,
    federal_itc_rate: f64,
) -> IncentiveLedger {
    let mut ledger = IncentiveLedger {
        federal_tax_credit: gross_system_cost * federal_itc_rate,
        ..Default::default()
    };

    for program in programs {
        if let Some(restriction) = &program.region {
            if !restriction.eq_ignore_ascii_case(region) {
                continue;
            }
        }

        // Eligibility requires an expiration strictly in the future.
        if program.expires_on <= today {
            ledger
                .expiration_notices
                .push(format!("{} expired on {}", program.name, program.expires_on));
            continue;
        }

        let amount = match program.amount {
            IncentiveAmount::Flat(value) => value,
            IncentiveAmount::PercentOfGross(percent) => gross_system_cost * percent / 100.0,
        };
        let amount = match program.cap {
            Some(cap) => amount.min(cap),
            None => amount,
        };

        match program.kind {
            IncentiveKind::StateRebate => ledger.state_rebates += amount,
            IncentiveKind::UtilityRebate => ledger.utility_rebates += amount,
            // The 30% credit is already applied; listed federal records add nothing.
            IncentiveKind::FederalTaxCredit => {}
        }
    }

    ledger
}
