use super::super::domain::{CreditTier, FinancingProgram};
use super::CalculationAssumptions;

const FALLBACK_CREDIT_SCORE: u16 = 600;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawLoanQuote {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawLeaseQuote {
    pub monthly_payment: f64,
    pub total_cost: f64,
}

/// Price the loan against the program terms. Credit and program-fit problems
/// are advisory: the figures are still computed and a warning rides along.
pub(crate) fn loan_quote(
    net_system_cost: f64,
    incentive_total: f64,
    program: &FinancingProgram,
    credit_tier: Option<CreditTier>,
    warnings: &mut Vec<String>,
) -> Option<RawLoanQuote> {
    if net_system_cost <= 0.0 {
        warnings.push(format!(
            "net system cost is not positive; loan financing through {} is not applicable",
            program.program_name
        ));
        return None;
    }

    let score = credit_tier
        .map(CreditTier::approximate_score)
        .unwrap_or(FALLBACK_CREDIT_SCORE);
    if score < program.min_credit_score {
        warnings.push(format!(
            "credit score {score} is below the {} minimum for {}",
            program.min_credit_score, program.program_name
        ));
    }

    if !program.combinable_with_incentives && incentive_total > 0.0 {
        warnings.push(format!(
            "{} cannot be combined with incentive programs; confirm net-cost financing with {}",
            program.program_name, program.lender_name
        ));
    }

    let loan_amount = net_system_cost.min(program.max_loan_amount);
    if loan_amount < program.min_loan_amount {
        warnings.push(format!(
            "loan amount ${loan_amount:.0} is below the ${:.0} minimum for {}",
            program.min_loan_amount, program.program_name
        ));
    }

    let origination_fee = loan_amount * program.origination_fee_percent / 100.0;
    let financed_principal = loan_amount + origination_fee;
    let monthly_rate = program.interest_rate_percent / 100.0 / 12.0;
    let payments = u32::from(program.term_years) * 12;
    let monthly_payment = amortized_monthly_payment(financed_principal, monthly_rate, payments);

    Some(RawLoanQuote {
        loan_amount,
        monthly_payment,
        total_cost: monthly_payment * f64::from(payments),
    })
}

/// Standard annuity payment P × [r(1+r)^n] / [(1+r)^n − 1]. A zero rate
/// degenerates to straight principal division.
pub(crate) fn amortized_monthly_payment(principal: f64, monthly_rate: f64, payments: u32) -> f64 {
    if payments == 0 {
        return principal;
    }
    if monthly_rate == 0.0 {
        return principal / f64::from(payments);
    }

    let growth = (1.0 + monthly_rate).powi(payments as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Lease heuristic: annual price factor applied to the cash price over an
/// assumed fixed term; no ownership transfer, so no amortization.
pub(crate) fn lease_quote(
    cash_price: f64,
    assumptions: &CalculationAssumptions,
    warnings: &mut Vec<String>,
) -> Option<RawLeaseQuote> {
    if cash_price <= 0.0 {
        warnings.push("net system cost is not positive; lease pricing is not applicable".to_string());
        return None;
    }

    let annual_price = cash_price * assumptions.lease_annual_price_factor;
    Some(RawLeaseQuote {
        monthly_payment: annual_price / 12.0,
        total_cost: annual_price * f64::from(assumptions.lease_term_years),
    })
}
