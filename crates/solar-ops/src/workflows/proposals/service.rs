use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{CreditTier, FinancingMode, ProposalRequest, ProposalResult};
use super::engine::{CalculationAssumptions, ProposalEngine, ProposalError};
use super::reference::{ReferenceBundle, ReferenceDataError, ReferenceDataProvider};

/// Quote request naming the reference records to price against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub utility_id: String,
    pub authority_id: String,
    pub monthly_electric_bill: f64,
    pub offset_target_percent: f64,
    #[serde(default)]
    pub credit_tier: Option<CreditTier>,
    #[serde(default)]
    pub financing: FinancingMode,
    #[serde(default)]
    pub financing_program_id: Option<String>,
}

/// Service resolving reference data through the provider seam and invoking
/// the calculation engine. Results are returned to the caller for
/// persistence; the service keeps no state between quotes.
pub struct ProposalService<P> {
    provider: Arc<P>,
    engine: ProposalEngine,
}

impl<P> ProposalService<P>
where
    P: ReferenceDataProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_assumptions(provider, CalculationAssumptions::default())
    }

    pub fn with_assumptions(provider: Arc<P>, assumptions: CalculationAssumptions) -> Self {
        Self {
            provider,
            engine: ProposalEngine::new(assumptions),
        }
    }

    pub fn quote(
        &self,
        request: &QuoteRequest,
        today: NaiveDate,
    ) -> Result<ProposalResult, ProposalServiceError> {
        let utility = self.provider.utility_plan(&request.utility_id)?;
        let authority = self.provider.permitting_authority(&request.authority_id)?;

        // Weather and incentives are keyed off the utility's territory, so
        // there is nothing to resolve when the plan itself is absent.
        let weather = match &utility {
            Some(plan) => self.provider.regional_weather(&plan.zip_code)?,
            None => None,
        };
        let incentives = match &utility {
            Some(plan) => self.provider.incentive_programs(&plan.region)?,
            None => Vec::new(),
        };

        let mut unresolved_program = None;
        let financing = match (request.financing, &request.financing_program_id) {
            (FinancingMode::Loan, Some(program_id)) => {
                let program = self.provider.financing_program(program_id)?;
                if program.is_none() {
                    unresolved_program = Some(program_id.clone());
                }
                program
            }
            _ => None,
        };

        let calculation = ProposalRequest {
            monthly_electric_bill: request.monthly_electric_bill,
            offset_target_percent: request.offset_target_percent,
            credit_tier: request.credit_tier,
            financing: request.financing,
        };

        let bundle = ReferenceBundle {
            utility: utility.as_ref(),
            authority: authority.as_ref(),
            weather: weather.as_ref(),
            incentives: &incentives,
            financing: financing.as_ref(),
        };

        let mut result = self.engine.calculate(&calculation, &bundle, today)?;
        if let Some(program_id) = unresolved_program {
            result.warnings.push(format!(
                "financing program '{program_id}' was not found; loan pricing omitted"
            ));
        }
        Ok(result)
    }
}

/// Error raised by the proposal service.
#[derive(Debug, thiserror::Error)]
pub enum ProposalServiceError {
    #[error(transparent)]
    Reference(#[from] ReferenceDataError),
    #[error(transparent)]
    Calculation(#[from] ProposalError),
}
