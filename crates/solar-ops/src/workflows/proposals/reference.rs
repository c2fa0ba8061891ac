use super::domain::{
    FinancingProgram, IncentiveProgram, PermittingAuthority, RegionalWeather, UtilityRatePlan,
};

/// Already-resolved reference data handed to one calculation call. The engine
/// never fetches; it only reads this snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBundle<'a> {
    pub utility: Option<&'a UtilityRatePlan>,
    pub authority: Option<&'a PermittingAuthority>,
    pub weather: Option<&'a RegionalWeather>,
    pub incentives: &'a [IncentiveProgram],
    pub financing: Option<&'a FinancingProgram>,
}

/// Lookup seam for localized reference data so the calculation service can be
/// exercised without any storage dependency.
pub trait ReferenceDataProvider: Send + Sync {
    fn utility_plan(&self, utility_id: &str) -> Result<Option<UtilityRatePlan>, ReferenceDataError>;

    fn permitting_authority(
        &self,
        authority_id: &str,
    ) -> Result<Option<PermittingAuthority>, ReferenceDataError>;

    fn regional_weather(
        &self,
        location_key: &str,
    ) -> Result<Option<RegionalWeather>, ReferenceDataError>;

    /// Programs restricted to `region` plus unrestricted ones. Expired
    /// programs are included; the engine splits them into expiration notices.
    fn incentive_programs(&self, region: &str) -> Result<Vec<IncentiveProgram>, ReferenceDataError>;

    fn financing_program(
        &self,
        program_id: &str,
    ) -> Result<Option<FinancingProgram>, ReferenceDataError>;
}

/// Error enumeration for reference-data lookups.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("reference data unavailable: {0}")]
    Unavailable(String),
}
