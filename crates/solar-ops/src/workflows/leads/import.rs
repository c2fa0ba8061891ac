//! Importer for lead exports produced by the marketing dialer.
//!
//! Rows missing essentials are skipped with a reason rather than failing the
//! whole batch; only a structurally unreadable file is fatal.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{
    ContactInfo, CreditTier, FinancingReadiness, LeadSubmission, PropertyCategory,
    ProspectAttributes, SiteAddress,
};

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead export: {0}")]
    Csv(#[from] csv::Error),
}

/// Parsed export: submissions ready for intake plus per-row skips.
#[derive(Debug, Default)]
pub struct LeadImportBatch {
    pub submissions: Vec<LeadSubmission>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_reader<R: Read>(reader: R) -> Result<LeadImportBatch, LeadImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut batch = LeadImportBatch::default();
        for (index, record) in csv_reader.deserialize::<LeadExportRow>().enumerate() {
            // Header occupies line 1; the first data row is line 2.
            let line = index + 2;
            let row = record?;
            match row.into_submission() {
                Ok(submission) => batch.submissions.push(submission),
                Err(reason) => batch.skipped.push(SkippedRow { line, reason }),
            }
        }

        Ok(batch)
    }
}

#[derive(Debug, Deserialize)]
struct LeadExportRow {
    #[serde(rename = "First Name", default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(rename = "Last Name", default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Street", default, deserialize_with = "empty_string_as_none")]
    street: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(rename = "Zip", default, deserialize_with = "empty_string_as_none")]
    zip: Option<String>,
    #[serde(rename = "Utility", default, deserialize_with = "empty_string_as_none")]
    utility: Option<String>,
    #[serde(rename = "Monthly Bill", default, deserialize_with = "empty_string_as_none")]
    monthly_bill: Option<String>,
    #[serde(rename = "Property Type", default, deserialize_with = "empty_string_as_none")]
    property_type: Option<String>,
    #[serde(rename = "Home Owner", default, deserialize_with = "empty_string_as_none")]
    home_owner: Option<String>,
    #[serde(rename = "Financing", default, deserialize_with = "empty_string_as_none")]
    financing: Option<String>,
    #[serde(rename = "Credit", default, deserialize_with = "empty_string_as_none")]
    credit: Option<String>,
    #[serde(rename = "Appointment", default, deserialize_with = "empty_string_as_none")]
    appointment: Option<String>,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

impl LeadExportRow {
    fn into_submission(self) -> Result<LeadSubmission, String> {
        let first_name = self.first_name.ok_or("missing first name")?;
        let last_name = self.last_name.ok_or("missing last name")?;
        let email = self.email.ok_or("missing email")?;
        let phone = self.phone.ok_or("missing phone")?;
        let street = self.street.ok_or("missing street")?;
        let state = self.state.ok_or("missing state")?;
        let zip_code = self.zip.ok_or("missing zip")?;
        let utility_id = self.utility.ok_or("missing utility")?;

        let bill_raw = self.monthly_bill.ok_or("missing monthly bill")?;
        let monthly_electric_bill = bill_raw
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| format!("unparseable monthly bill '{bill_raw}'"))?;

        let property_category = match self.property_type.as_deref() {
            None => PropertyCategory::Residential,
            Some(value) => parse_property_category(value)
                .ok_or_else(|| format!("unknown property type '{value}'"))?,
        };

        Ok(LeadSubmission {
            contact: ContactInfo {
                first_name,
                last_name,
                email,
                phone,
            },
            site: SiteAddress {
                street,
                city: self.city,
                state,
                zip_code,
            },
            utility_id,
            attributes: ProspectAttributes {
                monthly_electric_bill,
                home_owner: self.home_owner.as_deref().map(parse_flag).unwrap_or(false),
                property_category,
                financing: self
                    .financing
                    .as_deref()
                    .map(parse_financing)
                    .unwrap_or_default(),
                appointment_scheduled: self
                    .appointment
                    .as_deref()
                    .map(parse_flag)
                    .unwrap_or(false),
                engagement_activity: 0,
                credit_tier: self.credit.as_deref().and_then(parse_credit_tier),
            },
            roof_type: None,
            roof_age_years: None,
            notes: self.notes,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

fn parse_property_category(value: &str) -> Option<PropertyCategory> {
    match value.trim().to_ascii_lowercase().as_str() {
        "residential" => Some(PropertyCategory::Residential),
        "commercial" => Some(PropertyCategory::Commercial),
        "non-profit" | "non_profit" | "nonprofit" => Some(PropertyCategory::NonProfit),
        _ => None,
    }
}

fn parse_financing(value: &str) -> FinancingReadiness {
    match value.trim().to_ascii_lowercase().as_str() {
        "cash" => FinancingReadiness::Cash,
        "loan" => FinancingReadiness::Loan,
        "lease" => FinancingReadiness::Lease,
        _ => FinancingReadiness::Unknown,
    }
}

fn parse_credit_tier(value: &str) -> Option<CreditTier> {
    match value.trim().to_ascii_lowercase().as_str() {
        "excellent" => Some(CreditTier::Excellent),
        "good" => Some(CreditTier::Good),
        "fair" => Some(CreditTier::Fair),
        "poor" => Some(CreditTier::Poor),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
