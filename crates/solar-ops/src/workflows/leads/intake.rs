use super::domain::{LeadId, LeadProfile, LeadSubmission};

/// Validation errors raised by the intake guard.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("contact first and last name are required")]
    MissingContactName,
    #[error("contact email '{0}' is not deliverable")]
    InvalidEmail(String),
    #[error("contact phone '{0}' is too short")]
    InvalidPhone(String),
    #[error("service address requires a street, a two-letter state, and a postal code")]
    IncompleteServiceAddress,
    #[error("monthly electric bill must be a non-negative amount, got {0}")]
    InvalidMonthlyBill(f64),
    #[error("utility identifier is required")]
    MissingUtility,
}

/// Guard responsible for producing sanitized [`LeadProfile`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert an inbound submission into a sanitized lead profile.
    pub fn profile_from_submission(
        &self,
        submission: LeadSubmission,
    ) -> Result<LeadProfile, IntakeError> {
        let mut contact = submission.contact;
        contact.first_name = contact.first_name.trim().to_string();
        contact.last_name = contact.last_name.trim().to_string();
        contact.email = contact.email.trim().to_string();
        contact.phone = contact.phone.trim().to_string();

        if contact.first_name.is_empty() || contact.last_name.is_empty() {
            return Err(IntakeError::MissingContactName);
        }

        if !deliverable_email(&contact.email) {
            return Err(IntakeError::InvalidEmail(contact.email));
        }

        if contact.phone.chars().filter(char::is_ascii_digit).count() < 7 {
            return Err(IntakeError::InvalidPhone(contact.phone));
        }

        let mut site = submission.site;
        site.street = site.street.trim().to_string();
        site.state = site.state.trim().to_ascii_uppercase();
        site.zip_code = site.zip_code.trim().to_string();
        site.city = site
            .city
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty());

        let state_ok = site.state.len() == 2 && site.state.chars().all(|c| c.is_ascii_alphabetic());
        if site.street.is_empty() || !state_ok || site.zip_code.len() < 3 {
            return Err(IntakeError::IncompleteServiceAddress);
        }

        let utility_id = submission.utility_id.trim().to_string();
        if utility_id.is_empty() {
            return Err(IntakeError::MissingUtility);
        }

        let attributes = submission.attributes;
        let bill = attributes.monthly_electric_bill;
        if !bill.is_finite() || bill < 0.0 {
            return Err(IntakeError::InvalidMonthlyBill(bill));
        }

        Ok(LeadProfile {
            lead_id: LeadId("pending".to_string()),
            contact,
            site,
            utility_id,
            attributes,
            roof_type: submission.roof_type,
            roof_age_years: submission.roof_age_years,
            notes: submission.notes,
        })
    }
}

fn deliverable_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
