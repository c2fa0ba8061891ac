use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::infra::{InMemoryLeadRepository, LoggingAlertPublisher, SeededReferenceCatalog};
use solar_ops::error::AppError;
use solar_ops::workflows::leads::{
    ContactInfo, CreditTier, FinancingReadiness, LeadQualificationService, LeadSubmission,
    PropertyCategory, ProspectAttributes, SiteAddress,
};
use solar_ops::workflows::proposals::{FinancingMode, ProposalService, QuoteRequest};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Utility plan identifier from the seeded catalog
    #[arg(long, default_value = "util-ca-pge")]
    pub(crate) utility: String,
    /// Permitting authority identifier from the seeded catalog
    #[arg(long, default_value = "ahj-alameda")]
    pub(crate) authority: String,
    /// Monthly electric bill in dollars
    #[arg(long)]
    pub(crate) bill: f64,
    /// Offset target as a percentage of annual consumption
    #[arg(long, default_value_t = 100.0)]
    pub(crate) offset: f64,
    /// Financing mode: cash, loan, or lease
    #[arg(long, default_value = "cash", value_parser = parse_financing_mode)]
    pub(crate) financing: FinancingMode,
    /// Financing program identifier (loan mode only)
    #[arg(long)]
    pub(crate) program: Option<String>,
    /// Credit tier: excellent, good, fair, or poor
    #[arg(long, value_parser = parse_credit_tier)]
    pub(crate) credit: Option<CreditTier>,
    /// Evaluation date for incentive expiry (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo's reference date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn parse_financing_mode(raw: &str) -> Result<FinancingMode, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "cash" => Ok(FinancingMode::Cash),
        "loan" => Ok(FinancingMode::Loan),
        "lease" => Ok(FinancingMode::Lease),
        other => Err(format!("unknown financing mode '{other}'")),
    }
}

fn parse_credit_tier(raw: &str) -> Result<CreditTier, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "excellent" => Ok(CreditTier::Excellent),
        "good" => Ok(CreditTier::Good),
        "fair" => Ok(CreditTier::Fair),
        "poor" => Ok(CreditTier::Poor),
        other => Err(format!("unknown credit tier '{other}'")),
    }
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = ProposalService::new(Arc::new(SeededReferenceCatalog::default()));

    let request = QuoteRequest {
        utility_id: args.utility,
        authority_id: args.authority,
        monthly_electric_bill: args.bill,
        offset_target_percent: args.offset,
        credit_tier: args.credit,
        financing: args.financing,
        financing_program_id: args.program,
    };

    let result = service.quote(&request, today)?;
    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
    println!("{rendered}");
    Ok(())
}

const DEMO_CSV: &str = "\
First Name,Last Name,Email,Phone,Street,City,State,Zip,Utility,Monthly Bill,Property Type,Home Owner,Financing,Credit,Appointment,Notes
Avery,Nolan,avery.nolan@example.com,915-555-0101,88 Cactus Rd,El Paso,TX,75001,util-tx-ercot,180,residential,yes,loan,good,no,webinar signup
Riley,Okafor,,915-555-0102,12 Mesa Dr,El Paso,TX,75002,util-tx-ercot,95,residential,yes,unknown,,no,missing email on export
";

fn demo_submission() -> LeadSubmission {
    LeadSubmission {
        contact: ContactInfo {
            first_name: "Dana".to_string(),
            last_name: "Whitfield".to_string(),
            email: "dana.whitfield@example.com".to_string(),
            phone: "510-555-0144".to_string(),
        },
        site: SiteAddress {
            street: "1427 Webster St".to_string(),
            city: Some("Oakland".to_string()),
            state: "CA".to_string(),
            zip_code: "94000".to_string(),
        },
        utility_id: "util-ca-pge".to_string(),
        attributes: ProspectAttributes {
            monthly_electric_bill: 250.0,
            home_owner: true,
            property_category: PropertyCategory::Residential,
            financing: FinancingReadiness::Loan,
            appointment_scheduled: true,
            engagement_activity: 5,
            credit_tier: Some(CreditTier::Good),
        },
        roof_type: Some("composite shingle".to_string()),
        roof_age_years: Some(9),
        notes: Some("referred by existing customer".to_string()),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let repository = Arc::new(InMemoryLeadRepository::default());
    let alerts = Arc::new(LoggingAlertPublisher::default());
    let leads = LeadQualificationService::new(repository, alerts.clone());
    let proposals = ProposalService::new(Arc::new(SeededReferenceCatalog::default()));

    println!("SolarOps demo ({today})\n");

    let record = leads.submit(demo_submission())?;
    let view = record.view();
    println!("Scored walk-in lead {}", view.lead_id.0);
    println!("  tier:        {} ({} points)", view.tier, view.total_score);
    println!("  next action: {}", view.next_action);
    println!("  reason:      {}", view.reason);

    let summary = leads.import_csv(DEMO_CSV)?;
    println!(
        "\nDialer import: {} leads created, {} rows skipped",
        summary.imported.len(),
        summary.skipped.len()
    );
    for skip in &summary.skipped {
        println!("  skipped {skip}");
    }

    let quote_request = QuoteRequest {
        utility_id: record.profile.utility_id.clone(),
        authority_id: "ahj-alameda".to_string(),
        monthly_electric_bill: record.profile.attributes.monthly_electric_bill,
        offset_target_percent: 100.0,
        credit_tier: record.profile.attributes.credit_tier,
        financing: FinancingMode::Loan,
        financing_program_id: Some("fin-sunloans-std".to_string()),
    };
    let proposal = proposals.quote(&quote_request, today)?;
    leads.mark_proposed(&record.profile.lead_id, today, "PROP-DEMO-1")?;

    println!("\nProposal for {}", view.name);
    println!("  system size:   {} kW", proposal.system_size_kw);
    println!(
        "  year-1 output: {} kWh ({}% offset)",
        proposal.annual_production_kwh, proposal.offset_percent
    );
    println!("  net cost:      ${}", proposal.costs.net_system_cost);
    if let Some(payback) = proposal.cash_flow.simple_payback_years {
        println!("  payback:       {payback} years");
    }
    if let Some(loan) = &proposal.financing.loan {
        println!(
            "  loan:          ${}/mo (${} total)",
            loan.monthly_payment, loan.total_cost
        );
    }
    for warning in &proposal.warnings {
        println!("  warning:       {warning}");
    }

    println!("\nHot-lead alerts fired: {}", alerts.events().len());
    Ok(())
}
