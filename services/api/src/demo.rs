use crate::infra::{
    load_scoring_service, parse_contract, parse_internet_service, parse_payment_method,
};
use churn_risk::config::AppConfig;
use churn_risk::error::AppError;
use churn_risk::scoring::domain::{
    ChurnAssessment, ContractType, CustomerProfile, InternetService, PaymentMethod,
    MONTHLY_CHARGES_DEFAULT, TENURE_MONTHS_DEFAULT,
};
use churn_risk::scoring::{ChurnScoringService, ScoringError};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Tenure in months (0-72)
    #[arg(long, default_value_t = TENURE_MONTHS_DEFAULT)]
    pub(crate) tenure: u32,
    /// Monthly charges (20-150)
    #[arg(long, default_value_t = MONTHLY_CHARGES_DEFAULT)]
    pub(crate) monthly_charges: u32,
    /// Contract type: month-to-month, one-year, or two-year
    #[arg(long, default_value = "month-to-month", value_parser = parse_contract)]
    pub(crate) contract: ContractType,
    /// Internet service: dsl, fiber-optic, or no
    #[arg(long, default_value = "fiber-optic", value_parser = parse_internet_service)]
    pub(crate) internet_service: InternetService,
    /// Payment method: electronic-check, mailed-check, bank-transfer, or credit-card
    #[arg(long, default_value = "electronic-check", value_parser = parse_payment_method)]
    pub(crate) payment_method: PaymentMethod,
    /// Override the configured scoring artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Override the configured feature-columns artifact path
    #[arg(long)]
    pub(crate) feature_columns: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        tenure,
        monthly_charges,
        contract,
        internet_service,
        payment_method,
        model,
        feature_columns,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(path) = model {
        config.model.model_path = path;
    }
    if let Some(path) = feature_columns {
        config.model.feature_columns_path = path;
    }

    let service = load_scoring_service(&config.model)?;
    let profile =
        CustomerProfile::new(tenure, monthly_charges, contract, internet_service, payment_method)
            .map_err(ScoringError::from)?;
    let assessment = service.assess(&profile)?;

    render_assessment(&profile, &assessment);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = ChurnScoringService::baseline();

    println!("Churn risk assessment demo (baseline model)");

    let profiles = [
        (
            "New fiber customer paying by electronic check",
            CustomerProfile {
                tenure_months: 3,
                monthly_charges: 95,
                contract: ContractType::MonthToMonth,
                internet_service: InternetService::FiberOptic,
                payment_method: PaymentMethod::ElectronicCheck,
            },
        ),
        (
            "Established DSL customer on a one year plan",
            CustomerProfile {
                tenure_months: 30,
                monthly_charges: 60,
                contract: ContractType::OneYear,
                internet_service: InternetService::Dsl,
                payment_method: PaymentMethod::CreditCardAutomatic,
            },
        ),
        (
            "Long-tenure two year customer without internet service",
            CustomerProfile {
                tenure_months: 70,
                monthly_charges: 25,
                contract: ContractType::TwoYear,
                internet_service: InternetService::No,
                payment_method: PaymentMethod::BankTransferAutomatic,
            },
        ),
    ];

    for (headline, profile) in profiles {
        let assessment = service.assess(&profile)?;
        println!("\n{headline}");
        render_assessment(&profile, &assessment);
    }

    Ok(())
}

fn render_assessment(profile: &CustomerProfile, assessment: &ChurnAssessment) {
    println!(
        "Profile: {} months tenure | {}/month | {} contract | internet: {} | payment: {}",
        profile.tenure_months,
        profile.monthly_charges,
        profile.contract.label(),
        profile.internet_service.label(),
        profile.payment_method.label()
    );
    println!(
        "{} churn risk at {:.2}%",
        assessment.tier.label(),
        assessment.probability * 100.0
    );
    println!("Recommended action: {}", assessment.recommendation);
}
