use churn_risk::config::ModelConfig;
use churn_risk::error::AppError;
use churn_risk::scoring::domain::{ContractType, InternetService, PaymentMethod};
use churn_risk::scoring::ChurnScoringService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scoring: Arc<ChurnScoringService>,
}

/// Load both classifier artifacts. Called once per process; a failure here
/// aborts startup rather than degrading into a partial service.
pub(crate) fn load_scoring_service(config: &ModelConfig) -> Result<ChurnScoringService, AppError> {
    let service =
        ChurnScoringService::from_artifacts(&config.feature_columns_path, &config.model_path)?;
    info!(
        columns = service.schema().len(),
        model = %config.model_path.display(),
        "classifier artifacts loaded"
    );
    Ok(service)
}

pub(crate) fn parse_contract(raw: &str) -> Result<ContractType, String> {
    raw.parse::<ContractType>().map_err(|err| err.to_string())
}

pub(crate) fn parse_internet_service(raw: &str) -> Result<InternetService, String> {
    raw.parse::<InternetService>().map_err(|err| err.to_string())
}

pub(crate) fn parse_payment_method(raw: &str) -> Result<PaymentMethod, String> {
    raw.parse::<PaymentMethod>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsers_accept_cli_forms() {
        assert_eq!(
            parse_contract("month-to-month").expect("contract parses"),
            ContractType::MonthToMonth
        );
        assert_eq!(
            parse_internet_service("fiber-optic").expect("internet parses"),
            InternetService::FiberOptic
        );
        assert_eq!(
            parse_payment_method("bank-transfer").expect("payment parses"),
            PaymentMethod::BankTransferAutomatic
        );
        assert!(parse_contract("weekly").is_err());
    }
}
