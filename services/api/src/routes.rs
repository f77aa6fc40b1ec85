use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use churn_risk::error::AppError;
use churn_risk::scoring::domain::{
    ContractType, CustomerProfile, InternetService, PaymentMethod, RiskTier,
    MONTHLY_CHARGES_DEFAULT, MONTHLY_CHARGES_MAX, MONTHLY_CHARGES_MIN, TENURE_MONTHS_DEFAULT,
    TENURE_MONTHS_MAX, TENURE_MONTHS_MIN,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    #[serde(default = "default_tenure_months")]
    pub(crate) tenure_months: u32,
    #[serde(default = "default_monthly_charges")]
    pub(crate) monthly_charges: u32,
    pub(crate) contract: ContractType,
    pub(crate) internet_service: InternetService,
    pub(crate) payment_method: PaymentMethod,
}

fn default_tenure_months() -> u32 {
    TENURE_MONTHS_DEFAULT
}

fn default_monthly_charges() -> u32 {
    MONTHLY_CHARGES_DEFAULT
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessResponse {
    pub(crate) profile: CustomerProfile,
    pub(crate) probability: f64,
    pub(crate) risk_tier: RiskTier,
    pub(crate) risk_label: &'static str,
    pub(crate) recommendation: &'static str,
    pub(crate) generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SliderView {
    pub(crate) min: u32,
    pub(crate) max: u32,
    pub(crate) default: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionView<T> {
    pub(crate) value: T,
    pub(crate) label: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionsResponse {
    pub(crate) tenure_months: SliderView,
    pub(crate) monthly_charges: SliderView,
    pub(crate) contract: Vec<OptionView<ContractType>>,
    pub(crate) internet_service: Vec<OptionView<InternetService>>,
    pub(crate) payment_method: Vec<OptionView<PaymentMethod>>,
}

pub(crate) fn churn_router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/churn/assess", axum::routing::post(assess_endpoint))
        .route("/api/v1/churn/options", axum::routing::get(options_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assess_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, AppError> {
    let AssessRequest {
        tenure_months,
        monthly_charges,
        contract,
        internet_service,
        payment_method,
    } = payload;

    let profile = CustomerProfile {
        tenure_months,
        monthly_charges,
        contract,
        internet_service,
        payment_method,
    };
    let assessment = state.scoring.assess(&profile)?;

    Ok(Json(AssessResponse {
        profile,
        probability: assessment.probability,
        risk_tier: assessment.tier,
        risk_label: assessment.tier.label(),
        recommendation: assessment.recommendation,
        generated_at: assessment.generated_at,
    }))
}

pub(crate) async fn options_endpoint() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        tenure_months: SliderView {
            min: TENURE_MONTHS_MIN,
            max: TENURE_MONTHS_MAX,
            default: TENURE_MONTHS_DEFAULT,
        },
        monthly_charges: SliderView {
            min: MONTHLY_CHARGES_MIN,
            max: MONTHLY_CHARGES_MAX,
            default: MONTHLY_CHARGES_DEFAULT,
        },
        contract: ContractType::ordered()
            .into_iter()
            .map(|option| OptionView {
                value: option,
                label: option.label(),
            })
            .collect(),
        internet_service: InternetService::ordered()
            .into_iter()
            .map(|option| OptionView {
                value: option,
                label: option.label(),
            })
            .collect(),
        payment_method: PaymentMethod::ordered()
            .into_iter()
            .map(|option| OptionView {
                value: option,
                label: option.label(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use churn_risk::scoring::ChurnScoringService;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state() -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(handle),
            scoring: Arc::new(ChurnScoringService::baseline()),
        }
    }

    fn risky_request() -> AssessRequest {
        AssessRequest {
            tenure_months: 12,
            monthly_charges: 70,
            contract: ContractType::MonthToMonth,
            internet_service: InternetService::FiberOptic,
            payment_method: PaymentMethod::ElectronicCheck,
        }
    }

    #[tokio::test]
    async fn assess_endpoint_buckets_the_risky_profile() {
        let Json(body) = assess_endpoint(Extension(app_state()), Json(risky_request()))
            .await
            .expect("assessment runs");

        assert_eq!(body.risk_tier, RiskTier::High);
        assert_eq!(body.risk_label, "High");
        assert!(body.probability >= 0.6);
        assert!(body.recommendation.contains("retention intervention"));
        assert_eq!(body.profile.tenure_months, 12);
    }

    #[tokio::test]
    async fn assess_endpoint_rejects_out_of_range_charges() {
        let mut request = risky_request();
        request.monthly_charges = 500;

        let error = assess_endpoint(Extension(app_state()), Json(request))
            .await
            .expect_err("validation rejects");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn assess_route_applies_slider_defaults_for_omitted_numerics() {
        let router = churn_router().layer(Extension(app_state()));

        let payload = json!({
            "contract": "two_year",
            "internet_service": "no",
            "payment_method": "credit_card_automatic"
        });
        let response = router
            .oneshot(
                axum::http::Request::post("/api/v1/churn/assess")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&payload).expect("payload encodes"),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["profile"]["tenure_months"], TENURE_MONTHS_DEFAULT);
        assert_eq!(body["profile"]["monthly_charges"], MONTHLY_CHARGES_DEFAULT);
        assert_eq!(body["risk_tier"], "low");
    }

    #[tokio::test]
    async fn options_endpoint_lists_the_profile_surface() {
        let Json(body) = options_endpoint().await;

        assert_eq!(body.tenure_months.min, 0);
        assert_eq!(body.tenure_months.max, 72);
        assert_eq!(body.monthly_charges.default, 70);
        assert_eq!(body.contract.len(), 3);
        assert_eq!(body.internet_service.len(), 3);
        assert_eq!(body.payment_method.len(), 4);
        assert_eq!(body.payment_method[0].label, "Electronic check");
    }

    #[tokio::test]
    async fn readiness_endpoint_reports_initializing_until_flag_flips() {
        let state = app_state();
        state
            .readiness
            .store(false, std::sync::atomic::Ordering::Release);

        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}
