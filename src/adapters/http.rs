//! JSON-over-HTTP surface for the shipping service.
//!
//! ## Routes
//!
//! - `POST /consignments` - CreateConsignment
//! - `GET  /consignments` - ListConsignments
//! - `GET  /health`       - liveness plus store size

use crate::core::service::ShippingService;
use crate::core::{Consignment, ConsignmentRepository, Response as ShippingResponse};
use crate::utils::error::{ErrorCategory, ShippingError};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub struct AppState<R: ConsignmentRepository> {
    pub service: ShippingService<R>,
    pub service_name: String,
    pub service_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub consignments: usize,
}

/// Maps service failures onto status codes with a stable `code`.
#[derive(Debug)]
pub struct ApiError(ShippingError);

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0.category() {
            ErrorCategory::Validation => (StatusCode::BAD_REQUEST, "invalid_request"),
            ErrorCategory::Allocation => (StatusCode::CONFLICT, "allocation_unavailable"),
            ErrorCategory::Transport => (StatusCode::BAD_GATEWAY, "transport_error"),
            ErrorCategory::Configuration | ErrorCategory::System => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl From<ShippingError> for ApiError {
    fn from(err: ShippingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        (
            status,
            Json(ApiErrorBody {
                code: code.to_string(),
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// A create body that cannot be decoded is reported as an invalid request.
fn rejected_body(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected consignment body: {}", rejection.body_text());
    ApiError(ShippingError::InvalidRequest {
        field: "body".to_string(),
        reason: rejection.body_text(),
    })
}

pub fn router<R>(state: Arc<AppState<R>>) -> Router
where
    R: ConsignmentRepository + 'static,
{
    Router::new()
        .route(
            "/consignments",
            get(list_consignments::<R>).post(create_consignment::<R>),
        )
        .route("/health", get(health::<R>))
        .with_state(state)
}

async fn create_consignment<R>(
    State(state): State<Arc<AppState<R>>>,
    request: Result<Json<Consignment>, JsonRejection>,
) -> Result<(StatusCode, Json<ShippingResponse>), ApiError>
where
    R: ConsignmentRepository + 'static,
{
    let Json(request) = request.map_err(rejected_body)?;
    let response = state.service.create_consignment(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_consignments<R>(State(state): State<Arc<AppState<R>>>) -> Json<ShippingResponse>
where
    R: ConsignmentRepository + 'static,
{
    Json(state.service.list_consignments().await)
}

async fn health<R>(State(state): State<Arc<AppState<R>>>) -> Json<HealthResponse>
where
    R: ConsignmentRepository + 'static,
{
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.clone(),
        version: state.service_version.clone(),
        consignments: state.service.repository().len().await,
    })
}
