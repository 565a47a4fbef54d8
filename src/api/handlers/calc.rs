//! Fan-out aggregator endpoint.
//!
//! Sends one request to each arithmetic worker concurrently and merges
//! the two results. Either worker failing surfaces as 502 naming the
//! worker; there is no retry or partial result.

use std::time::Duration;

use axum::Json;
use axum::extract::{Query, State};
use serde::de::DeserializeOwned;

use crate::api::dto::{CalcResponse, MulResponse, RawOperands, SumResponse};
use crate::config::CalcConfig;
use crate::error::{ErrorResponse, ServiceError};

/// Shared state of the calc service.
#[derive(Debug, Clone)]
pub struct CalcState {
    /// Outbound HTTP client, shared across requests.
    pub http: reqwest::Client,
    /// Base URL of the sum worker.
    pub sum_service_url: String,
    /// Base URL of the mul worker.
    pub mul_service_url: String,
}

impl CalcState {
    /// Builds the state from configuration, with the upstream timeout
    /// applied to the shared client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &CalcConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            sum_service_url: config.sum_service_url.clone(),
            mul_service_url: config.mul_service_url.clone(),
        })
    }
}

/// `GET /?a=&b=` — Sum and product of two numbers, fanned out to both
/// workers.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidOperand`] on bad input and
/// [`ServiceError::Upstream`] when a worker cannot be reached or answers
/// with an unusable response.
#[utoipa::path(
    get,
    path = "/",
    tag = "Arithmetic",
    summary = "Aggregate sum and product",
    description = "Queries the sum and mul workers concurrently and merges their results.",
    params(RawOperands),
    responses(
        (status = 200, description = "Merged result", body = CalcResponse),
        (status = 400, description = "Missing or non-numeric operand", body = ErrorResponse),
        (status = 502, description = "A worker is unavailable", body = ErrorResponse),
    )
)]
pub async fn calc_handler(
    State(state): State<CalcState>,
    Query(params): Query<RawOperands>,
) -> Result<Json<CalcResponse>, ServiceError> {
    let (a, b) = params.parse()?;

    let (sum, mul) = tokio::join!(
        fetch_worker::<SumResponse>(&state.http, &state.sum_service_url, a, b),
        fetch_worker::<MulResponse>(&state.http, &state.mul_service_url, a, b),
    );

    let sum = sum.map_err(|detail| {
        tracing::warn!(%detail, "sum worker failed");
        ServiceError::Upstream {
            service: "sum",
            detail,
        }
    })?;
    let mul = mul.map_err(|detail| {
        tracing::warn!(%detail, "mul worker failed");
        ServiceError::Upstream {
            service: "mul",
            detail,
        }
    })?;

    Ok(Json(CalcResponse {
        a,
        b,
        sum: sum.sum,
        mul: mul.mul,
    }))
}

/// One worker request: GET `<base>?a=&b=`, decoded as `T`.
async fn fetch_worker<T: DeserializeOwned>(
    http: &reqwest::Client,
    base_url: &str,
    a: f64,
    b: f64,
) -> Result<T, String> {
    let response = http
        .get(base_url)
        .query(&[("a", a), ("b", b)])
        .send()
        .await
        .map_err(|error| error.to_string())?
        .error_for_status()
        .map_err(|error| error.to_string())?;
    response.json::<T>().await.map_err(|error| error.to_string())
}
