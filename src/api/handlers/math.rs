//! Arithmetic worker endpoints.
//!
//! Pure stateless functions of two numbers; one endpoint per worker
//! binary.

use axum::Json;
use axum::extract::Query;

use crate::api::dto::{MulResponse, RawOperands, SumResponse};
use crate::error::{ErrorResponse, ServiceError};

/// `GET /?a=&b=` — Add two numbers.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidOperand`] when either operand is
/// missing or not a number.
#[utoipa::path(
    get,
    path = "/",
    tag = "Arithmetic",
    summary = "Sum of two numbers",
    params(RawOperands),
    responses(
        (status = 200, description = "Sum computed", body = SumResponse),
        (status = 400, description = "Missing or non-numeric operand", body = ErrorResponse),
    )
)]
pub async fn sum_handler(
    Query(params): Query<RawOperands>,
) -> Result<Json<SumResponse>, ServiceError> {
    let (a, b) = params.parse()?;
    Ok(Json(SumResponse { a, b, sum: a + b }))
}

/// `GET /?a=&b=` — Multiply two numbers.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidOperand`] when either operand is
/// missing or not a number.
#[utoipa::path(
    get,
    path = "/",
    tag = "Arithmetic",
    summary = "Product of two numbers",
    params(RawOperands),
    responses(
        (status = 200, description = "Product computed", body = MulResponse),
        (status = 400, description = "Missing or non-numeric operand", body = ErrorResponse),
    )
)]
pub async fn mul_handler(
    Query(params): Query<RawOperands>,
) -> Result<Json<MulResponse>, ServiceError> {
    let (a, b) = params.parse()?;
    Ok(Json(MulResponse { a, b, mul: a * b }))
}
