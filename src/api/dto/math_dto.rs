//! DTOs for the arithmetic workers and the calc aggregator.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ServiceError;

/// Raw `a`/`b` query parameters, validated by [`RawOperands::parse`].
///
/// Both are accepted as strings so that missing and non-numeric values
/// produce the same structured 400 response instead of an extractor
/// rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RawOperands {
    /// First operand.
    pub a: Option<String>,
    /// Second operand.
    pub b: Option<String>,
}

impl RawOperands {
    /// Parses both operands as `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidOperand`] naming the first operand
    /// that is missing or not a number.
    pub fn parse(&self) -> Result<(f64, f64), ServiceError> {
        let a = parse_operand(self.a.as_deref(), "a")?;
        let b = parse_operand(self.b.as_deref(), "b")?;
        Ok((a, b))
    }
}

fn parse_operand(raw: Option<&str>, name: &'static str) -> Result<f64, ServiceError> {
    raw.and_then(|value| value.parse().ok())
        .ok_or(ServiceError::InvalidOperand(name))
}

/// Response of the sum worker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SumResponse {
    /// First operand, echoed back.
    pub a: f64,
    /// Second operand, echoed back.
    pub b: f64,
    /// `a + b`.
    pub sum: f64,
}

/// Response of the mul worker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MulResponse {
    /// First operand, echoed back.
    pub a: f64,
    /// Second operand, echoed back.
    pub b: f64,
    /// `a * b`.
    pub mul: f64,
}

/// Merged response of the calc aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalcResponse {
    /// First operand, echoed back.
    pub a: f64,
    /// Second operand, echoed back.
    pub b: f64,
    /// Result from the sum worker.
    pub sum: f64,
    /// Result from the mul worker.
    pub mul: f64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn operands(a: Option<&str>, b: Option<&str>) -> RawOperands {
        RawOperands {
            a: a.map(str::to_string),
            b: b.map(str::to_string),
        }
    }

    #[test]
    fn parses_valid_floats() {
        let Ok((a, b)) = operands(Some("1.5"), Some("-2")).parse() else {
            panic!("valid operands should parse");
        };
        assert_eq!(a, 1.5);
        assert_eq!(b, -2.0);
    }

    #[test]
    fn missing_operand_names_parameter() {
        let result = operands(None, Some("2")).parse();
        assert!(matches!(result, Err(ServiceError::InvalidOperand("a"))));
    }

    #[test]
    fn non_numeric_operand_names_parameter() {
        let result = operands(Some("1"), Some("two")).parse();
        assert!(matches!(result, Err(ServiceError::InvalidOperand("b"))));
    }
}
