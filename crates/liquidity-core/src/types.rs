use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LiquidityError, LiquidityResult};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Multiples (e.g., 1.5x current ratio)
pub type Multiple = Decimal;

/// Percentages expressed on a 0-100 scale (used only for display-oriented metrics)
pub type Percent = Decimal;

/// Day counts (defensive interval, buffer days)
pub type Days = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Divide, surfacing a zero denominator as `DivisionByZero` and a quotient
/// beyond the decimal range as `Overflow`.
pub(crate) fn safe_divide(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> LiquidityResult<Decimal> {
    if denominator.is_zero() {
        return Err(LiquidityError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(context))
}

/// Divide, yielding zero when the denominator is zero. Used for the secondary
/// ratios that are defined as 0 when their base is absent.
pub(crate) fn divide_or_zero(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> LiquidityResult<Decimal> {
    if denominator.is_zero() {
        Ok(Decimal::ZERO)
    } else {
        safe_divide(numerator, denominator, context)
    }
}

pub(crate) fn checked_product(lhs: Decimal, rhs: Decimal, context: &str) -> LiquidityResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(context))
}

pub(crate) fn checked_sum(lhs: Decimal, rhs: Decimal, context: &str) -> LiquidityResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(context))
}

fn overflow(context: &str) -> LiquidityError {
    LiquidityError::Overflow {
        context: context.to_string(),
    }
}
