use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiquidityError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LiquidityError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LiquidityError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LiquidityError {
    fn from(e: serde_json::Error) -> Self {
        LiquidityError::SerializationError(e.to_string())
    }
}
