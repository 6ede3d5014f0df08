pub mod analysis;
pub mod assumptions;
pub mod error;
pub mod inputs;
pub mod liquidity;
pub mod recommendations;
pub mod risk;
pub mod scenarios;
pub mod types;

pub use analysis::{analyze, analyze_with, Report};
pub use error::LiquidityError;
pub use inputs::FinancialInputs;
pub use types::*;

/// Standard result type for all liquidity-analysis operations
pub type LiquidityResult<T> = Result<T, LiquidityError>;
