use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::SensitivityShocks;
use crate::inputs::FinancialInputs;
use crate::liquidity::ratios::{cash_coverage_ratio, defensive_interval};
use crate::types::*;
use crate::LiquidityResult;

/// A single-step what-if: shocked balances and the resulting current ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityScenario {
    pub assets: Money,
    pub liabilities: Money,
    pub ratio: Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    pub optimistic: SensitivityScenario,
    pub pessimistic: SensitivityScenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortTermProjection {
    pub horizon_months: u32,
    pub projected_ratio: Multiple,
    pub cash_projection: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceIndicators {
    /// Months of liabilities covered by cash.
    pub cash_burn_rate: Multiple,
    pub defensive_interval: Days,
    pub working_capital_efficiency: Percent,
}

/// (months, asset growth, liability growth, cash growth) for the short-horizon view.
const SHORT_HORIZONS: [(u32, Decimal, Decimal, Decimal); 2] = [
    (3, dec!(1.05), dec!(1.02), dec!(1.08)),
    (6, dec!(1.10), dec!(1.05), dec!(1.15)),
];

fn shock(
    input: &FinancialInputs,
    asset_factor: Multiple,
    liability_factor: Multiple,
    context: &str,
) -> LiquidityResult<SensitivityScenario> {
    let assets = checked_product(input.current_assets, asset_factor, context)?;
    let liabilities = checked_product(input.current_liabilities, liability_factor, context)?;
    Ok(SensitivityScenario {
        assets,
        liabilities,
        ratio: safe_divide(assets, liabilities, context)?,
    })
}

/// Optimistic and pessimistic current ratios under fixed balance-sheet shocks.
pub fn calculate_sensitivity(
    input: &FinancialInputs,
    shocks: &SensitivityShocks,
) -> LiquidityResult<SensitivityAnalysis> {
    let optimistic = shock(
        input,
        shocks.optimistic_assets,
        shocks.optimistic_liabilities,
        "optimistic sensitivity ratio",
    )?;
    let pessimistic = shock(
        input,
        shocks.pessimistic_assets,
        shocks.pessimistic_liabilities,
        "pessimistic sensitivity ratio",
    )?;

    tracing::debug!(
        optimistic = %optimistic.ratio,
        pessimistic = %pessimistic.ratio,
        "sensitivity scenarios"
    );
    Ok(SensitivityAnalysis {
        optimistic,
        pessimistic,
    })
}

/// Three- and six-month projected current ratio and cash.
pub fn short_term_projections(input: &FinancialInputs) -> LiquidityResult<Vec<ShortTermProjection>> {
    SHORT_HORIZONS
        .iter()
        .map(|&(months, assets, liabilities, cash)| {
            Ok(ShortTermProjection {
                horizon_months: months,
                projected_ratio: safe_divide(
                    checked_product(input.current_assets, assets, "short-term assets")?,
                    checked_product(input.current_liabilities, liabilities, "short-term liabilities")?,
                    "short-term projected ratio",
                )?,
                cash_projection: checked_product(input.cash_balance, cash, "short-term cash")?,
            })
        })
        .collect()
}

pub fn performance_indicators(input: &FinancialInputs) -> LiquidityResult<PerformanceIndicators> {
    Ok(PerformanceIndicators {
        cash_burn_rate: cash_coverage_ratio(input)?,
        defensive_interval: defensive_interval(input)?,
        working_capital_efficiency: checked_product(
            safe_divide(
                input.working_capital(),
                input.current_assets,
                "working capital efficiency",
            )?,
            dec!(100),
            "working capital efficiency",
        )?,
    })
}
