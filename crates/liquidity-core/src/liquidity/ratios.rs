use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::inputs::FinancialInputs;
use crate::types::*;
use crate::LiquidityResult;

const DAYS_PER_YEAR: Decimal = dec!(365);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Depth metrics above this percentage are tagged as favourable.
const DEPTH_FAVOURABLE_PCT: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The three headline liquidity ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioResults {
    pub current: Multiple,
    pub quick: Multiple,
    pub cash: Multiple,
}

/// Activity, efficiency, quality and coverage ratios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedRatios {
    // Activity
    pub receivables_turnover: Multiple,
    pub inventory_turnover: Multiple,
    pub asset_turnover: Multiple,
    // Efficiency
    pub working_capital_turnover: Multiple,
    pub days_inventory: Days,
    pub days_receivables: Days,
    // Quality
    pub quality_of_liquidity: Rate,
    pub working_capital_quality: Rate,
    // Coverage
    pub operating_cash_flow_ratio: Multiple,
    pub cash_coverage_ratio: Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthMetric {
    pub name: String,
    pub value: Percent,
    pub description: String,
    pub favourable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Limited,
    Excellent,
    NeedsMonitoring,
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthIndicator {
    pub value: Decimal,
    pub interpretation: String,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthIndicators {
    pub operating_cash_flow: HealthIndicator,
    pub debt_service_coverage: HealthIndicator,
    pub asset_utilization_efficiency: HealthIndicator,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn percent(fraction: Decimal, context: &str) -> LiquidityResult<Percent> {
    checked_product(fraction, HUNDRED, context)
}

/// Compute current, quick and cash ratios.
pub fn calculate_ratios(input: &FinancialInputs) -> LiquidityResult<RatioResults> {
    let current = safe_divide(
        input.current_assets,
        input.current_liabilities,
        "current ratio",
    )?;
    let quick = safe_divide(
        input.quick_assets(),
        input.current_liabilities,
        "quick ratio",
    )?;
    let cash = safe_divide(
        input.cash_equivalents()?,
        input.current_liabilities,
        "cash ratio",
    )?;

    tracing::debug!(%current, %quick, %cash, "liquidity ratios");
    Ok(RatioResults {
        current,
        quick,
        cash,
    })
}

/// Working capital turnover: CA / (CA - CL), or zero when working capital is nil.
pub fn working_capital_turnover(input: &FinancialInputs) -> LiquidityResult<Multiple> {
    divide_or_zero(
        input.current_assets,
        input.working_capital(),
        "working capital turnover",
    )
}

/// Cash relative to one month of current liabilities: cash / (CL / 12).
pub fn cash_coverage_ratio(input: &FinancialInputs) -> LiquidityResult<Multiple> {
    safe_divide(
        checked_product(input.cash_balance, MONTHS_PER_YEAR, "cash coverage ratio")?,
        input.current_liabilities,
        "cash coverage ratio",
    )
}

/// Days of current liabilities covered by cash: cash / (CL / 365).
pub fn defensive_interval(input: &FinancialInputs) -> LiquidityResult<Days> {
    safe_divide(
        checked_product(input.cash_balance, DAYS_PER_YEAR, "defensive interval")?,
        input.current_liabilities,
        "defensive interval",
    )
}

/// Days of current liabilities covered by all current assets.
pub fn liquidity_buffer_days(input: &FinancialInputs) -> LiquidityResult<Days> {
    safe_divide(
        checked_product(input.current_assets, DAYS_PER_YEAR, "liquidity buffer days")?,
        input.current_liabilities,
        "liquidity buffer days",
    )
}

pub fn calculate_advanced_ratios(input: &FinancialInputs) -> LiquidityResult<AdvancedRatios> {
    let ca = input.current_assets;

    let receivables_turnover = if input.receivables > Decimal::ZERO {
        divide_or_zero(ca, input.receivables, "receivables turnover")?
    } else {
        Decimal::ZERO
    };
    let inventory_turnover = if input.inventory > Decimal::ZERO {
        divide_or_zero(ca, input.inventory, "inventory turnover")?
    } else {
        Decimal::ZERO
    };
    let asset_turnover = if ca > Decimal::ZERO {
        safe_divide(input.current_liabilities, ca, "asset turnover")?
    } else {
        Decimal::ZERO
    };
    let days_inventory = if input.inventory > Decimal::ZERO {
        let days = checked_product(input.inventory, DAYS_PER_YEAR, "days inventory")?;
        divide_or_zero(days, ca, "days inventory")?
    } else {
        Decimal::ZERO
    };
    let days_receivables = if input.receivables > Decimal::ZERO {
        let days = checked_product(input.receivables, DAYS_PER_YEAR, "days receivables")?;
        divide_or_zero(days, ca, "days receivables")?
    } else {
        Decimal::ZERO
    };

    Ok(AdvancedRatios {
        receivables_turnover,
        inventory_turnover,
        asset_turnover,
        working_capital_turnover: working_capital_turnover(input)?,
        days_inventory,
        days_receivables,
        quality_of_liquidity: safe_divide(input.cash_balance, ca, "quality of liquidity")?,
        working_capital_quality: safe_divide(input.quick_assets(), ca, "working capital quality")?,
        operating_cash_flow_ratio: safe_divide(
            input.cash_balance,
            input.current_liabilities,
            "operating cash flow ratio",
        )?,
        cash_coverage_ratio: cash_coverage_ratio(input)?,
    })
}

/// Percentage metrics describing how deep the liquidity cushion is.
pub fn liquidity_depth(input: &FinancialInputs) -> LiquidityResult<Vec<DepthMetric>> {
    let cash_conversion = percent(
        safe_divide(input.cash_balance, input.current_liabilities, "cash conversion")?,
        "cash conversion",
    )?;
    let inventory_share = percent(
        divide_or_zero(input.inventory, input.current_assets, "inventory share")?,
        "inventory share",
    )?;
    let liability_ratio = percent(
        safe_divide(
            input.current_liabilities,
            input.current_assets,
            "current liability ratio",
        )?,
        "current liability ratio",
    )?;

    let metric = |name: &str, value: Percent, description: &str| DepthMetric {
        name: name.to_string(),
        value,
        description: description.to_string(),
        favourable: value > DEPTH_FAVOURABLE_PCT,
    };

    Ok(vec![
        metric(
            "Cash Conversion Cycle",
            cash_conversion,
            "Ability to convert assets into cash to cover liabilities",
        ),
        metric(
            "Inventory Turnover",
            inventory_share,
            "Efficiency in managing inventory",
        ),
        metric(
            "Current Liability Ratio",
            liability_ratio,
            "Proportion of current liabilities to current assets",
        ),
    ])
}

pub fn health_indicators(input: &FinancialInputs) -> LiquidityResult<HealthIndicators> {
    let cash_to_liabilities =
        safe_divide(input.cash_balance, input.current_liabilities, "cash / liabilities")?;
    let assets_to_liabilities =
        safe_divide(input.current_assets, input.current_liabilities, "assets / liabilities")?;
    let liabilities_to_assets =
        safe_divide(input.current_liabilities, input.current_assets, "liabilities / assets")?;

    Ok(HealthIndicators {
        operating_cash_flow: HealthIndicator {
            value: percent(cash_to_liabilities, "operating cash flow")?,
            interpretation: "Ability of operating cash flow to cover liabilities".into(),
            status: if cash_to_liabilities > Decimal::ONE {
                HealthStatus::Healthy
            } else {
                HealthStatus::Limited
            },
        },
        debt_service_coverage: HealthIndicator {
            value: assets_to_liabilities,
            interpretation: "Ability to service short-term debts".into(),
            status: if assets_to_liabilities > dec!(1.5) {
                HealthStatus::Excellent
            } else {
                HealthStatus::NeedsMonitoring
            },
        },
        asset_utilization_efficiency: HealthIndicator {
            value: percent(liabilities_to_assets, "asset utilization efficiency")?,
            interpretation: "Efficiency in using assets to generate liquidity".into(),
            // The threshold is compared against the raw fraction, not the percentage.
            status: if liabilities_to_assets < dec!(50) {
                HealthStatus::High
            } else {
                HealthStatus::Medium
            },
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
