use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::sensitivity::SensitivityAnalysis;
use crate::assumptions::IndustryBenchmarks;
use crate::inputs::FinancialInputs;
use crate::liquidity::ratios::{liquidity_buffer_days, RatioResults};
use crate::types::*;
use crate::LiquidityResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseScenario {
    pub liquidity_buffer: Multiple,
    pub cash_reserve: Money,
    pub interpretation: String,
}

/// Best and worst case: a flat 20% swing in assets, 50% swing in cash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseAnalysis {
    pub best_case: CaseScenario,
    pub worst_case: CaseScenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkComparison {
    BetterThanAverage,
    BelowAverage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkView {
    pub current_ratio_industry_avg: Multiple,
    pub quick_ratio_industry_avg: Multiple,
    pub current_ratio_comparison: BenchmarkComparison,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub working_capital_trend: Trend,
    pub liquidity_buffer_days: Days,
    pub benchmarks: BenchmarkView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlookStatus {
    Positive,
    Stable,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureOutlook {
    pub status: OutlookStatus,
    pub description: String,
}

pub fn case_analysis(input: &FinancialInputs) -> LiquidityResult<CaseAnalysis> {
    Ok(CaseAnalysis {
        best_case: CaseScenario {
            liquidity_buffer: safe_divide(
                checked_product(input.current_assets, dec!(1.2), "best-case assets")?,
                input.current_liabilities,
                "best-case liquidity buffer",
            )?,
            cash_reserve: checked_product(input.cash_balance, dec!(1.5), "best-case cash")?,
            interpretation: "Scenario of growth and strong liquidity".into(),
        },
        worst_case: CaseScenario {
            liquidity_buffer: safe_divide(
                checked_product(input.current_assets, dec!(0.8), "worst-case assets")?,
                input.current_liabilities,
                "worst-case liquidity buffer",
            )?,
            cash_reserve: checked_product(input.cash_balance, dec!(0.5), "worst-case cash")?,
            interpretation: "Scenario requiring liquidity enhancement".into(),
        },
    })
}

pub fn trend_analysis(
    input: &FinancialInputs,
    ratios: &RatioResults,
    benchmarks: &IndustryBenchmarks,
) -> LiquidityResult<TrendAnalysis> {
    let working_capital_trend = if input.working_capital() > Decimal::ZERO {
        Trend::Positive
    } else {
        Trend::Negative
    };
    let current_ratio_comparison = if ratios.current > benchmarks.current_ratio {
        BenchmarkComparison::BetterThanAverage
    } else {
        BenchmarkComparison::BelowAverage
    };

    Ok(TrendAnalysis {
        working_capital_trend,
        liquidity_buffer_days: liquidity_buffer_days(input)?,
        benchmarks: BenchmarkView {
            current_ratio_industry_avg: benchmarks.current_ratio,
            quick_ratio_industry_avg: benchmarks.quick_ratio,
            current_ratio_comparison,
        },
    })
}

/// Positive when the upside case clears 2.0x; Negative when the downside
/// drops below 1.0x; Stable otherwise.
pub fn future_outlook(sensitivity: &SensitivityAnalysis) -> FutureOutlook {
    let (status, description) = if sensitivity.optimistic.ratio > dec!(2) {
        (
            OutlookStatus::Positive,
            "Positive outlook with potential improvement in financial indicators",
        )
    } else if sensitivity.pessimistic.ratio < Decimal::ONE {
        (
            OutlookStatus::Negative,
            "Outlook requires caution with potential decline in financial indicators",
        )
    } else {
        (
            OutlookStatus::Stable,
            "Stable outlook with ability to maintain current levels",
        )
    };
    FutureOutlook {
        status,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::SensitivityShocks;
    use crate::liquidity::ratios::calculate_ratios;
    use crate::scenarios::sensitivity::calculate_sensitivity;

    #[test]
    fn test_case_analysis() {
        let input = FinancialInputs::new(dec!(150), dec!(100), dec!(40));
        let c = case_analysis(&input).unwrap();
        assert_eq!(c.best_case.liquidity_buffer, dec!(1.8));
        assert_eq!(c.best_case.cash_reserve, dec!(60));
        assert_eq!(c.worst_case.liquidity_buffer, dec!(1.2));
        assert_eq!(c.worst_case.cash_reserve, dec!(20));
    }

    #[test]
    fn test_trend_against_benchmarks() {
        let input = FinancialInputs::new(dec!(150), dec!(100), dec!(40));
        let ratios = calculate_ratios(&input).unwrap();
        let t = trend_analysis(&input, &ratios, &IndustryBenchmarks::default()).unwrap();
        assert_eq!(t.working_capital_trend, Trend::Positive);
        // Exactly at the 1.5x benchmark is not better than average.
        assert_eq!(t.benchmarks.current_ratio_comparison, BenchmarkComparison::BelowAverage);
        assert_eq!(t.liquidity_buffer_days, dec!(547.5));
    }

    #[test]
    fn test_outlook_bands() {
        let outlook = |ca, cl| {
            let input = FinancialInputs::new(ca, cl, dec!(10));
            future_outlook(&calculate_sensitivity(&input, &SensitivityShocks::default()).unwrap())
                .status
        };
        // optimistic 2.3 / 0.9 > 2
        assert_eq!(outlook(dec!(200), dec!(100)), OutlookStatus::Positive);
        // optimistic 1.15 / 0.9 < 2, pessimistic 0.85 / 1.1 < 1
        assert_eq!(outlook(dec!(100), dec!(100)), OutlookStatus::Negative);
        // optimistic 1.725 / 0.9 < 2, pessimistic 1.275 / 1.1 > 1
        assert_eq!(outlook(dec!(150), dec!(100)), OutlookStatus::Stable);
    }
}
