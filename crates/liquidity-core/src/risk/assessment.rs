use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inputs::FinancialInputs;
use crate::liquidity::ratios::{
    cash_coverage_ratio, defensive_interval, working_capital_turnover, RatioResults,
};
use crate::recommendations::advice::{
    cash_flow_assessment, liquidity_implications, risk_recommendations, CASH_FLOW_ACTIONS,
};
use crate::scenarios::sensitivity::SensitivityAnalysis;
use crate::types::*;
use crate::LiquidityResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    Liquidity,
    CashFlow,
    Operational,
    Market,
}

impl RiskType {
    pub fn title(self) -> &'static str {
        match self {
            RiskType::Liquidity => "Liquidity Risk",
            RiskType::CashFlow => "Cash Flow Risk",
            RiskType::Operational => "Operational Risk",
            RiskType::Market => "Market Risk",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Per-factor status, thresholded independently of the overall level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorStatus {
    Critical,
    Medium,
    Good,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub value: Decimal,
    pub status: FactorStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_type: RiskType,
    pub level: RiskLevel,
    /// 0-100, higher is riskier.
    pub score: u32,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub liquidity_risk: RiskAssessment,
    pub cash_flow_risk: RiskAssessment,
    pub operational_risk: RiskAssessment,
    pub market_risk: RiskAssessment,
}

impl RiskProfile {
    pub fn assessments(&self) -> [&RiskAssessment; 4] {
        [
            &self.liquidity_risk,
            &self.cash_flow_risk,
            &self.operational_risk,
            &self.market_risk,
        ]
    }
}

/// Liquidity side of the financial risk panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRiskSummary {
    pub level: RiskLevel,
    pub implications: String,
}

/// Cash-flow side of the financial risk panel, driven by monthly coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowRiskSummary {
    /// cash / (CL / 12)
    pub liquid_coverage_ratio: Multiple,
    pub assessment: String,
    pub impact_level: RiskLevel,
    /// Rounded to two decimals.
    pub defensive_interval: Days,
    pub recommendations: Vec<String>,
}

/// The headline risk panel that the overall risk verdict is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub liquidity_risk: LiquidityRiskSummary,
    pub cash_flow_risk: CashFlowRiskSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallRiskStatus {
    pub status: RiskLevel,
    pub description: String,
}

/// Monthly coverage below this is weak, with high impact.
const WEAK_COVERAGE: Decimal = dec!(3);
/// Monthly coverage below this (and at least `WEAK_COVERAGE`) has medium impact.
const ADEQUATE_COVERAGE: Decimal = dec!(6);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Level and score from the current ratio: below 1 High, below 1.5 Medium.
fn liquidity_level(current: Multiple) -> (RiskLevel, u32) {
    if current < Decimal::ONE {
        (RiskLevel::High, 85)
    } else if current < dec!(1.5) {
        (RiskLevel::Medium, 60)
    } else {
        (RiskLevel::Low, 30)
    }
}

/// Critical below `critical_below`, Medium below `medium_below`, else Good.
fn tiered(value: Decimal, critical_below: Decimal, medium_below: Decimal) -> FactorStatus {
    if value < critical_below {
        FactorStatus::Critical
    } else if value < medium_below {
        FactorStatus::Medium
    } else {
        FactorStatus::Good
    }
}

fn factor(name: &str, value: Decimal, status: FactorStatus) -> RiskFactor {
    RiskFactor {
        name: name.to_string(),
        value,
        status,
    }
}

fn advice_if(fires: bool, risk_type: RiskType) -> Vec<String> {
    if fires {
        risk_recommendations(risk_type)
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Individual assessments
// ---------------------------------------------------------------------------

pub fn assess_liquidity_risk(ratios: &RatioResults) -> RiskAssessment {
    let (level, score) = liquidity_level(ratios.current);

    RiskAssessment {
        risk_type: RiskType::Liquidity,
        level,
        score,
        factors: vec![
            factor(
                "Current Ratio",
                ratios.current,
                tiered(ratios.current, Decimal::ONE, dec!(1.5)),
            ),
            factor(
                "Cash Ratio",
                ratios.cash,
                tiered(ratios.cash, dec!(0.2), dec!(0.3)),
            ),
        ],
        recommendations: advice_if(ratios.current < dec!(1.5), RiskType::Liquidity),
    }
}

pub fn assess_cash_flow_risk(input: &FinancialInputs) -> LiquidityResult<RiskAssessment> {
    let ocf = safe_divide(
        input.cash_balance,
        input.current_liabilities,
        "operating cash flow ratio",
    )?;
    let coverage = cash_coverage_ratio(input)?;
    let interval = defensive_interval(input)?;

    let level = if ocf < dec!(0.5) || coverage < dec!(2) {
        RiskLevel::High
    } else if ocf < dec!(0.8) || coverage < dec!(3) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    // The score tracks the operating cash flow ratio alone.
    let score = if ocf < dec!(0.5) {
        85
    } else if ocf < dec!(0.8) {
        60
    } else {
        35
    };

    Ok(RiskAssessment {
        risk_type: RiskType::CashFlow,
        level,
        score,
        factors: vec![
            factor(
                "Operating Cash Flow Ratio",
                ocf,
                tiered(ocf, dec!(0.5), dec!(0.8)),
            ),
            factor(
                "Cash Coverage Ratio",
                coverage,
                tiered(coverage, dec!(2), dec!(3)),
            ),
            factor(
                "Defensive Interval (Days)",
                interval,
                tiered(interval, dec!(60), dec!(90)),
            ),
        ],
        recommendations: advice_if(ocf < dec!(0.8), RiskType::CashFlow),
    })
}

pub fn assess_operational_risk(input: &FinancialInputs) -> LiquidityResult<RiskAssessment> {
    let turnover = working_capital_turnover(input)?;
    let asset_turnover = divide_or_zero(
        input.current_liabilities,
        input.current_assets,
        "operational efficiency",
    )?;
    let high = turnover < dec!(4);

    Ok(RiskAssessment {
        risk_type: RiskType::Operational,
        level: if high { RiskLevel::High } else { RiskLevel::Low },
        score: if high { 75 } else { 40 },
        factors: vec![
            factor(
                "Working Capital Turnover",
                turnover,
                if high {
                    FactorStatus::Critical
                } else {
                    FactorStatus::Good
                },
            ),
            factor(
                "Operational Efficiency",
                asset_turnover,
                if asset_turnover < dec!(2) {
                    FactorStatus::Medium
                } else {
                    FactorStatus::Good
                },
            ),
        ],
        recommendations: advice_if(high, RiskType::Operational),
    })
}

pub fn assess_market_risk(sensitivity: &SensitivityAnalysis) -> RiskAssessment {
    let pessimistic = sensitivity.pessimistic.ratio;
    let high = pessimistic < Decimal::ONE;

    RiskAssessment {
        risk_type: RiskType::Market,
        level: if high { RiskLevel::High } else { RiskLevel::Low },
        score: if high { 80 } else { 35 },
        factors: vec![factor(
            "Market Sensitivity",
            pessimistic,
            if high {
                FactorStatus::Critical
            } else {
                FactorStatus::Good
            },
        )],
        recommendations: advice_if(high, RiskType::Market),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run all four risk cascades.
pub fn assess_risk(
    input: &FinancialInputs,
    ratios: &RatioResults,
    sensitivity: &SensitivityAnalysis,
) -> LiquidityResult<RiskProfile> {
    let profile = RiskProfile {
        liquidity_risk: assess_liquidity_risk(ratios),
        cash_flow_risk: assess_cash_flow_risk(input)?,
        operational_risk: assess_operational_risk(input)?,
        market_risk: assess_market_risk(sensitivity),
    };

    tracing::debug!(
        liquidity = %profile.liquidity_risk.level,
        cash_flow = %profile.cash_flow_risk.level,
        operational = %profile.operational_risk.level,
        market = %profile.market_risk.level,
        "risk levels"
    );
    Ok(profile)
}

/// Build the financial risk panel from the current ratio and monthly cash coverage.
pub fn risk_summary(input: &FinancialInputs, ratios: &RatioResults) -> LiquidityResult<RiskSummary> {
    let coverage = cash_coverage_ratio(input)?;
    let weak = coverage < WEAK_COVERAGE;
    let impact_level = if weak {
        RiskLevel::High
    } else if coverage < ADEQUATE_COVERAGE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Ok(RiskSummary {
        liquidity_risk: LiquidityRiskSummary {
            level: liquidity_level(ratios.current).0,
            implications: liquidity_implications(ratios.current < Decimal::ONE).to_string(),
        },
        cash_flow_risk: CashFlowRiskSummary {
            liquid_coverage_ratio: coverage,
            assessment: cash_flow_assessment(weak).to_string(),
            impact_level,
            defensive_interval: defensive_interval(input)?.round_dp(2),
            recommendations: if weak {
                CASH_FLOW_ACTIONS.iter().map(|s| s.to_string()).collect()
            } else {
                Vec::new()
            },
        },
    })
}

/// Headline risk verdict read from the risk panel: the liquidity level and
/// monthly cash coverage.
pub fn overall_risk_status(summary: &RiskSummary) -> OverallRiskStatus {
    let coverage = summary.cash_flow_risk.liquid_coverage_ratio;
    let liquidity = summary.liquidity_risk.level;

    let (status, description) = if liquidity == RiskLevel::High || coverage < dec!(0.5) {
        (
            RiskLevel::High,
            "High risk level requiring immediate corrective actions",
        )
    } else if liquidity == RiskLevel::Medium || coverage < Decimal::ONE {
        (
            RiskLevel::Medium,
            "Medium risk level requiring monitoring and improvement",
        )
    } else {
        (
            RiskLevel::Low,
            "Low risk level with good financial stability",
        )
    };

    OverallRiskStatus {
        status,
        description: description.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::SensitivityShocks;
    use crate::liquidity::ratios::calculate_ratios;
    use crate::scenarios::sensitivity::calculate_sensitivity;

    fn ratios(current: Decimal, cash: Decimal) -> RatioResults {
        RatioResults {
            current,
            quick: current,
            cash,
        }
    }

    #[test]
    fn test_liquidity_boundaries() {
        let r = assess_liquidity_risk(&ratios(dec!(0.99), dec!(0.1)));
        assert_eq!((r.level, r.score), (RiskLevel::High, 85));
        let r = assess_liquidity_risk(&ratios(dec!(1.0), dec!(0.1)));
        assert_eq!((r.level, r.score), (RiskLevel::Medium, 60));
        let r = assess_liquidity_risk(&ratios(dec!(1.49), dec!(0.1)));
        assert_eq!(r.level, RiskLevel::Medium);
        let r = assess_liquidity_risk(&ratios(dec!(1.5), dec!(0.1)));
        assert_eq!((r.level, r.score), (RiskLevel::Low, 30));
        assert!(r.recommendations.is_empty());
    }

    #[test]
    fn test_liquidity_factors() {
        let r = assess_liquidity_risk(&ratios(dec!(1.2), dec!(0.25)));
        assert_eq!(r.factors[0].name, "Current Ratio");
        assert_eq!(r.factors[0].status, FactorStatus::Medium);
        assert_eq!(r.factors[1].status, FactorStatus::Medium);
        assert_eq!(r.recommendations.len(), 4);
    }

    #[test]
    fn test_cash_flow_levels() {
        // ocf 0.9, coverage 10.8 => Low
        let input = FinancialInputs::new(dec!(200), dec!(100), dec!(90));
        let r = assess_cash_flow_risk(&input).unwrap();
        assert_eq!((r.level, r.score), (RiskLevel::Low, 35));
        assert!(r.recommendations.is_empty());
        assert_eq!(r.factors[2].value, dec!(328.5));
        assert_eq!(r.factors[2].status, FactorStatus::Good);

        // ocf 0.6 => Medium, score 60
        let input = FinancialInputs::new(dec!(200), dec!(100), dec!(60));
        let r = assess_cash_flow_risk(&input).unwrap();
        assert_eq!((r.level, r.score), (RiskLevel::Medium, 60));
        assert_eq!(r.recommendations.len(), 4);

        // ocf 0.1, coverage 1.2 => High
        let input = FinancialInputs::new(dec!(200), dec!(100), dec!(10));
        let r = assess_cash_flow_risk(&input).unwrap();
        assert_eq!((r.level, r.score), (RiskLevel::High, 85));
        assert_eq!(r.factors[1].status, FactorStatus::Critical);
    }

    #[test]
    fn test_operational_is_binary() {
        // WC turnover = 200 / 100 = 2 => High
        let input = FinancialInputs::new(dec!(200), dec!(100), dec!(10));
        let r = assess_operational_risk(&input).unwrap();
        assert_eq!((r.level, r.score), (RiskLevel::High, 75));
        assert_eq!(r.recommendations.len(), 3);

        // WC turnover = 500 / 100 = 5 => Low
        let input = FinancialInputs::new(dec!(500), dec!(400), dec!(10));
        let r = assess_operational_risk(&input).unwrap();
        assert_eq!((r.level, r.score), (RiskLevel::Low, 40));
        assert!(r.recommendations.is_empty());
    }

    #[test]
    fn test_market_risk_uses_pessimistic_ratio() {
        let input = FinancialInputs::new(dec!(120), dec!(100), dec!(10));
        let s = calculate_sensitivity(&input, &SensitivityShocks::default()).unwrap();
        let r = assess_market_risk(&s);
        assert_eq!((r.level, r.score), (RiskLevel::High, 80));
        assert_eq!(r.factors[0].value, dec!(102) / dec!(110));
    }

    #[test]
    fn test_overall_status() {
        let input = FinancialInputs::new(dec!(80_000), dec!(100_000), dec!(50_000));
        let r = calculate_ratios(&input).unwrap();
        let overall = overall_risk_status(&risk_summary(&input, &r).unwrap());
        assert_eq!(overall.status, RiskLevel::High);

        let input = FinancialInputs::new(dec!(300), dec!(100), dec!(100));
        let r = calculate_ratios(&input).unwrap();
        let overall = overall_risk_status(&risk_summary(&input, &r).unwrap());
        assert_eq!(overall.status, RiskLevel::Low);
    }

    fn summary_with_coverage(cash: Decimal) -> RiskSummary {
        // CL = 1200 makes monthly coverage equal cash / 100.
        let input = FinancialInputs::new(dec!(2_000), dec!(1_200), cash);
        let r = calculate_ratios(&input).unwrap();
        risk_summary(&input, &r).unwrap()
    }

    #[test]
    fn test_cash_flow_impact_boundaries() {
        let just_below_three = summary_with_coverage(dec!(299)).cash_flow_risk;
        assert_eq!(just_below_three.liquid_coverage_ratio, dec!(2.99));
        assert_eq!(just_below_three.impact_level, RiskLevel::High);
        assert_eq!(
            just_below_three.assessment,
            "Cash flow is weak and requires improvement"
        );
        assert_eq!(just_below_three.recommendations.len(), 3);

        let at_three = summary_with_coverage(dec!(300)).cash_flow_risk;
        assert_eq!(at_three.impact_level, RiskLevel::Medium);
        assert_eq!(
            at_three.assessment,
            "Cash flow is adequate with a suitable safety margin"
        );
        assert!(at_three.recommendations.is_empty());

        let just_below_six = summary_with_coverage(dec!(599)).cash_flow_risk;
        assert_eq!(just_below_six.impact_level, RiskLevel::Medium);

        let at_six = summary_with_coverage(dec!(600)).cash_flow_risk;
        assert_eq!(at_six.impact_level, RiskLevel::Low);
    }

    #[test]
    fn test_risk_panel_defensive_interval_and_implications() {
        // 100 * 365 / 1200 = 30.4166... days
        let panel = summary_with_coverage(dec!(100));
        assert_eq!(panel.cash_flow_risk.defensive_interval, dec!(30.42));
        assert_eq!(panel.liquidity_risk.level, RiskLevel::Low);
        assert_eq!(
            panel.liquidity_risk.implications,
            "Liquidity position is relatively stable"
        );

        let input = FinancialInputs::new(dec!(90), dec!(100), dec!(10));
        let r = calculate_ratios(&input).unwrap();
        let panel = risk_summary(&input, &r).unwrap();
        assert_eq!(panel.liquidity_risk.level, RiskLevel::High);
        assert_eq!(
            panel.liquidity_risk.implications,
            "Risk of inability to cover short-term liabilities"
        );
    }

    #[test]
    fn test_assessments_in_panel_order() {
        let input = FinancialInputs::new(dec!(200), dec!(100), dec!(50));
        let r = calculate_ratios(&input).unwrap();
        let s = calculate_sensitivity(&input, &SensitivityShocks::default()).unwrap();
        let profile = assess_risk(&input, &r, &s).unwrap();
        let types: Vec<RiskType> = profile.assessments().iter().map(|a| a.risk_type).collect();
        assert_eq!(
            types,
            vec![
                RiskType::Liquidity,
                RiskType::CashFlow,
                RiskType::Operational,
                RiskType::Market
            ]
        );
    }

    #[test]
    fn test_overflowing_day_count_is_an_error() {
        let input = FinancialInputs::new(dec!(1), dec!(1), Decimal::MAX);
        let r = RatioResults {
            current: Decimal::ONE,
            quick: Decimal::ONE,
            cash: Decimal::ONE,
        };
        assert!(matches!(
            risk_summary(&input, &r),
            Err(crate::LiquidityError::Overflow { .. })
        ));
    }
}
