use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::liquidity::ratios::RatioResults;
use crate::risk::assessment::{RiskLevel, RiskProfile};
use crate::scenarios::sensitivity::SensitivityAnalysis;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    High,
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Medium => "Medium",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub details: String,
}

/// The facts a rule may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContext {
    pub ratios: RatioResults,
    pub liquidity_risk: RiskLevel,
    pub pessimistic_ratio: Multiple,
}

impl RuleContext {
    pub fn new(
        ratios: &RatioResults,
        risk: &RiskProfile,
        sensitivity: &SensitivityAnalysis,
    ) -> Self {
        RuleContext {
            ratios: *ratios,
            liquidity_risk: risk.liquidity_risk.level,
            pessimistic_ratio: sensitivity.pessimistic.ratio,
        }
    }
}

pub struct RecommendationRule {
    pub condition: fn(&RuleContext) -> bool,
    pub priority: Priority,
    pub action: &'static str,
    pub details: &'static str,
}

impl RecommendationRule {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            priority: self.priority,
            action: self.action.to_string(),
            details: self.details.to_string(),
        }
    }
}

/// Evaluated top to bottom; every matching rule contributes one block.
pub const RULES: &[RecommendationRule] = &[
    RecommendationRule {
        condition: |ctx| ctx.ratios.current < dec!(1.5),
        priority: Priority::High,
        action: "Improve Current Ratio",
        details: "Increase current assets or reduce current liabilities through:\n\
                  - Improve inventory management and turnover\n\
                  - Accelerate accounts receivable collection\n\
                  - Restructure some short-term liabilities",
    },
    RecommendationRule {
        condition: |ctx| ctx.ratios.cash < dec!(0.2),
        priority: Priority::Urgent,
        action: "Enhance Cash Liquidity",
        details: "Improve cash position through:\n\
                  - Implementing cash flow management\n\
                  - Improving accounts receivable collection\n\
                  - Reducing unnecessary expenses\n\
                  - Considering short-term investments or financing options",
    },
    RecommendationRule {
        condition: |ctx| {
            ctx.ratios
                .current
                .checked_sub(ctx.ratios.quick)
                .map_or(true, |gap| gap > dec!(0.5))
        },
        priority: Priority::Medium,
        action: "Optimize Working Capital",
        details: "Improve working capital efficiency by:\n\
                  - Enhancing inventory management\n\
                  - Improving accounts payable terms\n\
                  - Investing in efficient cash flow systems",
    },
    RecommendationRule {
        condition: |ctx| ctx.liquidity_risk == RiskLevel::High,
        priority: Priority::Urgent,
        action: "Manage Liquidity Risk",
        details: "Develop a comprehensive risk management plan including:\n\
                  - Establishing a cash reserve\n\
                  - Diversifying funding sources\n\
                  - Improving working capital management\n\
                  - Reviewing and updating credit policies",
    },
    RecommendationRule {
        condition: |ctx| ctx.pessimistic_ratio < Decimal::ONE,
        priority: Priority::High,
        action: "Enhance Financial Resilience",
        details: "Develop strategies to mitigate potential downturns by:\n\
                  - Building cash reserves\n\
                  - Diversifying revenue streams\n\
                  - Improving operational efficiency\n\
                  - Reducing non-essential expenses",
    },
];

/// Concatenate the output of every matching rule, in table order.
pub fn generate_recommendations(ctx: &RuleContext) -> Vec<Recommendation> {
    let fired: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| (rule.condition)(ctx))
        .map(RecommendationRule::to_recommendation)
        .collect();
    tracing::debug!(count = fired.len(), "recommendation rules fired");
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(current: Decimal, quick: Decimal, cash: Decimal, level: RiskLevel, pess: Decimal) -> RuleContext {
        RuleContext {
            ratios: RatioResults { current, quick, cash },
            liquidity_risk: level,
            pessimistic_ratio: pess,
        }
    }

    #[test]
    fn test_healthy_company_gets_nothing() {
        let c = ctx(dec!(2.5), dec!(2.2), dec!(0.5), RiskLevel::Low, dec!(1.9));
        assert!(generate_recommendations(&c).is_empty());
    }

    #[test]
    fn test_all_rules_fire_in_table_order() {
        let c = ctx(dec!(0.8), dec!(0.2), dec!(0.05), RiskLevel::High, dec!(0.6));
        let recs = generate_recommendations(&c);
        let actions: Vec<&str> = recs.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(
            actions,
            vec![
                "Improve Current Ratio",
                "Enhance Cash Liquidity",
                "Optimize Working Capital",
                "Manage Liquidity Risk",
                "Enhance Financial Resilience",
            ]
        );
        // No reordering by priority: High precedes Urgent.
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].priority, Priority::Urgent);
    }

    #[test]
    fn test_details_are_multi_line() {
        let c = ctx(dec!(1.2), dec!(1.0), dec!(0.5), RiskLevel::Medium, dec!(1.05));
        let recs = generate_recommendations(&c);
        assert_eq!(recs.len(), 1);
        assert!(recs[0]
            .details
            .contains("\n- Accelerate accounts receivable collection\n"));
    }

    #[test]
    fn test_working_capital_rule_strictly_greater() {
        let c = ctx(dec!(2.0), dec!(1.5), dec!(0.4), RiskLevel::Low, dec!(1.5));
        assert!(generate_recommendations(&c).is_empty());
    }
}
