//! Canned advice lists keyed by metric tier and by risk type.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::liquidity::status::MetricType;
use crate::risk::assessment::RiskType;

/// (upper bound, advice). The first tier whose bound the value is below wins;
/// the final `None` tier catches everything else.
type AdviceTiers = [(Option<Decimal>, &'static [&'static str]); 3];

const CURRENT_ADVICE: AdviceTiers = [
    (
        Some(dec!(1)),
        &[
            "Increase current assets through inventory management and accounts receivable collection",
            "Restructure short-term liabilities",
            "Improve working capital management",
            "Consider opportunities for capital increase or additional financing",
        ],
    ),
    (
        Some(dec!(1.5)),
        &[
            "Monitor current ratio levels",
            "Improve operational efficiency",
            "Enhance cash flow management",
            "Review and adjust inventory management",
        ],
    ),
    (
        None,
        &[
            "Maintain current ratio level",
            "Invest surplus in short-term opportunities",
            "Consider business expansion",
            "Improve return on current assets",
        ],
    ),
];

const QUICK_ADVICE: AdviceTiers = [
    (
        Some(dec!(0.7)),
        &[
            "Improve accounts receivable collection and accelerate collection cycle",
            "Reduce reliance on inventory for liability coverage",
            "Increase cash liquidity and short-term investments",
            "Renegotiate payment terms with suppliers",
            "Consider liquidating non-essential assets",
        ],
    ),
    (
        Some(dec!(1)),
        &[
            "Monitor quick ratio levels periodically",
            "Improve working capital management efficiency",
            "Develop plan to gradually enhance quick liquidity",
            "Improve inventory management to reduce dependence",
        ],
    ),
    (
        None,
        &[
            "Maintain good quick ratio level",
            "Invest surplus in short-term opportunities",
            "Consider business expansion opportunities",
            "Improve return on liquid assets",
        ],
    ),
];

const CASH_ADVICE: AdviceTiers = [
    (
        Some(dec!(0.2)),
        &[
            "Improve cash flow management and accelerate collection cycle",
            "Reduce non-essential expenses and rationalize spending",
            "Consider liquidating some short-term investments",
            "Develop cash contingency plan",
            "Renegotiate payment terms with suppliers",
        ],
    ),
    (
        Some(dec!(0.3)),
        &[
            "Monitor cash levels regularly",
            "Improve cash management efficiency",
            "Build emergency cash reserves",
            "Develop cash flow forecasting system",
        ],
    ),
    (
        None,
        &[
            "Invest excess cash in short-term opportunities",
            "Consider business expansion opportunities",
            "Improve return on available cash",
            "Develop surplus liquidity management strategy",
        ],
    ),
];

/// Advice list for one headline ratio at the given value.
pub fn metric_recommendations(metric: MetricType, value: Decimal) -> &'static [&'static str] {
    let tiers = match metric {
        MetricType::Current => &CURRENT_ADVICE,
        MetricType::Quick => &QUICK_ADVICE,
        MetricType::Cash => &CASH_ADVICE,
    };
    tiers
        .iter()
        .find(|(bound, _)| bound.map_or(true, |b| value < b))
        .map(|(_, advice)| *advice)
        .unwrap_or(&[])
}

/// Advice attached to a risk assessment whose level is elevated.
pub fn risk_recommendations(risk_type: RiskType) -> &'static [&'static str] {
    match risk_type {
        RiskType::Liquidity => &[
            "Improve working capital management",
            "Increase cash liquidity",
            "Enhance inventory management efficiency",
            "Consider opportunities for capital increase or additional financing",
        ],
        RiskType::CashFlow => &[
            "Improve cash flow collection efficiency",
            "Review spending policies and rationalize expenses",
            "Develop cash liquidity management strategy",
            "Build emergency cash reserves",
        ],
        RiskType::Operational => &[
            "Improve operational efficiency",
            "Review operating cycle",
            "Reduce inventory conversion period",
        ],
        RiskType::Market => &[
            "Diversify funding sources",
            "Build additional reserves",
            "Develop contingency plans",
        ],
    }
}

// ---------------------------------------------------------------------------
// Financial risk panel
// ---------------------------------------------------------------------------

/// Actions listed on the risk panel when monthly cash coverage is weak.
pub const CASH_FLOW_ACTIONS: &[&str] = &[
    "Improve cash flow management",
    "Develop a plan to enhance cash liquidity",
    "Review and adjust expense policies",
];

/// What the current ratio implies for meeting short-term obligations.
pub fn liquidity_implications(current_below_one: bool) -> &'static str {
    if current_below_one {
        "Risk of inability to cover short-term liabilities"
    } else {
        "Liquidity position is relatively stable"
    }
}

/// One-line verdict on monthly cash coverage.
pub fn cash_flow_assessment(weak: bool) -> &'static str {
    if weak {
        "Cash flow is weak and requires improvement"
    } else {
        "Cash flow is adequate with a suitable safety margin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_tiers() {
        assert_eq!(
            metric_recommendations(MetricType::Current, dec!(0.9))[1],
            "Restructure short-term liabilities"
        );
        assert_eq!(
            metric_recommendations(MetricType::Current, dec!(1))[0],
            "Monitor current ratio levels"
        );
        assert_eq!(
            metric_recommendations(MetricType::Current, dec!(1.5))[0],
            "Maintain current ratio level"
        );
    }

    #[test]
    fn test_quick_and_cash_tiers() {
        assert_eq!(metric_recommendations(MetricType::Quick, dec!(0.5)).len(), 5);
        assert_eq!(metric_recommendations(MetricType::Quick, dec!(0.7)).len(), 4);
        assert_eq!(
            metric_recommendations(MetricType::Cash, dec!(0.25))[0],
            "Monitor cash levels regularly"
        );
        assert_eq!(
            metric_recommendations(MetricType::Cash, dec!(0.3))[0],
            "Invest excess cash in short-term opportunities"
        );
    }

    #[test]
    fn test_risk_panel_texts() {
        assert_eq!(
            liquidity_implications(true),
            "Risk of inability to cover short-term liabilities"
        );
        assert_eq!(
            cash_flow_assessment(false),
            "Cash flow is adequate with a suitable safety margin"
        );
        assert_eq!(CASH_FLOW_ACTIONS[0], "Improve cash flow management");
    }

    #[test]
    fn test_risk_lists() {
        assert_eq!(risk_recommendations(RiskType::Market).len(), 3);
        assert_eq!(risk_recommendations(RiskType::CashFlow).len(), 4);
    }
}
