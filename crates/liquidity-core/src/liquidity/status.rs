use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ratios::RatioResults;
use crate::types::*;
use crate::LiquidityError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which headline ratio a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Current,
    Quick,
    Cash,
}

impl MetricType {
    pub const ALL: [MetricType; 3] = [MetricType::Current, MetricType::Quick, MetricType::Cash];

    pub fn label(self) -> &'static str {
        match self {
            MetricType::Current => "Current Ratio",
            MetricType::Quick => "Quick Ratio",
            MetricType::Cash => "Cash Ratio",
        }
    }

    pub fn value_of(self, ratios: &RatioResults) -> Multiple {
        match self {
            MetricType::Current => ratios.current,
            MetricType::Quick => ratios.quick,
            MetricType::Cash => ratios.cash,
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricType::Current => "current",
            MetricType::Quick => "quick",
            MetricType::Cash => "cash",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MetricType {
    type Err = LiquidityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(MetricType::Current),
            "quick" => Ok(MetricType::Quick),
            "cash" => Ok(MetricType::Cash),
            other => Err(LiquidityError::invalid(
                "metric_type",
                format!("Unknown metric type '{other}' (expected current, quick or cash)."),
            )),
        }
    }
}

/// Qualitative band. Variants are declared worst-to-best so `Ord` follows rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusBand {
    Undefined,
    Critical,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusBand::Undefined => "Undefined",
            StatusBand::Critical => "Critical",
            StatusBand::Fair => "Fair",
            StatusBand::Good => "Good",
            StatusBand::Excellent => "Excellent",
        };
        write!(f, "{}", s)
    }
}

/// Presentation hint attached to a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusHint {
    Good,
    Warning,
    Critical,
}

impl StatusHint {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusHint::Good => "status-good",
            StatusHint::Warning => "status-warning",
            StatusHint::Critical => "status-critical",
        }
    }
}

/// Whether the raw value is at least 1.0, independent of the metric's band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitTag {
    Profit,
    Loss,
}

impl ProfitTag {
    pub fn of(value: Decimal) -> Self {
        if value >= Decimal::ONE {
            ProfitTag::Profit
        } else {
            ProfitTag::Loss
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfitTag::Profit => "profit",
            ProfitTag::Loss => "loss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub band: StatusBand,
    /// `None` only for `Undefined`.
    pub hint: Option<StatusHint>,
    pub tag: ProfitTag,
}

impl Classification {
    /// Combined class string, e.g. `"status-warning loss"`; empty when undefined.
    pub fn css_class(&self) -> String {
        match self.hint {
            Some(hint) => format!("{} {}", hint.css_class(), self.tag.as_str()),
            None => String::new(),
        }
    }
}

/// Classification of the three headline ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioStatuses {
    pub current: Classification,
    pub quick: Classification,
    pub cash: Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidityStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityStatusSummary {
    pub status: LiquidityStatus,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Threshold table
// ---------------------------------------------------------------------------

/// Inclusive lower bounds, checked best band first; anything below is Critical.
const CURRENT_BANDS: &[(Decimal, StatusBand, StatusHint)] = &[
    (dec!(2), StatusBand::Excellent, StatusHint::Good),
    (dec!(1.5), StatusBand::Good, StatusHint::Good),
    (dec!(1), StatusBand::Fair, StatusHint::Warning),
];

const QUICK_BANDS: &[(Decimal, StatusBand, StatusHint)] = &[
    (dec!(1), StatusBand::Excellent, StatusHint::Good),
    (dec!(0.7), StatusBand::Good, StatusHint::Warning),
];

const CASH_BANDS: &[(Decimal, StatusBand, StatusHint)] = &[
    (dec!(0.3), StatusBand::Excellent, StatusHint::Good),
    (dec!(0.2), StatusBand::Fair, StatusHint::Warning),
];

fn bands(metric: MetricType) -> &'static [(Decimal, StatusBand, StatusHint)] {
    match metric {
        MetricType::Current => CURRENT_BANDS,
        MetricType::Quick => QUICK_BANDS,
        MetricType::Cash => CASH_BANDS,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Map a ratio value to its qualitative band, hint and profit/loss tag.
pub fn classify(value: Decimal, metric: MetricType) -> Classification {
    let (band, hint) = bands(metric)
        .iter()
        .find(|(floor, _, _)| value >= *floor)
        .map(|(_, band, hint)| (*band, *hint))
        .unwrap_or((StatusBand::Critical, StatusHint::Critical));

    Classification {
        band,
        hint: Some(hint),
        tag: ProfitTag::of(value),
    }
}

/// Classify by metric name. Unrecognised names yield `Undefined` with no hint.
pub fn classify_named(value: Decimal, metric: &str) -> Classification {
    match metric.parse::<MetricType>() {
        Ok(metric) => classify(value, metric),
        Err(_) => Classification {
            band: StatusBand::Undefined,
            hint: None,
            tag: ProfitTag::of(value),
        },
    }
}

pub fn classify_ratios(ratios: &RatioResults) -> RatioStatuses {
    RatioStatuses {
        current: classify(ratios.current, MetricType::Current),
        quick: classify(ratios.quick, MetricType::Quick),
        cash: classify(ratios.cash, MetricType::Cash),
    }
}

/// One-sentence reading of a ratio value.
pub fn interpretation(metric: MetricType, value: Decimal) -> &'static str {
    match (metric, classify(value, metric).band) {
        (MetricType::Current, StatusBand::Excellent) => {
            "Excellent liquidity position indicating strong ability to cover short-term obligations"
        }
        (MetricType::Current, StatusBand::Good) => {
            "Good liquidity position with appropriate safety margin"
        }
        (MetricType::Current, StatusBand::Fair) => {
            "Acceptable liquidity position but requires monitoring"
        }
        (MetricType::Current, _) => {
            "Critical liquidity position requiring urgent corrective actions"
        }
        (MetricType::Quick, StatusBand::Excellent) => {
            "Excellent liquidity position with strong ability to cover short-term obligations without relying on inventory"
        }
        (MetricType::Quick, StatusBand::Good) => {
            "Good liquidity position with ability to cover short-term obligations, but requires monitoring"
        }
        (MetricType::Quick, _) => {
            "Critical liquidity position requiring urgent corrective actions to improve quick liquidity"
        }
        (MetricType::Cash, StatusBand::Excellent) => {
            "Excellent cash position indicating strong ability to cover short-term obligations with cash"
        }
        (MetricType::Cash, StatusBand::Fair) => {
            "Good cash position with ability to cover short-term obligations, but requires monitoring"
        }
        (MetricType::Cash, _) => {
            "Critical cash position requiring urgent corrective actions to improve cash liquidity"
        }
    }
}

/// Blend the three ratios into one liquidity verdict.
pub fn overall_liquidity_status(ratios: &RatioResults) -> LiquidityStatusSummary {
    let (status, description) = if ratios.current >= dec!(2)
        && ratios.quick >= Decimal::ONE
        && ratios.cash >= dec!(0.3)
    {
        (
            LiquidityStatus::Excellent,
            "Strong financial position with excellent liquidity",
        )
    } else if ratios.current >= dec!(1.5) && ratios.quick >= dec!(0.7) && ratios.cash >= dec!(0.2)
    {
        (
            LiquidityStatus::Good,
            "Stable financial position with good liquidity",
        )
    } else if ratios.current >= Decimal::ONE {
        (
            LiquidityStatus::Fair,
            "Acceptable financial position needing improvement",
        )
    } else {
        (
            LiquidityStatus::Poor,
            "Financial position requires urgent attention",
        )
    };

    LiquidityStatusSummary {
        status,
        description: description.to_string(),
    }
}

/// 0-100 score: points per band of each ratio plus ordering bonuses.
pub fn health_score(ratios: &RatioResults) -> u32 {
    let mut score = 0u32;

    score += if ratios.current >= dec!(2) {
        30
    } else if ratios.current >= dec!(1.5) {
        20
    } else if ratios.current >= Decimal::ONE {
        10
    } else {
        0
    };

    score += if ratios.quick >= Decimal::ONE {
        25
    } else if ratios.quick >= dec!(0.7) {
        15
    } else {
        0
    };

    score += if ratios.cash >= dec!(0.3) {
        25
    } else if ratios.cash >= dec!(0.2) {
        15
    } else {
        0
    };

    if ratios.current > ratios.quick {
        score += 10;
    }
    if ratios.quick > ratios.cash {
        score += 10;
    }

    score.min(100)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
