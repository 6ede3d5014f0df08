use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assumptions::AnalysisAssumptions;
use crate::inputs::{input_warnings, validate_inputs, FinancialInputs};
use crate::liquidity::ratios::{
    calculate_advanced_ratios, calculate_ratios, health_indicators, liquidity_depth,
    AdvancedRatios, DepthMetric, HealthIndicators, RatioResults,
};
use crate::liquidity::status::{
    classify, classify_ratios, health_score, interpretation, overall_liquidity_status,
    Classification, LiquidityStatusSummary, MetricType, RatioStatuses,
};
use crate::recommendations::advice::metric_recommendations;
use crate::recommendations::rules::{generate_recommendations, Recommendation, RuleContext};
use crate::risk::assessment::{
    assess_risk, overall_risk_status, risk_summary, OverallRiskStatus, RiskProfile, RiskSummary,
};
use crate::scenarios::forecast::{five_year_forecast, FiveYearForecast};
use crate::scenarios::outlook::{
    case_analysis, future_outlook, trend_analysis, CaseAnalysis, FutureOutlook, TrendAnalysis,
};
use crate::scenarios::sensitivity::{
    calculate_sensitivity, performance_indicators, short_term_projections,
    PerformanceIndicators, SensitivityAnalysis, ShortTermProjection,
};
use crate::types::*;
use crate::LiquidityResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Inputs plus optional overrides for the projection assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub inputs: FinancialInputs,
    #[serde(default)]
    pub assumptions: AnalysisAssumptions,
}

/// Headline verdicts and the consolidated action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub health_score: u32,
    pub liquidity_status: LiquidityStatusSummary,
    pub risk_status: OverallRiskStatus,
    pub future_outlook: FutureOutlook,
    pub recommendations: Vec<Recommendation>,
}

/// Everything one analysis produces. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub inputs: FinancialInputs,
    pub ratios: RatioResults,
    pub working_capital: Money,
    pub statuses: RatioStatuses,
    pub advanced_ratios: AdvancedRatios,
    pub liquidity_depth: Vec<DepthMetric>,
    pub health_indicators: HealthIndicators,
    pub risk: RiskProfile,
    pub risk_summary: RiskSummary,
    pub sensitivity: SensitivityAnalysis,
    pub short_term_projections: Vec<ShortTermProjection>,
    pub performance_indicators: PerformanceIndicators,
    pub case_analysis: CaseAnalysis,
    pub trend_analysis: TrendAnalysis,
    pub forecast: FiveYearForecast,
    pub summary: FinalSummary,
}

/// Focused view of a single headline ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricAnalysis {
    pub metric: MetricType,
    pub value: Multiple,
    pub classification: Classification,
    pub css_class: String,
    pub interpretation: String,
    /// Numerator of the ratio: current assets, quick assets or cash equivalents.
    pub numerator: Money,
    pub current_liabilities: Money,
    /// Working capital for the current ratio; inventory for quick; short-term
    /// investments for cash.
    pub supporting_figure: Money,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full liquidity analysis with the default assumptions.
pub fn analyze(input: &FinancialInputs) -> LiquidityResult<Report> {
    analyze_with(input, &AnalysisAssumptions::default())
}

/// Full liquidity analysis. Pure: the same inputs always produce the same report.
pub fn analyze_with(
    input: &FinancialInputs,
    assumptions: &AnalysisAssumptions,
) -> LiquidityResult<Report> {
    let span = tracing::debug_span!("analyze", current_assets = %input.current_assets, current_liabilities = %input.current_liabilities);
    let _guard = span.enter();

    validate_inputs(input)?;
    assumptions.validate()?;

    let ratios = calculate_ratios(input)?;
    let statuses = classify_ratios(&ratios);
    let advanced_ratios = calculate_advanced_ratios(input)?;
    let sensitivity = calculate_sensitivity(input, &assumptions.sensitivity)?;
    let risk = assess_risk(input, &ratios, &sensitivity)?;
    let risk_panel = risk_summary(input, &ratios)?;
    let forecast = five_year_forecast(
        input,
        &assumptions.growth_scenarios,
        assumptions.forecast_years,
    )?;

    let recommendations = generate_recommendations(&RuleContext::new(&ratios, &risk, &sensitivity));
    let summary = FinalSummary {
        health_score: health_score(&ratios),
        liquidity_status: overall_liquidity_status(&ratios),
        risk_status: overall_risk_status(&risk_panel),
        future_outlook: future_outlook(&sensitivity),
        recommendations,
    };

    tracing::debug!(
        health_score = summary.health_score,
        risk = %summary.risk_status.status,
        "analysis complete"
    );

    Ok(Report {
        inputs: input.clone(),
        ratios,
        working_capital: input.working_capital(),
        statuses,
        advanced_ratios,
        liquidity_depth: liquidity_depth(input)?,
        health_indicators: health_indicators(input)?,
        risk,
        risk_summary: risk_panel,
        sensitivity,
        short_term_projections: short_term_projections(input)?,
        performance_indicators: performance_indicators(input)?,
        case_analysis: case_analysis(input)?,
        trend_analysis: trend_analysis(input, &ratios, &assumptions.benchmarks)?,
        forecast,
        summary,
    })
}

/// Run a full analysis and wrap it in the standard output envelope.
pub fn run_analysis(request: &AnalysisRequest) -> LiquidityResult<ComputationOutput<Report>> {
    let start = Instant::now();
    let warnings = input_warnings(&request.inputs);
    let report = analyze_with(&request.inputs, &request.assumptions)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Liquidity ratio analysis (current, quick, cash) with risk, sensitivity and compounding forecast",
        &request.assumptions,
        warnings,
        elapsed,
        report,
    ))
}

/// Analyse a single headline ratio.
pub fn analyze_metric(input: &FinancialInputs, metric: MetricType) -> LiquidityResult<MetricAnalysis> {
    validate_inputs(input)?;
    let ratios = calculate_ratios(input)?;
    let value = metric.value_of(&ratios);
    let classification = classify(value, metric);

    let (numerator, supporting_figure) = match metric {
        MetricType::Current => (input.current_assets, input.working_capital()),
        MetricType::Quick => (input.quick_assets(), input.inventory),
        MetricType::Cash => (input.cash_equivalents()?, input.short_term_investments),
    };

    Ok(MetricAnalysis {
        metric,
        value,
        css_class: classification.css_class(),
        classification,
        interpretation: interpretation(metric, value).to_string(),
        numerator,
        current_liabilities: input.current_liabilities,
        supporting_figure,
        recommendations: metric_recommendations(metric, value)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::status::StatusBand;
    use crate::risk::assessment::RiskLevel;
    use crate::LiquidityError;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_input() -> FinancialInputs {
        FinancialInputs::new(dec!(200_000), dec!(100_000), dec!(20_000)).with_inventory(dec!(50_000))
    }

    #[test]
    fn test_report_sections_populated() {
        let report = analyze(&sample_input()).unwrap();
        assert_eq!(report.ratios.current, dec!(2));
        assert_eq!(report.working_capital, dec!(100_000));
        assert_eq!(report.statuses.current.band, StatusBand::Excellent);
        assert_eq!(report.liquidity_depth.len(), 3);
        assert_eq!(report.short_term_projections.len(), 2);
        assert_eq!(report.forecast.optimistic.years.len(), 5);
        assert_eq!(report.risk.liquidity_risk.level, RiskLevel::Low);
    }

    #[test]
    fn test_idempotent() {
        let a = analyze(&sample_input()).unwrap();
        let b = analyze(&sample_input()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_zero_liabilities_produces_no_report() {
        let input = FinancialInputs::new(dec!(100), Decimal::ZERO, dec!(10));
        assert!(matches!(
            analyze(&input),
            Err(LiquidityError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_custom_horizon_respected() {
        let assumptions = AnalysisAssumptions {
            forecast_years: 3,
            ..Default::default()
        };
        let report = analyze_with(&sample_input(), &assumptions).unwrap();
        assert_eq!(report.forecast.conservative.years.len(), 3);
    }

    #[test]
    fn test_run_analysis_envelope() {
        let request = AnalysisRequest {
            inputs: sample_input().with_inventory(dec!(250_000)),
            assumptions: AnalysisAssumptions::default(),
        };
        let output = run_analysis(&request).unwrap();
        assert!(!output.methodology.is_empty());
        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
        assert!(output.warnings.iter().any(|w| w.contains("quick ratio")));
        assert_eq!(output.assumptions["forecast_years"], 5);
    }

    #[test]
    fn test_metric_analysis_quick() {
        let input = FinancialInputs::new(dec!(100_000), dec!(100_000), dec!(10_000))
            .with_inventory(dec!(20_000));
        let m = analyze_metric(&input, MetricType::Quick).unwrap();
        assert_eq!(m.value, dec!(0.8));
        assert_eq!(m.classification.band, StatusBand::Good);
        assert_eq!(m.css_class, "status-warning loss");
        assert_eq!(m.numerator, dec!(80_000));
        assert_eq!(m.supporting_figure, dec!(20_000));
        assert_eq!(m.recommendations[0], "Monitor quick ratio levels periodically");
    }

    #[test]
    fn test_metric_analysis_current_working_capital() {
        let m = analyze_metric(&sample_input(), MetricType::Current).unwrap();
        assert_eq!(m.supporting_figure, dec!(100_000));
        assert!(m.interpretation.starts_with("Excellent"));
    }
}
