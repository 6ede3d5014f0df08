use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Instant;

use liquidity_core::analysis::{self, AnalysisRequest};
use liquidity_core::assumptions::AnalysisAssumptions;
use liquidity_core::inputs::{input_warnings, parse_inputs, validate_inputs, FinancialInputs};
use liquidity_core::liquidity::ratios::calculate_ratios;
use liquidity_core::liquidity::status::{self, MetricType};
use liquidity_core::recommendations::advice::metric_recommendations;
use liquidity_core::risk::assessment::{assess_risk, overall_risk_status, risk_summary};
use liquidity_core::scenarios::forecast::five_year_forecast;
use liquidity_core::scenarios::outlook::{case_analysis, future_outlook};
use liquidity_core::scenarios::sensitivity::{
    calculate_sensitivity, performance_indicators, short_term_projections,
};
use liquidity_core::with_metadata;

use crate::input;

type CmdResult = Result<Value, Box<dyn Error>>;

/// Balance-sheet figures, supplied as flags, a JSON file or piped JSON
#[derive(Args)]
pub struct SheetArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Total current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Cash balance
    #[arg(long, alias = "cash")]
    pub cash_balance: Option<Decimal>,

    /// Inventory (defaults to 0)
    #[arg(long)]
    pub inventory: Option<Decimal>,

    /// Accounts receivable (defaults to 0)
    #[arg(long)]
    pub receivables: Option<Decimal>,

    /// Short-term investments (defaults to 0)
    #[arg(long)]
    pub short_term_investments: Option<Decimal>,

    /// Prepaid expenses (defaults to 0)
    #[arg(long)]
    pub prepaid_expenses: Option<Decimal>,
}

/// Balance sheet plus optional assumption overrides
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Path to a JSON or YAML assumptions file
    #[arg(long)]
    pub assumptions: Option<String>,
}

/// Arguments for the multi-year forecast
#[derive(Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub analysis: AnalyzeArgs,

    /// Forecast horizon in years (1-5)
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for a single-ratio analysis
#[derive(Args)]
pub struct MetricArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Ratio to analyse: current, quick or cash
    #[arg(long)]
    pub metric: String,
}

/// Arguments for classifying a bare ratio value
#[derive(Args)]
pub struct ClassifyArgs {
    /// Ratio value
    #[arg(long, allow_hyphen_values = true)]
    pub value: Decimal,

    /// Ratio type: current, quick or cash (anything else is Undefined)
    #[arg(long)]
    pub metric: String,
}

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

fn read_document(sheet: &SheetArgs) -> Result<Option<Value>, Box<dyn Error>> {
    if let Some(ref path) = sheet.input {
        return Ok(Some(input::file::read_json_value(path)?));
    }
    input::stdin::read_stdin()
}

fn inputs_from_flags(sheet: &SheetArgs) -> Result<FinancialInputs, Box<dyn Error>> {
    Ok(FinancialInputs {
        current_assets: sheet
            .current_assets
            .ok_or("--current-assets is required (or provide --input)")?,
        current_liabilities: sheet
            .current_liabilities
            .ok_or("--current-liabilities is required (or provide --input)")?,
        cash_balance: sheet
            .cash_balance
            .ok_or("--cash-balance is required (or provide --input)")?,
        inventory: sheet.inventory.unwrap_or_default(),
        receivables: sheet.receivables.unwrap_or_default(),
        short_term_investments: sheet.short_term_investments.unwrap_or_default(),
        prepaid_expenses: sheet.prepaid_expenses.unwrap_or_default(),
    })
}

/// Accept either bare balance-sheet figures or `{ "inputs": ..., "assumptions": ... }`.
fn split_document(
    doc: &Value,
) -> Result<(FinancialInputs, Option<AnalysisAssumptions>), Box<dyn Error>> {
    match doc.get("inputs") {
        Some(inputs) => {
            let assumptions = match doc.get("assumptions") {
                Some(a) => Some(serde_json::from_value(a.clone())?),
                None => None,
            };
            Ok((parse_inputs(inputs)?, assumptions))
        }
        None => Ok((parse_inputs(doc)?, None)),
    }
}

fn resolve_inputs(sheet: &SheetArgs) -> Result<FinancialInputs, Box<dyn Error>> {
    match read_document(sheet)? {
        Some(doc) => Ok(split_document(&doc)?.0),
        None => inputs_from_flags(sheet),
    }
}

fn resolve_request(args: &AnalyzeArgs) -> Result<AnalysisRequest, Box<dyn Error>> {
    let (inputs, embedded) = match read_document(&args.sheet)? {
        Some(doc) => split_document(&doc)?,
        None => (inputs_from_flags(&args.sheet)?, None),
    };
    let assumptions = match (&args.assumptions, embedded) {
        (Some(path), _) => input::file::read_assumptions(path)?,
        (None, Some(embedded)) => embedded,
        (None, None) => AnalysisAssumptions::default(),
    };
    assumptions.validate()?;
    tracing::debug!(?inputs, "resolved analysis request");
    Ok(AnalysisRequest {
        inputs,
        assumptions,
    })
}

fn envelope<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    inputs: &FinancialInputs,
    start: Instant,
    result: T,
) -> CmdResult {
    let output = with_metadata(
        methodology,
        assumptions,
        input_warnings(inputs),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn run_analyze(args: AnalyzeArgs) -> CmdResult {
    let request = resolve_request(&args)?;
    let output = analysis::run_analysis(&request)?;
    tracing::info!(
        health_score = output.result.summary.health_score,
        warnings = output.warnings.len(),
        "analysis finished"
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_ratios(args: SheetArgs) -> CmdResult {
    let start = Instant::now();
    let inputs = resolve_inputs(&args)?;
    validate_inputs(&inputs)?;
    let ratios = calculate_ratios(&inputs)?;

    let result = json!({
        "current": ratios.current,
        "quick": ratios.quick,
        "cash": ratios.cash,
        "working_capital": inputs.working_capital(),
        "current_status": status::classify(ratios.current, MetricType::Current).band,
        "quick_status": status::classify(ratios.quick, MetricType::Quick).band,
        "cash_status": status::classify(ratios.cash, MetricType::Cash).band,
        "health_score": status::health_score(&ratios),
    });
    envelope(
        "Liquidity ratios (current, quick, cash)",
        &json!({ "division_guard": "current_liabilities must be non-zero" }),
        &inputs,
        start,
        result,
    )
}

pub fn run_classify(args: ClassifyArgs) -> CmdResult {
    let c = status::classify_named(args.value, &args.metric);
    Ok(json!({
        "value": args.value,
        "metric": args.metric,
        "band": c.band,
        "css_class": c.css_class(),
        "tag": c.tag,
    }))
}

pub fn run_risk(args: AnalyzeArgs) -> CmdResult {
    let start = Instant::now();
    let request = resolve_request(&args)?;
    let inputs = &request.inputs;
    validate_inputs(inputs)?;

    let ratios = calculate_ratios(inputs)?;
    let sensitivity = calculate_sensitivity(inputs, &request.assumptions.sensitivity)?;
    let profile = assess_risk(inputs, &ratios, &sensitivity)?;
    let panel = risk_summary(inputs, &ratios)?;
    let overall = overall_risk_status(&panel);

    for assessment in profile.assessments() {
        tracing::info!(
            risk = %assessment.risk_type,
            level = %assessment.level,
            score = assessment.score,
            "risk assessed"
        );
    }

    let result = json!({
        "overall": overall,
        "summary": panel,
        "assessments": profile.assessments(),
    });
    envelope(
        "Liquidity, cash-flow, operational and market risk cascades",
        &request.assumptions.sensitivity,
        inputs,
        start,
        result,
    )
}

pub fn run_sensitivity(args: AnalyzeArgs) -> CmdResult {
    let start = Instant::now();
    let request = resolve_request(&args)?;
    let inputs = &request.inputs;
    validate_inputs(inputs)?;

    let sensitivity = calculate_sensitivity(inputs, &request.assumptions.sensitivity)?;
    let result = json!({
        "optimistic": sensitivity.optimistic,
        "pessimistic": sensitivity.pessimistic,
        "outlook": future_outlook(&sensitivity),
        "short_term_projections": short_term_projections(inputs)?,
        "performance_indicators": performance_indicators(inputs)?,
        "case_analysis": case_analysis(inputs)?,
    });
    envelope(
        "Single-step sensitivity shocks and short-horizon projections",
        &request.assumptions.sensitivity,
        inputs,
        start,
        result,
    )
}

pub fn run_forecast(args: ForecastArgs) -> CmdResult {
    let start = Instant::now();
    let mut request = resolve_request(&args.analysis)?;
    if let Some(years) = args.years {
        request.assumptions.forecast_years = years;
        request.assumptions.validate()?;
    }
    let inputs = &request.inputs;
    validate_inputs(inputs)?;

    let forecast = five_year_forecast(
        inputs,
        &request.assumptions.growth_scenarios,
        request.assumptions.forecast_years,
    )?;
    envelope(
        "Compounding forecast: each year grows the previous year's balances",
        &request.assumptions.growth_scenarios,
        inputs,
        start,
        forecast,
    )
}

pub fn run_recommend(args: AnalyzeArgs) -> CmdResult {
    let start = Instant::now();
    let request = resolve_request(&args)?;
    let report = analysis::analyze_with(&request.inputs, &request.assumptions)?;

    let by_metric: serde_json::Map<String, Value> = MetricType::ALL
        .iter()
        .map(|m| {
            let advice = metric_recommendations(*m, m.value_of(&report.ratios));
            (m.to_string(), json!(advice))
        })
        .collect();

    let result = json!({
        "actions": report.summary.recommendations,
        "by_metric": by_metric,
        "liquidity_status": report.summary.liquidity_status,
    });
    envelope(
        "Rule-table recommendations",
        &request.assumptions,
        &request.inputs,
        start,
        result,
    )
}

pub fn run_metric(args: MetricArgs) -> CmdResult {
    let start = Instant::now();
    let metric: MetricType = args.metric.parse()?;
    let inputs = resolve_inputs(&args.sheet)?;
    let result = analysis::analyze_metric(&inputs, metric)?;
    envelope(
        &format!("{} analysis", metric.label()),
        &json!({ "metric": metric }),
        &inputs,
        start,
        result,
    )
}
