use liquidity_core::analysis::{run_analysis, AnalysisRequest};
use liquidity_core::assumptions::AnalysisAssumptions;
use liquidity_core::inputs::{parse_inputs, validate_inputs, FinancialInputs};
use liquidity_core::liquidity::{ratios, status};
use liquidity_core::recommendations::rules::{generate_recommendations, RuleContext};
use liquidity_core::risk::{assessment, assessment::RiskProfile};
use liquidity_core::scenarios::{forecast, sensitivity};
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse form-style JSON. Accepts bare figures or `{ "inputs", "assumptions" }`.
fn parse_request(input_json: &str) -> NapiResult<AnalysisRequest> {
    let raw: Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let (inputs, assumptions) = match raw.get("inputs") {
        Some(inputs) => {
            let assumptions = match raw.get("assumptions") {
                Some(a) => serde_json::from_value(a.clone()).map_err(to_napi_error)?,
                None => AnalysisAssumptions::default(),
            };
            (parse_inputs(inputs).map_err(to_napi_error)?, assumptions)
        }
        None => (
            parse_inputs(&raw).map_err(to_napi_error)?,
            AnalysisAssumptions::default(),
        ),
    };
    assumptions.validate().map_err(to_napi_error)?;
    validate_inputs(&inputs).map_err(to_napi_error)?;
    Ok(AnalysisRequest {
        inputs,
        assumptions,
    })
}

fn to_json(output: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

fn inputs_of(request: &AnalysisRequest) -> &FinancialInputs {
    &request.inputs
}

fn risk_profile(
    request: &AnalysisRequest,
) -> NapiResult<(ratios::RatioResults, sensitivity::SensitivityAnalysis, RiskProfile)> {
    let inputs = inputs_of(request);
    let ratios = ratios::calculate_ratios(inputs).map_err(to_napi_error)?;
    let sensitivity = sensitivity::calculate_sensitivity(inputs, &request.assumptions.sensitivity)
        .map_err(to_napi_error)?;
    let profile =
        assessment::assess_risk(inputs, &ratios, &sensitivity).map_err(to_napi_error)?;
    Ok((ratios, sensitivity, profile))
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = run_analysis(&request).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Ratios and classification
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_ratios(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = ratios::calculate_ratios(inputs_of(&request)).map_err(to_napi_error)?;
    to_json(&output)
}

/// `value` is a decimal string; an unknown `metric` classifies as Undefined.
#[napi]
pub fn classify_metric(value: String, metric: String) -> NapiResult<String> {
    let value: Decimal = value.trim().parse().map_err(to_napi_error)?;
    let classification = status::classify_named(value, &metric);
    to_json(&serde_json::json!({
        "band": classification.band,
        "css_class": classification.css_class(),
        "tag": classification.tag,
    }))
}

// ---------------------------------------------------------------------------
// Risk, scenarios and recommendations
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_risk(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let (ratios, _, profile) = risk_profile(&request)?;
    let panel = assessment::risk_summary(inputs_of(&request), &ratios).map_err(to_napi_error)?;
    let overall = assessment::overall_risk_status(&panel);
    to_json(&serde_json::json!({
        "overall": overall,
        "summary": panel,
        "assessments": profile.assessments(),
    }))
}

#[napi]
pub fn five_year_forecast(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = forecast::five_year_forecast(
        inputs_of(&request),
        &request.assumptions.growth_scenarios,
        request.assumptions.forecast_years,
    )
    .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn recommend(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let (ratios, sensitivity, profile) = risk_profile(&request)?;
    let ctx = RuleContext::new(&ratios, &profile, &sensitivity);
    to_json(&generate_recommendations(&ctx))
}
