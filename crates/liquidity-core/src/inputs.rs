use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::{types::*, LiquidityError, LiquidityResult};

// ---------------------------------------------------------------------------
// Input type
// ---------------------------------------------------------------------------

/// Balance-sheet figures for one analysis.
///
/// The three leading fields are required; the rest default to zero when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInputs {
    #[serde(alias = "currentAssets")]
    pub current_assets: Money,
    #[serde(alias = "currentLiabilities")]
    pub current_liabilities: Money,
    #[serde(alias = "cashBalance")]
    pub cash_balance: Money,
    #[serde(default)]
    pub inventory: Money,
    #[serde(default)]
    pub receivables: Money,
    #[serde(default, alias = "shortTermInvestments")]
    pub short_term_investments: Money,
    #[serde(default, alias = "prepaidExpenses")]
    pub prepaid_expenses: Money,
}

impl FinancialInputs {
    /// Inputs with only the required figures set; optional figures are zero.
    pub fn new(current_assets: Money, current_liabilities: Money, cash_balance: Money) -> Self {
        FinancialInputs {
            current_assets,
            current_liabilities,
            cash_balance,
            inventory: Decimal::ZERO,
            receivables: Decimal::ZERO,
            short_term_investments: Decimal::ZERO,
            prepaid_expenses: Decimal::ZERO,
        }
    }

    pub fn with_inventory(mut self, inventory: Money) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_receivables(mut self, receivables: Money) -> Self {
        self.receivables = receivables;
        self
    }

    pub fn with_short_term_investments(mut self, investments: Money) -> Self {
        self.short_term_investments = investments;
        self
    }

    pub fn with_prepaid_expenses(mut self, prepaid: Money) -> Self {
        self.prepaid_expenses = prepaid;
        self
    }

    pub fn working_capital(&self) -> Money {
        self.current_assets - self.current_liabilities
    }

    /// Current assets less inventory.
    pub fn quick_assets(&self) -> Money {
        self.current_assets - self.inventory
    }

    /// Cash plus short-term investments.
    pub fn cash_equivalents(&self) -> LiquidityResult<Money> {
        checked_sum(self.cash_balance, self.short_term_investments, "cash equivalents")
    }
}

// ---------------------------------------------------------------------------
// Parse-with-default boundary
// ---------------------------------------------------------------------------

const REQUIRED_FIELDS: [(&str, &str); 3] = [
    ("current_assets", "currentAssets"),
    ("current_liabilities", "currentLiabilities"),
    ("cash_balance", "cashBalance"),
];

/// Parse loosely-typed field values (JSON numbers or numeric strings, as a
/// form or API caller would supply them) into `FinancialInputs`.
///
/// Required fields that are missing or non-numeric are rejected. Optional
/// fields that are missing or non-numeric become zero.
pub fn parse_inputs(raw: &Value) -> LiquidityResult<FinancialInputs> {
    let map = raw.as_object().ok_or_else(|| {
        LiquidityError::invalid("inputs", "Expected a JSON object of balance-sheet figures.")
    })?;

    let mut required = [Decimal::ZERO; 3];
    for (slot, (field, alias)) in required.iter_mut().zip(REQUIRED_FIELDS) {
        let value = lookup(map, field, alias);
        *slot = value.and_then(numeric).ok_or_else(|| {
            LiquidityError::invalid(field, "A numeric value is required.")
        })?;
    }
    let [current_assets, current_liabilities, cash_balance] = required;

    let optional = |field: &str, alias: &str| -> Money {
        lookup(map, field, alias)
            .and_then(numeric)
            .unwrap_or(Decimal::ZERO)
    };

    Ok(FinancialInputs {
        current_assets,
        current_liabilities,
        cash_balance,
        inventory: optional("inventory", "inventory"),
        receivables: optional("receivables", "receivables"),
        short_term_investments: optional("short_term_investments", "shortTermInvestments"),
        prepaid_expenses: optional("prepaid_expenses", "prepaidExpenses"),
    })
}

fn lookup<'a>(map: &'a serde_json::Map<String, Value>, field: &str, alias: &str) -> Option<&'a Value> {
    map.get(field).or_else(|| map.get(alias))
}

fn numeric(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => {
            let trimmed = s.trim().replace(',', "");
            if trimmed.is_empty() {
                return None;
            }
            Decimal::from_str(&trimmed)
                .or_else(|_| Decimal::from_scientific(&trimmed))
                .ok()
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject inputs the formulas cannot meaningfully evaluate.
///
/// Zero current liabilities is reported as `DivisionByZero` rather than
/// allowing infinite ratios to flow into the report.
pub fn validate_inputs(input: &FinancialInputs) -> LiquidityResult<()> {
    if input.current_liabilities.is_zero() {
        return Err(LiquidityError::DivisionByZero {
            context: "current_liabilities is zero; every liquidity ratio is undefined".into(),
        });
    }
    if input.current_liabilities < Decimal::ZERO {
        return Err(LiquidityError::invalid(
            "current_liabilities",
            "Current liabilities must be positive.",
        ));
    }
    if input.current_assets <= Decimal::ZERO {
        return Err(LiquidityError::invalid(
            "current_assets",
            "Current assets must be positive.",
        ));
    }
    if input.cash_balance < Decimal::ZERO {
        return Err(LiquidityError::invalid(
            "cash_balance",
            "Cash balance cannot be negative.",
        ));
    }

    let optional = [
        ("inventory", input.inventory),
        ("receivables", input.receivables),
        ("short_term_investments", input.short_term_investments),
        ("prepaid_expenses", input.prepaid_expenses),
    ];
    for (field, value) in optional {
        if value < Decimal::ZERO {
            return Err(LiquidityError::invalid(field, "Value cannot be negative."));
        }
    }
    Ok(())
}

/// Non-fatal anomalies worth surfacing alongside the result.
pub fn input_warnings(input: &FinancialInputs) -> Vec<String> {
    let mut warnings = Vec::new();
    if input.inventory > input.current_assets {
        warnings.push("Inventory exceeds current assets; quick ratio will be negative.".into());
    }
    if input.receivables > input.current_assets {
        warnings.push("Receivables exceed current assets; check the balance-sheet figures.".into());
    }
    if input.cash_balance > input.current_assets {
        warnings.push("Cash balance exceeds current assets; check the balance-sheet figures.".into());
    }
    for warning in &warnings {
        tracing::warn!(%warning, "input anomaly");
    }
    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_numbers_and_strings() {
        let raw = json!({
            "current_assets": 200000,
            "current_liabilities": "100000",
            "cash_balance": "20000.50",
            "inventory": 50000
        });
        let input = parse_inputs(&raw).unwrap();
        assert_eq!(input.current_assets, dec!(200000));
        assert_eq!(input.current_liabilities, dec!(100000));
        assert_eq!(input.cash_balance, dec!(20000.50));
        assert_eq!(input.inventory, dec!(50000));
        assert_eq!(input.receivables, Decimal::ZERO);
    }

    #[test]
    fn test_parse_accepts_camel_case() {
        let raw = json!({
            "currentAssets": 150,
            "currentLiabilities": 100,
            "cashBalance": 30,
            "shortTermInvestments": "5"
        });
        let input = parse_inputs(&raw).unwrap();
        assert_eq!(input.current_assets, dec!(150));
        assert_eq!(input.short_term_investments, dec!(5));
    }

    #[test]
    fn test_optional_non_numeric_coerced_to_zero() {
        let raw = json!({
            "current_assets": 100,
            "current_liabilities": 50,
            "cash_balance": 10,
            "inventory": "n/a",
            "receivables": null,
            "prepaid_expenses": ""
        });
        let input = parse_inputs(&raw).unwrap();
        assert_eq!(input.inventory, Decimal::ZERO);
        assert_eq!(input.receivables, Decimal::ZERO);
        assert_eq!(input.prepaid_expenses, Decimal::ZERO);
    }

    #[test]
    fn test_missing_required_rejected() {
        let raw = json!({ "current_assets": 100, "cash_balance": 10 });
        match parse_inputs(&raw).unwrap_err() {
            LiquidityError::InvalidInput { field, .. } => assert_eq!(field, "current_liabilities"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_required_rejected() {
        let raw = json!({
            "current_assets": "lots",
            "current_liabilities": 100,
            "cash_balance": 10
        });
        match parse_inputs(&raw).unwrap_err() {
            LiquidityError::InvalidInput { field, .. } => assert_eq!(field, "current_assets"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(parse_inputs(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_zero_liabilities_is_division_by_zero() {
        let input = FinancialInputs::new(dec!(100), Decimal::ZERO, dec!(10));
        match validate_inputs(&input).unwrap_err() {
            LiquidityError::DivisionByZero { .. } => {}
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        let input = FinancialInputs::new(dec!(100), dec!(50), dec!(-1));
        assert!(matches!(
            validate_inputs(&input),
            Err(LiquidityError::InvalidInput { .. })
        ));

        let input = FinancialInputs::new(dec!(100), dec!(50), dec!(1)).with_inventory(dec!(-5));
        match validate_inputs(&input).unwrap_err() {
            LiquidityError::InvalidInput { field, .. } => assert_eq!(field, "inventory"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_inventory_above_assets_warns() {
        let input = FinancialInputs::new(dec!(100), dec!(50), dec!(10)).with_inventory(dec!(150));
        let warnings = input_warnings(&input);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("quick ratio"));
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let input: FinancialInputs = serde_json::from_value(json!({
            "current_assets": "80000",
            "current_liabilities": "100000",
            "cash_balance": "5000"
        }))
        .unwrap();
        assert_eq!(input.inventory, Decimal::ZERO);
        assert_eq!(input.working_capital(), dec!(-20000));
    }
}
