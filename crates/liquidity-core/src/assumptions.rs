use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{types::*, LiquidityError, LiquidityResult};

/// Longest forecast horizon supported, in years.
pub const MAX_FORECAST_YEARS: u32 = 5;

/// The fixed shocks, growth rates and benchmarks behind the projections.
///
/// Every field has a default, so a partial JSON/YAML document only needs to
/// name the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisAssumptions {
    pub sensitivity: SensitivityShocks,
    pub growth_scenarios: GrowthScenarios,
    pub forecast_years: u32,
    pub benchmarks: IndustryBenchmarks,
}

impl Default for AnalysisAssumptions {
    fn default() -> Self {
        AnalysisAssumptions {
            sensitivity: SensitivityShocks::default(),
            growth_scenarios: GrowthScenarios::default(),
            forecast_years: MAX_FORECAST_YEARS,
            benchmarks: IndustryBenchmarks::default(),
        }
    }
}

/// Multipliers applied to assets and liabilities in the what-if scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityShocks {
    pub optimistic_assets: Multiple,
    pub optimistic_liabilities: Multiple,
    pub pessimistic_assets: Multiple,
    pub pessimistic_liabilities: Multiple,
}

impl Default for SensitivityShocks {
    fn default() -> Self {
        SensitivityShocks {
            optimistic_assets: dec!(1.15),
            optimistic_liabilities: dec!(0.90),
            pessimistic_assets: dec!(0.85),
            pessimistic_liabilities: dec!(1.10),
        }
    }
}

/// Annual growth rates for one forecast scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub assets_growth: Rate,
    pub liabilities_growth: Rate,
    pub cash_growth: Rate,
}

impl GrowthRates {
    pub const fn new(assets_growth: Rate, liabilities_growth: Rate, cash_growth: Rate) -> Self {
        GrowthRates {
            assets_growth,
            liabilities_growth,
            cash_growth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthScenarios {
    pub optimistic: GrowthRates,
    pub moderate: GrowthRates,
    pub conservative: GrowthRates,
}

impl Default for GrowthScenarios {
    fn default() -> Self {
        GrowthScenarios {
            optimistic: GrowthRates::new(dec!(0.15), dec!(0.10), dec!(0.20)),
            moderate: GrowthRates::new(dec!(0.10), dec!(0.08), dec!(0.12)),
            conservative: GrowthRates::new(dec!(0.05), dec!(0.06), dec!(0.07)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryBenchmarks {
    pub current_ratio: Multiple,
    pub quick_ratio: Multiple,
}

impl Default for IndustryBenchmarks {
    fn default() -> Self {
        IndustryBenchmarks {
            current_ratio: dec!(1.5),
            quick_ratio: dec!(1.0),
        }
    }
}

impl AnalysisAssumptions {
    pub fn validate(&self) -> LiquidityResult<()> {
        if self.forecast_years == 0 || self.forecast_years > MAX_FORECAST_YEARS {
            return Err(LiquidityError::invalid(
                "forecast_years",
                format!("Forecast horizon must be between 1 and {MAX_FORECAST_YEARS} years."),
            ));
        }

        let shocks = [
            ("sensitivity.optimistic_assets", self.sensitivity.optimistic_assets),
            ("sensitivity.optimistic_liabilities", self.sensitivity.optimistic_liabilities),
            ("sensitivity.pessimistic_assets", self.sensitivity.pessimistic_assets),
            ("sensitivity.pessimistic_liabilities", self.sensitivity.pessimistic_liabilities),
        ];
        for (field, shock) in shocks {
            if shock <= Decimal::ZERO {
                return Err(LiquidityError::invalid(field, "Shock multiplier must be positive."));
            }
        }

        let scenarios = [
            ("growth_scenarios.optimistic", &self.growth_scenarios.optimistic),
            ("growth_scenarios.moderate", &self.growth_scenarios.moderate),
            ("growth_scenarios.conservative", &self.growth_scenarios.conservative),
        ];
        for (field, rates) in scenarios {
            // A liabilities rate of -100% would zero the forecast denominator.
            for rate in [rates.assets_growth, rates.liabilities_growth, rates.cash_growth] {
                if rate <= -Decimal::ONE {
                    return Err(LiquidityError::invalid(
                        field,
                        "Growth rates must be greater than -100%.",
                    ));
                }
            }
        }

        if self.benchmarks.current_ratio <= Decimal::ZERO || self.benchmarks.quick_ratio <= Decimal::ZERO {
            return Err(LiquidityError::invalid("benchmarks", "Benchmarks must be positive."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let assumptions = AnalysisAssumptions::default();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.forecast_years, 5);
        assert_eq!(assumptions.growth_scenarios.optimistic.assets_growth, dec!(0.15));
        assert_eq!(assumptions.sensitivity.pessimistic_liabilities, dec!(1.10));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let assumptions: AnalysisAssumptions =
            serde_json::from_str(r#"{ "forecast_years": 3 }"#).unwrap();
        assert_eq!(assumptions.forecast_years, 3);
        assert_eq!(assumptions.sensitivity, SensitivityShocks::default());
        assert_eq!(assumptions.growth_scenarios, GrowthScenarios::default());
    }

    #[test]
    fn test_horizon_out_of_range_rejected() {
        let assumptions = AnalysisAssumptions {
            forecast_years: 6,
            ..Default::default()
        };
        assert!(assumptions.validate().is_err());

        let assumptions = AnalysisAssumptions {
            forecast_years: 0,
            ..Default::default()
        };
        assert!(assumptions.validate().is_err());
    }

    #[test]
    fn test_total_liability_wipeout_rejected() {
        let mut assumptions = AnalysisAssumptions::default();
        assumptions.growth_scenarios.conservative.liabilities_growth = dec!(-1);
        match assumptions.validate().unwrap_err() {
            LiquidityError::InvalidInput { field, .. } => {
                assert_eq!(field, "growth_scenarios.conservative")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_shock_rejected() {
        let mut assumptions = AnalysisAssumptions::default();
        assumptions.sensitivity.pessimistic_liabilities = Decimal::ZERO;
        assert!(assumptions.validate().is_err());
    }
}
