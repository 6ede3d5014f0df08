use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::{GrowthRates, GrowthScenarios};
use crate::inputs::FinancialInputs;
use crate::types::*;
use crate::{LiquidityError, LiquidityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthScenario {
    Optimistic,
    Moderate,
    Conservative,
}

impl GrowthScenario {
    pub const ALL: [GrowthScenario; 3] = [
        GrowthScenario::Optimistic,
        GrowthScenario::Moderate,
        GrowthScenario::Conservative,
    ];

    pub fn rates(self, scenarios: &GrowthScenarios) -> GrowthRates {
        match self {
            GrowthScenario::Optimistic => scenarios.optimistic,
            GrowthScenario::Moderate => scenarios.moderate,
            GrowthScenario::Conservative => scenarios.conservative,
        }
    }
}

/// Projected balances and ratios for one forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastYear {
    pub year: u32,
    pub current_ratio: Multiple,
    pub cash_ratio: Multiple,
    pub working_capital: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub cash_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub scenario: GrowthScenario,
    pub rates: GrowthRates,
    pub years: Vec<ForecastYear>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiveYearForecast {
    pub optimistic: ScenarioForecast,
    pub moderate: ScenarioForecast,
    pub conservative: ScenarioForecast,
}

impl FiveYearForecast {
    pub fn scenario(&self, scenario: GrowthScenario) -> &ScenarioForecast {
        match scenario {
            GrowthScenario::Optimistic => &self.optimistic,
            GrowthScenario::Moderate => &self.moderate,
            GrowthScenario::Conservative => &self.conservative,
        }
    }
}

/// Compound one scenario forward. Each year grows the previous year's
/// balances, never the original inputs.
pub fn project_scenario(
    input: &FinancialInputs,
    scenario: GrowthScenario,
    rates: GrowthRates,
    years: u32,
) -> LiquidityResult<ScenarioForecast> {
    if years == 0 {
        return Err(LiquidityError::invalid(
            "forecast_years",
            "Forecast horizon must be at least one year.",
        ));
    }

    let asset_factor = checked_sum(Decimal::ONE, rates.assets_growth, "asset growth factor")?;
    let liability_factor =
        checked_sum(Decimal::ONE, rates.liabilities_growth, "liability growth factor")?;
    let cash_factor = checked_sum(Decimal::ONE, rates.cash_growth, "cash growth factor")?;

    let mut assets = input.current_assets;
    let mut liabilities = input.current_liabilities;
    let mut cash = input.cash_balance;
    let mut projected = Vec::with_capacity(years as usize);

    for year in 1..=years {
        assets = checked_product(assets, asset_factor, "forecast assets")?;
        liabilities = checked_product(liabilities, liability_factor, "forecast liabilities")?;
        cash = checked_product(cash, cash_factor, "forecast cash")?;

        projected.push(ForecastYear {
            year,
            current_ratio: safe_divide(assets, liabilities, "forecast current ratio")?,
            cash_ratio: safe_divide(cash, liabilities, "forecast cash ratio")?,
            working_capital: assets - liabilities,
            total_assets: assets,
            total_liabilities: liabilities,
            cash_balance: cash,
        });
    }

    Ok(ScenarioForecast {
        scenario,
        rates,
        years: projected,
    })
}

/// Optimistic, moderate and conservative projections over `years` years.
pub fn five_year_forecast(
    input: &FinancialInputs,
    scenarios: &GrowthScenarios,
    years: u32,
) -> LiquidityResult<FiveYearForecast> {
    let project = |scenario: GrowthScenario| {
        project_scenario(input, scenario, scenario.rates(scenarios), years)
    };
    let forecast = FiveYearForecast {
        optimistic: project(GrowthScenario::Optimistic)?,
        moderate: project(GrowthScenario::Moderate)?,
        conservative: project(GrowthScenario::Conservative)?,
    };

    if let Some(last) = forecast.moderate.years.last() {
        tracing::debug!(year = last.year, current_ratio = %last.current_ratio, "moderate forecast horizon");
    }
    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;

    fn base() -> FinancialInputs {
        FinancialInputs::new(dec!(200_000), dec!(100_000), dec!(20_000))
    }

    #[test]
    fn test_optimistic_compounds_geometrically() {
        let f = five_year_forecast(&base(), &GrowthScenarios::default(), 5).unwrap();
        let year5 = f.optimistic.years[4];
        assert_eq!(year5.year, 5);
        assert_eq!(year5.total_assets, dec!(200_000) * dec!(1.15).powu(5));
        assert_eq!(year5.total_liabilities, dec!(100_000) * dec!(1.10).powu(5));
        assert_eq!(year5.cash_balance, dec!(20_000) * dec!(1.20).powu(5));
    }

    #[test]
    fn test_year_one_values() {
        let f = five_year_forecast(&base(), &GrowthScenarios::default(), 5).unwrap();
        let y1 = f.conservative.years[0];
        assert_eq!(y1.total_assets, dec!(210_000));
        assert_eq!(y1.total_liabilities, dec!(106_000));
        assert_eq!(y1.cash_balance, dec!(21_400));
        assert_eq!(y1.working_capital, dec!(104_000));
        assert_eq!(y1.current_ratio, dec!(210_000) / dec!(106_000));
        assert_eq!(y1.cash_ratio, dec!(21_400) / dec!(106_000));
    }

    #[test]
    fn test_each_year_chains_from_previous() {
        let f = five_year_forecast(&base(), &GrowthScenarios::default(), 5).unwrap();
        for pair in f.moderate.years.windows(2) {
            assert_eq!(pair[1].total_assets, pair[0].total_assets * dec!(1.10));
            assert_eq!(pair[1].total_liabilities, pair[0].total_liabilities * dec!(1.08));
            assert_eq!(pair[1].cash_balance, pair[0].cash_balance * dec!(1.12));
            assert_eq!(pair[1].year, pair[0].year + 1);
        }
    }

    #[test]
    fn test_shorter_horizon() {
        let f = five_year_forecast(&base(), &GrowthScenarios::default(), 2).unwrap();
        assert_eq!(f.scenario(GrowthScenario::Moderate).years.len(), 2);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        assert!(five_year_forecast(&base(), &GrowthScenarios::default(), 0).is_err());
    }

    #[test]
    fn test_conservative_ratio_erodes() {
        // Liabilities outgrow assets (6% vs 5%), so the current ratio falls each year.
        let f = five_year_forecast(&base(), &GrowthScenarios::default(), 5).unwrap();
        let ratios: Vec<Decimal> = f.conservative.years.iter().map(|y| y.current_ratio).collect();
        assert!(ratios.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_runaway_growth_is_overflow_error() {
        let input = FinancialInputs::new(dec!(1_000_000), dec!(500_000), dec!(100_000));
        let rates = GrowthRates::new(dec!(1_000_000_000), dec!(0.05), dec!(0.05));
        match project_scenario(&input, GrowthScenario::Optimistic, rates, 5).unwrap_err() {
            LiquidityError::Overflow { context } => assert_eq!(context, "forecast assets"),
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }
}
