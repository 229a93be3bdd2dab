//! Annual figures shown on the dashboard next to a simulation result.

use serde::{Deserialize, Serialize};

use crate::constants::cost;
use crate::simulation::{round_to, SimulationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Fish plus vegetables (kg/year).
    pub total_yield_kg: f64,
    /// Water use (m³/year).
    pub annual_water_m3: f64,
    pub annual_kwh: f64,
    pub annual_operating_cost: f64,
    /// Operating cost per kg of produce; `None` when nothing is produced.
    pub cost_per_kg: Option<f64>,
}

pub fn project(result: &SimulationResult) -> Projection {
    let total_yield_kg = round_to(result.fish_yield_kg + result.veg_yield_kg, 1);
    let annual_operating_cost = result.monthly_operating_cost as f64 * cost::MONTHS_PER_YEAR;
    let cost_per_kg =
        (total_yield_kg > 0.0).then(|| round_to(annual_operating_cost / total_yield_kg, 2));

    Projection {
        total_yield_kg,
        annual_water_m3: round_to(result.daily_water_l as f64 * cost::DAYS_PER_YEAR / 1000.0, 1),
        annual_kwh: round_to(result.daily_kwh * cost::DAYS_PER_YEAR, 1),
        annual_operating_cost,
        cost_per_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(fish: f64, veg: f64) -> SimulationResult {
        SimulationResult {
            fish_yield_kg: fish,
            veg_yield_kg: veg,
            daily_water_l: 100,
            daily_kwh: 2.0,
            system_efficiency: 85,
            monthly_operating_cost: 50,
            climate_key: Some("temperate".to_string()),
            temp_used: 18.0,
            solar_factor: 0.9,
        }
    }

    #[test]
    fn annual_figures() {
        let p = project(&result(40.0, 60.0));
        assert_eq!(p.total_yield_kg, 100.0);
        assert_eq!(p.annual_water_m3, 36.5);
        assert_eq!(p.annual_kwh, 730.0);
        assert_eq!(p.annual_operating_cost, 600.0);
        assert_eq!(p.cost_per_kg, Some(6.0));
    }

    #[test]
    fn no_yield_has_no_unit_cost() {
        let p = project(&result(0.0, 0.0));
        assert_eq!(p.cost_per_kg, None);
        assert_eq!(p.annual_operating_cost, 600.0);
    }
}
