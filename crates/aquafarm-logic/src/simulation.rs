//! Grey-box performance model for an aquaponic farm.
//!
//! Converts a [`SystemConfiguration`] into annual yields, daily water and
//! energy use, an efficiency score and a monthly operating cost. The model
//! is a chain of multiplicative factors read from [`constants`]; it never
//! rejects input. Unknown keys fall back to the table defaults and a
//! missing or unknown climate resolves to temperate.
//!
//! Each step is a public function so factors can be checked on their own;
//! [`simulate`] strings them together and applies the rounding contract.

use serde::{Deserialize, Serialize};

use crate::climate::{resolve_climate, ResolvedClimate};
use crate::constants::{self, cost, lookup, SystemType};
use crate::system_config::SystemConfiguration;

/// Simulation output. A fresh value per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Annual fish yield (kg, 1 decimal).
    pub fish_yield_kg: f64,
    /// Annual vegetable yield (kg, 1 decimal).
    pub veg_yield_kg: f64,
    /// Daily water use (L, whole liters).
    pub daily_water_l: u32,
    /// Daily energy use (kWh, 1 decimal).
    #[serde(rename = "dailyKWh")]
    pub daily_kwh: f64,
    /// Efficiency score, 0–100.
    pub system_efficiency: u32,
    /// Monthly operating cost (whole currency units).
    pub monthly_operating_cost: u32,
    /// Preset key used, `None` for a custom climate.
    pub climate_key: Option<String>,
    pub temp_used: f64,
    pub solar_factor: f64,
}

/// Run the full model on one configuration.
pub fn simulate(config: &SystemConfiguration) -> SimulationResult {
    let ResolvedClimate {
        climate_key,
        temp_c,
        solar_factor,
    } = resolve_climate(config);

    let fish_yield_kg = round_to(fish_yield_kg(config, temp_c), 1);
    let veg_yield_kg = round_to(veg_yield_kg(config, solar_factor), 1);
    let daily_water_l = daily_water_l(config).round() as u32;
    let daily_kwh = round_to(daily_energy_kwh(config), 1);
    let system_efficiency = system_efficiency(config);
    let monthly_operating_cost = monthly_operating_cost(
        daily_kwh,
        daily_water_l as f64,
        fish_yield_kg,
        size_multiplier(&config.farm_size),
    )
    .round() as u32;

    log::trace!(
        "simulated {} {} farm: fish={fish_yield_kg}kg veg={veg_yield_kg}kg \
         water={daily_water_l}L energy={daily_kwh}kWh eff={system_efficiency}%",
        config.farm_size,
        config.system_type,
    );

    SimulationResult {
        fish_yield_kg,
        veg_yield_kg,
        daily_water_l,
        daily_kwh,
        system_efficiency,
        monthly_operating_cost,
        climate_key,
        temp_used: temp_c,
        solar_factor,
    }
}

/// Round to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// ============================================================================
// FACTORS
// ============================================================================

pub fn size_multiplier(farm_size: &str) -> f64 {
    lookup(
        constants::SIZE_MULTIPLIER,
        farm_size,
        constants::DEFAULT_SIZE_MULTIPLIER,
    )
}

/// Plant-growth multiplier for a system type; also used in the efficiency score.
pub fn system_efficiency_multiplier(system_type: &str) -> f64 {
    lookup(
        constants::SYSTEM_EFFICIENCY,
        system_type,
        constants::DEFAULT_SYSTEM_MULTIPLIER,
    )
}

/// Per-species penalty once more than one species shares the tank.
pub fn species_penalty(species_count: usize) -> f64 {
    if species_count > 1 {
        0.85
    } else {
        1.0
    }
}

/// Companion-planting bonus: +5% per extra crop, capped at +20%.
pub fn crop_synergy(crop_count: usize) -> f64 {
    let extra = crop_count.saturating_sub(1) as f64;
    (1.0 + extra * 0.05).min(1.2)
}

// ============================================================================
// STEPS
// ============================================================================

/// Annual fish yield before rounding.
///
/// Each species contributes its base rate times the size multiplier, with
/// the multi-species penalty applied per species. The sum is scaled once
/// by `temp / 20`.
pub fn fish_yield_kg(config: &SystemConfiguration, temp_c: f64) -> f64 {
    let size = size_multiplier(&config.farm_size);
    let penalty = species_penalty(config.fish_species.len());
    let total: f64 = config
        .fish_species
        .iter()
        .map(|species| {
            lookup(
                constants::FISH_YIELD_KG,
                species,
                constants::DEFAULT_FISH_YIELD_KG,
            ) * size
                * penalty
        })
        .sum();
    total * (temp_c / constants::REFERENCE_TEMP_C)
}

/// Annual vegetable yield before rounding, scaled by the solar factor.
pub fn veg_yield_kg(config: &SystemConfiguration, solar_factor: f64) -> f64 {
    let size = size_multiplier(&config.farm_size);
    let synergy = crop_synergy(config.crop_choice.len());
    let system = system_efficiency_multiplier(&config.system_type);
    let total: f64 = config
        .crop_choice
        .iter()
        .map(|crop| {
            lookup(
                constants::CROP_YIELD_KG,
                crop,
                constants::DEFAULT_CROP_YIELD_KG,
            ) * size
                * synergy
                * system
        })
        .sum();
    total * solar_factor
}

/// Daily water use (L) before rounding.
pub fn daily_water_l(config: &SystemConfiguration) -> f64 {
    let base = lookup(
        constants::BASE_WATER_L,
        &config.farm_size,
        constants::DEFAULT_BASE_WATER_L,
    );
    let crop_factor = 1.0 + 0.1 * config.crop_choice.len() as f64;
    let fish_factor = 1.0 + 0.15 * config.fish_species.len() as f64;
    let system = lookup(
        constants::SYSTEM_WATER_USAGE,
        &config.system_type,
        constants::DEFAULT_SYSTEM_MULTIPLIER,
    );
    base * crop_factor * fish_factor * system
}

/// Daily energy use (kWh) before rounding.
///
/// The complexity factor grows by 8% for every species or crop beyond the
/// first of each. DWC adds air-pump load. The energy-source factor is
/// applied last; a generator (1.1) raises the figure, solar (0.85) lowers it.
pub fn daily_energy_kwh(config: &SystemConfiguration) -> f64 {
    let base = lookup(
        constants::BASE_ENERGY_KWH,
        &config.farm_size,
        constants::DEFAULT_BASE_ENERGY_KWH,
    );
    let components = (config.fish_species.len() + config.crop_choice.len()) as f64;
    let complexity = 1.0 + 0.08 * (components - 2.0);

    let mut energy = base * complexity;
    if config.system_type() == Some(SystemType::Dwc) {
        energy *= constants::DWC_AIR_PUMP_FACTOR;
    }
    energy
        * lookup(
            constants::ENERGY_SOURCE_FACTOR,
            &config.energy_source,
            constants::DEFAULT_ENERGY_SOURCE_FACTOR,
        )
}

/// Unclamped efficiency product as a fraction (1.0 = 100%).
///
/// The system-type multiplier can lift this above 1.0; [`system_efficiency`]
/// clamps the percentage.
pub fn raw_efficiency(config: &SystemConfiguration) -> f64 {
    let species_factor = if config.fish_species.len() > 2 {
        0.9
    } else {
        1.0
    };
    let crop_factor = if config.crop_choice.len() > 4 {
        0.95
    } else {
        1.0
    };
    let budget = lookup(
        constants::BUDGET_EFFICIENCY,
        &config.budget,
        constants::DEFAULT_BUDGET_EFFICIENCY,
    );
    species_factor * crop_factor * budget * system_efficiency_multiplier(&config.system_type)
}

/// Efficiency score as an integer percent in 0..=100.
pub fn system_efficiency(config: &SystemConfiguration) -> u32 {
    let raw = raw_efficiency(config);
    if raw > 1.0 {
        log::debug!(
            "efficiency product {raw:.3} above 1.0 for {} system, clamping to 100",
            config.system_type
        );
    }
    (raw * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Monthly operating cost before rounding.
///
/// Takes the reported (rounded) daily and annual figures: electricity and
/// water over a 30-day month, feed derived from annual fish yield spread
/// over 12 months, and maintenance proportional to farm size.
pub fn monthly_operating_cost(
    daily_kwh: f64,
    daily_water_l: f64,
    fish_yield_kg: f64,
    size_multiplier: f64,
) -> f64 {
    let electricity = daily_kwh * cost::DAYS_PER_MONTH * cost::ELECTRICITY_PER_KWH;
    let water = daily_water_l * cost::DAYS_PER_MONTH * cost::WATER_PER_L;
    let feed = fish_yield_kg * cost::FEED_RATIO * cost::FEED_PRICE_PER_KG / cost::MONTHS_PER_YEAR;
    let maintenance = size_multiplier * cost::MAINTENANCE_PER_SIZE_UNIT;
    electricity + water + feed + maintenance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(
        system_type: &str,
        farm_size: &str,
        fish: &[&str],
        crops: &[&str],
    ) -> SystemConfiguration {
        SystemConfiguration {
            system_type: system_type.to_string(),
            farm_size: farm_size.to_string(),
            fish_species: fish.iter().map(|s| s.to_string()).collect(),
            crop_choice: crops.iter().map(|s| s.to_string()).collect(),
            ..SystemConfiguration::default()
        }
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(47.25, 1), 47.3);
        assert_eq!(round_to(42.525, 1), 42.5);
        assert_eq!(round_to(2.7, 1), 2.7);
        assert_eq!(round_to(68.6, 0), 69.0);
    }

    #[test]
    fn species_penalty_per_species() {
        let one = config("media-bed", "small", &["Tilapia"], &["Lettuce"]);
        let two = config("media-bed", "small", &["Tilapia", "Tilapia"], &["Lettuce"]);
        // 45 vs 2 * 45 * 0.85, temperature factor 1.0
        assert_relative_eq!(fish_yield_kg(&one, 20.0), 45.0, epsilon = 1e-9);
        assert_relative_eq!(fish_yield_kg(&two, 20.0), 76.5, epsilon = 1e-9);
    }

    #[test]
    fn temperature_scales_fish_total() {
        let c = config("media-bed", "medium", &["Trout", "Catfish"], &["Kale"]);
        // (35 + 40) * 10 * 0.85 = 637.5
        assert_relative_eq!(fish_yield_kg(&c, 20.0), 637.5, epsilon = 1e-9);
        assert_relative_eq!(fish_yield_kg(&c, 25.0), 637.5 * 1.25, epsilon = 1e-9);
    }

    #[test]
    fn unknown_species_and_crop_use_default_rates() {
        let c = config("media-bed", "small", &["Carp"], &["Basil"]);
        assert_relative_eq!(fish_yield_kg(&c, 20.0), 20.0, epsilon = 1e-9);
        assert_relative_eq!(veg_yield_kg(&c, 1.0), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn crop_synergy_caps_at_twenty_percent() {
        assert_eq!(crop_synergy(0), 1.0);
        assert_eq!(crop_synergy(1), 1.0);
        assert_relative_eq!(crop_synergy(3), 1.1, epsilon = 1e-12);
        assert_relative_eq!(crop_synergy(5), 1.2, epsilon = 1e-12);
        assert_relative_eq!(crop_synergy(8), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn veg_yield_uses_system_multiplier_and_solar() {
        let c = config("nft", "small", &["Tilapia"], &["Tomatoes"]);
        // 35 * 1 * 1.0 * 1.15 * 2.0
        assert_relative_eq!(veg_yield_kg(&c, 2.0), 80.5, epsilon = 1e-9);
    }

    #[test]
    fn water_factors() {
        let c = config("nft", "medium", &["Tilapia", "Trout"], &["Lettuce"]);
        // 400 * 1.1 * 1.3 * 0.8
        assert_relative_eq!(daily_water_l(&c), 457.6, epsilon = 1e-9);
        let unknown = config("media-bed", "huge", &["Tilapia"], &["Lettuce"]);
        assert_relative_eq!(daily_water_l(&unknown), 200.0 * 1.1 * 1.15, epsilon = 1e-9);
    }

    #[test]
    fn dwc_adds_air_pump_load() {
        let media = config("media-bed", "small", &["Tilapia"], &["Lettuce"]);
        let dwc = config("dwc", "small", &["Tilapia"], &["Lettuce"]);
        assert_relative_eq!(daily_energy_kwh(&media), 2.5, epsilon = 1e-9);
        assert_relative_eq!(daily_energy_kwh(&dwc), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn energy_source_factor() {
        let mut c = config("media-bed", "large", &["Tilapia"], &["Lettuce"]);
        c.energy_source = "generator".to_string();
        assert_relative_eq!(daily_energy_kwh(&c), 82.5, epsilon = 1e-9);
        c.energy_source = "solar".to_string();
        assert_relative_eq!(daily_energy_kwh(&c), 63.75, epsilon = 1e-9);
        c.energy_source = "wind".to_string();
        assert_relative_eq!(daily_energy_kwh(&c), 75.0, epsilon = 1e-9);
    }

    #[test]
    fn efficiency_factors() {
        let mut c = config(
            "media-bed",
            "small",
            &["Tilapia", "Trout", "Bass"],
            &["Lettuce", "Kale", "Herbs", "Peppers", "Spinach"],
        );
        c.budget = "5000-20000".to_string();
        // 0.9 * 0.95 * 0.95 * 1.0 = 0.81225
        assert_relative_eq!(raw_efficiency(&c), 0.81225, epsilon = 1e-12);
        assert_eq!(system_efficiency(&c), 81);

        c.budget = "priceless".to_string();
        assert_eq!(system_efficiency(&c), 68); // 0.9 * 0.95 * 0.8 = 0.684
    }

    #[test]
    fn efficiency_clamped_to_100() {
        let mut c = config("dwc", "small", &["Tilapia"], &["Lettuce"]);
        c.budget = "over-20000".to_string();
        assert_relative_eq!(raw_efficiency(&c), 1.25, epsilon = 1e-12);
        assert_eq!(system_efficiency(&c), 100);
    }

    #[test]
    fn operating_cost_terms() {
        // 10 kWh -> 36, 1000 L -> 30, 120 kg fish -> 20, size 2 -> 50
        assert_relative_eq!(
            monthly_operating_cost(10.0, 1000.0, 120.0, 2.0),
            136.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn simulate_echoes_climate() {
        let mut c = config("media-bed", "small", &["Tilapia"], &["Lettuce"]);
        c.climate_key = Some("cool".to_string());
        let r = simulate(&c);
        assert_eq!(r.climate_key.as_deref(), Some("cool"));
        assert_eq!(r.temp_used, 14.0);
        assert_eq!(r.solar_factor, 0.75);
    }

    #[test]
    fn empty_selections_still_simulate() {
        let c = config("media-bed", "small", &[], &[]);
        let r = simulate(&c);
        assert_eq!(r.fish_yield_kg, 0.0);
        assert_eq!(r.veg_yield_kg, 0.0);
        assert_eq!(r.daily_water_l, 50);
        // complexity 1 - 0.16
        assert_eq!(r.daily_kwh, 2.1);
        assert!(r.monthly_operating_cost > 0);
    }
}
