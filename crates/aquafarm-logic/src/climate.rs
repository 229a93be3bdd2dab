//! Climate resolution — turns a configuration's climate inputs into the
//! temperature and solar factor the growth model uses.
//!
//! Priority: a usable custom climate (flag set, both values present) wins
//! and is clamped into the custom ranges; otherwise a recognized preset
//! key; otherwise the temperate preset.

use serde::{Deserialize, Serialize};

use crate::constants::{limits, ClimatePreset, ClimateZone, CLIMATE_PRESETS, DEFAULT_CLIMATE};
use crate::system_config::SystemConfiguration;
use crate::validation::present;

/// The climate actually used for a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedClimate {
    /// Preset key, or `None` when a custom climate was used.
    pub climate_key: Option<String>,
    pub temp_c: f64,
    pub solar_factor: f64,
}

pub fn resolve_climate(config: &SystemConfiguration) -> ResolvedClimate {
    if config.custom_climate {
        if let (Some(temp), Some(solar)) = (present(config.custom_temp), present(config.custom_solar))
        {
            let temp_c = limits::CUSTOM_TEMP_C.clamp(temp);
            let solar_factor = limits::CUSTOM_SOLAR.clamp(solar);
            if temp_c != temp || solar_factor != solar {
                log::debug!(
                    "custom climate clamped: temp {temp} -> {temp_c}, solar {solar} -> {solar_factor}"
                );
            }
            return ResolvedClimate {
                climate_key: None,
                temp_c,
                solar_factor,
            };
        }
        log::debug!("custom climate selected without temperature and solar values, using preset");
    }

    let known = config
        .climate_key
        .as_deref()
        .and_then(|key| find_preset(key).map(|p| (key, p)));

    let (key, preset) = match known {
        Some(found) => found,
        None => {
            if let Some(key) = &config.climate_key {
                log::debug!("unknown climate key {key:?}, using {DEFAULT_CLIMATE}");
            }
            (DEFAULT_CLIMATE, ClimateZone::Temperate.preset())
        }
    };

    ResolvedClimate {
        climate_key: Some(key.to_string()),
        temp_c: preset.temp_c,
        solar_factor: preset.solar_factor,
    }
}

fn find_preset(key: &str) -> Option<ClimatePreset> {
    CLIMATE_PRESETS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, p)| *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: Option<&str>) -> SystemConfiguration {
        SystemConfiguration {
            climate_key: key.map(str::to_string),
            ..SystemConfiguration::default()
        }
    }

    #[test]
    fn preset_key_used() {
        let c = resolve_climate(&with_key(Some("tropical")));
        assert_eq!(c.climate_key.as_deref(), Some("tropical"));
        assert_eq!(c.temp_c, 25.0);
        assert_eq!(c.solar_factor, 1.15);
    }

    #[test]
    fn missing_key_defaults_to_temperate() {
        let c = resolve_climate(&with_key(None));
        assert_eq!(c.climate_key.as_deref(), Some("temperate"));
        assert_eq!(c.temp_c, 18.0);
        assert_eq!(c.solar_factor, 0.90);
    }

    #[test]
    fn unknown_key_defaults_to_temperate() {
        let c = resolve_climate(&with_key(Some("arctic")));
        assert_eq!(c.climate_key.as_deref(), Some("temperate"));
        assert_eq!(c.temp_c, 18.0);
    }

    #[test]
    fn custom_climate_overrides_preset() {
        let config = SystemConfiguration {
            climate_key: Some("cool".to_string()),
            custom_climate: true,
            custom_temp: Some(24.0),
            custom_solar: Some(2.0),
            ..SystemConfiguration::default()
        };
        let c = resolve_climate(&config);
        assert_eq!(c.climate_key, None);
        assert_eq!(c.temp_c, 24.0);
        assert_eq!(c.solar_factor, 2.0);
    }

    #[test]
    fn custom_climate_clamped() {
        let config = SystemConfiguration {
            custom_climate: true,
            custom_temp: Some(45.0),
            custom_solar: Some(0.1),
            ..SystemConfiguration::default()
        };
        let c = resolve_climate(&config);
        assert_eq!(c.temp_c, 30.0);
        assert_eq!(c.solar_factor, 0.5);
    }

    #[test]
    fn incomplete_custom_climate_falls_back() {
        let config = SystemConfiguration {
            climate_key: Some("subtropical".to_string()),
            custom_climate: true,
            custom_temp: Some(24.0),
            custom_solar: None,
            ..SystemConfiguration::default()
        };
        let c = resolve_climate(&config);
        assert_eq!(c.climate_key.as_deref(), Some("subtropical"));
        assert_eq!(c.temp_c, 22.0);
    }

    #[test]
    fn custom_values_ignored_without_flag() {
        let config = SystemConfiguration {
            custom_climate: false,
            custom_temp: Some(29.0),
            custom_solar: Some(3.0),
            ..with_key(Some("cool"))
        };
        let c = resolve_climate(&config);
        assert_eq!(c.temp_c, 14.0);
    }
}
