//! Wizard state transitions over an immutable configuration.
//!
//! The onboarding wizard edits one [`SystemConfiguration`] step by step.
//! Every edit is a [`WizardAction`] fed to [`transition`], which returns a
//! new configuration and leaves the old one untouched.
//!
//! # Preset rules
//!
//! - In quick mode the five volumetric fields always mirror the preset of
//!   the selected system type ([`apply_preset`]).
//! - Switching to custom mode keeps any volumes already entered and seeds
//!   the rest from the current preset, so the user starts from a valid set.
//! - Volume edits are ignored in quick mode.
//!
//! ```
//! use aquafarm_logic::constants::SystemType;
//! use aquafarm_logic::system_config::SystemConfiguration;
//! use aquafarm_logic::wizard::{transition, WizardAction};
//!
//! let start = SystemConfiguration::default();
//! let next = transition(&start, WizardAction::SetSystemType(SystemType::Dwc));
//! assert_eq!(next.tank_vol, Some(1200.0));
//! assert_eq!(start.tank_vol, Some(1000.0));
//! ```

use crate::constants::{BudgetTier, ClimateZone, EnergySource, FarmSize, Mode, SystemType};
use crate::system_config::SystemConfiguration;
use crate::validation::Field;

/// One user edit in the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SelectClimate(ClimateZone),
    SetCustomClimate { temp_c: f64, solar_factor: f64 },
    SetSystemType(SystemType),
    SetMode(Mode),
    /// Edit one numeric field. Volumetric fields only apply in custom mode;
    /// climate fields switch on the custom climate.
    SetValue(Field, f64),
    SetFarmSize(FarmSize),
    /// Add the species if absent, otherwise remove it.
    ToggleFishSpecies(String),
    ToggleCrop(String),
    SetBudget(BudgetTier),
    SetEnergySource(EnergySource),
}

/// Return a copy with `system_type` selected. In quick mode the volumetric
/// fields are replaced by that system type's preset.
pub fn apply_preset(config: &SystemConfiguration, system_type: SystemType) -> SystemConfiguration {
    let mut next = config.clone();
    next.system_type = system_type.key().to_string();
    next.apply_quick_preset();
    next
}

/// Apply one wizard action.
pub fn transition(config: &SystemConfiguration, action: WizardAction) -> SystemConfiguration {
    let mut next = config.clone();
    match action {
        WizardAction::SelectClimate(zone) => {
            next.climate_key = Some(zone.key().to_string());
            next.custom_climate = false;
        }
        WizardAction::SetCustomClimate {
            temp_c,
            solar_factor,
        } => {
            next.custom_climate = true;
            next.custom_temp = Some(temp_c);
            next.custom_solar = Some(solar_factor);
        }
        WizardAction::SetSystemType(system_type) => return apply_preset(config, system_type),
        WizardAction::SetMode(mode) => {
            next.mode = mode.key().to_string();
            let preset = next.volume_preset();
            match mode {
                Mode::Quick => next.set_volumes(preset),
                Mode::Custom => next.fill_missing_volumes(preset),
            }
        }
        WizardAction::SetValue(field, value) => set_value(&mut next, field, value),
        WizardAction::SetFarmSize(size) => next.farm_size = size.key().to_string(),
        WizardAction::ToggleFishSpecies(species) => toggle(&mut next.fish_species, species),
        WizardAction::ToggleCrop(crop) => toggle(&mut next.crop_choice, crop),
        WizardAction::SetBudget(tier) => next.budget = tier.key().to_string(),
        WizardAction::SetEnergySource(source) => next.energy_source = source.key().to_string(),
    }
    next
}

fn set_value(config: &mut SystemConfiguration, field: Field, value: f64) {
    match field {
        Field::CustomTemp => {
            config.custom_climate = true;
            config.custom_temp = Some(value);
        }
        Field::CustomSolar => {
            config.custom_climate = true;
            config.custom_solar = Some(value);
        }
        _ if !config.is_custom_mode() => {
            log::debug!("ignoring {field:?} edit in quick mode");
        }
        Field::TankVol => config.tank_vol = Some(value),
        Field::BioFilterVol => config.bio_filter_vol = Some(value),
        Field::PurifierVol => config.purifier_vol = Some(value),
        Field::SumpVol => config.sump_vol = Some(value),
        Field::PipeDia => config.pipe_dia = Some(value),
    }
}

fn toggle(list: &mut Vec<String>, item: String) {
    if let Some(pos) = list.iter().position(|x| *x == item) {
        list.remove(pos);
    } else {
        list.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn system_type_change_repopulates_quick_preset() {
        let start = SystemConfiguration::default();
        let next = transition(&start, WizardAction::SetSystemType(SystemType::Nft));
        assert_eq!(next.system_type, "nft");
        assert_eq!(next.tank_vol, Some(800.0));
        assert_eq!(next.sump_vol, Some(400.0));
    }

    #[test]
    fn system_type_change_keeps_custom_volumes() {
        let custom = transition(
            &SystemConfiguration::default(),
            WizardAction::SetMode(Mode::Custom),
        );
        let edited = transition(&custom, WizardAction::SetValue(Field::TankVol, 1500.0));
        let next = apply_preset(&edited, SystemType::Dwc);
        assert_eq!(next.system_type, "dwc");
        assert_eq!(next.tank_vol, Some(1500.0));
    }

    #[test]
    fn switching_to_custom_seeds_missing_volumes() {
        let start = SystemConfiguration {
            tank_vol: Some(900.0),
            bio_filter_vol: None,
            purifier_vol: None,
            sump_vol: None,
            pipe_dia: None,
            ..SystemConfiguration::default()
        };
        let next = transition(&start, WizardAction::SetMode(Mode::Custom));
        assert!(next.is_custom_mode());
        assert_eq!(next.tank_vol, Some(900.0));
        assert_eq!(next.bio_filter_vol, Some(250.0));
        assert!(validate(&next).is_valid);
    }

    #[test]
    fn switching_to_quick_restores_preset() {
        let custom = transition(
            &SystemConfiguration::default(),
            WizardAction::SetMode(Mode::Custom),
        );
        let edited = transition(&custom, WizardAction::SetValue(Field::TankVol, 150.0));
        let quick = transition(&edited, WizardAction::SetMode(Mode::Quick));
        assert_eq!(quick.tank_vol, Some(1000.0));
    }

    #[test]
    fn volume_edits_ignored_in_quick_mode() {
        let start = SystemConfiguration::default();
        let next = transition(&start, WizardAction::SetValue(Field::PipeDia, 45.0));
        assert_eq!(next, start);
    }

    #[test]
    fn custom_climate_via_value_edit() {
        let start = SystemConfiguration::default();
        let next = transition(&start, WizardAction::SetValue(Field::CustomTemp, 26.0));
        assert!(next.custom_climate);
        assert_eq!(next.custom_temp, Some(26.0));
        // Solar still missing, so validation flags it.
        assert!(!validate(&next).is_valid);
    }

    #[test]
    fn selecting_preset_climate_clears_custom_flag() {
        let custom = transition(
            &SystemConfiguration::default(),
            WizardAction::SetCustomClimate {
                temp_c: 20.0,
                solar_factor: 1.0,
            },
        );
        assert!(custom.custom_climate);
        let next = transition(&custom, WizardAction::SelectClimate(ClimateZone::Tropical));
        assert!(!next.custom_climate);
        assert_eq!(next.climate_key.as_deref(), Some("tropical"));
    }

    #[test]
    fn toggles_add_and_remove() {
        let start = SystemConfiguration::default();
        let added = transition(&start, WizardAction::ToggleFishSpecies("Trout".to_string()));
        assert_eq!(added.fish_species, vec!["Tilapia", "Trout"]);
        let removed = transition(&added, WizardAction::ToggleFishSpecies("Tilapia".to_string()));
        assert_eq!(removed.fish_species, vec!["Trout"]);

        let crops = transition(&start, WizardAction::ToggleCrop("Kale".to_string()));
        assert_eq!(crops.crop_choice, vec!["Lettuce", "Kale"]);
    }

    #[test]
    fn simple_setters() {
        let start = SystemConfiguration::default();
        let next = transition(&start, WizardAction::SetFarmSize(FarmSize::Large));
        let next = transition(&next, WizardAction::SetBudget(BudgetTier::Over20000));
        let next = transition(&next, WizardAction::SetEnergySource(EnergySource::Hybrid));
        assert_eq!(next.farm_size, "large");
        assert_eq!(next.budget, "over-20000");
        assert_eq!(next.energy_source, "hybrid");
        assert_eq!(start.farm_size, "small");
    }
}
