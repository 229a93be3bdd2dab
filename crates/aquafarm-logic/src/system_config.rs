//! The configuration record built by the onboarding wizard.
//!
//! Enumerated fields are stored as their string keys rather than typed
//! enums so that a configuration with an unrecognized value still
//! deserializes and simulates; the simulator substitutes defaults for
//! anything it does not know (see [`constants`](crate::constants)).
//!
//! ```
//! use aquafarm_logic::system_config::SystemConfiguration;
//!
//! let json = r#"{
//!     "systemType": "nft",
//!     "farmSize": "medium",
//!     "fishSpecies": ["Tilapia", "Trout"],
//!     "cropChoice": ["Lettuce"]
//! }"#;
//! let config = SystemConfiguration::from_json(json).unwrap();
//! assert_eq!(config.system_type, "nft");
//! assert_eq!(config.budget, "1000-5000"); // default
//! // Quick mode: volumes come from the nft preset.
//! assert_eq!(config.tank_vol, Some(800.0));
//! ```
//!
//! Volumes omitted from JSON stay unset. In quick mode the parse helpers
//! then fill them from the preset of the parsed system type; in custom mode
//! they are left for [`validate`](crate::validation::validate) to report.

use serde::{Deserialize, Serialize};

use crate::constants::{
    volume_preset, BudgetTier, EnergySource, FarmSize, Mode, SystemType, VolumePreset,
    DEFAULT_CLIMATE,
};
use crate::error::{AquaError, AquaResult};

/// A farm design as entered in the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default = "SystemConfiguration::without_volumes")]
pub struct SystemConfiguration {
    /// Climate preset key. Ignored when a usable custom climate is set.
    pub climate_key: Option<String>,
    pub custom_climate: bool,
    /// Custom water temperature (°C).
    pub custom_temp: Option<f64>,
    /// Custom solar multiplier.
    pub custom_solar: Option<f64>,

    pub system_type: String,
    /// `"quick"` or `"custom"`.
    pub mode: String,

    // Equipment volumes (L) and pipe diameter (mm).
    pub tank_vol: Option<f64>,
    pub bio_filter_vol: Option<f64>,
    pub purifier_vol: Option<f64>,
    pub sump_vol: Option<f64>,
    pub pipe_dia: Option<f64>,

    pub farm_size: String,
    /// Duplicates are kept; each entry contributes once.
    pub fish_species: Vec<String>,
    pub crop_choice: Vec<String>,
    pub budget: String,
    pub energy_source: String,
}

impl Default for SystemConfiguration {
    fn default() -> Self {
        let system_type = SystemType::MediaBed;
        let mut config = Self {
            climate_key: Some(DEFAULT_CLIMATE.to_string()),
            custom_climate: false,
            custom_temp: None,
            custom_solar: None,
            system_type: system_type.key().to_string(),
            mode: Mode::Quick.key().to_string(),
            tank_vol: None,
            bio_filter_vol: None,
            purifier_vol: None,
            sump_vol: None,
            pipe_dia: None,
            farm_size: FarmSize::Small.key().to_string(),
            fish_species: vec!["Tilapia".to_string()],
            crop_choice: vec!["Lettuce".to_string()],
            budget: BudgetTier::From1000To5000.key().to_string(),
            energy_source: EnergySource::Grid.key().to_string(),
        };
        config.set_volumes(system_type.volume_preset());
        config
    }
}

impl SystemConfiguration {
    /// Defaults for fields missing from JSON: everything except the volumes.
    fn without_volumes() -> Self {
        Self {
            tank_vol: None,
            bio_filter_vol: None,
            purifier_vol: None,
            sump_vol: None,
            pipe_dia: None,
            ..Self::default()
        }
    }

    /// Parse a single configuration object.
    pub fn from_json(json: &str) -> AquaResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.apply_quick_preset();
        Ok(config)
    }

    /// Parse a JSON array of configurations. An empty array is an error.
    pub fn batch_from_json(json: &str) -> AquaResult<Vec<Self>> {
        let mut configs: Vec<Self> = serde_json::from_str(json)?;
        if configs.is_empty() {
            return Err(AquaError::EmptyBatch);
        }
        configs.iter_mut().for_each(Self::apply_quick_preset);
        Ok(configs)
    }

    /// In quick mode, replace the volumes with the system type's preset.
    /// Custom mode is left untouched.
    pub fn apply_quick_preset(&mut self) {
        if !self.is_custom_mode() {
            self.set_volumes(self.volume_preset());
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        Mode::from_key(&self.mode)
    }

    pub fn is_custom_mode(&self) -> bool {
        self.mode() == Some(Mode::Custom)
    }

    pub fn system_type(&self) -> Option<SystemType> {
        SystemType::from_key(&self.system_type)
    }

    /// Overwrite all five volumetric fields.
    pub fn set_volumes(&mut self, preset: VolumePreset) {
        self.tank_vol = Some(preset.tank_vol);
        self.bio_filter_vol = Some(preset.bio_filter_vol);
        self.purifier_vol = Some(preset.purifier_vol);
        self.sump_vol = Some(preset.sump_vol);
        self.pipe_dia = Some(preset.pipe_dia);
    }

    /// Fill only the volumetric fields that are unset.
    pub fn fill_missing_volumes(&mut self, preset: VolumePreset) {
        self.tank_vol.get_or_insert(preset.tank_vol);
        self.bio_filter_vol.get_or_insert(preset.bio_filter_vol);
        self.purifier_vol.get_or_insert(preset.purifier_vol);
        self.sump_vol.get_or_insert(preset.sump_vol);
        self.pipe_dia.get_or_insert(preset.pipe_dia);
    }

    /// The preset for this configuration's system type.
    pub fn volume_preset(&self) -> VolumePreset {
        volume_preset(&self.system_type)
    }
}
