//! Lookup tables for the performance model.
//!
//! Every table is a static `(key, value)` slice read through [`lookup`],
//! which makes the fallback for an unrecognized key explicit at the call
//! site. The keys are the strings the wizard stores in
//! [`SystemConfiguration`](crate::system_config::SystemConfiguration);
//! the typed enums below map onto the same keys.

use serde::{Deserialize, Serialize};

/// A read-only keyed table.
pub type Table<V> = &'static [(&'static str, V)];

/// Look up `key` in `table`, returning `default` when the key is absent.
pub fn lookup<V: Copy + std::fmt::Debug>(table: Table<V>, key: &str, default: V) -> V {
    match table.iter().find(|(k, _)| *k == key) {
        Some((_, v)) => *v,
        None => {
            log::debug!("no table entry for {key:?}, using default {default:?}");
            default
        }
    }
}

// ============================================================================
// YIELD RATES
// ============================================================================

/// Base annual fish yield per species at small scale (kg).
pub const FISH_YIELD_KG: Table<f64> = &[
    ("Tilapia", 45.0),
    ("Trout", 35.0),
    ("Catfish", 40.0),
    ("Bass", 25.0),
    ("Perch", 30.0),
    ("Salmon", 20.0),
    ("Koi", 15.0),
    ("Goldfish", 10.0),
];
pub const DEFAULT_FISH_YIELD_KG: f64 = 20.0;

/// Base annual crop yield per crop at small scale (kg).
pub const CROP_YIELD_KG: Table<f64> = &[
    ("Lettuce", 25.0),
    ("Spinach", 20.0),
    ("Kale", 18.0),
    ("Herbs", 15.0),
    ("Tomatoes", 35.0),
    ("Cucumbers", 30.0),
    ("Peppers", 20.0),
    ("Strawberries", 12.0),
];
pub const DEFAULT_CROP_YIELD_KG: f64 = 15.0;

// ============================================================================
// FARM SIZE
// ============================================================================

pub const SIZE_MULTIPLIER: Table<f64> = &[
    ("small", 1.0),
    ("medium", 10.0),
    ("large", 50.0),
    ("custom", 25.0),
];
pub const DEFAULT_SIZE_MULTIPLIER: f64 = 1.0;

/// Base daily water consumption (L) before species/crop/system adjustments.
pub const BASE_WATER_L: Table<f64> = &[
    ("small", 50.0),
    ("medium", 400.0),
    ("large", 1800.0),
    ("custom", 900.0),
];
pub const DEFAULT_BASE_WATER_L: f64 = 200.0;

/// Base daily energy consumption (kWh) before complexity/source adjustments.
pub const BASE_ENERGY_KWH: Table<f64> = &[
    ("small", 2.5),
    ("medium", 18.0),
    ("large", 75.0),
    ("custom", 35.0),
];
pub const DEFAULT_BASE_ENERGY_KWH: f64 = 10.0;

// ============================================================================
// SYSTEM TYPE
// ============================================================================

/// Plant-growth efficiency by system type. Also feeds the efficiency score.
pub const SYSTEM_EFFICIENCY: Table<f64> = &[("media-bed", 1.0), ("nft", 1.15), ("dwc", 1.25)];

pub const SYSTEM_WATER_USAGE: Table<f64> = &[("media-bed", 1.0), ("nft", 0.8), ("dwc", 0.9)];

pub const DEFAULT_SYSTEM_MULTIPLIER: f64 = 1.0;

/// Extra energy load of DWC air pumps.
pub const DWC_AIR_PUMP_FACTOR: f64 = 1.2;

// ============================================================================
// BUDGET & ENERGY
// ============================================================================

pub const BUDGET_EFFICIENCY: Table<f64> = &[
    ("under-1000", 0.75),
    ("1000-5000", 0.85),
    ("5000-20000", 0.95),
    ("over-20000", 1.0),
];
pub const DEFAULT_BUDGET_EFFICIENCY: f64 = 0.8;

/// Energy-source factor applied to daily kWh. Values above 1.0 mean a
/// less efficient source (higher kWh figure).
pub const ENERGY_SOURCE_FACTOR: Table<f64> = &[
    ("grid", 1.0),
    ("solar", 0.85),
    ("hybrid", 0.92),
    ("generator", 1.1),
];
pub const DEFAULT_ENERGY_SOURCE_FACTOR: f64 = 1.0;

// ============================================================================
// OPERATING COST
// ============================================================================

pub mod cost {
    /// Electricity price per kWh.
    pub const ELECTRICITY_PER_KWH: f64 = 0.12;
    /// Water price per liter.
    pub const WATER_PER_L: f64 = 0.001;
    /// Feed ratio applied to annual fish yield.
    pub const FEED_RATIO: f64 = 0.8;
    /// Feed price per kg.
    pub const FEED_PRICE_PER_KG: f64 = 2.5;
    /// Monthly maintenance per unit of farm-size multiplier.
    pub const MAINTENANCE_PER_SIZE_UNIT: f64 = 25.0;
    pub const DAYS_PER_MONTH: f64 = 30.0;
    pub const MONTHS_PER_YEAR: f64 = 12.0;
    pub const DAYS_PER_YEAR: f64 = 365.0;
}

// ============================================================================
// CLIMATE
// ============================================================================

/// Temperature and solar factor for a climate zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimatePreset {
    pub temp_c: f64,
    pub solar_factor: f64,
}

pub const CLIMATE_PRESETS: Table<ClimatePreset> = &[
    (
        "tropical",
        ClimatePreset {
            temp_c: 25.0,
            solar_factor: 1.15,
        },
    ),
    (
        "subtropical",
        ClimatePreset {
            temp_c: 22.0,
            solar_factor: 1.05,
        },
    ),
    (
        "temperate",
        ClimatePreset {
            temp_c: 18.0,
            solar_factor: 0.90,
        },
    ),
    (
        "cool",
        ClimatePreset {
            temp_c: 14.0,
            solar_factor: 0.75,
        },
    ),
];

pub const DEFAULT_CLIMATE: &str = "temperate";

/// Fish growth is scaled by `temp / REFERENCE_TEMP_C`.
pub const REFERENCE_TEMP_C: f64 = 20.0;

// ============================================================================
// VOLUMETRIC PRESETS
// ============================================================================

/// Equipment volumes used in quick mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePreset {
    pub tank_vol: f64,
    pub bio_filter_vol: f64,
    pub purifier_vol: f64,
    pub sump_vol: f64,
    pub pipe_dia: f64,
}

pub const VOLUME_PRESETS: Table<VolumePreset> = &[
    (
        "media-bed",
        VolumePreset {
            tank_vol: 1000.0,
            bio_filter_vol: 250.0,
            purifier_vol: 150.0,
            sump_vol: 500.0,
            pipe_dia: 32.0,
        },
    ),
    (
        "nft",
        VolumePreset {
            tank_vol: 800.0,
            bio_filter_vol: 150.0,
            purifier_vol: 100.0,
            sump_vol: 400.0,
            pipe_dia: 25.0,
        },
    ),
    (
        "dwc",
        VolumePreset {
            tank_vol: 1200.0,
            bio_filter_vol: 300.0,
            purifier_vol: 200.0,
            sump_vol: 600.0,
            pipe_dia: 40.0,
        },
    ),
];

/// Preset for a system type key, falling back to the media-bed preset.
pub fn volume_preset(system_type: &str) -> VolumePreset {
    lookup(VOLUME_PRESETS, system_type, VOLUME_PRESETS[0].1)
}

// ============================================================================
// LIMITS
// ============================================================================

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub mod limits {
    use super::Bounds;

    pub const TANK_VOL_L: Bounds = Bounds::new(100.0, 2000.0);
    pub const BIO_FILTER_VOL_L: Bounds = Bounds::new(20.0, 500.0);
    pub const PURIFIER_VOL_L: Bounds = Bounds::new(10.0, 300.0);
    pub const SUMP_VOL_L: Bounds = Bounds::new(50.0, 800.0);
    pub const PIPE_DIA_MM: Bounds = Bounds::new(15.0, 50.0);
    pub const CUSTOM_TEMP_C: Bounds = Bounds::new(10.0, 30.0);
    pub const CUSTOM_SOLAR: Bounds = Bounds::new(0.5, 8.0);

    /// Maximum share of the fish tank volume for each secondary vessel.
    pub const BIO_FILTER_TANK_RATIO: f64 = 0.5;
    pub const PURIFIER_TANK_RATIO: f64 = 0.3;
    pub const SUMP_TANK_RATIO: f64 = 0.8;
}

// ============================================================================
// TYPED KEYS
// ============================================================================

/// Climate zone with a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateZone {
    Tropical,
    Subtropical,
    Temperate,
    Cool,
}

impl ClimateZone {
    pub fn all() -> &'static [ClimateZone] {
        &[
            Self::Tropical,
            Self::Subtropical,
            Self::Temperate,
            Self::Cool,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Subtropical => "subtropical",
            Self::Temperate => "temperate",
            Self::Cool => "cool",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|z| z.key() == key)
    }

    pub fn preset(&self) -> ClimatePreset {
        // Every zone has an entry, the default is never reached.
        lookup(CLIMATE_PRESETS, self.key(), CLIMATE_PRESETS[2].1)
    }
}

/// Physical aquaponics technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    MediaBed,
    Nft,
    Dwc,
}

impl SystemType {
    pub fn all() -> &'static [SystemType] {
        &[Self::MediaBed, Self::Nft, Self::Dwc]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::MediaBed => "media-bed",
            Self::Nft => "nft",
            Self::Dwc => "dwc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.key() == key)
    }

    pub fn volume_preset(&self) -> VolumePreset {
        volume_preset(self.key())
    }
}

/// Whether equipment volumes come from a preset or from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Quick,
    Custom,
}

impl Mode {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "quick" => Some(Self::Quick),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FarmSize {
    Small,
    Medium,
    Large,
    Custom,
}

impl FarmSize {
    pub fn all() -> &'static [FarmSize] {
        &[Self::Small, Self::Medium, Self::Large, Self::Custom]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    Under1000,
    From1000To5000,
    From5000To20000,
    Over20000,
}

impl BudgetTier {
    pub fn all() -> &'static [BudgetTier] {
        &[
            Self::Under1000,
            Self::From1000To5000,
            Self::From5000To20000,
            Self::Over20000,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Under1000 => "under-1000",
            Self::From1000To5000 => "1000-5000",
            Self::From5000To20000 => "5000-20000",
            Self::Over20000 => "over-20000",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|b| b.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergySource {
    Grid,
    Solar,
    Hybrid,
    Generator,
}

impl EnergySource {
    pub fn all() -> &'static [EnergySource] {
        &[Self::Grid, Self::Solar, Self::Hybrid, Self::Generator]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Solar => "solar",
            Self::Hybrid => "hybrid",
            Self::Generator => "generator",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.key() == key)
    }
}
