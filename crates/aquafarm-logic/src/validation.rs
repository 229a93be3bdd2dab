//! Range and tank-ratio checks for user-supplied values.
//!
//! Validation is an optional gate in front of [`simulate`](crate::simulate):
//! volumetric checks apply in custom mode, climate checks apply when a
//! custom climate is selected, everything else is skipped. Failures are
//! returned as values, all of them at once; nothing here returns `Err`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{limits, Bounds};
use crate::system_config::SystemConfiguration;

/// A user-editable numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    TankVol,
    BioFilterVol,
    PurifierVol,
    SumpVol,
    PipeDia,
    CustomTemp,
    CustomSolar,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TankVol => "Fish tank volume",
            Self::BioFilterVol => "Bio-filter volume",
            Self::PurifierVol => "Purifier volume",
            Self::SumpVol => "Sump volume",
            Self::PipeDia => "Pipe diameter",
            Self::CustomTemp => "Custom temperature",
            Self::CustomSolar => "Custom solar factor",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::TankVol | Self::BioFilterVol | Self::PurifierVol | Self::SumpVol => " L",
            Self::PipeDia => " mm",
            Self::CustomTemp => " °C",
            Self::CustomSolar => "",
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Self::TankVol => limits::TANK_VOL_L,
            Self::BioFilterVol => limits::BIO_FILTER_VOL_L,
            Self::PurifierVol => limits::PURIFIER_VOL_L,
            Self::SumpVol => limits::SUMP_VOL_L,
            Self::PipeDia => limits::PIPE_DIA_MM,
            Self::CustomTemp => limits::CUSTOM_TEMP_C,
            Self::CustomSolar => limits::CUSTOM_SOLAR,
        }
    }
}

/// One failed check. `Display` gives the sentence shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error(
        "{} must be between {}{unit} and {}{unit} (got {value}{unit})",
        .field.label(), .min, .max, unit = .field.unit()
    )]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error(
        "{} is required and must be between {}{unit} and {}{unit}",
        .field.label(), .min, .max, unit = .field.unit()
    )]
    Missing { field: Field, min: f64, max: f64 },

    #[error(
        "{} ({value} L) must not exceed {max_percent}% of the fish tank volume ({limit} L)",
        .field.label()
    )]
    ExceedsTankRatio {
        field: Field,
        value: f64,
        max_percent: f64,
        limit: f64,
    },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            Self::OutOfRange { field, .. }
            | Self::Missing { field, .. }
            | Self::ExceedsTankRatio { field, .. } => *field,
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// The error sentences in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// A value counts as present when it is set, finite and non-zero.
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Check a configuration, returning every violation found.
pub fn validate(config: &SystemConfiguration) -> ValidationResult {
    let mut errors = Vec::new();

    if config.is_custom_mode() {
        check_range(Field::TankVol, config.tank_vol, &mut errors);
        check_range(Field::BioFilterVol, config.bio_filter_vol, &mut errors);
        check_range(Field::PurifierVol, config.purifier_vol, &mut errors);
        check_range(Field::SumpVol, config.sump_vol, &mut errors);
        check_range(Field::PipeDia, config.pipe_dia, &mut errors);

        if let Some(tank) = present(config.tank_vol) {
            check_ratio(
                Field::BioFilterVol,
                config.bio_filter_vol,
                tank,
                limits::BIO_FILTER_TANK_RATIO,
                &mut errors,
            );
            check_ratio(
                Field::PurifierVol,
                config.purifier_vol,
                tank,
                limits::PURIFIER_TANK_RATIO,
                &mut errors,
            );
            check_ratio(
                Field::SumpVol,
                config.sump_vol,
                tank,
                limits::SUMP_TANK_RATIO,
                &mut errors,
            );
        }
    }

    if config.custom_climate {
        check_range(Field::CustomTemp, config.custom_temp, &mut errors);
        check_range(Field::CustomSolar, config.custom_solar, &mut errors);
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_range(field: Field, value: Option<f64>, errors: &mut Vec<ValidationError>) {
    let bounds = field.bounds();
    match present(value) {
        None => errors.push(ValidationError::Missing {
            field,
            min: bounds.min,
            max: bounds.max,
        }),
        Some(v) if !bounds.contains(v) => errors.push(ValidationError::OutOfRange {
            field,
            value: v,
            min: bounds.min,
            max: bounds.max,
        }),
        Some(_) => {}
    }
}

fn check_ratio(
    field: Field,
    value: Option<f64>,
    tank: f64,
    ratio: f64,
    errors: &mut Vec<ValidationError>,
) {
    let Some(v) = present(value) else {
        return;
    };
    let limit = tank * ratio;
    if v > limit {
        errors.push(ValidationError::ExceedsTankRatio {
            field,
            value: v,
            max_percent: (ratio * 100.0).round(),
            limit: (limit * 100.0).round() / 100.0,
        });
    }
}
