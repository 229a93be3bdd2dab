//! Pure simulation logic for aquafarm designs.
//!
//! This crate contains the performance model behind the onboarding wizard
//! and dashboard: it checks a farm configuration and projects yields,
//! resource use, efficiency and operating cost. Functions take plain data
//! and return plain data, so the same code runs behind the web app, in
//! batch jobs and in the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`batch`] | Index-preserving batch simulation (sequential and rayon) |
//! | [`climate`] | Resolves preset or custom climate into temperature/solar |
//! | [`constants`] | Lookup tables: species, crops, sizes, system types, presets |
//! | [`error`] | Error type for parsing configuration input |
//! | [`projection`] | Annual dashboard figures derived from a result |
//! | [`simulation`] | Grey-box yield, water, energy, efficiency, cost model |
//! | [`system_config`] | The configuration record the wizard produces |
//! | [`validation`] | Range and tank-ratio checks for custom input |
//! | [`wizard`] | Preset application and wizard state transitions |
//!
//! ```
//! use aquafarm_logic::system_config::SystemConfiguration;
//! use aquafarm_logic::{simulate, validate};
//!
//! let config = SystemConfiguration::default();
//! assert!(validate(&config).is_valid);
//! let result = simulate(&config);
//! assert!(result.fish_yield_kg > 0.0);
//! ```

pub mod batch;
pub mod climate;
pub mod constants;
pub mod error;
pub mod projection;
pub mod simulation;
pub mod system_config;
pub mod validation;
pub mod wizard;

pub use batch::{batch_simulate, par_batch_simulate};
pub use error::{AquaError, AquaResult};
pub use simulation::{simulate, SimulationResult};
pub use validation::{validate, ValidationError, ValidationResult};
