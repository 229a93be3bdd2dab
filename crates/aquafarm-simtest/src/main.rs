//! Aquafarm Headless Simulation Harness
//!
//! Checks the simulator and validator against the reference scenarios and
//! sweeps every preset combination for the model's ordering properties.
//! Runs entirely in-process with no web app or network.
//!
//! Usage:
//!   cargo run -p aquafarm-simtest
//!   cargo run -p aquafarm-simtest -- --verbose
//!   cargo run -p aquafarm-simtest -- --batch designs.json

use aquafarm_logic::constants::{
    BudgetTier, ClimateZone, EnergySource, FarmSize, Mode, SystemType,
};
use aquafarm_logic::projection::{project, Projection};
use aquafarm_logic::system_config::SystemConfiguration;
use aquafarm_logic::{
    batch_simulate, par_batch_simulate, simulate, validate, AquaError, AquaResult,
    SimulationResult, ValidationResult,
};
use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

// ── Reference scenarios (shared with the web app's fixtures) ────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    config: SystemConfiguration,
    #[serde(default)]
    expect: Option<Expected>,
    #[serde(default)]
    valid: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Expected {
    fish_yield_kg: f64,
    veg_yield_kg: f64,
    daily_water_l: u32,
    #[serde(rename = "dailyKWh")]
    daily_kwh: f64,
    system_efficiency: u32,
    monthly_operating_cost: u32,
}

// ── Logging ─────────────────────────────────────────────────────────────

struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("  [{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

fn init_logging(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    init_logging(verbose);

    if let Some(path) = arg_value(&args, "--batch") {
        match run_batch_file(&path) {
            Ok(()) => return,
            Err(e) => {
                log::error!("batch {path} failed: {e}");
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        }
    }

    println!("=== Aquafarm Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Reference scenarios
    results.extend(validate_scenarios(verbose));

    // 2. Fallback table for unknown keys
    results.extend(validate_fallbacks(verbose));

    // 3. Ordering properties across every preset combination
    results.extend(validate_orderings(verbose));

    // 4. Batch runner
    results.extend(validate_batch(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

// ── Batch file mode ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    index: usize,
    validation: ValidationResult,
    result: SimulationResult,
    projection: Projection,
}

fn run_batch_file(path: &str) -> AquaResult<()> {
    let json = std::fs::read_to_string(path)?;
    let configs = SystemConfiguration::batch_from_json(&json)?;
    log::info!("loaded {} configurations from {path}", configs.len());

    let entries: Vec<BatchEntry> = par_batch_simulate(&configs)
        .into_iter()
        .zip(&configs)
        .enumerate()
        .map(|(index, (result, config))| BatchEntry {
            index,
            validation: validate(config),
            projection: project(&result),
            result,
        })
        .collect();

    let out = serde_json::to_string_pretty(&entries)?;
    println!("{out}");
    Ok(())
}

// ── 1. Reference Scenarios ──────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Scenarios ---");
    let mut results = Vec::new();

    let mut scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    // Same normalization as SystemConfiguration::from_json.
    for scenario in &mut scenarios {
        scenario.config.apply_quick_preset();
    }

    results.push(TestResult {
        name: "scenarios_not_empty".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    for scenario in &scenarios {
        let result = simulate(&scenario.config);

        if let Some(expect) = &scenario.expect {
            let mismatches = compare(&result, expect);
            results.push(TestResult {
                name: format!("{}_values", scenario.name),
                passed: mismatches.is_empty(),
                detail: if mismatches.is_empty() {
                    format!(
                        "fish={} veg={} water={} kWh={} eff={}% cost={}",
                        result.fish_yield_kg,
                        result.veg_yield_kg,
                        result.daily_water_l,
                        result.daily_kwh,
                        result.system_efficiency,
                        result.monthly_operating_cost
                    )
                } else {
                    mismatches.join(", ")
                },
            });
        }

        if let Some(expected_valid) = scenario.valid {
            let validation = validate(&scenario.config);
            results.push(TestResult {
                name: format!("{}_validation", scenario.name),
                passed: validation.is_valid == expected_valid,
                detail: if validation.errors.is_empty() {
                    "no errors".into()
                } else {
                    validation.messages().join("; ")
                },
            });
        }

        results.push(TestResult {
            name: format!("{}_positive_yield", scenario.name),
            passed: result.fish_yield_kg > 0.0 && result.veg_yield_kg > 0.0,
            detail: format!("fish={} veg={}", result.fish_yield_kg, result.veg_yield_kg),
        });

        if verbose {
            let p = project(&result);
            println!(
                "  {:32} {:>9.1} kg/yr  {:>8.1} m³/yr  {:>9.1} kWh/yr  {:>8} $/yr",
                scenario.name,
                p.total_yield_kg,
                p.annual_water_m3,
                p.annual_kwh,
                p.annual_operating_cost
            );
        }
    }

    results
}

fn compare(result: &SimulationResult, expect: &Expected) -> Vec<String> {
    let mut mismatches = Vec::new();
    let mut check = |name: &str, got: f64, want: f64| {
        if (got - want).abs() > 1e-9 {
            mismatches.push(format!("{name}: got {got}, want {want}"));
        }
    };
    check("fishYieldKg", result.fish_yield_kg, expect.fish_yield_kg);
    check("vegYieldKg", result.veg_yield_kg, expect.veg_yield_kg);
    check(
        "dailyWaterL",
        result.daily_water_l as f64,
        expect.daily_water_l as f64,
    );
    check("dailyKWh", result.daily_kwh, expect.daily_kwh);
    check(
        "systemEfficiency",
        result.system_efficiency as f64,
        expect.system_efficiency as f64,
    );
    check(
        "monthlyOperatingCost",
        result.monthly_operating_cost as f64,
        expect.monthly_operating_cost as f64,
    );
    mismatches
}

// ── 2. Fallbacks ────────────────────────────────────────────────────────

fn validate_fallbacks(verbose: bool) -> Vec<TestResult> {
    println!("--- Fallbacks ---");
    let mut results = Vec::new();

    let base = SystemConfiguration {
        climate_key: None,
        ..SystemConfiguration::default()
    };
    let unknown = SystemConfiguration {
        climate_key: Some("martian".into()),
        system_type: "aeroponic".into(),
        farm_size: "huge".into(),
        fish_species: vec!["Carp".into()],
        crop_choice: vec!["Basil".into()],
        budget: "unlimited".into(),
        energy_source: "wind".into(),
        ..SystemConfiguration::default()
    };

    let r = simulate(&unknown);
    results.push(TestResult {
        name: "fallback_climate_temperate".into(),
        passed: r.climate_key.as_deref() == Some("temperate") && r.temp_used == 18.0,
        detail: format!("key={:?} temp={}", r.climate_key, r.temp_used),
    });
    results.push(TestResult {
        name: "fallback_yield_rates".into(),
        passed: r.fish_yield_kg == 18.0 && r.veg_yield_kg == 13.5,
        detail: format!("fish={} veg={}", r.fish_yield_kg, r.veg_yield_kg),
    });
    results.push(TestResult {
        name: "fallback_base_consumption".into(),
        passed: r.daily_water_l == 253 && r.daily_kwh == 10.0,
        detail: format!("water={} kWh={}", r.daily_water_l, r.daily_kwh),
    });
    results.push(TestResult {
        name: "fallback_budget_efficiency".into(),
        passed: r.system_efficiency == 80,
        detail: format!("eff={}%", r.system_efficiency),
    });

    if verbose {
        println!(
            "  unknown keys -> fish={} veg={} water={} kWh={} eff={}% cost={}",
            r.fish_yield_kg,
            r.veg_yield_kg,
            r.daily_water_l,
            r.daily_kwh,
            r.system_efficiency,
            r.monthly_operating_cost
        );
    }

    let r = simulate(&base);
    results.push(TestResult {
        name: "missing_climate_temperate".into(),
        passed: r.climate_key.as_deref() == Some("temperate"),
        detail: format!("key={:?}", r.climate_key),
    });

    // Omitted volumes: preset in quick mode, reported missing in custom mode.
    let quick = SystemConfiguration::from_json(r#"{ "systemType": "dwc" }"#);
    results.push(TestResult {
        name: "json_quick_mode_uses_system_preset".into(),
        passed: matches!(&quick, Ok(c) if c.tank_vol == Some(1200.0)),
        detail: format!("tank={:?}", quick.as_ref().map(|c| c.tank_vol).ok().flatten()),
    });
    let custom = SystemConfiguration::from_json(r#"{ "mode": "custom", "tankVol": 800 }"#);
    let missing = custom
        .as_ref()
        .map(|c| validate(c).errors.len())
        .unwrap_or(0);
    results.push(TestResult {
        name: "json_custom_mode_missing_volumes".into(),
        passed: missing == 4,
        detail: format!("{} missing-volume errors", missing),
    });

    results
}

// ── 3. Orderings ────────────────────────────────────────────────────────

fn sweep() -> Vec<SystemConfiguration> {
    let mut configs = Vec::new();
    for climate in ClimateZone::all() {
        for system in SystemType::all() {
            for budget in BudgetTier::all() {
                for source in EnergySource::all() {
                    configs.push(SystemConfiguration {
                        climate_key: Some(climate.key().into()),
                        system_type: system.key().into(),
                        budget: budget.key().into(),
                        energy_source: source.key().into(),
                        fish_species: vec!["Tilapia".into(), "Trout".into(), "Perch".into()],
                        crop_choice: vec!["Lettuce".into(), "Tomatoes".into()],
                        ..SystemConfiguration::default()
                    });
                }
            }
        }
    }
    configs
}

fn validate_orderings(verbose: bool) -> Vec<TestResult> {
    println!("--- Orderings ---");
    let mut results = Vec::new();
    let configs = sweep();

    let mut size_violations = 0;
    let mut energy_violations = 0;
    let mut efficiency_violations = 0;
    let mut clamped = 0;

    for config in &configs {
        let sized: Vec<SimulationResult> = [FarmSize::Small, FarmSize::Medium, FarmSize::Large]
            .iter()
            .map(|s| {
                simulate(&SystemConfiguration {
                    farm_size: s.key().into(),
                    ..config.clone()
                })
            })
            .collect();
        for pair in sized.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if !(a.fish_yield_kg < b.fish_yield_kg
                && a.veg_yield_kg < b.veg_yield_kg
                && a.daily_water_l < b.daily_water_l
                && a.daily_kwh < b.daily_kwh)
            {
                size_violations += 1;
            }
        }

        let kwh = |source: EnergySource| {
            simulate(&SystemConfiguration {
                energy_source: source.key().into(),
                ..config.clone()
            })
            .daily_kwh
        };
        if !(kwh(EnergySource::Solar) < kwh(EnergySource::Grid)
            && kwh(EnergySource::Grid) < kwh(EnergySource::Generator))
        {
            energy_violations += 1;
        }

        let r = simulate(config);
        if r.system_efficiency > 100 {
            efficiency_violations += 1;
        }
        if aquafarm_logic::simulation::raw_efficiency(config) > 1.0 {
            clamped += 1;
        }
    }

    results.push(TestResult {
        name: "farm_size_monotonic".into(),
        passed: size_violations == 0,
        detail: format!(
            "{} configurations, {} violations",
            configs.len(),
            size_violations
        ),
    });
    results.push(TestResult {
        name: "energy_source_ordering".into(),
        passed: energy_violations == 0,
        detail: format!("solar < grid < generator, {} violations", energy_violations),
    });
    results.push(TestResult {
        name: "efficiency_bounded".into(),
        passed: efficiency_violations == 0,
        detail: format!("{} configurations clamped to 100%", clamped),
    });

    // Every preset passes custom-mode validation.
    let bad_presets: Vec<&str> = SystemType::all()
        .iter()
        .filter(|t| {
            let mut c = SystemConfiguration {
                system_type: t.key().into(),
                mode: Mode::Custom.key().into(),
                ..SystemConfiguration::default()
            };
            c.set_volumes(t.volume_preset());
            !validate(&c).is_valid
        })
        .map(|t| t.key())
        .collect();
    results.push(TestResult {
        name: "presets_valid_in_custom_mode".into(),
        passed: bad_presets.is_empty(),
        detail: if bad_presets.is_empty() {
            "all presets satisfy ranges and tank ratios".into()
        } else {
            format!("invalid presets: {}", bad_presets.join(", "))
        },
    });

    if verbose {
        println!("  Efficiency by system type (over-20000 budget, 3 species):");
        for t in SystemType::all() {
            let c = SystemConfiguration {
                system_type: t.key().into(),
                budget: BudgetTier::Over20000.key().into(),
                fish_species: vec!["Tilapia".into(), "Trout".into(), "Perch".into()],
                ..SystemConfiguration::default()
            };
            println!(
                "    {:10} {:>3}%  (raw {:.3})",
                t.key(),
                simulate(&c).system_efficiency,
                aquafarm_logic::simulation::raw_efficiency(&c)
            );
        }
    }

    results
}

// ── 4. Batch ────────────────────────────────────────────────────────────

fn validate_batch(verbose: bool) -> Vec<TestResult> {
    println!("--- Batch ---");
    let mut results = Vec::new();
    let configs = sweep();

    let sequential = batch_simulate(&configs);
    let mismatched = configs
        .iter()
        .zip(&sequential)
        .filter(|(c, r)| simulate(c) != **r)
        .count();
    results.push(TestResult {
        name: "batch_index_correspondence".into(),
        passed: sequential.len() == configs.len() && mismatched == 0,
        detail: format!("{} results, {} mismatched", sequential.len(), mismatched),
    });

    let started = std::time::Instant::now();
    let parallel = par_batch_simulate(&configs);
    if verbose {
        println!(
            "  parallel batch of {} configurations in {:?}",
            configs.len(),
            started.elapsed()
        );
    }
    results.push(TestResult {
        name: "parallel_matches_sequential".into(),
        passed: parallel == sequential,
        detail: format!("{} results", parallel.len()),
    });

    results.push(TestResult {
        name: "empty_batch_rejected".into(),
        passed: matches!(
            SystemConfiguration::batch_from_json("[]"),
            Err(AquaError::EmptyBatch)
        ),
        detail: "[] -> EmptyBatch".into(),
    });

    results
}
