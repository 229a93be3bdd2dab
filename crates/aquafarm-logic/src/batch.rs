//! Batch simulation. Output index `i` always corresponds to input index `i`.

use rayon::prelude::*;

use crate::simulation::{simulate, SimulationResult};
use crate::system_config::SystemConfiguration;

/// Simulate each configuration in order.
pub fn batch_simulate(configs: &[SystemConfiguration]) -> Vec<SimulationResult> {
    log::debug!("batch simulating {} configurations", configs.len());
    configs.iter().map(simulate).collect()
}

/// Same contract as [`batch_simulate`], spread across the rayon thread pool.
pub fn par_batch_simulate(configs: &[SystemConfiguration]) -> Vec<SimulationResult> {
    log::debug!("parallel batch simulating {} configurations", configs.len());
    configs.par_iter().map(simulate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FarmSize, SystemType};

    fn sweep() -> Vec<SystemConfiguration> {
        let mut configs = Vec::new();
        for size in FarmSize::all() {
            for system in SystemType::all() {
                configs.push(SystemConfiguration {
                    farm_size: size.key().to_string(),
                    system_type: system.key().to_string(),
                    ..SystemConfiguration::default()
                });
            }
        }
        configs
    }

    #[test]
    fn empty_batch() {
        assert!(batch_simulate(&[]).is_empty());
        assert!(par_batch_simulate(&[]).is_empty());
    }

    #[test]
    fn batch_matches_single() {
        let configs = sweep();
        let results = batch_simulate(&configs);
        assert_eq!(results.len(), configs.len());
        for (config, result) in configs.iter().zip(&results) {
            assert_eq!(&simulate(config), result);
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let configs = sweep();
        assert_eq!(par_batch_simulate(&configs), batch_simulate(&configs));
    }
}
