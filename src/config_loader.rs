use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub turns: Option<usize>,
    pub strategy: Option<String>,
    pub topology: Option<String>,
}

/// Apply CLI overrides to a loaded configuration
pub fn apply_cli_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.seed {
        info!("Overriding seed: {}", seed);
        config.general.seed = Some(seed);
    }

    if let Some(turns) = overrides.turns {
        info!("Overriding number of turns: {}", turns);
        config.simulation.num_turns = turns;
    }

    if let Some(strategy) = &overrides.strategy {
        info!("Overriding movement strategy: {}", strategy);
        config.simulation.strategy = strategy.clone();
    }

    if let Some(topology) = &overrides.topology {
        info!("Overriding topology shape: {}", topology);
        config.simulation.topology = topology.clone();
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
