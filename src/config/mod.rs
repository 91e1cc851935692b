//! Configuration for the deployment core.
//!
//! All knobs ship with coded defaults matching the observed simulator
//! behavior (80% success, 2000-3500ms delay). An optional `deploy-core.toml`
//! file (or the file named by `DEPLOY_CORE_CONFIG`) and `DEPLOY_CORE_*`
//! environment variables override them. Loaded configuration is validated
//! explicitly; there are no silent fallbacks past that point.

use crate::error::{DeployCoreError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Run simulator behavior
    pub simulator: SimulatorConfig,

    /// Lifecycle event publication settings
    pub events: EventsConfig,
}

/// Run simulator knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Probability that a run resolves to `Completed`
    pub success_probability: f64,
    /// Inclusive lower bound of the resolution delay
    pub min_delay_ms: u64,
    /// Exclusive upper bound of the resolution delay
    pub max_delay_ms: u64,
}

/// Event channel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Broadcast channel capacity
    pub channel_capacity: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            success_probability: 0.8,
            min_delay_ms: 2000,
            max_delay_ms: 3500,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1000,
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            simulator: SimulatorConfig::default(),
            events: EventsConfig::default(),
        }
    }
}

impl DeployConfig {
    /// Load configuration from defaults, an optional file, and environment
    /// overrides, then validate it
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default(
                "simulator.success_probability",
                defaults.simulator.success_probability,
            )
            .map_err(config_error)?
            .set_default("simulator.min_delay_ms", defaults.simulator.min_delay_ms as i64)
            .map_err(config_error)?
            .set_default("simulator.max_delay_ms", defaults.simulator.max_delay_ms as i64)
            .map_err(config_error)?
            .set_default("events.channel_capacity", defaults.events.channel_capacity as i64)
            .map_err(config_error)?;

        builder = match std::env::var("DEPLOY_CORE_CONFIG") {
            Ok(path) => builder.add_source(File::with_name(&path)),
            Err(_) => builder.add_source(File::with_name("deploy-core").required(false)),
        };

        let config: Self = builder
            .add_source(Environment::with_prefix("DEPLOY_CORE").separator("__"))
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate invariants that deserialization cannot express
    pub fn validate(&self) -> Result<()> {
        let simulator = &self.simulator;
        if !(0.0..=1.0).contains(&simulator.success_probability) {
            return Err(DeployCoreError::Configuration(format!(
                "success_probability must be within [0.0, 1.0], got {}",
                simulator.success_probability
            )));
        }
        if simulator.min_delay_ms >= simulator.max_delay_ms {
            return Err(DeployCoreError::Configuration(format!(
                "min_delay_ms ({}) must be less than max_delay_ms ({})",
                simulator.min_delay_ms, simulator.max_delay_ms
            )));
        }
        if self.events.channel_capacity == 0 {
            return Err(DeployCoreError::Configuration(
                "events.channel_capacity must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_error(e: config::ConfigError) -> DeployCoreError {
    DeployCoreError::Configuration(e.to_string())
}
