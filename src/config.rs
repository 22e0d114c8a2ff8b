use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{network::Topology, trainer::TrainParams, Result, RpsErr};

/// Everything a run can be tuned with. Missing fields in a config file take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub topology: Topology,
    pub learning_rate: f32,
    /// Average error, as a percentage, an epoch must fall below for training to stop.
    pub min_avg_error: f32,
    pub max_iterations: u64,
    /// Seeds the network's initial parameters, random if absent.
    pub seed: Option<u64>,
    pub model_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            learning_rate: 0.15,
            min_avg_error: 0.1,
            max_iterations: 100_000,
            seed: None,
            model_path: PathBuf::from("network.json"),
        }
    }
}

impl RunConfig {
    /// Reads a config from a JSON file and validates it.
    ///
    /// # Errors
    /// `RpsErr::Io` if the file can't be read and `RpsErr::Config` if it isn't a valid config.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| RpsErr::Config(format!("cannot parse '{}': {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// `RpsErr::InvalidTopology` or `RpsErr::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RpsErr::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }

        if !self.min_avg_error.is_finite() || self.min_avg_error < 0.0 {
            return Err(RpsErr::Config(format!(
                "min_avg_error must be a non negative percentage, got {}",
                self.min_avg_error
            )));
        }

        if self.max_iterations == 0 {
            return Err(RpsErr::Config("max_iterations must be positive".into()));
        }

        Ok(())
    }

    pub fn train_params(&self) -> TrainParams {
        TrainParams {
            learning_rate: self.learning_rate,
            min_avg_error: self.min_avg_error,
            max_iterations: self.max_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();

        assert_eq!(config.topology.widths(), &[6, 30, 12, 2]);
        assert_eq!(config.learning_rate, 0.15);
        assert_eq!(config.min_avg_error, 0.1);
        assert_eq!(config.max_iterations, 100_000);
        assert_eq!(config.model_path, PathBuf::from("network.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"learning_rate": 0.5, "seed": 3}"#).unwrap();

        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.topology, Topology::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RunConfig {
                learning_rate: 0.0,
                ..Default::default()
            },
            RunConfig {
                min_avg_error: -1.0,
                ..Default::default()
            },
            RunConfig {
                max_iterations: 0,
                ..Default::default()
            },
            RunConfig {
                topology: Topology::new(vec![6, 30, 3]),
                ..Default::default()
            },
        ];

        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            RunConfig::from_json_file("/nonexistent/rps.json"),
            Err(RpsErr::Io(_))
        ));
    }
}
