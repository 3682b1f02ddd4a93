use crate::state_estimator::scalar::ScalarParams;
use anyhow::Context;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    pub A: f64,
    pub H: f64,
    pub Q: f64,
    pub R: f64,
    pub x0: Option<f64>,
    pub P0: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            A: 1.0,
            H: 1.0,
            Q: 1e-4,
            R: 0.05 * 0.05,
            x0: None,
            P0: 0.0,
        }
    }
}

impl FilterConfig {
    pub fn params(&self, x0_fallback: Option<f64>) -> ScalarParams {
        ScalarParams::from_model(
            self.A,
            self.H,
            self.Q,
            self.R,
            self.x0.or(x0_fallback),
            Some(self.P0),
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NoiseConfig {
    Uniform { max: f64 },
    Gaussian { std: f64 },
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig::Uniform { max: 0.15 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalConfig {
    pub num_steps: usize,
    pub ts: f64,
    pub frequency: f64,
    pub phase: f64,
    pub magnitude: f64,
    pub dc_offset: f64,
    pub noise: NoiseConfig,
    // OS entropy when unset
    pub seed: Option<u64>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            num_steps: 100,
            ts: 0.1,
            frequency: 0.1,
            phase: 0.0,
            magnitude: 0.2,
            dc_offset: 0.2294,
            noise: NoiseConfig::default(),
            seed: None,
        }
    }
}

/// What the driver does when an observation cannot be incorporated.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Halt,
    Skip,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Halt
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub signal: SignalConfig,
    pub failure_policy: FailurePolicy,
    /// Observations with `NIS > gate_size^2` are not incorporated.
    pub gate_size: Option<f64>,
}

impl Config {
    pub fn from_reader(reader: impl Read) -> anyhow::Result<Self> {
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.failure_policy, FailurePolicy::Halt);
        assert_eq!(config.signal.num_steps, 100);
        assert!((config.filter.R - 0.0025).abs() < 1e-15);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "filter": { "Q": 0.001, "x0": 0.5 },
            "signal": { "noise": { "kind": "gaussian", "std": 0.075 }, "seed": 7 },
            "failure_policy": "skip",
            "gate_size": 3.0
        }"#;
        let config = Config::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.filter.Q, 0.001);
        assert_eq!(config.filter.A, 1.0);
        assert_eq!(config.filter.x0, Some(0.5));
        assert_eq!(config.signal.noise, NoiseConfig::Gaussian { std: 0.075 });
        assert_eq!(config.signal.seed, Some(7));
        assert_eq!(config.signal.ts, 0.1);
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.gate_size, Some(3.0));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let json = r#"{ "failure_policy": "retry" }"#;
        assert!(Config::from_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn test_params_x0_fallback() {
        let filter = FilterConfig::default();
        assert_eq!(filter.params(Some(0.2294)).x(), 0.2294);
        assert_eq!(filter.params(None).x(), 0.0);

        let filter = FilterConfig {
            x0: Some(1.0),
            ..FilterConfig::default()
        };
        assert_eq!(filter.params(Some(0.2294)).x(), 1.0);
    }
}
