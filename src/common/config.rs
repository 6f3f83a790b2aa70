//! Tunable simulation parameters.

use serde::{Deserialize, Serialize};

use crate::error::ClockError;

/// Parameters of the relaxation loop and the time mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Relaxation passes per frame.
    pub iterations: u32,
    /// Downward displacement folded into the Verlet history each frame.
    pub gravity: f64,
    /// Wall-clock gap between updates, in milliseconds, after which the scene is rebuilt.
    pub stale_after_ms: u64,
    /// Simulated seconds per wall-clock second.
    pub speed: f64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ClockError> {
        if self.iterations == 0 {
            return Err(ClockError::InvalidConfig("iterations must be at least 1".into()));
        }
        if !self.gravity.is_finite() {
            return Err(ClockError::InvalidConfig(format!("gravity must be finite, got {}", self.gravity)));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ClockError::InvalidConfig(format!("speed must be finite and non-negative, got {}", self.speed)));
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ClockError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            gravity: 1.0,
            stale_after_ms: 500,
            speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.iterations, 20);
        assert_eq!(config.gravity, 1.0);
        assert_eq!(config.stale_after_ms, 500);
        assert_eq!(config.speed, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = SimulationConfig::from_json(r#"{ "iterations": 5 }"#).unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.gravity, 1.0);
    }

    #[test]
    fn test_from_json_rejects_zero_iterations() {
        let err = SimulationConfig::from_json(r#"{ "iterations": 0 }"#).unwrap_err();
        assert!(matches!(err, ClockError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = SimulationConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ClockError::Parse(_)));
    }

    #[test]
    fn test_negative_speed_is_invalid() {
        let config = SimulationConfig { speed: -1.0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
