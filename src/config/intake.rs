//! Intake loop configuration

use serde::Deserialize;

use crate::domain::intake::question_round::DEFAULT_MAX_ROUNDS;

use super::error::ValidationError;

/// Intake loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Round ceiling: readiness is forced once this many question rounds
    /// have been attempted.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl IntakeConfig {
    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_rounds == 0 {
            return Err(ValidationError::InvalidMaxRounds);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
        }
    }
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_config_defaults() {
        let config = IntakeConfig::default();
        assert_eq!(config.max_rounds, 3);
    }

    #[test]
    fn validation_rejects_zero_rounds() {
        let config = IntakeConfig { max_rounds: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_accepts_custom_ceiling() {
        let config = IntakeConfig { max_rounds: 5 };
        assert!(config.validate().is_ok());
    }
}
