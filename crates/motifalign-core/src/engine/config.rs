use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown scoring mode '{0}'. Expected 'quick' or 'kabsch'.")]
    UnknownScoringMode(String),
}

/// Which similarity metric the pairwise engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// Sliding-window RMSD of the structures as currently oriented, no fit.
    Quick,
    /// Sliding-window RMSD after an optimal Kabsch rotation per window.
    #[default]
    Kabsch,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Quick => write!(f, "quick"),
            ScoringMode::Kabsch => write!(f, "kabsch"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(ScoringMode::Quick),
            "kabsch" => Ok(ScoringMode::Kabsch),
            _ => Err(ConfigError::UnknownScoringMode(s.to_string())),
        }
    }
}

/// Numerical settings of the Kabsch solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KabschConfig {
    /// Convergence tolerance of the singular value decomposition.
    pub svd_epsilon: f64,
    /// Iteration cap of the decomposition; exceeding it is a degenerate-input failure.
    pub max_svd_iterations: usize,
    /// Singular values below `rank_tolerance * largest` count as zero.
    pub rank_tolerance: f64,
}

impl Default for KabschConfig {
    fn default() -> Self {
        Self {
            svd_epsilon: f64::EPSILON,
            max_svd_iterations: 1000,
            rank_tolerance: 1e-10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringConfig {
    pub mode: ScoringMode,
    pub kabsch: KabschConfig,
}

#[derive(Default)]
pub struct ScoringConfigBuilder {
    mode: Option<ScoringMode>,
    svd_epsilon: Option<f64>,
    max_svd_iterations: Option<usize>,
    rank_tolerance: Option<f64>,
}

impl ScoringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ScoringMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn svd_epsilon(mut self, epsilon: f64) -> Self {
        self.svd_epsilon = Some(epsilon);
        self
    }
    pub fn max_svd_iterations(mut self, iterations: usize) -> Self {
        self.max_svd_iterations = Some(iterations);
        self
    }
    pub fn rank_tolerance(mut self, tolerance: f64) -> Self {
        self.rank_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<ScoringConfig, ConfigError> {
        let defaults = KabschConfig::default();
        let kabsch = KabschConfig {
            svd_epsilon: positive("svd_epsilon", self.svd_epsilon.unwrap_or(defaults.svd_epsilon))?,
            max_svd_iterations: match self.max_svd_iterations {
                Some(0) => {
                    return Err(ConfigError::InvalidParameter {
                        name: "max_svd_iterations",
                        reason: "must be at least 1".to_string(),
                    });
                }
                Some(n) => n,
                None => defaults.max_svd_iterations,
            },
            rank_tolerance: positive(
                "rank_tolerance",
                self.rank_tolerance.unwrap_or(defaults.rank_tolerance),
            )?,
        };
        Ok(ScoringConfig {
            mode: self.mode.unwrap_or_default(),
            kabsch,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a finite positive number (got {})", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_yields_defaults() {
        let config = ScoringConfigBuilder::new().build().unwrap();
        assert_eq!(config, ScoringConfig::default());
        assert_eq!(config.mode, ScoringMode::Kabsch);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ScoringConfigBuilder::new()
            .mode(ScoringMode::Quick)
            .svd_epsilon(1e-12)
            .max_svd_iterations(50)
            .rank_tolerance(1e-6)
            .build()
            .unwrap();
        assert_eq!(config.mode, ScoringMode::Quick);
        assert_eq!(config.kabsch.svd_epsilon, 1e-12);
        assert_eq!(config.kabsch.max_svd_iterations, 50);
        assert_eq!(config.kabsch.rank_tolerance, 1e-6);
    }

    #[test]
    fn builder_rejects_non_positive_tolerances() {
        let result = ScoringConfigBuilder::new().rank_tolerance(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "rank_tolerance", .. })
        ));

        let result = ScoringConfigBuilder::new().svd_epsilon(f64::NAN).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "svd_epsilon", .. })
        ));
    }

    #[test]
    fn builder_rejects_zero_iteration_cap() {
        let result = ScoringConfigBuilder::new().max_svd_iterations(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "max_svd_iterations", .. })
        ));
    }

    #[test]
    fn scoring_mode_parses_case_insensitively() {
        assert_eq!("Quick".parse::<ScoringMode>(), Ok(ScoringMode::Quick));
        assert_eq!(" kabsch ".parse::<ScoringMode>(), Ok(ScoringMode::Kabsch));
        assert_eq!(
            "fast".parse::<ScoringMode>(),
            Err(ConfigError::UnknownScoringMode("fast".to_string()))
        );
        assert_eq!(ScoringMode::Quick.to_string(), "quick");
    }
}
