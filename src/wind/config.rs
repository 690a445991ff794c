use serde::Deserialize;

use super::error::WindError;

/// How a bin's circular mean direction weighs its member vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionWeighting {
    /// Each bearing weighted by its horizontal speed. Fast segments dominate,
    /// which suppresses near-stationary GPS jitter.
    SpeedWeighted,
    /// Every bearing counts equally.
    Unweighted,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindConfig {
    /// Altitude layer width in meters.
    pub bin_width_m: f64,
    /// A layer with fewer vectors than this emits no estimate.
    pub min_samples_per_bin: usize,
    /// Trailing moving-average window for derived rate series.
    pub smoothing_window: usize,
    /// Point pairs closer in time than this are skipped.
    pub min_elapsed_s: f64,
    /// Point pairs further apart than this are skipped; a balloon drifts too
    /// far across a stale gap for the segment to represent one layer.
    pub max_elapsed_s: f64,
    pub weighting: DirectionWeighting,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            bin_width_m: 500.0,
            min_samples_per_bin: 3,
            smoothing_window: 5,
            min_elapsed_s: 0.1,
            max_elapsed_s: 300.0,
            weighting: DirectionWeighting::SpeedWeighted,
        }
    }
}

impl WindConfig {
    /// Parse and validate a YAML config. Missing fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, WindError> {
        let config: WindConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WindError> {
        if !self.bin_width_m.is_finite() || self.bin_width_m <= 0.0 {
            return Err(WindError::InvalidBinWidth(self.bin_width_m));
        }
        if self.min_samples_per_bin < 1 {
            return Err(WindError::InvalidMinSamples);
        }
        if self.smoothing_window < 1 {
            return Err(WindError::InvalidSmoothingWindow);
        }
        let bounds_ok = self.min_elapsed_s.is_finite()
            && self.max_elapsed_s.is_finite()
            && self.min_elapsed_s > 0.0
            && self.max_elapsed_s > self.min_elapsed_s;
        if !bounds_ok {
            return Err(WindError::InvalidElapsedBounds {
                min: self.min_elapsed_s,
                max: self.max_elapsed_s,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        WindConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_bin_width() {
        let config = WindConfig {
            bin_width_m: 0.0,
            ..WindConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WindError::InvalidBinWidth(_))
        ));

        let config = WindConfig {
            bin_width_m: f64::NAN,
            ..WindConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_min_samples_and_window() {
        let config = WindConfig {
            min_samples_per_bin: 0,
            ..WindConfig::default()
        };
        assert!(matches!(config.validate(), Err(WindError::InvalidMinSamples)));

        let config = WindConfig {
            smoothing_window: 0,
            ..WindConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WindError::InvalidSmoothingWindow)
        ));
    }

    #[test]
    fn rejects_inverted_elapsed_bounds() {
        let config = WindConfig {
            min_elapsed_s: 10.0,
            max_elapsed_s: 1.0,
            ..WindConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WindError::InvalidElapsedBounds { .. })
        ));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = WindConfig::from_yaml("bin_width_m: 250.0\nweighting: unweighted\n").unwrap();
        assert_eq!(config.bin_width_m, 250.0);
        assert_eq!(config.weighting, DirectionWeighting::Unweighted);
        assert_eq!(config.min_samples_per_bin, 3);
        assert_eq!(config.smoothing_window, 5);
    }

    #[test]
    fn yaml_with_bad_values_fails_fast() {
        assert!(WindConfig::from_yaml("bin_width_m: -500.0\n").is_err());
        assert!(WindConfig::from_yaml("no_such_field: 1\n").is_err());
    }
}
