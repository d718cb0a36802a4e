use serde::{Deserialize, Serialize};

/// Most candidate steps allowed on each side of the direct bearing.
pub const MAX_FAN_STEPS: u32 = 3600;

/// Tunables as written in a settings file. Angles are in degrees.
///
/// Turn these into a [PlannerConfig] with `PlannerConfig::try_from`, which is
/// where out-of-range values are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Minimum clearance between a probe leg and any obstacle surface.
    pub margin: f64,
    /// Step between neighbouring candidate bearings.
    pub angle_increment_deg: f64,
    /// Half-width of the fan of candidate bearings around the direct path.
    pub max_deviation_angle_deg: f64,
    /// Seconds of travel the lookahead should cover at the current speed.
    pub lookahead_time_constant: f64,
    pub min_lookahead: f64,
    pub max_lookahead: f64,
    /// How much further off the direct path a previous bearing may be than
    /// the new winner and still be kept.
    pub resist_margin_deg: f64,
    /// Consecutive ticks with a clear direct path before avoidance ends.
    pub clear_debounce_ticks: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            margin: 2.0,
            angle_increment_deg: 5.0,
            max_deviation_angle_deg: 170.0,
            lookahead_time_constant: 3.0,
            min_lookahead: 7.5,
            max_lookahead: 15.0,
            resist_margin_deg: 15.0,
            clear_debounce_ticks: 3,
        }
    }
}

impl PlannerSettings {
    pub fn from_toml_str(s: &str) -> Result<PlannerSettings, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("margin must be positive, got {0}")]
    Margin(f64),

    #[error("angle increment must be positive, got {0} degrees")]
    AngleIncrement(f64),

    #[error("max deviation angle must be in (0, 180] degrees, got {0}")]
    MaxDeviation(f64),

    #[error("angle increment ({increment} degrees) exceeds max deviation angle ({max_deviation} degrees)")]
    IncrementExceedsDeviation { increment: f64, max_deviation: f64 },

    #[error("angle increment ({increment} degrees) gives {steps:.0} steps per side, more than {max}")]
    TooManySteps { increment: f64, steps: f64, max: u32 },

    #[error("lookahead time constant must be non-negative, got {0}")]
    LookaheadTimeConstant(f64),

    #[error("min lookahead must be positive, got {0}")]
    MinLookahead(f64),

    #[error("min lookahead ({min}) is greater than max lookahead ({max})")]
    LookaheadRange { min: f64, max: f64 },

    #[error("resist margin must be non-negative, got {0} degrees")]
    ResistMargin(f64),

    #[error("failed to parse planner settings")]
    Parse(#[from] toml::de::Error),
}

/// Validated planner tunables. Angles are in radians.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    margin: f64,
    angle_increment: f64,
    max_deviation_angle: f64,
    lookahead_time_constant: f64,
    min_lookahead: f64,
    max_lookahead: f64,
    resist_margin: f64,
    clear_debounce_ticks: u32,
}

impl PlannerConfig {
    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn angle_increment(&self) -> f64 {
        self.angle_increment
    }

    pub fn max_deviation_angle(&self) -> f64 {
        self.max_deviation_angle
    }

    pub fn lookahead_time_constant(&self) -> f64 {
        self.lookahead_time_constant
    }

    pub fn min_lookahead(&self) -> f64 {
        self.min_lookahead
    }

    pub fn max_lookahead(&self) -> f64 {
        self.max_lookahead
    }

    pub fn resist_margin(&self) -> f64 {
        self.resist_margin
    }

    pub fn clear_debounce_ticks(&self) -> u32 {
        self.clear_debounce_ticks
    }

    /// Number of candidate steps on each side of the direct bearing. Never
    /// more than [MAX_FAN_STEPS].
    pub fn fan_steps(&self) -> u32 {
        // Tolerate 170/5 landing a hair under 34.
        ((self.max_deviation_angle / self.angle_increment) + 1e-9).floor() as u32
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let settings = PlannerSettings::default();
        PlannerConfig {
            margin: settings.margin,
            angle_increment: settings.angle_increment_deg.to_radians(),
            max_deviation_angle: settings.max_deviation_angle_deg.to_radians(),
            lookahead_time_constant: settings.lookahead_time_constant,
            min_lookahead: settings.min_lookahead,
            max_lookahead: settings.max_lookahead,
            resist_margin: settings.resist_margin_deg.to_radians(),
            clear_debounce_ticks: settings.clear_debounce_ticks,
        }
    }
}

// NaN and infinities fail both.
fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

impl TryFrom<PlannerSettings> for PlannerConfig {
    type Error = ConfigError;

    fn try_from(s: PlannerSettings) -> Result<Self, Self::Error> {
        if !positive(s.margin) {
            return Err(ConfigError::Margin(s.margin));
        }
        if !positive(s.angle_increment_deg) {
            return Err(ConfigError::AngleIncrement(s.angle_increment_deg));
        }
        if !(positive(s.max_deviation_angle_deg) && s.max_deviation_angle_deg <= 180.0) {
            return Err(ConfigError::MaxDeviation(s.max_deviation_angle_deg));
        }
        if s.angle_increment_deg > s.max_deviation_angle_deg {
            return Err(ConfigError::IncrementExceedsDeviation {
                increment: s.angle_increment_deg,
                max_deviation: s.max_deviation_angle_deg,
            });
        }
        let steps = s.max_deviation_angle_deg / s.angle_increment_deg;
        if steps > MAX_FAN_STEPS as f64 + 1e-9 {
            return Err(ConfigError::TooManySteps {
                increment: s.angle_increment_deg,
                steps,
                max: MAX_FAN_STEPS,
            });
        }
        if !non_negative(s.lookahead_time_constant) {
            return Err(ConfigError::LookaheadTimeConstant(
                s.lookahead_time_constant,
            ));
        }
        if !positive(s.min_lookahead) {
            return Err(ConfigError::MinLookahead(s.min_lookahead));
        }
        if !positive(s.max_lookahead) || s.min_lookahead > s.max_lookahead {
            return Err(ConfigError::LookaheadRange {
                min: s.min_lookahead,
                max: s.max_lookahead,
            });
        }
        if !non_negative(s.resist_margin_deg) {
            return Err(ConfigError::ResistMargin(s.resist_margin_deg));
        }

        Ok(PlannerConfig {
            margin: s.margin,
            angle_increment: s.angle_increment_deg.to_radians(),
            max_deviation_angle: s.max_deviation_angle_deg.to_radians(),
            lookahead_time_constant: s.lookahead_time_constant,
            min_lookahead: s.min_lookahead,
            max_lookahead: s.max_lookahead,
            resist_margin: s.resist_margin_deg.to_radians(),
            clear_debounce_ticks: s.clear_debounce_ticks,
        })
    }
}

impl From<&PlannerConfig> for PlannerSettings {
    fn from(c: &PlannerConfig) -> Self {
        PlannerSettings {
            margin: c.margin,
            angle_increment_deg: c.angle_increment.to_degrees(),
            max_deviation_angle_deg: c.max_deviation_angle.to_degrees(),
            lookahead_time_constant: c.lookahead_time_constant,
            min_lookahead: c.min_lookahead,
            max_lookahead: c.max_lookahead,
            resist_margin_deg: c.resist_margin.to_degrees(),
            clear_debounce_ticks: c.clear_debounce_ticks,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_log::test;

    fn check(settings: PlannerSettings) -> Result<PlannerConfig, ConfigError> {
        PlannerConfig::try_from(settings)
    }

    #[test]
    fn test_defaults_validate() {
        let config = check(PlannerSettings::default()).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.fan_steps(), 34);
        assert_abs_diff_eq!(config.angle_increment(), 5.0f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = PlannerSettings::default;

        assert!(matches!(
            check(PlannerSettings { margin: 0.0, ..base() }),
            Err(ConfigError::Margin(_))
        ));
        assert!(matches!(
            check(PlannerSettings { margin: f64::NAN, ..base() }),
            Err(ConfigError::Margin(_))
        ));
        assert!(matches!(
            check(PlannerSettings { angle_increment_deg: -1.0, ..base() }),
            Err(ConfigError::AngleIncrement(_))
        ));
        assert!(matches!(
            check(PlannerSettings { max_deviation_angle_deg: 190.0, ..base() }),
            Err(ConfigError::MaxDeviation(_))
        ));
        assert!(matches!(
            check(PlannerSettings {
                angle_increment_deg: 20.0,
                max_deviation_angle_deg: 10.0,
                ..base()
            }),
            Err(ConfigError::IncrementExceedsDeviation { .. })
        ));
        // A vanishing increment would otherwise leave a fan too wide to walk.
        assert!(matches!(
            check(PlannerSettings { angle_increment_deg: 1e-8, ..base() }),
            Err(ConfigError::TooManySteps { .. })
        ));
        assert!(matches!(
            check(PlannerSettings { angle_increment_deg: 0.04, ..base() }),
            Err(ConfigError::TooManySteps { .. })
        ));
        assert!(matches!(
            check(PlannerSettings { lookahead_time_constant: -0.5, ..base() }),
            Err(ConfigError::LookaheadTimeConstant(_))
        ));
        assert!(matches!(
            check(PlannerSettings { min_lookahead: 0.0, ..base() }),
            Err(ConfigError::MinLookahead(_))
        ));
        assert!(matches!(
            check(PlannerSettings {
                min_lookahead: 20.0,
                max_lookahead: 10.0,
                ..base()
            }),
            Err(ConfigError::LookaheadRange { .. })
        ));
        assert!(matches!(
            check(PlannerSettings { resist_margin_deg: -1.0, ..base() }),
            Err(ConfigError::ResistMargin(_))
        ));
    }

    #[test]
    fn test_finest_fan_accepted() {
        let config = check(PlannerSettings {
            angle_increment_deg: 0.05,
            max_deviation_angle_deg: 180.0,
            ..PlannerSettings::default()
        })
        .unwrap();
        assert_eq!(config.fan_steps(), MAX_FAN_STEPS);
    }

    #[test]
    fn test_error_messages() {
        let err = check(PlannerSettings {
            min_lookahead: 20.0,
            max_lookahead: 10.0,
            ..PlannerSettings::default()
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "min lookahead (20) is greater than max lookahead (10)"
        );
    }

    #[test]
    fn test_from_toml() {
        let settings = PlannerSettings::from_toml_str(
            r#"
            margin = 1.5
            angle_increment_deg = 10.0
            clear_debounce_ticks = 5
            "#,
        )
        .unwrap();
        assert_eq!(settings.margin, 1.5);
        assert_eq!(settings.angle_increment_deg, 10.0);
        assert_eq!(settings.clear_debounce_ticks, 5);
        // Unset fields fall back to defaults.
        assert_eq!(settings.max_lookahead, 15.0);

        let config = PlannerConfig::try_from(settings).unwrap();
        assert_eq!(config.fan_steps(), 17);

        assert!(matches!(
            PlannerSettings::from_toml_str("margin = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_settings_round_trip_through_config() {
        let config = PlannerConfig::default();
        let settings = PlannerSettings::from(&config);
        assert_abs_diff_eq!(settings.resist_margin_deg, 15.0, epsilon = 1e-9);
        let again = PlannerConfig::try_from(settings).unwrap();
        assert_abs_diff_eq!(again.resist_margin(), config.resist_margin(), epsilon = 1e-12);
        assert_eq!(again.fan_steps(), config.fan_steps());
    }
}
