//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Every analysis threshold lives in [`AnalysisConfig`] so callers and tests
//! can exercise boundary behavior without touching analyzer code.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds and windows consumed by the analyzers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub trend: TrendConfig,

    #[serde(default)]
    pub correlation: CorrelationConfig,

    #[serde(default)]
    pub trigger: TriggerConfig,

    #[serde(default)]
    pub pattern: PatternConfig,

    #[serde(default)]
    pub insight: InsightConfig,
}

/// Trend fitting and first-half/second-half comparison parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Raw samples required before a trend line is fitted
    pub min_samples: usize,
    /// Weekly points required before a trend line is fitted
    pub min_points: usize,
    /// Confidence at or above which a non-negative slope is "High"
    pub high_significance_confidence: f64,

    pub bristol_threshold: f64,
    pub pain_threshold: f64,
    pub strain_threshold: f64,
    pub satisfaction_threshold: f64,
    pub bowel_frequency_threshold: f64,
    pub symptom_severity_threshold: f64,
    pub symptom_frequency_threshold: f64,
    pub calorie_threshold: f64,
    pub meal_frequency_threshold: f64,

    /// Mean polarity-adjusted slope beyond which the overall verdict moves
    pub overall_threshold: f64,

    /// Days in the health-score moving average
    pub moving_average_window: usize,
    /// Relative change between halves needed to leave "stable"
    pub direction_change_ratio: f64,

    /// Samples per domain before significant-trend statements are produced
    pub significant_min_samples: usize,
    pub bowel_frequency_change: f64,
    pub bristol_change: f64,
    pub fiber_change: f64,
    pub calorie_change: f64,
    pub severity_change: f64,
    pub max_significant_trends: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_samples: 3,
            min_points: 2,
            high_significance_confidence: 0.7,
            bristol_threshold: 0.1,
            pain_threshold: 0.1,
            strain_threshold: 0.1,
            satisfaction_threshold: 0.1,
            bowel_frequency_threshold: 0.5,
            symptom_severity_threshold: 0.1,
            symptom_frequency_threshold: 0.5,
            calorie_threshold: 50.0,
            meal_frequency_threshold: 0.5,
            overall_threshold: 0.1,
            moving_average_window: 7,
            direction_change_ratio: 0.10,
            significant_min_samples: 5,
            bowel_frequency_change: 0.25,
            bristol_change: 1.0,
            fiber_change: 0.20,
            calorie_change: 0.15,
            severity_change: 0.25,
            max_significant_trends: 5,
        }
    }
}

/// Daily correlation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Aligned daily points required for a coefficient
    pub min_days: usize,
    /// |r| below this is "weak"
    pub weak_max: f64,
    /// |r| at or above this is "strong"
    pub strong_min: f64,
    /// Spicy level above which a meal counts as spicy in daily counts
    pub spicy_meal_level: u8,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_days: 3,
            weak_max: 0.3,
            strong_min: 0.6,
            spicy_meal_level: 2,
        }
    }
}

/// Trigger detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Look-ahead after a meal in which symptoms and bowel events are attributed to it
    pub window_hours: i64,
    /// Spicy level above which the "spicy_food" label applies
    pub spicy_level: u8,
    pub high_calorie: f64,
    pub late_eating_hour: u32,
    /// Multiple of the mean meal size above which a meal is "large"
    pub large_meal_factor: f64,
    pub food_symptom_min: f64,
    pub food_bowel_min: f64,
    pub timing_symptom_min: f64,
    pub timing_bowel_min: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            spicy_level: 5,
            high_calorie: 800.0,
            late_eating_hour: 20,
            large_meal_factor: 1.5,
            food_symptom_min: 0.2,
            food_bowel_min: 0.3,
            timing_symptom_min: 0.15,
            timing_bowel_min: 0.2,
        }
    }
}

/// Descriptive pattern parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Window after a meal in which a bowel event counts as meal-related
    pub meal_bowel_window_hours: i64,
    /// Mentions in symptom trigger lists before a dietary flag is a problem ingredient
    pub min_problem_mentions: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            meal_bowel_window_hours: 4,
            min_problem_mentions: 2,
        }
    }
}

/// Insight and recommendation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub min_bowel_events: usize,
    pub constipation_ratio: f64,
    pub loose_stool_ratio: f64,
    pub min_meals: usize,
    /// Occurrences of a meal hour that make it a regular hour
    pub regular_hour_count: usize,
    pub min_symptoms: usize,
    /// Symptoms in one day that make it a busy day
    pub cluster_day_size: usize,
    /// Busy days needed for a clustering insight
    pub cluster_days: usize,
    /// Symptoms in a single day that alone trigger a clustering insight
    pub cluster_peak: usize,
    pub correlation_confidence: f64,
    pub correlation_strength: f64,
    pub trend_confidence: f64,
    /// Confidence above which insights are HIGH priority
    pub high_priority_confidence: f64,
    /// Adherence percentage below which an adherence insight fires
    pub adherence_percent: f64,
    pub max_insights: usize,
    pub max_recommendations: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            min_bowel_events: 7,
            constipation_ratio: 0.5,
            loose_stool_ratio: 0.4,
            min_meals: 7,
            regular_hour_count: 3,
            min_symptoms: 5,
            cluster_day_size: 3,
            cluster_days: 2,
            cluster_peak: 4,
            correlation_confidence: 0.7,
            correlation_strength: 0.5,
            trend_confidence: 0.6,
            high_priority_confidence: 0.8,
            adherence_percent: 80.0,
            max_insights: 10,
            max_recommendations: 5,
        }
    }
}

impl AnalysisConfig {
    /// Check that thresholds are internally consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trend.min_points < 2 {
            return Err(ConfigError::Invalid(
                "trend.min_points must be at least 2".to_string(),
            ));
        }
        if self.trend.moving_average_window == 0 {
            return Err(ConfigError::Invalid(
                "trend.moving_average_window must be positive".to_string(),
            ));
        }
        if self.correlation.min_days < 2 {
            return Err(ConfigError::Invalid(
                "correlation.min_days must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.correlation.weak_max)
            || !(0.0..=1.0).contains(&self.correlation.strong_min)
            || self.correlation.weak_max > self.correlation.strong_min
        {
            return Err(ConfigError::Invalid(format!(
                "correlation cut points must satisfy 0 <= weak_max ({}) <= strong_min ({}) <= 1",
                self.correlation.weak_max, self.correlation.strong_min
            )));
        }
        if self.trigger.window_hours <= 0 {
            return Err(ConfigError::Invalid(
                "trigger.window_hours must be positive".to_string(),
            ));
        }
        if self.trigger.late_eating_hour > 23 {
            return Err(ConfigError::Invalid(
                "trigger.late_eating_hour must be between 0 and 23".to_string(),
            ));
        }
        if self.pattern.meal_bowel_window_hours <= 0 {
            return Err(ConfigError::Invalid(
                "pattern.meal_bowel_window_hours must be positive".to_string(),
            ));
        }
        if self.insight.max_recommendations == 0 {
            return Err(ConfigError::Invalid(
                "insight.max_recommendations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.analysis.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.analysis.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("health-analytics").join("config.toml")),
            Some(PathBuf::from("./health-analytics.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("HEALTH_ANALYTICS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HEALTH_ANALYTICS_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(hours) = std::env::var("HEALTH_ANALYTICS_TRIGGER_WINDOW_HOURS") {
            if let Ok(h) = hours.parse() {
                self.analysis.trigger.window_hours = h;
            }
        }
        if let Ok(max) = std::env::var("HEALTH_ANALYTICS_MAX_INSIGHTS") {
            if let Ok(m) = max.parse() {
                self.analysis.insight.max_insights = m;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid analysis threshold: {0}")]
    Invalid(String),
}

/// Generate a default config file content
///
/// Lists every setting with its default value.
pub fn generate_default_config() -> String {
    r#"# Health Analytics Configuration
#
# Environment variables override these settings:
# - HEALTH_ANALYTICS_LOG_LEVEL
# - HEALTH_ANALYTICS_LOG_FORMAT
# - HEALTH_ANALYTICS_TRIGGER_WINDOW_HOURS
# - HEALTH_ANALYTICS_MAX_INSIGHTS

[analysis.trend]
# Minimum raw samples and weekly points before a trend line is fitted
min_samples = 3
min_points = 2

# Confidence needed for "High" significance
high_significance_confidence = 0.7

# Slope magnitude below which a trend is stable
bristol_threshold = 0.1
pain_threshold = 0.1
strain_threshold = 0.1
satisfaction_threshold = 0.1
bowel_frequency_threshold = 0.5
symptom_severity_threshold = 0.1
symptom_frequency_threshold = 0.5
calorie_threshold = 50.0
meal_frequency_threshold = 0.5

# Mean polarity-adjusted slope beyond which the overall verdict moves
overall_threshold = 0.1

# Health-score direction: moving average days and relative change between halves
moving_average_window = 7
direction_change_ratio = 0.10

# Significant-change statements: samples needed, relative or absolute
# change between halves, and how many statements to keep
significant_min_samples = 5
bowel_frequency_change = 0.25
bristol_change = 1.0
fiber_change = 0.20
calorie_change = 0.15
severity_change = 0.25
max_significant_trends = 5

[analysis.correlation]
# Aligned days needed before a coefficient is reported
min_days = 3

# Strength cut points on |r|
weak_max = 0.3
strong_min = 0.6

# Spicy level above which a meal counts as spicy in daily counts
spicy_meal_level = 2

[analysis.trigger]
# Hours after a meal in which symptoms and bowel events are attributed to it
window_hours = 24

# Spicy level above which "spicy_food" applies
spicy_level = 5

# Calories above which "high_calorie" applies
high_calorie = 800.0

# Hour of day from which a meal counts as late eating
late_eating_hour = 20

# Multiple of the mean meal size above which a meal is "large"
large_meal_factor = 1.5

# Minimum attributed symptom and bowel rates for food triggers
food_symptom_min = 0.2
food_bowel_min = 0.3

# Minimum attributed symptom and bowel rates for timing triggers
timing_symptom_min = 0.15
timing_bowel_min = 0.2

[analysis.pattern]
# Hours after a meal in which a bowel movement counts as meal-related
meal_bowel_window_hours = 4

# Mentions in symptom trigger lists before a dietary flag is a problem ingredient
min_problem_mentions = 2

[analysis.insight]
# Bowel events needed, and the constipation and loose-stool shares that fire insights
min_bowel_events = 7
constipation_ratio = 0.5
loose_stool_ratio = 0.4

# Meals needed, and occurrences of an hour that make it a regular meal time
min_meals = 7
regular_hour_count = 3

# Symptom clustering: symptoms needed, busy-day size, busy days, single-day peak
min_symptoms = 5
cluster_day_size = 3
cluster_days = 2
cluster_peak = 4

# Confidence and strength a correlation or trend needs to become an insight
correlation_confidence = 0.7
correlation_strength = 0.5
trend_confidence = 0.6

# Confidence above which insights are HIGH priority
high_priority_confidence = 0.8

# Adherence percentage below which an adherence insight fires
adherence_percent = 80.0

# Maximum insights kept in a report
max_insights = 10

# Maximum recommendations returned by the simple path
max_recommendations = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Environment variables are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 4] = [
        "HEALTH_ANALYTICS_LOG_LEVEL",
        "HEALTH_ANALYTICS_LOG_FORMAT",
        "HEALTH_ANALYTICS_TRIGGER_WINDOW_HOURS",
        "HEALTH_ANALYTICS_MAX_INSIGHTS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.analysis.validate().is_ok());
        assert_eq!(config.analysis.trigger.window_hours, 24);
        assert_eq!(config.analysis.pattern.meal_bowel_window_hours, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_generated_config_lists_every_setting() {
        let generated: toml::Value = toml::from_str(&generate_default_config()).unwrap();
        let defaults = toml::Value::try_from(Config::default()).unwrap();
        assert_eq!(generated, defaults);
    }

    #[test]
    fn test_load_with_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[analysis.trigger]\nwindow_hours = 6\n\n[analysis.insight]\nmax_insights = 4\n"
        )
        .unwrap();

        std::env::set_var("HEALTH_ANALYTICS_LOG_LEVEL", "debug");
        std::env::set_var("HEALTH_ANALYTICS_LOG_FORMAT", "json");
        std::env::set_var("HEALTH_ANALYTICS_TRIGGER_WINDOW_HOURS", "12");
        std::env::set_var("HEALTH_ANALYTICS_MAX_INSIGHTS", "3");
        let config = Config::load_with_env(file.path());
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.analysis.trigger.window_hours, 12);
        assert_eq!(config.analysis.insight.max_insights, 3);

        // unparsable values are ignored
        std::env::set_var("HEALTH_ANALYTICS_TRIGGER_WINDOW_HOURS", "a day");
        std::env::set_var("HEALTH_ANALYTICS_MAX_INSIGHTS", "-3");
        let config = Config::load_with_env(file.path());
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.analysis.trigger.window_hours, 6);
        assert_eq!(config.analysis.insight.max_insights, 4);
        assert_eq!(config.logging.level, "info");

        // parsable but invalid values fail validation
        std::env::set_var("HEALTH_ANALYTICS_TRIGGER_WINDOW_HOURS", "0");
        let result = Config::load_with_env(file.path());
        clear_env();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_env_applies_overrides_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("HEALTH_ANALYTICS_MAX_INSIGHTS", "7");
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.analysis.insight.max_insights, 7);
        assert_eq!(config.analysis.trigger.window_hours, 24);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis.trigger]\nwindow_hours = 6\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.analysis.trigger.window_hours, 6);
        // untouched fields keep their defaults
        assert_eq!(config.analysis.trigger.spicy_level, 5);
        assert_eq!(config.analysis.correlation.min_days, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/health.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis.trigger\nwindow_hours = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis.correlation]\nweak_max = 0.8\nstrong_min = 0.4\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_window() {
        let mut config = AnalysisConfig::default();
        config.trigger.window_hours = 0;
        assert!(config.validate().is_err());

        config.trigger.window_hours = 4;
        config.trend.moving_average_window = 0;
        assert!(config.validate().is_err());
    }
}
