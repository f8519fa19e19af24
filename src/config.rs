use crate::heatmap::HeatmapAggregator;
use crate::level::{LevelClassifier, LevelScale};
use crate::weeks::{WeekBucketer, WeekStart};
use std::{env, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DAYS: usize = 53;
pub const MAX_DAYS: usize = 365;
/// Upper bound accepted for any configured window, ten years of days.
pub const DAYS_CEILING: usize = 3660;

#[derive(Debug, Error)]
#[error("invalid {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(key: &'static str, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub default_days: usize,
    pub max_days: usize,
    pub week_start: WeekStart,
    pub level_scale: LevelScale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from("data/views.json"),
            default_days: DEFAULT_DAYS,
            max_days: MAX_DAYS,
            week_start: WeekStart::default(),
            level_scale: LevelScale::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|err| ConfigError::new("PORT", format!("{err}")))?;
        }
        if let Some(value) = lookup("APP_DATA_PATH") {
            config.data_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("HEATMAP_MAX_DAYS") {
            config.max_days = parse_days("HEATMAP_MAX_DAYS", &value)?;
        }
        if let Some(value) = lookup("HEATMAP_DEFAULT_DAYS") {
            config.default_days = parse_days("HEATMAP_DEFAULT_DAYS", &value)?;
        }
        if config.default_days > config.max_days {
            return Err(ConfigError::new(
                "HEATMAP_DEFAULT_DAYS",
                format!("{} exceeds max of {}", config.default_days, config.max_days),
            ));
        }
        if let Some(value) = lookup("HEATMAP_WEEK_START") {
            config.week_start = match value.trim().to_ascii_lowercase().as_str() {
                "sunday" => WeekStart::Sunday,
                "monday" => WeekStart::Monday,
                other => {
                    return Err(ConfigError::new(
                        "HEATMAP_WEEK_START",
                        format!("'{other}', expected 'sunday' or 'monday'"),
                    ));
                }
            };
        }

        let thresholds = match lookup("HEATMAP_LEVEL_THRESHOLDS") {
            Some(value) => value
                .parse::<LevelClassifier>()
                .map_err(|err| ConfigError::new("HEATMAP_LEVEL_THRESHOLDS", err.to_string()))?,
            None => LevelClassifier::default(),
        };
        config.level_scale = match lookup("HEATMAP_LEVEL_SCALE").as_deref().map(str::trim) {
            None | Some("fixed") => LevelScale::Fixed(thresholds),
            Some("relative") => LevelScale::RelativeToMax,
            Some(other) => {
                return Err(ConfigError::new(
                    "HEATMAP_LEVEL_SCALE",
                    format!("'{other}', expected 'fixed' or 'relative'"),
                ));
            }
        };

        Ok(config)
    }

    /// Missing or zero means the default window.
    pub fn window(&self, requested: Option<usize>) -> usize {
        match requested {
            None | Some(0) => self.default_days,
            Some(days) => days.min(self.max_days),
        }
    }

    pub fn aggregator(&self) -> HeatmapAggregator {
        HeatmapAggregator::new(self.level_scale, WeekBucketer::new(self.week_start))
    }
}

fn parse_days(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::new(key, "must be at least 1")),
        Ok(days) if days > DAYS_CEILING => Err(ConfigError::new(
            key,
            format!("{days} exceeds the limit of {DAYS_CEILING}"),
        )),
        Ok(days) => Ok(days),
        Err(err) => Err(ConfigError::new(key, err.to_string())),
    }
}
