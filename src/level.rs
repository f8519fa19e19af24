use crate::errors::HeatmapError;
use crate::models::{ClassifiedDay, DayRecord, LegendEntry};
use std::str::FromStr;

pub const MAX_LEVEL: u8 = 4;

/// Lower bounds of levels 1 through 4.
pub const DEFAULT_THRESHOLDS: [u64; 4] = [1, 3, 6, 9];

/// Zero is level 0; any positive count is at least level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelClassifier {
    thresholds: [u64; 4],
}

impl LevelClassifier {
    pub fn new(thresholds: [u64; 4]) -> Result<Self, HeatmapError> {
        if thresholds[0] == 0 {
            return Err(HeatmapError::InvalidThresholds(
                "lowest bound must be at least 1".to_string(),
            ));
        }
        if thresholds.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(HeatmapError::InvalidThresholds(format!(
                "bounds must be ascending, got {thresholds:?}"
            )));
        }
        Ok(Self { thresholds })
    }

    /// Bands at 20/40/60/80 percent of `max`, so `max` itself lands on the top level.
    pub fn scaled_to_max(max: u64) -> Self {
        let band = |fifths: u128| ((u128::from(max) * fifths) / 5) as u64 + 1;
        Self {
            thresholds: [1, band(2), band(3), band(4)],
        }
    }

    pub fn thresholds(&self) -> [u64; 4] {
        self.thresholds
    }

    pub fn classify(&self, count: u64) -> u8 {
        if count == 0 {
            return 0;
        }
        let reached = self
            .thresholds
            .iter()
            .filter(|&&bound| count >= bound)
            .count() as u8;
        reached.max(1)
    }

    pub fn classify_day(&self, day: &DayRecord) -> ClassifiedDay {
        ClassifiedDay {
            date: day.date,
            count: day.count,
            level: self.classify(day.count),
        }
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        std::iter::once(LegendEntry {
            level: 0,
            min_count: 0,
        })
        .chain(
            self.thresholds
                .iter()
                .zip(1..=MAX_LEVEL)
                .map(|(&min_count, level)| LegendEntry { level, min_count }),
        )
        .collect()
    }
}

impl Default for LevelClassifier {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS,
        }
    }
}

impl FromStr for LevelClassifier {
    type Err = HeatmapError;

    /// Parses four comma-separated lower bounds, e.g. `1,3,6,9`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let bounds = value
            .split(',')
            .map(|part| {
                part.trim().parse::<u64>().map_err(|err| {
                    HeatmapError::InvalidThresholds(format!("'{}': {err}", part.trim()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let thresholds: [u64; 4] = bounds.try_into().map_err(|bounds: Vec<u64>| {
            HeatmapError::InvalidThresholds(format!("expected 4 bounds, got {}", bounds.len()))
        })?;
        Self::new(thresholds)
    }
}

pub fn classify(count: u64) -> u8 {
    LevelClassifier::default().classify(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelScale {
    Fixed(LevelClassifier),
    /// Bounds follow the busiest day of each series.
    RelativeToMax,
}

impl LevelScale {
    pub fn classifier_for(&self, days: &[DayRecord]) -> LevelClassifier {
        match self {
            LevelScale::Fixed(classifier) => *classifier,
            LevelScale::RelativeToMax => {
                let max = days.iter().map(|day| day.count).max().unwrap_or(0);
                LevelClassifier::scaled_to_max(max)
            }
        }
    }
}

impl Default for LevelScale {
    fn default() -> Self {
        LevelScale::Fixed(LevelClassifier::default())
    }
}
