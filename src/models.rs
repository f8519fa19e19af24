use crate::diagnostics::Diagnostic;
use crate::errors::HeatmapError;
use crate::heatmap::Aggregation;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Recorded views keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewLog {
    pub days: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDayCount {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub count: u64,
}

impl DayRecord {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

impl TryFrom<&RawDayCount> for DayRecord {
    type Error = HeatmapError;

    fn try_from(raw: &RawDayCount) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").map_err(|_| {
            HeatmapError::InvalidDate {
                date: raw.date.clone(),
            }
        })?;
        let count = u64::try_from(raw.count).map_err(|_| HeatmapError::NegativeCount {
            date: raw.date.clone(),
            count: raw.count,
        })?;
        Ok(Self { date, count })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedDay {
    pub date: NaiveDate,
    pub count: u64,
    pub level: u8,
}

impl ClassifiedDay {
    /// Tooltip text, e.g. `3 views on Fri, Jan 5`.
    pub fn describe(&self) -> String {
        format!(
            "{} on {}",
            views_phrase(self.count),
            self.date.format("%a, %b %-d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct WeekColumn {
    pub days: Vec<ClassifiedDay>,
}

impl WeekColumn {
    pub fn first_day(&self) -> Option<&ClassifiedDay> {
        self.days.first()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
}

impl MonthLabel {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            name: MONTH_NAMES[date.month0() as usize],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct HeatmapViewModel {
    pub weeks: Vec<WeekColumn>,
    pub month_labels: Vec<Option<MonthLabel>>,
    pub total_count: u64,
}

impl HeatmapViewModel {
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(WeekColumn::len).sum()
    }

    pub fn days(&self) -> impl Iterator<Item = &ClassifiedDay> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// Header text, e.g. `21 views in the last 10 days`.
    pub fn headline(&self, requested_days: usize) -> String {
        format!(
            "{} in the last {requested_days} days",
            views_phrase(self.total_count)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub level: u8,
    pub min_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct HeatmapRequest {
    pub requested_days: usize,
    pub days: Vec<RawDayCount>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub requested_days: usize,
    pub headline: String,
    #[serde(flatten)]
    pub view: HeatmapViewModel,
    pub diagnostics: Vec<Diagnostic>,
}

impl HeatmapResponse {
    pub fn new(requested_days: usize, aggregation: Aggregation) -> Self {
        Self {
            requested_days,
            headline: aggregation.view.headline(requested_days),
            view: aggregation.view,
            diagnostics: aggregation.diagnostics,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewCountResponse {
    pub date: String,
    pub count: u64,
}

fn views_phrase(count: u64) -> String {
    if count == 1 {
        "1 view".to_string()
    } else {
        format!("{count} views")
    }
}
