use crate::errors::AppError;
use crate::models::{DayRecord, ViewLog};
use crate::source::DailyCountSource;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

impl ViewLog {
    /// Adds one view to `date` and returns that day's new count.
    pub fn record_view(&mut self, date: NaiveDate) -> u64 {
        let entry = self.days.entry(date_key(date)).or_default();
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn count_on(&self, date: NaiveDate) -> u64 {
        self.by_date().get(&date).copied().unwrap_or_default()
    }

    pub fn first_recorded(&self) -> Option<NaiveDate> {
        self.by_date().keys().next().copied()
    }

    /// Keys spelling the same day differently are summed.
    pub fn by_date(&self) -> BTreeMap<NaiveDate, u64> {
        let mut counts = BTreeMap::new();
        for (key, &count) in &self.days {
            if let Some(date) = parse_key(key) {
                let entry: &mut u64 = counts.entry(date).or_default();
                *entry = entry.saturating_add(count);
            }
        }
        counts
    }

    /// Rewrites every parseable key in `YYYY-MM-DD` form.
    pub fn normalized(self) -> Self {
        let mut days: BTreeMap<String, u64> = self
            .by_date()
            .into_iter()
            .map(|(date, count)| (date_key(date), count))
            .collect();
        for (key, count) in self.days {
            if parse_key(&key).is_none() {
                warn!(%key, "ignoring unparseable day in view log");
                days.insert(key, count);
            }
        }
        Self { days }
    }
}

impl DailyCountSource for ViewLog {
    fn daily_counts(&self, window: usize, today: NaiveDate) -> Vec<DayRecord> {
        if window == 0 {
            return Vec::new();
        }
        let counts = self.by_date();
        let Some(&first) = counts.keys().next() else {
            return Vec::new();
        };

        // A window reaching past the calendar's lower bound starts at the first recorded day.
        let start = u64::try_from(window - 1)
            .ok()
            .and_then(|back| today.checked_sub_days(Days::new(back)))
            .map_or(first, |window_start| first.max(window_start));
        start
            .iter_days()
            .take_while(|date| *date <= today)
            .map(|date| DayRecord::new(date, counts.get(&date).copied().unwrap_or_default()))
            .collect()
    }
}

pub async fn load_data(path: &Path) -> ViewLog {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<ViewLog>(&bytes) {
            Ok(data) => data.normalized(),
            Err(err) => {
                error!("failed to parse view log: {err}");
                ViewLog::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ViewLog::default(),
        Err(err) => {
            error!("failed to read view log: {err}");
            ViewLog::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &ViewLog) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}
