use crate::models::DayRecord;
use chrono::NaiveDate;

/// At most `window` contiguous days ending on `today`, oldest first.
pub trait DailyCountSource {
    fn daily_counts(&self, window: usize, today: NaiveDate) -> Vec<DayRecord>;
}
