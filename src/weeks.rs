use crate::models::{ClassifiedDay, MonthLabel, WeekColumn};
use chrono::{Datelike, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn offset(self, date: NaiveDate) -> usize {
        let days = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        days as usize
    }
}

/// Only edge columns may be short; days are never padded.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekBucketer {
    week_start: WeekStart,
}

impl WeekBucketer {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn bucket(&self, days: &[ClassifiedDay]) -> (Vec<WeekColumn>, Vec<Option<MonthLabel>>) {
        let weeks = self.columns(days);
        let labels = month_labels(&weeks);
        (weeks, labels)
    }

    pub fn columns(&self, days: &[ClassifiedDay]) -> Vec<WeekColumn> {
        let Some(first) = days.first() else {
            return Vec::new();
        };

        let lead = (DAYS_PER_WEEK - self.week_start.offset(first.date)).min(days.len());
        let (head, rest) = days.split_at(lead);

        std::iter::once(head)
            .chain(rest.chunks(DAYS_PER_WEEK))
            .map(|chunk| WeekColumn {
                days: chunk.to_vec(),
            })
            .collect()
    }
}

// Only first days are compared, so a month starting mid-week is labelled one column later.
pub fn month_labels(weeks: &[WeekColumn]) -> Vec<Option<MonthLabel>> {
    weeks
        .iter()
        .enumerate()
        .map(|(index, week)| {
            let first = week.first_day()?;
            if index == 0 {
                return Some(MonthLabel::of(first.date));
            }
            let previous = weeks[index - 1].first_day()?;
            (!same_month(previous.date, first.date)).then(|| MonthLabel::of(first.date))
        })
        .collect()
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn series(start: NaiveDate, len: usize) -> Vec<ClassifiedDay> {
        (0..len)
            .map(|offset| ClassifiedDay {
                date: start + Duration::days(offset as i64),
                count: 0,
                level: 0,
            })
            .collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn lengths(weeks: &[WeekColumn]) -> Vec<usize> {
        weeks.iter().map(WeekColumn::len).collect()
    }

    fn label_names(labels: &[Option<MonthLabel>]) -> Vec<Option<&'static str>> {
        labels.iter().map(|label| label.map(|l| l.name)).collect()
    }

    #[test]
    fn empty_series_has_no_columns() {
        let (weeks, labels) = WeekBucketer::default().bucket(&[]);
        assert!(weeks.is_empty());
        assert!(labels.is_empty());
    }

    #[test]
    fn sunday_start_fills_whole_weeks() {
        // 2026-02-01 is a Sunday.
        let days = series(date(2026, 2, 1), 14);
        let weeks = WeekBucketer::default().columns(&days);
        assert_eq!(lengths(&weeks), vec![7, 7]);
    }

    #[test]
    fn wednesday_start_gives_short_leading_column() {
        // 2026-01-07 is a Wednesday.
        let days = series(date(2026, 1, 7), 12);
        let (weeks, labels) = WeekBucketer::default().bucket(&days);
        assert_eq!(lengths(&weeks), vec![4, 7, 1]);
        assert_eq!(weeks[0].days[0].date, date(2026, 1, 7));
        assert_eq!(weeks[1].days[0].date, date(2026, 1, 11));
        assert_eq!(label_names(&labels), vec![Some("Jan"), None, None]);
    }

    #[test]
    fn monday_start_shifts_cuts() {
        let days = series(date(2026, 1, 7), 12);
        let weeks = WeekBucketer::new(WeekStart::Monday).columns(&days);
        assert_eq!(lengths(&weeks), vec![5, 7]);
        assert_eq!(weeks[1].days[0].date, date(2026, 1, 12));
    }

    #[test]
    fn short_series_inside_one_week() {
        // Thursday and Friday only.
        let days = series(date(2026, 1, 1), 2);
        let weeks = WeekBucketer::default().columns(&days);
        assert_eq!(lengths(&weeks), vec![2]);
    }

    #[test]
    fn month_starting_mid_week_is_labelled_one_column_later() {
        // 2026-03-29 is a Sunday; April begins on the Wednesday of that week.
        let days = series(date(2026, 3, 29), 14);
        let (weeks, labels) = WeekBucketer::default().bucket(&days);
        assert_eq!(lengths(&weeks), vec![7, 7]);
        assert_eq!(label_names(&labels), vec![Some("Mar"), Some("Apr")]);
        assert_eq!(weeks[1].days[0].date, date(2026, 4, 5));
    }

    #[test]
    fn year_boundary_gets_a_label() {
        // 2025-12-21 is a Sunday.
        let days = series(date(2025, 12, 21), 21);
        let (_, labels) = WeekBucketer::default().bucket(&days);
        assert_eq!(label_names(&labels), vec![Some("Dec"), None, Some("Jan")]);
        assert_eq!(labels[2].map(|l| l.year), Some(2026));
    }

    #[test]
    fn empty_week_has_no_label() {
        let days = series(date(2026, 1, 4), 7);
        let weeks = vec![
            WeekColumn { days: days.clone() },
            WeekColumn::default(),
            WeekColumn { days },
        ];
        let labels = month_labels(&weeks);
        assert_eq!(label_names(&labels), vec![Some("Jan"), None, None]);
    }
}
