use chrono::{Datelike, Duration, NaiveDate, Weekday};
use view_heatmap::diagnostics::{Diagnostic, MismatchStage};
use view_heatmap::models::{DayRecord, RawDayCount};
use view_heatmap::{classify, HeatmapAggregator, LevelClassifier, WeekBucketer, WeekStart};

fn series(start: NaiveDate, counts: &[u64]) -> Vec<DayRecord> {
    counts
        .iter()
        .enumerate()
        .map(|(offset, &count)| DayRecord::new(start + Duration::days(offset as i64), count))
        .collect()
}

/// Deterministic, bursty counts so every level shows up.
fn sample_counts(len: usize) -> Vec<u64> {
    (0..len as u64).map(|i| (i * 7 + i / 3) % 13 * (i % 2)).collect()
}

#[test]
fn ten_days_from_a_friday() {
    let friday = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    assert_eq!(friday.weekday(), Weekday::Fri);
    let days = series(friday, &[0, 1, 3, 0, 5, 2, 0, 0, 9, 1]);

    let result = HeatmapAggregator::default().aggregate(&days, 10).unwrap();
    let view = result.view;

    let lengths: Vec<usize> = view.weeks.iter().map(|week| week.len()).collect();
    // Fri-Sat, then a full Sun-Sat week, then the trailing Sunday.
    assert_eq!(lengths, vec![2, 7, 1]);
    assert_eq!(view.weeks[0].days[0].date, friday);
    assert_eq!(view.weeks[1].days[0].date.weekday(), Weekday::Sun);
    assert_eq!(view.total_count, 21);
    assert_eq!(classify(0), 0);
    assert_eq!(classify(9), 4);
    assert_eq!(view.weeks[1].days[6].count, 9);
    assert_eq!(view.weeks[1].days[6].level, 4);

    assert_eq!(view.month_labels.len(), view.weeks.len());
    assert_eq!(view.month_labels[0].map(|label| label.name), Some("Jan"));
    assert_eq!(view.month_labels[1], None);
    assert_eq!(view.month_labels[2], None);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn every_day_lands_in_exactly_one_column() {
    let aggregator = HeatmapAggregator::default();
    let start = NaiveDate::from_ymd_opt(2025, 2, 26).unwrap();
    for len in 0..=40 {
        let days = series(start, &sample_counts(len));
        let view = aggregator.aggregate(&days, len).unwrap().view;
        assert_eq!(view.day_count(), len);
        let flattened: Vec<NaiveDate> = view.days().map(|day| day.date).collect();
        let expected: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();
        assert_eq!(flattened, expected);
    }
}

#[test]
fn only_edge_columns_are_short() {
    let start = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
    for week_start in [WeekStart::Sunday, WeekStart::Monday] {
        let aggregator = HeatmapAggregator::new(Default::default(), WeekBucketer::new(week_start));
        let days = series(start, &sample_counts(365));
        let weeks = aggregator.aggregate(&days, 365).unwrap().view.weeks;
        let last = weeks.len() - 1;
        for (index, week) in weeks.iter().enumerate() {
            assert!(!week.is_empty());
            if index != 0 && index != last {
                assert_eq!(week.len(), 7, "column {index} is short");
            }
        }
    }
}

#[test]
fn one_label_per_month_run() {
    let start = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
    let days = series(start, &sample_counts(365));
    let view = HeatmapAggregator::default().aggregate(&days, 365).unwrap().view;

    let mut index = 0;
    while index < view.weeks.len() {
        let month = view.weeks[index].days[0].date.month();
        let mut run_end = index;
        while run_end + 1 < view.weeks.len()
            && view.weeks[run_end + 1].days[0].date.month() == month
        {
            run_end += 1;
        }
        let labelled = view.month_labels[index..=run_end]
            .iter()
            .filter(|label| label.is_some())
            .count();
        assert_eq!(labelled, 1, "run starting at column {index}");
        assert!(view.month_labels[index].is_some());
        index = run_end + 1;
    }
}

#[test]
fn total_matches_sum_of_counts() {
    let counts = sample_counts(200);
    let days = series(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(), &counts);
    let view = HeatmapAggregator::default().aggregate(&days, 200).unwrap().view;
    assert_eq!(view.total_count, counts.iter().sum::<u64>());
    let level_sum: u64 = view.days().map(|day| u64::from(day.level)).sum();
    assert_ne!(view.total_count, level_sum);
}

#[test]
fn aggregation_is_repeatable() {
    let aggregator = HeatmapAggregator::default();
    let days = series(NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(), &sample_counts(90));
    let first = aggregator.aggregate(&days, 120).unwrap();
    let second = aggregator.aggregate(&days, 120).unwrap();
    assert_eq!(first, second);
}

#[test]
fn leading_wednesday_column_is_short_and_labelled() {
    let wednesday = NaiveDate::from_ymd_opt(2026, 4, 29).unwrap();
    assert_eq!(wednesday.weekday(), Weekday::Wed);
    let days = series(wednesday, &sample_counts(20));
    let view = HeatmapAggregator::default().aggregate(&days, 20).unwrap().view;

    assert_eq!(view.weeks[0].len(), 4);
    assert_eq!(view.month_labels[0].map(|label| label.name), Some("Apr"));
    // May 1 falls in the first column, so May is labelled on the second.
    assert_eq!(view.month_labels[1].map(|label| label.name), Some("May"));
}

#[test]
fn empty_input_for_a_year_window() {
    let result = HeatmapAggregator::default().aggregate(&[], 365).unwrap();
    assert!(result.view.weeks.is_empty());
    assert!(result.view.month_labels.is_empty());
    assert_eq!(result.view.total_count, 0);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::SizeMismatch {
            stage: MismatchStage::Window,
            expected: 365,
            actual: 0,
        }]
    );
}

#[test]
fn invalid_wire_days_are_rejected() {
    let raw = vec![RawDayCount {
        date: "not-a-date".to_string(),
        count: 3,
    }];
    assert!(HeatmapAggregator::default().aggregate_raw(&raw, 1).is_err());
}

#[test]
fn legend_matches_classifier() {
    let classifier = LevelClassifier::default();
    for entry in classifier.legend() {
        assert_eq!(classifier.classify(entry.min_count), entry.level);
    }
}
