use crate::diagnostics::{Diagnostic, DiagnosticSink, MismatchStage, TracingSink};
use crate::errors::HeatmapError;
use crate::level::LevelScale;
use crate::models::{ClassifiedDay, DayRecord, HeatmapViewModel, RawDayCount, WeekColumn};
use crate::weeks::WeekBucketer;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub view: HeatmapViewModel,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct HeatmapAggregator {
    scale: LevelScale,
    bucketer: WeekBucketer,
    sink: Arc<dyn DiagnosticSink>,
}

impl HeatmapAggregator {
    pub fn new(scale: LevelScale, bucketer: WeekBucketer) -> Self {
        Self {
            scale,
            bucketer,
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn scale(&self) -> LevelScale {
        self.scale
    }

    pub fn aggregate_raw(
        &self,
        raw: &[RawDayCount],
        requested_days: usize,
    ) -> Result<Aggregation, HeatmapError> {
        let days = raw
            .iter()
            .map(DayRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.aggregate(&days, requested_days)
    }

    pub fn aggregate(
        &self,
        days: &[DayRecord],
        requested_days: usize,
    ) -> Result<Aggregation, HeatmapError> {
        ensure_contiguous(days)?;

        let mut diagnostics = Vec::new();
        if days.len() != requested_days {
            diagnostics.push(Diagnostic::SizeMismatch {
                stage: MismatchStage::Window,
                expected: requested_days,
                actual: days.len(),
            });
        }

        let classifier = self.scale.classifier_for(days);
        let classified: Vec<ClassifiedDay> =
            days.iter().map(|day| classifier.classify_day(day)).collect();
        let (weeks, month_labels) = self.bucketer.bucket(&classified);

        let bucketed: usize = weeks.iter().map(WeekColumn::len).sum();
        if bucketed != days.len() {
            diagnostics.push(Diagnostic::SizeMismatch {
                stage: MismatchStage::Bucketing,
                expected: days.len(),
                actual: bucketed,
            });
        }

        let total_count = days
            .iter()
            .fold(0u64, |total, day| total.saturating_add(day.count));
        let with_views = days.iter().filter(|day| day.count > 0).count();
        debug!(
            days = days.len(),
            with_views,
            without_views = days.len() - with_views,
            weeks = weeks.len(),
            total_count,
            "aggregated view heatmap"
        );

        for diagnostic in &diagnostics {
            self.sink.report(diagnostic);
        }

        Ok(Aggregation {
            view: HeatmapViewModel {
                weeks,
                month_labels,
                total_count,
            },
            diagnostics,
        })
    }
}

impl Default for HeatmapAggregator {
    fn default() -> Self {
        Self::new(LevelScale::default(), WeekBucketer::default())
    }
}

fn ensure_contiguous(days: &[DayRecord]) -> Result<(), HeatmapError> {
    for pair in days.windows(2) {
        if pair[0].date.succ_opt() != Some(pair[1].date) {
            return Err(HeatmapError::NonContiguous {
                previous: pair[0].date.to_string(),
                next: pair[1].date.to_string(),
            });
        }
    }
    Ok(())
}
