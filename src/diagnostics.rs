use serde::Serialize;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchStage {
    /// Source returned a different number of days than the window asked for.
    Window,
    /// Week columns do not hold every input day.
    Bucketing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    SizeMismatch {
        stage: MismatchStage,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SizeMismatch {
                stage: MismatchStage::Window,
                expected,
                actual,
            } => write!(f, "expected {expected} days, got {actual}"),
            Diagnostic::SizeMismatch {
                stage: MismatchStage::Bucketing,
                expected,
                actual,
            } => write!(f, "days mismatch: expected {expected}, got {actual} in weeks"),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::SizeMismatch {
                stage,
                expected,
                actual,
            } => warn!(?stage, expected, actual, "{diagnostic}"),
        }
    }
}
