pub mod app;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod level;
pub mod models;
pub mod source;
pub mod state;
pub mod storage;
pub mod weeks;

pub use app::router;
pub use config::Config;
pub use heatmap::{Aggregation, HeatmapAggregator};
pub use level::{classify, LevelClassifier, LevelScale};
pub use source::DailyCountSource;
pub use state::AppState;
pub use storage::load_data;
pub use weeks::{WeekBucketer, WeekStart};
