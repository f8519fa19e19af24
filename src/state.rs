use crate::config::Config;
use crate::heatmap::HeatmapAggregator;
use crate::models::ViewLog;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<ViewLog>>,
    pub config: Arc<Config>,
    pub aggregator: HeatmapAggregator,
}

impl AppState {
    pub fn new(config: Config, data: ViewLog) -> Self {
        Self {
            data_path: config.data_path.clone(),
            data: Arc::new(Mutex::new(data)),
            aggregator: config.aggregator(),
            config: Arc::new(config),
        }
    }
}
