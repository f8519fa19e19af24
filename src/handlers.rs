use crate::errors::AppError;
use crate::models::{
    ClassifiedDay, DayRecord, HeatmapRequest, HeatmapResponse, LegendEntry, ViewCountResponse,
    WindowQuery,
};
use crate::source::DailyCountSource;
use crate::state::AppState;
use crate::storage::persist_data;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let window = state.config.window(query.days);
    let days = window_days(&state, window).await;
    let aggregation = state.aggregator.aggregate(&days, window)?;
    Ok(Json(HeatmapResponse::new(window, aggregation)))
}

pub async fn post_heatmap(
    State(state): State<AppState>,
    Json(payload): Json<HeatmapRequest>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let aggregation = state
        .aggregator
        .aggregate_raw(&payload.days, payload.requested_days)?;
    Ok(Json(HeatmapResponse::new(payload.requested_days, aggregation)))
}

pub async fn get_view_stats(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Json<Vec<ClassifiedDay>> {
    let window = state.config.window(query.days);
    let days = window_days(&state, window).await;
    let classifier = state.aggregator.scale().classifier_for(&days);
    Json(days.iter().map(|day| classifier.classify_day(day)).collect())
}

pub async fn get_levels(State(state): State<AppState>) -> Json<Vec<LegendEntry>> {
    let window = state.config.window(None);
    let days = window_days(&state, window).await;
    Json(state.aggregator.scale().classifier_for(&days).legend())
}

pub async fn record_view(State(state): State<AppState>) -> Result<Json<ViewCountResponse>, AppError> {
    let date = today();
    let mut data = state.data.lock().await;
    let count = data.record_view(date);

    persist_data(&state.data_path, &data).await?;
    info!(%date, count, "recorded view");

    Ok(Json(ViewCountResponse {
        date: date.to_string(),
        count,
    }))
}

async fn window_days(state: &AppState, window: usize) -> Vec<DayRecord> {
    let data = state.data.lock().await;
    data.daily_counts(window, today())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
