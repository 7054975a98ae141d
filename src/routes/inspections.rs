use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    http::Method,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use crate::{
    error::AppError,
    models::Row,
    services::{
        excel::ExcelProcessor,
        inspection::{Facets, FilterState, InspectionCard, Status},
    },
    AppState,
};

pub const UPLOAD_FIELD: &str = "file";

pub fn routes(max_file_size: usize) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/inspections/upload", post(upload_sheet))
        .route("/inspections/rows", post(load_rows))
        .route("/inspections/filters", get(get_filters))
        .route("/inspections/filters/device", put(set_device_filter))
        .route("/inspections/filters/machine-type", put(set_machine_type_filter))
        .route("/inspections/facets", get(get_facets))
        .route("/inspections/cards", get(get_cards))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    loaded: bool,
    status: Status,
    revision: u64,
    row_count: usize,
    columns: Vec<String>,
    loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Serialize)]
pub struct CardsResponse {
    status: Status,
    total_rows: usize,
    cards: Vec<InspectionCard>,
}

async fn upload_sheet(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<LoadResponse>, AppError> {
    let mut file_data = None;
    let mut file_name = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            file_name = field.file_name().map(str::to_string);
            file_data = Some(field.bytes().await?);
        }
    }

    let file_data = match file_data {
        Some(data) if !data.is_empty() => data,
        _ => {
            tracing::warn!("Upload carried no file, keeping current rows");
            let inspection = state.inspection.read();
            return Ok(Json(LoadResponse {
                loaded: false,
                status: inspection.status(),
                revision: inspection.revision(),
                row_count: inspection.row_count(),
                columns: Vec::new(),
                loaded_at: inspection.loaded_at(),
            }));
        }
    };

    tracing::info!(
        "Received upload {}, size: {}KB",
        file_name.as_deref().unwrap_or("<unnamed>"),
        file_data.len() / 1024
    );

    let decoded = ExcelProcessor::decode_upload(file_data).await?;

    let mut inspection = state.inspection.write();
    let row_count = decoded.rows.len();
    let revision = inspection.load_rows(decoded.rows);

    Ok(Json(LoadResponse {
        loaded: true,
        status: inspection.status(),
        revision,
        row_count,
        columns: decoded.columns,
        loaded_at: inspection.loaded_at(),
    }))
}

async fn load_rows(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<Row>>, JsonRejection>,
) -> Result<Json<LoadResponse>, AppError> {
    let Json(rows) = payload?;

    let mut columns: Vec<String> = Vec::new();
    for name in rows.iter().flat_map(|row| row.columns()) {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }

    let mut inspection = state.inspection.write();
    let row_count = rows.len();
    let revision = inspection.load_rows(rows);

    Ok(Json(LoadResponse {
        loaded: true,
        status: inspection.status(),
        revision,
        row_count,
        columns,
        loaded_at: inspection.loaded_at(),
    }))
}

async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterState> {
    Json(state.inspection.read().filters().clone())
}

async fn set_device_filter(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterState>, AppError> {
    let Json(request) = payload?;
    let mut inspection = state.inspection.write();
    inspection.set_device_filter(&request.value);
    Ok(Json(inspection.filters().clone()))
}

async fn set_machine_type_filter(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterState>, AppError> {
    let Json(request) = payload?;
    let mut inspection = state.inspection.write();
    inspection.set_machine_type_filter(&request.value);
    Ok(Json(inspection.filters().clone()))
}

async fn get_facets(State(state): State<Arc<AppState>>) -> Json<Facets> {
    Json(state.inspection.read().facets())
}

async fn get_cards(State(state): State<Arc<AppState>>) -> Json<CardsResponse> {
    let inspection = state.inspection.read();
    Json(CardsResponse {
        status: inspection.status(),
        total_rows: inspection.row_count(),
        cards: inspection.cards(),
    })
}
