use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::app::{
    export_json_string, import_json_string, sync_workout_json, workout_create, workout_delete,
    workout_get_by_day, workout_list_by_range, workout_update, ImportResult, WorkoutCreateReq,
    WorkoutDetailDto, WorkoutUpdateReq,
};
use crate::error::{AppError, AppErrorDto};
use crate::infra::DbPool;

type ApiError = (StatusCode, Json<AppErrorDto>);

fn error_response(e: AppError) -> ApiError {
    let status = match e {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(e.to_serde()))
}

fn parse_id(key: &str) -> Result<i64, ApiError> {
    key.parse::<i64>()
        .map_err(|_| error_response(AppError::Validation("invalid workout ID".into())))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn create_workout(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<WorkoutCreateReq>,
) -> Result<Json<WorkoutDetailDto>, ApiError> {
    workout_create(&pool, req).map(Json).map_err(error_response)
}

pub async fn get_workout_by_day(
    State(pool): State<Arc<DbPool>>,
    Path(day): Path<String>,
) -> Result<Json<WorkoutDetailDto>, ApiError> {
    workout_get_by_day(&pool, &day)
        .map(Json)
        .map_err(error_response)
}

pub async fn list_workouts(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<WorkoutDetailDto>>, ApiError> {
    let (start, end) = match (params.start_date, params.end_date) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            return Err(error_response(AppError::Validation(
                "startDate and endDate are required".into(),
            )))
        }
    };
    workout_list_by_range(&pool, &start, &end)
        .map(Json)
        .map_err(error_response)
}

pub async fn update_workout(
    State(pool): State<Arc<DbPool>>,
    Path(key): Path<String>,
    Json(mut req): Json<WorkoutUpdateReq>,
) -> Result<Json<WorkoutDetailDto>, ApiError> {
    req.id = parse_id(&key)?;
    workout_update(&pool, req).map(Json).map_err(error_response)
}

pub async fn delete_workout(
    State(pool): State<Arc<DbPool>>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&key)?;
    workout_delete(&pool, id).map_err(error_response)?;
    Ok(Json(
        serde_json::json!({"message": "Workout deleted successfully"}),
    ))
}

pub async fn sync_workout(
    State(pool): State<Arc<DbPool>>,
    body: String,
) -> Result<Json<WorkoutDetailDto>, ApiError> {
    sync_workout_json(&pool, &body)
        .map(Json)
        .map_err(error_response)
}

pub async fn export_data(
    State(pool): State<Arc<DbPool>>,
) -> Result<([(header::HeaderName, &'static str); 1], String), ApiError> {
    let json = export_json_string(&pool).map_err(error_response)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

pub async fn import_data(
    State(pool): State<Arc<DbPool>>,
    body: String,
) -> Result<Json<ImportResult>, ApiError> {
    import_json_string(&pool, &body)
        .map(Json)
        .map_err(error_response)
}
