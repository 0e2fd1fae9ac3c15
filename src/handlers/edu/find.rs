// handlers/edu/find.rs - POST /api/edu/find handler

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{Map, Value};

use crate::database::EmployeeRepository;
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::middleware::{ApiResponse, ApiResult};

/// Filtered employee rows: `{ select, where, order, limit, offset, paranoid }`
pub async fn find(body: Result<Json<FilterData>, JsonRejection>) -> ApiResult<Vec<Map<String, Value>>> {
    let Json(filter_data) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    let rows = EmployeeRepository::connect().await?.find_all(filter_data).await?;
    Ok(ApiResponse::success(rows))
}

/// First matching row, or `null`
pub async fn find_one(body: Result<Json<FilterData>, JsonRejection>) -> ApiResult<Option<Map<String, Value>>> {
    let Json(filter_data) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    let row = EmployeeRepository::connect().await?.find_one(filter_data).await?;
    Ok(ApiResponse::success(row))
}
