// handlers/edu/employee_update.rs - PATCH /api/edu/employees/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path},
    Json,
};
use serde_json::Value;

use super::{by_id, json_object};
use crate::database::EmployeeRepository;
use crate::error::ApiError;
use crate::i18n::{t, Message};
use crate::middleware::{ApiResponse, ApiResult};
use crate::model::EmployeeChanges;

/// Partial update of an active employee; `data` is the number of rows changed
pub async fn employee_update(
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<u64> {
    let changes = EmployeeChanges::from_payload(&json_object(body)?)?;
    if changes.is_empty() {
        return Err(ApiError::bad_request(t(Message::NothingToUpdate)));
    }
    let affected = EmployeeRepository::connect().await?.update(&changes, by_id(id)).await?;
    Ok(ApiResponse::success(affected))
}
