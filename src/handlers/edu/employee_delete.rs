// handlers/edu/employee_delete.rs - DELETE /api/edu/employees/:id handler

use axum::extract::{Path, Query};
use serde::Deserialize;

use super::by_id;
use crate::database::EmployeeRepository;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub force: bool,
}

/// Soft delete unless `?force=true`; `data` is the number of rows changed
pub async fn employee_delete(Path(id): Path<i64>, Query(query): Query<DeleteQuery>) -> ApiResult<u64> {
    let affected = EmployeeRepository::connect()
        .await?
        .destroy(by_id(id), query.force)
        .await?;
    if query.force {
        tracing::warn!(emp_id = id, affected, "employee permanently deleted");
    }
    Ok(ApiResponse::success(affected))
}
