// handlers/edu/employee_restore.rs - POST /api/edu/employees/:id/restore handler

use axum::extract::Path;

use super::by_id;
use crate::database::EmployeeRepository;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn employee_restore(Path(id): Path<i64>) -> ApiResult<u64> {
    let affected = EmployeeRepository::connect().await?.restore(by_id(id)).await?;
    Ok(ApiResponse::success(affected))
}
