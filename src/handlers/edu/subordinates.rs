// handlers/edu/subordinates.rs - GET /api/edu/employees/:id/subordinates handler

use axum::extract::Path;

use crate::database::EmployeeRepository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::model::Employee;

pub async fn subordinates(Path(id): Path<i64>) -> ApiResult<Vec<Employee>> {
    let employees = EmployeeRepository::connect().await?.subordinates(id).await?;
    Ok(ApiResponse::success(employees))
}
