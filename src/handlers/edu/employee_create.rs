// handlers/edu/employee_create.rs - POST /api/edu/employees handler

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use super::json_object;
use crate::database::EmployeeRepository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::model::{Employee, NewEmployee};

pub async fn employee_create(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Employee> {
    let new_employee = NewEmployee::from_payload(&json_object(body)?)?;
    let employee = EmployeeRepository::connect().await?.create(&new_employee).await?;
    Ok(ApiResponse::created(employee))
}
