// handlers/edu/mod.rs - reporting and employee routes under /api/edu
//
// Every response uses the `{ msg, data }` envelope from `ApiResponse`.

pub mod aggregate;
pub mod employee_create;
pub mod employee_delete;
pub mod employee_restore;
pub mod employee_update;
pub mod find;
pub mod report;
pub mod subordinates;

pub use aggregate::aggregate;
pub use employee_create::employee_create;
pub use employee_delete::employee_delete;
pub use employee_restore::employee_restore;
pub use employee_update::employee_update;
pub use find::{find, find_one};
pub use report::report;
pub use subordinates::subordinates;

use axum::extract::rejection::JsonRejection;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::filter::FilterData;

/// Filter matching one employee by primary key
pub(crate) fn by_id(id: i64) -> FilterData {
    FilterData::with_where(json!({ "empId": id }))
}

pub(crate) fn json_object(body: Result<axum::Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    match body {
        Ok(axum::Json(Value::Object(map))) => Ok(map),
        Ok(_) => Err(ApiError::invalid_json("Request body must be a JSON object")),
        Err(rejection) => Err(ApiError::invalid_json(rejection.body_text())),
    }
}
