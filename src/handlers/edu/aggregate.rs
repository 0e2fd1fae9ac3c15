// handlers/edu/aggregate.rs - GET /api/edu/aggregate/:fn/:attribute handler

use axum::extract::{Path, Query};
use serde::Deserialize;
use serde_json::Value;

use crate::database::EmployeeRepository;
use crate::error::ApiError;
use crate::filter::{Aggregate, FilterData};
use crate::middleware::{ApiResponse, ApiResult};
use crate::model::EMPLOYEE;

#[derive(Debug, Deserialize)]
pub struct AggregateQuery {
    pub paranoid: Option<bool>,
}

/// `count`, `max`, `min`, `sum` or `avg` of one attribute; `count/*` counts rows
pub async fn aggregate(
    Path((function, attribute)): Path<(String, String)>,
    Query(query): Query<AggregateQuery>,
) -> ApiResult<Value> {
    let aggregate: Aggregate = function.parse()?;
    let attribute = match attribute.as_str() {
        "*" if aggregate == Aggregate::Count => None,
        name => Some(EMPLOYEE.resolve(name).map_err(ApiError::from)?.name),
    };

    let filter_data = FilterData {
        paranoid: query.paranoid.unwrap_or(true),
        ..Default::default()
    };
    let repository = EmployeeRepository::connect().await?;
    let value = match attribute {
        None => Value::from(repository.count(filter_data).await?),
        Some(name) => repository.aggregate(aggregate, Some(name), filter_data).await?,
    };
    Ok(ApiResponse::success(value))
}
