// handlers/edu/report.rs - GET /api/edu handler

use axum::extract::Query;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::config;
use crate::database::EmployeeRepository;
use crate::error::ApiError;
use crate::filter::{FilterData, FilterOp, HavingCount};
use crate::i18n::{t, Message};
use crate::middleware::{ApiResponse, ApiResult};
use crate::model::display::DATE_FORMAT;

pub const GENDER_COUNT_ALIAS: &str = "cnt_gender";

/// Other query parameters, `date` included, do not affect the report
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "firedSince")]
    pub fired_since: Option<String>,
}

/// Employee count per gender, keeping only genders at or above the configured threshold.
/// `firedSince` opts into counting only employees with `fireAt >= firedSince`.
pub async fn report(Query(query): Query<ReportQuery>) -> ApiResult<Vec<Map<String, Value>>> {
    let filter_data = report_filter(query.fired_since.as_deref())?;

    let having = HavingCount {
        op: FilterOp::Gte,
        value: config().edu.gender_threshold,
    };
    let rows = EmployeeRepository::connect()
        .await?
        .count_by_group("gender", GENDER_COUNT_ALIAS, Some(having), filter_data)
        .await?;

    Ok(ApiResponse::success(rows))
}

fn report_filter(fired_since: Option<&str>) -> Result<FilterData, ApiError> {
    match fired_since.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(FilterData::default()),
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| ApiError::field_error("firedSince", t(Message::InvalidDate)))?;
            Ok(FilterData::with_where(json!({
                "fireAt": { "$gte": date.format(DATE_FORMAT).to_string() }
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_date_means_no_where() {
        assert!(report_filter(None).unwrap().where_clause.is_none());
        assert!(report_filter(Some("  ")).unwrap().where_clause.is_none());
    }

    #[test]
    fn date_parameter_is_not_a_filter() {
        let query: ReportQuery = parse_query("date=20-01-2020");
        assert!(query.fired_since.is_none());
        assert!(report_filter(query.fired_since.as_deref()).unwrap().where_clause.is_none());
    }

    fn parse_query(raw: &str) -> ReportQuery {
        let uri: axum::http::Uri = format!("/api/edu?{}", raw).parse().unwrap();
        Query::<ReportQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn fired_since_restricts_fire_at() {
        let data = report_filter(Some("2020-01-01")).unwrap();
        assert_eq!(data.where_clause, Some(json!({ "fireAt": { "$gte": "2020-01-01" } })));
    }

    #[test]
    fn bad_date_is_a_field_error() {
        let err = report_filter(Some("2020-13-01")).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json()["field_errors"][0]["field"], "firedSince");
    }
}
