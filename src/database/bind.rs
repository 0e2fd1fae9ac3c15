use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use crate::config::config;
use crate::filter::SqlResult;

/// Binds filter parameters. Scalars travel as text and the placeholder casts
/// (`$1::bigint`, `$2::date`) give them the column's type on the server.
pub fn arguments(params: &[Value]) -> PgArguments {
    let mut args = PgArguments::default();
    for v in params {
        match v {
            Value::Null => args.add(None::<String>),
            Value::Bool(b) => args.add(b.to_string()),
            Value::Number(n) => args.add(n.to_string()),
            Value::String(s) => args.add(s.clone()),
            Value::Array(_) | Value::Object(_) => args.add(sqlx::types::Json(v.clone())),
        }
    }
    args
}

pub fn log_query(sql: &SqlResult) {
    if config().database.enable_query_logging {
        tracing::debug!(query = %sql.query, params = ?sql.params, "executing query");
    }
}
