use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterOrderInfo, SortDirection};
use crate::model::ModelDefinition;

pub struct FilterOrder;

impl FilterOrder {
    /// Accepts `"name desc, birth"`, `["name desc"]`, `[["name", "DESC"]]` or
    /// `{ "name": "desc" }`. Keys are attribute names and resolve to columns.
    pub fn validate_and_parse(
        model: &ModelDefinition,
        order: &Value,
    ) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        match order {
            Value::Null => {}
            Value::String(s) => out.extend(Self::parse_order_string(model, s)?),
            Value::Array(arr) => {
                for v in arr {
                    match v {
                        Value::String(s) => out.extend(Self::parse_order_string(model, s)?),
                        Value::Array(pair) => {
                            let column = pair.first().and_then(Value::as_str).ok_or_else(|| {
                                FilterError::InvalidOperatorData(
                                    "order pair must start with an attribute name".to_string(),
                                )
                            })?;
                            let direction = pair.get(1).and_then(Value::as_str).unwrap_or("asc");
                            out.push(Self::info(model, column, direction)?);
                        }
                        other => {
                            return Err(FilterError::InvalidOperatorData(format!(
                                "unsupported order entry: {}",
                                other
                            )))
                        }
                    }
                }
            }
            Value::Object(obj) => {
                for (k, v) in obj {
                    out.push(Self::info(model, k, v.as_str().unwrap_or("asc"))?);
                }
            }
            other => {
                return Err(FilterError::InvalidOperatorData(format!(
                    "unsupported order: {}",
                    other
                )))
            }
        }
        Ok(out)
    }

    fn parse_order_string(model: &ModelDefinition, s: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in s.split(',') {
            let mut it = part.split_whitespace();
            if let Some(col) = it.next() {
                out.push(Self::info(model, col, it.next().unwrap_or("asc"))?);
            }
        }
        Ok(out)
    }

    fn info(model: &ModelDefinition, name: &str, direction: &str) -> Result<FilterOrderInfo, FilterError> {
        let attribute = model.resolve(name)?;
        let sort = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(FilterError::InvalidOperatorData(format!(
                    "sort direction must be asc or desc, got {}",
                    other
                )))
            }
        };
        Ok(FilterOrderInfo {
            column: attribute.field.to_string(),
            sort,
        })
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
