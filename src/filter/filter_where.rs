use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterOp, FilterWhereOptions};
use crate::model::{Attribute, DataType, ModelDefinition};

pub struct FilterWhere<'m> {
    model: &'m ModelDefinition,
    param_values: Vec<Value>,
    starting_param_index: usize,
}

impl<'m> FilterWhere<'m> {
    pub fn new(model: &'m ModelDefinition, starting_param_index: usize) -> Self {
        Self {
            model,
            param_values: vec![],
            starting_param_index,
        }
    }

    /// Compiles `where_data` into a boolean SQL expression. Placeholders are numbered after
    /// `starting_param_index` so the clause can follow other bound values.
    pub fn generate(
        model: &'m ModelDefinition,
        where_data: Option<&Value>,
        starting_param_index: usize,
        options: &FilterWhereOptions,
    ) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(model, starting_param_index);

        let mut sql_conditions = vec![];
        if options.paranoid {
            if let Some(deleted_at) = model.deleted_at() {
                sql_conditions.push(format!("\"{}\" IS NULL", deleted_at.field));
            }
        }
        if let Some(where_data) = where_data.filter(|v| !v.is_null()) {
            sql_conditions.extend(filter_where.parse_where_data(where_data)?);
        }

        let where_clause = if sql_conditions.is_empty() {
            "1=1".to_string()
        } else {
            sql_conditions.join(" AND ")
        };
        Ok((where_clause, filter_where.param_values))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Null | Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    fn parse_where_data(&mut self, where_data: &Value) -> Result<Vec<String>, FilterError> {
        let obj = where_data
            .as_object()
            .ok_or_else(|| FilterError::InvalidWhereClause("WHERE must be an object".to_string()))?;

        let mut conditions = vec![];
        for (key, value) in obj {
            if key.starts_with('$') {
                conditions.push(self.parse_logical_operator(key, value)?);
            } else {
                conditions.extend(self.parse_field_condition(key, value)?);
            }
        }
        Ok(conditions)
    }

    /// A nested object joined with AND
    fn parse_group(&mut self, where_data: &Value) -> Result<String, FilterError> {
        let parts = self.parse_where_data(where_data)?;
        Ok(if parts.is_empty() { "1=1".to_string() } else { parts.join(" AND ") })
    }

    fn parse_logical_operator(&mut self, op: &str, value: &Value) -> Result<String, FilterError> {
        match op {
            "$and" | "$or" => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| FilterError::InvalidOperatorData(format!("{} requires array", op)))?;
                if arr.is_empty() {
                    return Ok(if op == "$and" { "1=1" } else { "1=0" }.to_string());
                }
                let mut sql_parts = Vec::with_capacity(arr.len());
                for v in arr {
                    sql_parts.push(format!("({})", self.parse_group(v)?));
                }
                let joiner = if op == "$and" { " AND " } else { " OR " };
                Ok(format!("({})", sql_parts.join(joiner)))
            }
            "$not" => Ok(format!("NOT ({})", self.parse_group(value)?)),
            _ => Err(FilterError::UnsupportedOperator(op.to_string())),
        }
    }

    fn parse_field_condition(&mut self, field: &str, value: &Value) -> Result<Vec<String>, FilterError> {
        let attribute = self.model.resolve(field)?;
        match value {
            Value::Object(obj) => {
                let mut conditions = Vec::with_capacity(obj.len());
                for (op_key, op_val) in obj {
                    let operator = FilterOp::from_key(op_key)?;
                    conditions.push(self.build_sql_condition(attribute, operator, op_val)?);
                }
                Ok(conditions)
            }
            // { field: [a, b] } is membership
            Value::Array(_) => Ok(vec![self.build_sql_condition(attribute, FilterOp::In, value)?]),
            // Implicit equality: { field: value }
            _ => Ok(vec![self.build_sql_condition(attribute, FilterOp::Eq, value)?]),
        }
    }

    fn build_sql_condition(
        &mut self,
        attribute: &Attribute,
        operator: FilterOp,
        data: &Value,
    ) -> Result<String, FilterError> {
        let quoted_column = format!("\"{}\"", attribute.field);
        match operator {
            FilterOp::Eq if data.is_null() => Ok(format!("{} IS NULL", quoted_column)),
            FilterOp::Ne if data.is_null() => Ok(format!("{} IS NOT NULL", quoted_column)),
            FilterOp::Like | FilterOp::NLike | FilterOp::ILike => {
                if !matches!(attribute.data_type, DataType::String(_) | DataType::Char(_)) {
                    return Err(FilterError::InvalidOperatorData(format!(
                        "pattern matching requires a text attribute, got {}",
                        attribute.name
                    )));
                }
                let comparison = operator.comparison().unwrap_or("LIKE");
                Ok(format!("{} {} {}", quoted_column, comparison, self.param(attribute, scalar(operator, data)?)))
            }
            FilterOp::Eq | FilterOp::Ne | FilterOp::Gt | FilterOp::Gte | FilterOp::Lt | FilterOp::Lte => {
                let comparison = operator.comparison().unwrap_or("=");
                Ok(format!("{} {} {}", quoted_column, comparison, self.param(attribute, scalar(operator, data)?)))
            }
            FilterOp::In | FilterOp::NIn => {
                let negate = operator == FilterOp::NIn;
                let values = match data {
                    Value::Array(values) => values.clone(),
                    other => vec![other.clone()],
                };
                if values.is_empty() {
                    return Ok(if negate { "1=1" } else { "1=0" }.to_string());
                }
                let params: Vec<String> = values.into_iter().map(|v| self.param(attribute, v)).collect();
                let keyword = if negate { "NOT IN" } else { "IN" };
                Ok(format!("{} {} ({})", quoted_column, keyword, params.join(", ")))
            }
            FilterOp::Between | FilterOp::NBetween => {
                let values = data.as_array().filter(|v| v.len() == 2).ok_or_else(|| {
                    FilterError::InvalidOperatorData("$between requires exactly 2 values".to_string())
                })?;
                let low = self.param(attribute, values[0].clone());
                let high = self.param(attribute, values[1].clone());
                let keyword = if operator == FilterOp::NBetween { "NOT BETWEEN" } else { "BETWEEN" };
                Ok(format!("{} {} {} AND {}", quoted_column, keyword, low, high))
            }
            FilterOp::Is | FilterOp::Not => {
                let negate = if operator == FilterOp::Not { "NOT " } else { "" };
                match data {
                    Value::Null => Ok(format!("{} IS {}NULL", quoted_column, negate)),
                    Value::Bool(b) => Ok(format!(
                        "{} IS {}{}",
                        quoted_column,
                        negate,
                        if *b { "TRUE" } else { "FALSE" }
                    )),
                    _ => Err(FilterError::InvalidOperatorData(
                        "$is/$not accept null or a boolean".to_string(),
                    )),
                }
            }
        }
    }

    fn param(&mut self, attribute: &Attribute, value: Value) -> String {
        self.param_values.push(value);
        attribute.placeholder(self.starting_param_index + self.param_values.len())
    }
}

fn scalar(operator: FilterOp, data: &Value) -> Result<Value, FilterError> {
    match data {
        Value::Array(_) | Value::Object(_) => Err(FilterError::InvalidOperatorData(format!(
            "{:?} requires a scalar value",
            operator
        ))),
        other => Ok(other.clone()),
    }
}
