use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{
    Aggregate, FilterData, FilterOp, FilterOrderInfo, FilterWhereOptions, HavingCount, SqlResult,
};
use crate::config::config;
use crate::model::{Attribute, DataType, ModelDefinition};

/// Query builder over a single model. Clients address attributes by name; the generated
/// SQL uses the physical column names and aliases results back to attribute names.
pub struct Filter {
    model: &'static ModelDefinition,
    select_attributes: Vec<&'static Attribute>,
    where_data: Option<Value>,
    order_data: Vec<FilterOrderInfo>,
    group_attributes: Vec<&'static Attribute>,
    having: Option<HavingCount>,
    limit: Option<i64>,
    offset: Option<i64>,
    options: FilterWhereOptions,
}

impl Filter {
    pub fn new(model: &'static ModelDefinition) -> Self {
        Self {
            model,
            select_attributes: vec![],
            where_data: None,
            order_data: vec![],
            group_attributes: vec![],
            having: None,
            limit: None,
            offset: None,
            options: FilterWhereOptions::default(),
        }
    }

    pub fn assign(&mut self, data: FilterData) -> Result<&mut Self, FilterError> {
        if let Some(select) = data.select {
            self.select(&select)?;
        }
        if let Some(where_clause) = data.where_clause {
            self.where_clause(where_clause)?;
        }
        if let Some(order) = data.order {
            self.order(&order)?;
        }
        match data.limit {
            Some(limit) => {
                self.limit(limit, data.offset)?;
            }
            None => {
                if let Some(offset) = data.offset {
                    self.offset(offset)?;
                }
            }
        }
        self.paranoid(data.paranoid);
        Ok(self)
    }

    /// Restricts the returned attributes; an empty list selects every attribute
    pub fn select<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self, FilterError> {
        self.select_attributes = names
            .iter()
            .map(|n| self.model.resolve(n.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn where_clause(&mut self, conditions: Value) -> Result<&mut Self, FilterError> {
        FilterWhere::validate(&conditions)?;
        self.where_data = Some(conditions);
        Ok(self)
    }

    pub fn order(&mut self, order_spec: &Value) -> Result<&mut Self, FilterError> {
        self.order_data = FilterOrder::validate_and_parse(self.model, order_spec)?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        if let Some(offset) = offset {
            self.offset(offset)?;
        }

        let max_limit = config().filter.max_limit.unwrap_or(i64::MAX);
        let applied_limit = if limit > max_limit {
            if config().filter.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max_limit);
            }
            max_limit
        } else {
            limit
        };

        self.limit = Some(applied_limit);
        Ok(self)
    }

    pub fn offset(&mut self, offset: i64) -> Result<&mut Self, FilterError> {
        if offset < 0 {
            return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
        }
        self.offset = Some(offset);
        Ok(self)
    }

    /// `false` includes soft-deleted rows
    pub fn paranoid(&mut self, paranoid: bool) -> &mut Self {
        self.options.paranoid = paranoid;
        self
    }

    pub fn group_by<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self, FilterError> {
        self.group_attributes = names
            .iter()
            .map(|n| self.model.resolve(n.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Keeps only groups whose `COUNT(*)` satisfies `op value`
    pub fn having_count(&mut self, op: FilterOp, value: i64) -> Result<&mut Self, FilterError> {
        if op.comparison().is_none() || matches!(op, FilterOp::Like | FilterOp::NLike | FilterOp::ILike) {
            return Err(FilterError::UnsupportedOperator(format!("{:?} in HAVING", op)));
        }
        self.having = Some(HavingCount { op, value });
        Ok(self)
    }

    /// Row select with every requested attribute aliased to its name
    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql(0)?;
        let query = self.assemble(
            &self.build_select_clause(),
            &where_result.query,
            "",
            &FilterOrder::generate(&self.order_data),
            &self.build_limit_clause(),
        );
        Ok(SqlResult { query, params: where_result.params })
    }

    /// WHERE expression with placeholders numbered after `starting_index`
    pub fn to_where_sql(&self, starting_index: usize) -> Result<SqlResult, FilterError> {
        let (query, params) =
            FilterWhere::generate(self.model, self.where_data.as_ref(), starting_index, &self.options)?;
        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql(0)?;
        let query = self.assemble("COUNT(*) AS \"count\"", &where_result.query, "", "", "");
        Ok(SqlResult { query, params: where_result.params })
    }

    /// Single aggregate value as `jsonb` in column `value`. `COUNT` without an attribute
    /// counts rows.
    pub fn to_aggregate_sql(
        &self,
        aggregate: Aggregate,
        attribute: Option<&str>,
    ) -> Result<SqlResult, FilterError> {
        let target = match attribute {
            Some(name) => {
                let attribute = self.model.resolve(name)?;
                if matches!(aggregate, Aggregate::Sum | Aggregate::Avg)
                    && attribute.data_type != DataType::BigIntUnsigned
                {
                    return Err(FilterError::InvalidOperatorData(format!(
                        "{} requires a numeric attribute, got {}",
                        aggregate.to_sql(),
                        attribute.name
                    )));
                }
                format!("\"{}\"", attribute.field)
            }
            None if aggregate == Aggregate::Count => "*".to_string(),
            None => {
                return Err(FilterError::InvalidOperatorData(format!(
                    "{} requires an attribute",
                    aggregate.to_sql()
                )))
            }
        };
        let where_result = self.to_where_sql(0)?;
        let select = format!("to_jsonb({}({})) AS \"value\"", aggregate.to_sql(), target);
        let query = self.assemble(&select, &where_result.query, "", "", "");
        Ok(SqlResult { query, params: where_result.params })
    }

    /// Grouped row count: the group attributes plus `COUNT(*)` under `count_alias`
    pub fn to_group_count_sql(&self, count_alias: &str) -> Result<SqlResult, FilterError> {
        if self.group_attributes.is_empty() {
            return Err(FilterError::InvalidOperatorData("GROUP BY requires an attribute".to_string()));
        }
        if !is_identifier(count_alias) {
            return Err(FilterError::InvalidOperatorData(format!("invalid alias: {}", count_alias)));
        }

        let mut select: Vec<String> = self.group_attributes.iter().map(|a| aliased(a)).collect();
        select.push(format!("COUNT(*) AS \"{}\"", count_alias));

        let where_result = self.to_where_sql(0)?;
        let mut params = where_result.params;

        let mut group_clause = format!(
            "GROUP BY {}",
            self.group_attributes
                .iter()
                .map(|a| format!("\"{}\"", a.field))
                .collect::<Vec<_>>()
                .join(", ")
        );
        if let Some(having) = self.having {
            params.push(Value::from(having.value));
            group_clause.push_str(&format!(
                " HAVING COUNT(*) {} ${}::bigint",
                having.op.comparison().unwrap_or(">="),
                params.len()
            ));
        }

        let query = self.assemble(
            &select.join(", "),
            &where_result.query,
            &group_clause,
            &FilterOrder::generate(&self.order_data),
            &self.build_limit_clause(),
        );
        Ok(SqlResult { query, params })
    }

    fn assemble(&self, select: &str, where_clause: &str, group: &str, order: &str, limit: &str) -> String {
        [
            format!("SELECT {}", select),
            format!("FROM \"{}\"", self.model.table_name),
            format!("WHERE {}", where_clause),
            group.to_string(),
            order.to_string(),
            limit.to_string(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    fn build_select_clause(&self) -> String {
        if self.select_attributes.is_empty() {
            self.model.select_list()
        } else {
            self.select_attributes
                .iter()
                .map(|a| aliased(a))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            (None, Some(o)) => format!("OFFSET {}", o),
            (None, None) => String::new(),
        }
    }
}

impl SqlResult {
    /// Wraps a row query so each row comes back as one JSON object keyed by alias
    pub fn into_json_rows(self) -> SqlResult {
        SqlResult {
            query: format!("SELECT row_to_json(t) AS \"row\" FROM ({}) t", self.query),
            params: self.params,
        }
    }
}

fn aliased(attribute: &Attribute) -> String {
    format!("\"{}\" AS \"{}\"", attribute.field, attribute.name)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EMPLOYEE;
    use serde_json::json;

    #[test]
    fn select_attributes_between_ids() {
        let mut filter = Filter::new(&EMPLOYEE);
        filter
            .assign(FilterData {
                select: Some(vec!["empId".into(), "name".into(), "birth".into()]),
                where_clause: Some(json!({ "empId": { "$between": [50, 100] } })),
                ..Default::default()
            })
            .unwrap();
        let sql = filter.to_sql().unwrap();
        assert_eq!(
            sql.query,
            "SELECT \"emp_id\" AS \"empId\", \"name\" AS \"name\", \"birth\" AS \"birth\" \
             FROM \"employees\" WHERE \"deleted_at\" IS NULL AND \"emp_id\" BETWEEN $1::bigint AND $2::bigint"
        );
        assert_eq!(sql.params, vec![json!(50), json!(100)]);
    }

    #[test]
    fn default_select_lists_every_attribute() {
        let sql = Filter::new(&EMPLOYEE).to_sql().unwrap();
        assert!(sql.query.starts_with(&format!("SELECT {} FROM", EMPLOYEE.select_list())));
    }

    #[test]
    fn order_limit_offset() {
        let mut filter = Filter::new(&EMPLOYEE);
        filter
            .assign(FilterData {
                order: Some(json!([["name", "ASC"], ["birth", "DESC"]])),
                limit: Some(10),
                offset: Some(20),
                ..Default::default()
            })
            .unwrap();
        let query = filter.to_sql().unwrap().query;
        assert!(query.ends_with("ORDER BY \"name\" ASC, \"birth\" DESC LIMIT 10 OFFSET 20"));
    }

    #[test]
    fn negative_limit_is_rejected() {
        let mut filter = Filter::new(&EMPLOYEE);
        assert!(matches!(filter.limit(-1, None), Err(FilterError::InvalidLimit(_))));
        assert!(matches!(filter.offset(-5), Err(FilterError::InvalidOffset(_))));
    }

    #[test]
    fn count_without_paranoid_includes_deleted_rows() {
        let mut filter = Filter::new(&EMPLOYEE);
        filter.paranoid(false);
        assert_eq!(
            filter.to_count_sql().unwrap().query,
            "SELECT COUNT(*) AS \"count\" FROM \"employees\" WHERE 1=1"
        );
    }

    #[test]
    fn aggregate_wraps_in_jsonb() {
        let sql = Filter::new(&EMPLOYEE).to_aggregate_sql(Aggregate::Max, Some("empId")).unwrap();
        assert_eq!(
            sql.query,
            "SELECT to_jsonb(MAX(\"emp_id\")) AS \"value\" FROM \"employees\" WHERE \"deleted_at\" IS NULL"
        );
        assert!(Filter::new(&EMPLOYEE).to_aggregate_sql(Aggregate::Sum, None).is_err());
    }

    #[test]
    fn sum_and_avg_need_a_numeric_attribute() {
        let filter = Filter::new(&EMPLOYEE);
        for aggregate in [Aggregate::Sum, Aggregate::Avg] {
            for name in ["name", "birth", "gender", "createdAt"] {
                assert!(matches!(
                    filter.to_aggregate_sql(aggregate, Some(name)),
                    Err(FilterError::InvalidOperatorData(_))
                ));
            }
        }
        let sql = filter.to_aggregate_sql(Aggregate::Avg, Some("supId")).unwrap();
        assert!(sql.query.starts_with("SELECT to_jsonb(AVG(\"sup_id\")) AS \"value\""));
        // MAX/MIN keep working on dates
        assert!(filter.to_aggregate_sql(Aggregate::Max, Some("birth")).is_ok());
    }

    #[test]
    fn group_count_with_having_threshold() {
        let mut filter = Filter::new(&EMPLOYEE);
        filter
            .where_clause(json!({ "fireAt": { "$gte": "2020-01-01" } }))
            .unwrap()
            .group_by(&["gender"])
            .unwrap()
            .having_count(FilterOp::Gte, 40_000)
            .unwrap();
        let sql = filter.to_group_count_sql("cnt_gender").unwrap();
        assert_eq!(
            sql.query,
            "SELECT \"gender\" AS \"gender\", COUNT(*) AS \"cnt_gender\" FROM \"employees\" \
             WHERE \"deleted_at\" IS NULL AND \"fire_at\" >= $1::date \
             GROUP BY \"gender\" HAVING COUNT(*) >= $2::bigint"
        );
        assert_eq!(sql.params, vec![json!("2020-01-01"), json!(40_000)]);
    }

    #[test]
    fn group_count_rejects_unsafe_alias() {
        let mut filter = Filter::new(&EMPLOYEE);
        filter.group_by(&["gender"]).unwrap();
        assert!(filter.to_group_count_sql("x\"; DROP").is_err());
    }

    #[test]
    fn json_rows_wrap_inner_query() {
        let sql = Filter::new(&EMPLOYEE).to_sql().unwrap().into_json_rows();
        assert!(sql.query.starts_with("SELECT row_to_json(t) AS \"row\" FROM (SELECT "));
        assert!(sql.query.ends_with(") t"));
    }
}
