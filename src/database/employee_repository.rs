use serde_json::{Map, Value};
use sqlx::PgPool;

use super::bind::{arguments, log_query};
use super::manager::{DatabaseError, DatabaseManager};
use crate::config::config;
use crate::filter::{Aggregate, Filter, FilterData, HavingCount, SqlResult};
use crate::model::{Attribute, Employee, EmployeeChanges, NewEmployee, EMPLOYEE};

/// Reads and writes of the `employees` table. Every read honors the soft-delete predicate
/// unless the filter sets `paranoid: false`.
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self::new(DatabaseManager::pool().await?))
    }

    fn filter(data: FilterData) -> Result<Filter, DatabaseError> {
        let mut filter = Filter::new(&EMPLOYEE);
        filter.assign(data)?;
        Ok(filter)
    }

    fn primary_key() -> Result<&'static Attribute, DatabaseError> {
        EMPLOYEE
            .primary_key()
            .ok_or_else(|| DatabaseError::QueryError("Employee has no primary key".to_string()))
    }

    /// Rows keyed by attribute name with display formats applied
    pub async fn find_all(&self, data: FilterData) -> Result<Vec<Map<String, Value>>, DatabaseError> {
        let sql = Self::filter(data)?.to_sql()?.into_json_rows();
        self.fetch_json(sql).await
    }

    pub async fn find_one(&self, mut data: FilterData) -> Result<Option<Map<String, Value>>, DatabaseError> {
        data.limit = Some(1);
        Ok(self.find_all(data).await?.into_iter().next())
    }

    pub async fn find_by_pk(&self, id: i64, paranoid: bool) -> Result<Option<Employee>, DatabaseError> {
        let mut filter = Filter::new(&EMPLOYEE);
        filter
            .where_clause(equals(Self::primary_key()?, Value::from(id)))?
            .paranoid(paranoid);
        Ok(self.fetch_employees(filter.to_sql()?).await?.into_iter().next())
    }

    pub async fn count(&self, data: FilterData) -> Result<i64, DatabaseError> {
        let sql = Self::filter(data)?.to_count_sql()?;
        log_query(&sql);
        let count: i64 = sqlx::query_scalar_with(&sql.query, arguments(&sql.params))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// `COUNT`/`MAX`/`MIN`/`SUM`/`AVG` over the filtered rows; `null` when nothing matched
    pub async fn aggregate(
        &self,
        aggregate: Aggregate,
        attribute: Option<&str>,
        data: FilterData,
    ) -> Result<Value, DatabaseError> {
        let sql = Self::filter(data)?.to_aggregate_sql(aggregate, attribute)?;
        log_query(&sql);
        let value: Option<Value> = sqlx::query_scalar_with(&sql.query, arguments(&sql.params))
            .fetch_one(&self.pool)
            .await?;
        let value = value.unwrap_or(Value::Null);

        // MAX/MIN of a date column come back in storage form
        let display = attribute
            .and_then(|name| EMPLOYEE.attribute(name))
            .and_then(|a| a.display);
        Ok(match display {
            Some(display) if matches!(aggregate, Aggregate::Max | Aggregate::Min) => {
                display.render(&value, config().display.offset())
            }
            _ => value,
        })
    }

    /// Row count per distinct value of `group`, under `count_alias`. Groups failing
    /// `having` are dropped.
    pub async fn count_by_group(
        &self,
        group: &str,
        count_alias: &str,
        having: Option<HavingCount>,
        data: FilterData,
    ) -> Result<Vec<Map<String, Value>>, DatabaseError> {
        let mut filter = Self::filter(data)?;
        filter.group_by(&[group])?;
        if let Some(having) = having {
            filter.having_count(having.op, having.value)?;
        }
        let sql = filter.to_group_count_sql(count_alias)?.into_json_rows();
        self.fetch_json(sql).await
    }

    pub async fn create(&self, new: &NewEmployee) -> Result<Employee, DatabaseError> {
        let values = new.values()?;
        let columns: Vec<String> = values.iter().map(|(a, _)| format!("\"{}\"", a.field)).collect();
        let placeholders: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, (a, _))| a.placeholder(i + 1))
            .collect();

        let sql = SqlResult {
            query: format!(
                "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING {}",
                EMPLOYEE.table_name,
                columns.join(", "),
                placeholders.join(", "),
                EMPLOYEE.select_list()
            ),
            params: values.into_iter().map(|(_, v)| v).collect(),
        };
        log_query(&sql);
        let employee = sqlx::query_as_with::<_, Employee, _>(&sql.query, arguments(&sql.params))
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(emp_id = employee.emp_id, "employee created");
        Ok(employee)
    }

    /// Applies `changes` to every matching row and re-stamps `updatedAt`. Returns the
    /// number of rows changed.
    pub async fn update(&self, changes: &EmployeeChanges, data: FilterData) -> Result<u64, DatabaseError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut sets = Vec::new();
        let mut params = Vec::new();
        for (attribute, value) in changes.values() {
            params.push(value.clone());
            sets.push(format!("\"{}\" = {}", attribute.field, attribute.placeholder(params.len())));
        }
        if let Some(updated_at) = EMPLOYEE.updated_at() {
            sets.push(format!("\"{}\" = NOW()", updated_at.field));
        }

        let where_sql = Self::filter(data)?.to_where_sql(params.len())?;
        params.extend(where_sql.params);

        let sql = SqlResult {
            query: format!(
                "UPDATE \"{}\" SET {} WHERE {}",
                EMPLOYEE.table_name,
                sets.join(", "),
                where_sql.query
            ),
            params,
        };
        self.execute(sql).await
    }

    /// Soft delete stamps `deletedAt` on active rows only, so repeating it changes
    /// nothing. `force` removes the rows physically, deleted or not.
    pub async fn destroy(&self, data: FilterData, force: bool) -> Result<u64, DatabaseError> {
        let mut filter = Self::filter(data)?;
        let sql = match EMPLOYEE.deleted_at() {
            Some(deleted_at) if !force => {
                let where_sql = filter.paranoid(true).to_where_sql(0)?;
                SqlResult {
                    query: format!(
                        "UPDATE \"{}\" SET \"{}\" = NOW() WHERE {}",
                        EMPLOYEE.table_name, deleted_at.field, where_sql.query
                    ),
                    params: where_sql.params,
                }
            }
            _ => {
                let where_sql = filter.paranoid(false).to_where_sql(0)?;
                SqlResult {
                    query: format!("DELETE FROM \"{}\" WHERE {}", EMPLOYEE.table_name, where_sql.query),
                    params: where_sql.params,
                }
            }
        };
        self.execute(sql).await
    }

    /// Clears `deletedAt` on soft-deleted rows; other columns, `updatedAt` included, keep
    /// their values
    pub async fn restore(&self, data: FilterData) -> Result<u64, DatabaseError> {
        let Some(deleted_at) = EMPLOYEE.deleted_at() else {
            return Ok(0);
        };
        let mut filter = Self::filter(data)?;
        let where_sql = filter.paranoid(false).to_where_sql(0)?;
        let sql = SqlResult {
            query: format!(
                "UPDATE \"{table}\" SET \"{column}\" = NULL WHERE {clause} AND \"{column}\" IS NOT NULL",
                table = EMPLOYEE.table_name,
                column = deleted_at.field,
                clause = where_sql.query
            ),
            params: where_sql.params,
        };
        self.execute(sql).await
    }

    /// Active employees whose supervisor is `id`
    pub async fn subordinates(&self, id: i64) -> Result<Vec<Employee>, DatabaseError> {
        let association = EMPLOYEE
            .association("subordinates")
            .ok_or_else(|| DatabaseError::QueryError("Employee has no subordinates association".to_string()))?;
        let foreign_key = EMPLOYEE.resolve(association.foreign_key)?;

        let mut filter = Filter::new(&EMPLOYEE);
        filter
            .where_clause(equals(foreign_key, Value::from(id)))?
            .order(&Value::String(Self::primary_key()?.name.to_string()))?;
        self.fetch_employees(filter.to_sql()?).await
    }

    /// The active supervisor of `employee`, if it has one
    pub async fn supervisor(&self, employee: &Employee) -> Result<Option<Employee>, DatabaseError> {
        match employee.sup_id {
            Some(sup_id) => self.find_by_pk(sup_id, true).await,
            None => Ok(None),
        }
    }

    async fn fetch_employees(&self, sql: SqlResult) -> Result<Vec<Employee>, DatabaseError> {
        log_query(&sql);
        let rows = sqlx::query_as_with::<_, Employee, _>(&sql.query, arguments(&sql.params))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_json(&self, sql: SqlResult) -> Result<Vec<Map<String, Value>>, DatabaseError> {
        log_query(&sql);
        let rows: Vec<Value> = sqlx::query_scalar_with(&sql.query, arguments(&sql.params))
            .fetch_all(&self.pool)
            .await?;

        let offset = config().display.offset();
        rows.into_iter()
            .map(|row| match row {
                Value::Object(map) => Ok(EMPLOYEE.present(map, offset)),
                other => Err(DatabaseError::QueryError(format!("expected a JSON row, got {}", other))),
            })
            .collect()
    }

    async fn execute(&self, sql: SqlResult) -> Result<u64, DatabaseError> {
        log_query(&sql);
        let result = sqlx::query_with(&sql.query, arguments(&sql.params))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// `{ attribute: value }`
fn equals(attribute: &Attribute, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(attribute.name.to_string(), value);
    Value::Object(map)
}
