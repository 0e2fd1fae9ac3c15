use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,

    Like,
    NLike,
    ILike,

    In,
    NIn,

    Between,
    NBetween,

    Is,
    Not,
}

impl FilterOp {
    pub fn from_key(key: &str) -> Result<Self, FilterError> {
        Ok(match key {
            "$eq" => FilterOp::Eq,
            "$ne" | "$neq" => FilterOp::Ne,
            "$gt" => FilterOp::Gt,
            "$gte" => FilterOp::Gte,
            "$lt" => FilterOp::Lt,
            "$lte" => FilterOp::Lte,
            "$like" => FilterOp::Like,
            "$nlike" => FilterOp::NLike,
            "$ilike" => FilterOp::ILike,
            "$in" => FilterOp::In,
            "$nin" => FilterOp::NIn,
            "$between" => FilterOp::Between,
            "$nbetween" => FilterOp::NBetween,
            "$is" => FilterOp::Is,
            "$not" => FilterOp::Not,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }

    /// SQL comparison for the scalar operators
    pub fn comparison(&self) -> Option<&'static str> {
        match self {
            FilterOp::Eq => Some("="),
            FilterOp::Ne => Some("<>"),
            FilterOp::Gt => Some(">"),
            FilterOp::Gte => Some(">="),
            FilterOp::Lt => Some("<"),
            FilterOp::Lte => Some("<="),
            FilterOp::Like => Some("LIKE"),
            FilterOp::NLike => Some("NOT LIKE"),
            FilterOp::ILike => Some("ILIKE"),
            _ => None,
        }
    }
}

fn default_paranoid() -> bool {
    true
}

/// Client-facing query description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterData {
    #[serde(default)]
    pub select: Option<Vec<String>>,
    #[serde(default, rename = "where", alias = "where_clause")]
    pub where_clause: Option<serde_json::Value>,
    #[serde(default)]
    pub order: Option<serde_json::Value>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    /// `false` includes soft-deleted rows
    #[serde(default = "default_paranoid")]
    pub paranoid: bool,
}

impl Default for FilterData {
    fn default() -> Self {
        Self {
            select: None,
            where_clause: None,
            order: None,
            limit: None,
            offset: None,
            paranoid: true,
        }
    }
}

impl FilterData {
    pub fn with_where(where_clause: serde_json::Value) -> Self {
        Self {
            where_clause: Some(where_clause),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FilterWhereOptions {
    /// Append the soft-delete predicate
    pub paranoid: bool,
}

impl Default for FilterWhereOptions {
    fn default() -> Self {
        Self { paranoid: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Count,
    Max,
    Min,
    Sum,
    Avg,
}

impl Aggregate {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Max => "MAX",
            Aggregate::Min => "MIN",
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
        }
    }
}

impl FromStr for Aggregate {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "count" => Ok(Aggregate::Count),
            "max" => Ok(Aggregate::Max),
            "min" => Ok(Aggregate::Min),
            "sum" => Ok(Aggregate::Sum),
            "avg" => Ok(Aggregate::Avg),
            other => Err(FilterError::UnsupportedAggregate(other.to_string())),
        }
    }
}

/// Post-aggregation condition on `COUNT(*)`
#[derive(Debug, Clone, Copy)]
pub struct HavingCount {
    pub op: FilterOp,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}
