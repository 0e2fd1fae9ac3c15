use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value};

use super::display::{Display, DATE_FORMAT};
use super::error::ModelError;

pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";
pub const DELETED_AT: &str = "deletedAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    BigIntUnsigned,
    /// Variable length text with a maximum length
    String(u32),
    /// Fixed length text
    Char(u32),
    Date,
    Timestamp,
}

impl DataType {
    pub fn sql_type(&self, auto_increment: bool) -> String {
        match self {
            DataType::BigIntUnsigned if auto_increment => "BIGSERIAL".to_string(),
            DataType::BigIntUnsigned => "BIGINT".to_string(),
            DataType::String(len) => format!("VARCHAR({})", len),
            DataType::Char(len) => format!("CHAR({})", len),
            DataType::Date => "DATE".to_string(),
            DataType::Timestamp => "TIMESTAMPTZ".to_string(),
        }
    }

    /// Cast appended to bind placeholders so text parameters compare against typed columns
    pub fn param_cast(&self) -> &'static str {
        match self {
            DataType::BigIntUnsigned => "::bigint",
            DataType::String(_) | DataType::Char(_) => "",
            DataType::Date => "::date",
            DataType::Timestamp => "::timestamptz",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    None,
    Null,
    Now,
}

/// Mapping between a programmatic attribute and its physical column
#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    pub name: &'static str,
    pub field: &'static str,
    pub data_type: DataType,
    pub primary_key: bool,
    pub allow_null: bool,
    pub auto_increment: bool,
    pub default: DefaultValue,
    /// (table, column) this attribute points at
    pub references: Option<(&'static str, &'static str)>,
    pub comment: &'static str,
    pub display: Option<Display>,
}

impl Attribute {
    pub const fn new(name: &'static str, field: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            field,
            data_type,
            primary_key: false,
            allow_null: true,
            auto_increment: false,
            default: DefaultValue::None,
            references: None,
            comment: "",
            display: None,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.allow_null = false;
        self
    }

    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    pub const fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    pub const fn comment(mut self, comment: &'static str) -> Self {
        self.comment = comment;
        self
    }

    pub const fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    /// Placeholder text for bind parameter `index` (1-based), cast to this column's type
    pub fn placeholder(&self, index: usize) -> String {
        format!("${}{}", index, self.data_type.param_cast())
    }

    /// Checks a client-supplied value against the column declaration and normalizes it
    pub fn coerce(&self, value: &Value) -> Result<Value, ModelError> {
        let invalid = |reason: &str| ModelError::InvalidValue {
            attribute: self.name.to_string(),
            reason: reason.to_string(),
        };

        if value.is_null() {
            return if self.allow_null {
                Ok(Value::Null)
            } else {
                Err(invalid("must not be null"))
            };
        }

        match self.data_type {
            DataType::BigIntUnsigned => {
                let n = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or_else(|| invalid("must be an integer"))?;
                if n < 0 {
                    return Err(invalid("must not be negative"));
                }
                Ok(Value::from(n))
            }
            DataType::String(max) | DataType::Char(max) => {
                let s = value.as_str().ok_or_else(|| invalid("must be text"))?;
                let len = s.chars().count();
                if len == 0 && !self.allow_null {
                    return Err(invalid("must not be empty"));
                }
                if len > max as usize {
                    return Err(invalid(&format!("must be at most {} characters", max)));
                }
                Ok(Value::String(s.to_string()))
            }
            DataType::Date => {
                let s = value.as_str().ok_or_else(|| invalid("must be a date"))?;
                let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                    .map_err(|_| invalid("must be formatted as YYYY-MM-DD"))?;
                Ok(Value::String(date.format(DATE_FORMAT).to_string()))
            }
            DataType::Timestamp => {
                let s = value.as_str().ok_or_else(|| invalid("must be a timestamp"))?;
                let ts: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(s.trim())
                    .map_err(|_| invalid("must be an RFC 3339 timestamp"))?;
                Ok(Value::String(ts.to_rfc3339()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    HasMany,
}

/// Relationship declared on the "one" side
#[derive(Debug, Clone, Copy)]
pub struct Association {
    pub kind: AssociationKind,
    pub target: &'static str,
    pub target_table: &'static str,
    /// Attribute on this model that is referenced
    pub source_key: &'static str,
    /// Attribute on the target model holding the reference
    pub foreign_key: &'static str,
    pub alias: &'static str,
}

/// Declarative description of a persisted entity
#[derive(Debug)]
pub struct ModelDefinition {
    pub name: &'static str,
    pub table_name: &'static str,
    pub attributes: &'static [Attribute],
    /// `createdAt` / `updatedAt` are managed automatically
    pub timestamps: bool,
    /// Deletes stamp `deletedAt` and reads skip stamped rows
    pub paranoid: bool,
    pub associations: &'static [Association],
}

impl ModelDefinition {
    /// Finds an attribute by its programmatic name or its column name
    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        let attributes: &'static [Attribute] = self.attributes;
        attributes
            .iter()
            .find(|a| a.name == name)
            .or_else(|| attributes.iter().find(|a| a.field == name))
    }

    pub fn resolve(&self, name: &str) -> Result<&'static Attribute, ModelError> {
        self.attribute(name)
            .ok_or_else(|| ModelError::UnknownAttribute(name.to_string()))
    }

    pub fn primary_key(&self) -> Option<&'static Attribute> {
        let attributes: &'static [Attribute] = self.attributes;
        attributes.iter().find(|a| a.primary_key)
    }

    pub fn created_at(&self) -> Option<&'static Attribute> {
        self.timestamps.then(|| self.attribute(CREATED_AT)).flatten()
    }

    pub fn updated_at(&self) -> Option<&'static Attribute> {
        self.timestamps.then(|| self.attribute(UPDATED_AT)).flatten()
    }

    pub fn deleted_at(&self) -> Option<&'static Attribute> {
        self.paranoid.then(|| self.attribute(DELETED_AT)).flatten()
    }

    /// Attributes whose values are assigned by the database or the model itself
    pub fn is_managed(&self, attribute: &Attribute) -> bool {
        (attribute.primary_key && attribute.auto_increment)
            || (self.timestamps && (attribute.name == CREATED_AT || attribute.name == UPDATED_AT))
            || (self.paranoid && attribute.name == DELETED_AT)
    }

    /// Attributes a client must supply on create
    pub fn required_attributes(&self) -> impl Iterator<Item = &'static Attribute> + '_ {
        let attributes: &'static [Attribute] = self.attributes;
        attributes
            .iter()
            .filter(move |a| !a.allow_null && a.default == DefaultValue::None && !self.is_managed(a))
    }

    /// Validates a client payload key by key; managed and unknown keys are refused
    pub fn writable_values(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<Vec<(&'static Attribute, Value)>, ModelError> {
        let mut values = Vec::with_capacity(payload.len());
        for (key, value) in payload {
            let attribute = self.resolve(key)?;
            if self.is_managed(attribute) {
                return Err(ModelError::SystemFieldNotAllowed(attribute.name.to_string()));
            }
            values.push((attribute, attribute.coerce(value)?));
        }
        Ok(values)
    }

    /// `"column" AS "attribute"` for every attribute
    pub fn select_list(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!("\"{}\" AS \"{}\"", a.field, a.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn association(&self, alias: &str) -> Option<&'static Association> {
        let associations: &'static [Association] = self.associations;
        associations.iter().find(|a| a.alias == alias)
    }

    /// Applies the display transform of every attribute present in `row` (keyed by
    /// attribute name)
    pub fn present(&self, mut row: Map<String, Value>, offset: FixedOffset) -> Map<String, Value> {
        for attribute in self.attributes {
            if let (Some(display), Some(value)) = (attribute.display, row.get_mut(attribute.name)) {
                *value = display.render(value, offset);
            }
        }
        row
    }

    /// DDL statements creating the table, its indexes and column comments
    pub fn create_table_sql(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.attributes.iter().map(column_ddl).collect();

        if let Some(pk) = self.primary_key() {
            columns.push(format!("PRIMARY KEY (\"{}\")", pk.field));
        }
        for attribute in self.attributes {
            if let Some((table, column)) = attribute.references {
                columns.push(format!(
                    "FOREIGN KEY (\"{}\") REFERENCES \"{}\" (\"{}\")",
                    attribute.field, table, column
                ));
            }
        }

        let mut statements = vec![format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (\n  {}\n)",
            self.table_name,
            columns.join(",\n  ")
        )];

        for attribute in self.attributes.iter().filter(|a| a.references.is_some()) {
            statements.push(format!(
                "CREATE INDEX IF NOT EXISTS \"{table}_{column}_idx\" ON \"{table}\" (\"{column}\")",
                table = self.table_name,
                column = attribute.field
            ));
        }

        for attribute in self.attributes.iter().filter(|a| !a.comment.is_empty()) {
            statements.push(format!(
                "COMMENT ON COLUMN \"{}\".\"{}\" IS '{}'",
                self.table_name,
                attribute.field,
                attribute.comment.replace('\'', "''")
            ));
        }

        statements
    }
}

fn column_ddl(attribute: &Attribute) -> String {
    let mut parts = vec![
        format!("\"{}\"", attribute.field),
        attribute.data_type.sql_type(attribute.auto_increment),
        if attribute.allow_null { "NULL" } else { "NOT NULL" }.to_string(),
    ];

    match attribute.default {
        DefaultValue::None => {}
        DefaultValue::Null => parts.push("DEFAULT NULL".to_string()),
        DefaultValue::Now => parts.push("DEFAULT NOW()".to_string()),
    }

    if attribute.data_type == DataType::BigIntUnsigned {
        parts.push(format!("CHECK (\"{}\" >= 0)", attribute.field));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static ATTRS: [Attribute; 4] = [
        Attribute::new("bookId", "book_id", DataType::BigIntUnsigned)
            .primary_key()
            .auto_increment(),
        Attribute::new("title", "title", DataType::String(5)).not_null().comment("book's title"),
        Attribute::new("createdAt", "created_at", DataType::Timestamp)
            .not_null()
            .default_value(DefaultValue::Now),
        Attribute::new("updatedAt", "updated_at", DataType::Timestamp)
            .not_null()
            .default_value(DefaultValue::Now),
    ];

    static BOOK: ModelDefinition = ModelDefinition {
        name: "Book",
        table_name: "books",
        attributes: &ATTRS,
        timestamps: true,
        paranoid: false,
        associations: &[],
    };

    #[test]
    fn resolves_attribute_or_column_names() {
        assert_eq!(BOOK.attribute("bookId").map(|a| a.field), Some("book_id"));
        assert_eq!(BOOK.attribute("book_id").map(|a| a.name), Some("bookId"));
        assert!(BOOK.resolve("isbn").is_err());
    }

    #[test]
    fn non_paranoid_model_has_no_deleted_at() {
        assert!(BOOK.deleted_at().is_none());
        assert_eq!(BOOK.updated_at().map(|a| a.field), Some("updated_at"));
    }

    #[test]
    fn required_attributes_skip_managed_and_defaulted() {
        let required: Vec<_> = BOOK.required_attributes().map(|a| a.name).collect();
        assert_eq!(required, vec!["title"]);
    }

    #[test]
    fn managed_fields_are_not_writable() {
        let payload = json!({ "createdAt": "2024-01-01T00:00:00Z" });
        let err = BOOK.writable_values(payload.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ModelError::SystemFieldNotAllowed(name) if name == "createdAt"));
    }

    #[test]
    fn coerce_enforces_declared_length() {
        let title = BOOK.attribute("title").unwrap();
        assert!(title.coerce(&json!("short")).is_ok());
        assert!(title.coerce(&json!("too long")).is_err());
        assert!(title.coerce(&json!(null)).is_err());
    }

    #[test]
    fn ddl_carries_constraints_and_escaped_comments() {
        let ddl = BOOK.create_table_sql();
        assert!(ddl[0].contains("\"book_id\" BIGSERIAL NOT NULL CHECK (\"book_id\" >= 0)"));
        assert!(ddl[0].contains("\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()"));
        assert!(ddl[0].contains("PRIMARY KEY (\"book_id\")"));
        assert_eq!(ddl[1], "COMMENT ON COLUMN \"books\".\"title\" IS 'book''s title'");
    }
}
