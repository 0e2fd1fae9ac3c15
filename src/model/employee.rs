use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::definition::{
    Association, AssociationKind, Attribute, DataType, DefaultValue, ModelDefinition,
};
use super::display::{self, Display};
use super::error::ModelError;

static EMPLOYEE_ATTRIBUTES: [Attribute; 10] = [
    Attribute::new("empId", "emp_id", DataType::BigIntUnsigned)
        .primary_key()
        .auto_increment()
        .comment("employee id"),
    Attribute::new("name", "name", DataType::String(50))
        .not_null()
        .comment("employee name"),
    Attribute::new("birth", "birth", DataType::Date)
        .not_null()
        .comment("birth date")
        .display(Display::Date),
    Attribute::new("gender", "gender", DataType::Char(1))
        .not_null()
        .comment("gender code"),
    Attribute::new("hireAt", "hire_at", DataType::Date)
        .not_null()
        .comment("hire date")
        .display(Display::Date),
    Attribute::new("fireAt", "fire_at", DataType::Date)
        .default_value(DefaultValue::Null)
        .comment("termination date")
        .display(Display::Date),
    Attribute::new("supId", "sup_id", DataType::BigIntUnsigned)
        .default_value(DefaultValue::Null)
        .references("employees", "emp_id")
        .comment("supervisor employee id"),
    Attribute::new("createdAt", "created_at", DataType::Timestamp)
        .not_null()
        .default_value(DefaultValue::Now)
        .comment("created at")
        .display(Display::DateTime),
    Attribute::new("updatedAt", "updated_at", DataType::Timestamp)
        .not_null()
        .default_value(DefaultValue::Now)
        .comment("updated at")
        .display(Display::DateTime),
    Attribute::new("deletedAt", "deleted_at", DataType::Timestamp)
        .default_value(DefaultValue::Null)
        .comment("deleted at")
        .display(Display::DateTime),
];

static EMPLOYEE_ASSOCIATIONS: [Association; 2] = [
    // supervisor (one) -> subordinates (many)
    Association {
        kind: AssociationKind::HasMany,
        target: "Employee",
        target_table: "employees",
        source_key: "empId",
        foreign_key: "supId",
        alias: "subordinates",
    },
    // employee (one) -> title history (many)
    Association {
        kind: AssociationKind::HasMany,
        target: "TitleEmp",
        target_table: "title_emps",
        source_key: "empId",
        foreign_key: "empId",
        alias: "titleEmps",
    },
];

pub static EMPLOYEE: ModelDefinition = ModelDefinition {
    name: "Employee",
    table_name: "employees",
    attributes: &EMPLOYEE_ATTRIBUTES,
    timestamps: true,
    paranoid: true,
    associations: &EMPLOYEE_ASSOCIATIONS,
};

/// Employee row as read through [`ModelDefinition::select_list`]
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Employee {
    pub emp_id: i64,
    pub name: String,
    #[serde(serialize_with = "display::serialize_date")]
    pub birth: NaiveDate,
    pub gender: String,
    #[serde(serialize_with = "display::serialize_date")]
    pub hire_at: NaiveDate,
    #[serde(serialize_with = "display::serialize_opt_date")]
    pub fire_at: Option<NaiveDate>,
    pub sup_id: Option<i64>,
    #[serde(serialize_with = "display::serialize_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "display::serialize_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(serialize_with = "display::serialize_opt_datetime")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields needed to create an employee
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub birth: NaiveDate,
    pub gender: String,
    pub hire_at: NaiveDate,
    #[serde(default)]
    pub fire_at: Option<NaiveDate>,
    #[serde(default)]
    pub sup_id: Option<i64>,
}

impl NewEmployee {
    /// Builds a new employee from a client payload keyed by attribute names
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ModelError> {
        for attribute in EMPLOYEE.required_attributes() {
            let present = payload
                .get(attribute.name)
                .or_else(|| payload.get(attribute.field))
                .is_some_and(|v| !v.is_null());
            if !present {
                return Err(ModelError::MissingRequiredField(attribute.name.to_string()));
            }
        }

        let normalized: Map<String, Value> = EMPLOYEE
            .writable_values(payload)?
            .into_iter()
            .map(|(attribute, value)| (attribute.name.to_string(), value))
            .collect();

        serde_json::from_value(Value::Object(normalized)).map_err(|e| ModelError::InvalidValue {
            attribute: EMPLOYEE.name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Column values for an INSERT, in declaration order
    pub fn values(&self) -> Result<Vec<(&'static Attribute, Value)>, ModelError> {
        let date = |d: NaiveDate| Value::String(d.format(display::DATE_FORMAT).to_string());
        Ok(vec![
            (EMPLOYEE.resolve("name")?, Value::String(self.name.clone())),
            (EMPLOYEE.resolve("birth")?, date(self.birth)),
            (EMPLOYEE.resolve("gender")?, Value::String(self.gender.clone())),
            (EMPLOYEE.resolve("hireAt")?, date(self.hire_at)),
            (EMPLOYEE.resolve("fireAt")?, self.fire_at.map(date).unwrap_or(Value::Null)),
            (EMPLOYEE.resolve("supId")?, self.sup_id.map(Value::from).unwrap_or(Value::Null)),
        ])
    }
}

/// Partial update: only the listed attributes change
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    values: Vec<(&'static Attribute, Value)>,
}

impl EmployeeChanges {
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ModelError> {
        Ok(Self {
            values: EMPLOYEE.writable_values(payload)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[(&'static Attribute, Value)] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn sample() -> Employee {
        Employee {
            emp_id: 7,
            name: "강가람".into(),
            birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            gender: "F".into(),
            hire_at: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
            fire_at: None,
            sup_id: Some(1),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            deleted_at: None,
        }
    }

    #[test]
    fn model_maps_attributes_to_columns() {
        assert_eq!(EMPLOYEE.table_name, "employees");
        assert_eq!(EMPLOYEE.primary_key().map(|a| a.field), Some("emp_id"));
        assert_eq!(EMPLOYEE.attribute("hireAt").map(|a| a.field), Some("hire_at"));
        assert_eq!(EMPLOYEE.deleted_at().map(|a| a.field), Some("deleted_at"));
    }

    #[test]
    fn required_attributes_are_the_mandatory_columns() {
        let required: Vec<_> = EMPLOYEE.required_attributes().map(|a| a.name).collect();
        assert_eq!(required, vec!["name", "birth", "gender", "hireAt"]);
    }

    #[test]
    fn supervisor_is_a_self_reference() {
        let subordinates = EMPLOYEE.association("subordinates").unwrap();
        assert_eq!(subordinates.target_table, EMPLOYEE.table_name);
        assert_eq!(subordinates.foreign_key, "supId");
        assert_eq!(EMPLOYEE.attribute("supId").and_then(|a| a.references), Some(("employees", "emp_id")));
    }

    #[test]
    fn serializes_with_display_formats() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["empId"], json!(7));
        assert_eq!(value["birth"], json!("1990-05-17"));
        assert_eq!(value["fireAt"], Value::Null);
        assert_eq!(value["deletedAt"], Value::Null);
        // default display offset is UTC
        assert_eq!(value["createdAt"], json!("2024-01-02 03:04:05"));
    }

    #[test]
    fn new_employee_requires_mandatory_fields() {
        let err = NewEmployee::from_payload(&payload(json!({
            "name": "테스트",
            "gender": "F",
            "hireAt": "2024-01-01"
        })))
        .unwrap_err();
        assert!(matches!(err, ModelError::MissingRequiredField(f) if f == "birth"));
    }

    #[test]
    fn new_employee_parses_payload() {
        let created = NewEmployee::from_payload(&payload(json!({
            "name": "또치",
            "birth": "1980-01-01",
            "gender": "F",
            "hireAt": "2024-06-30",
            "supId": 12
        })))
        .unwrap();
        assert_eq!(created.birth, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
        assert_eq!(created.sup_id, Some(12));
        assert_eq!(created.fire_at, None);

        let values = created.values().unwrap();
        let columns: Vec<_> = values.iter().map(|(a, _)| a.field).collect();
        assert_eq!(columns, vec!["name", "birth", "gender", "hire_at", "fire_at", "sup_id"]);
        assert_eq!(values[1].1, json!("1980-01-01"));
        assert_eq!(values[5].1, json!(12));
    }

    #[test]
    fn new_employee_rejects_bad_gender_length() {
        let err = NewEmployee::from_payload(&payload(json!({
            "name": "또치",
            "birth": "1980-01-01",
            "gender": "FM",
            "hireAt": "2024-06-30"
        })))
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidValue { attribute, .. } if attribute == "gender"));
    }

    #[test]
    fn changes_refuse_primary_key_and_timestamps() {
        assert!(EmployeeChanges::from_payload(&payload(json!({ "empId": 3 }))).is_err());
        assert!(EmployeeChanges::from_payload(&payload(json!({ "updatedAt": null }))).is_err());

        let changes = EmployeeChanges::from_payload(&payload(json!({ "name": "사자", "fireAt": null }))).unwrap();
        assert_eq!(changes.values().len(), 2);
    }
}
