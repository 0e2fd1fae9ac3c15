//! Entity model definitions: column metadata, display transforms and the employee entity.

pub mod definition;
pub mod display;
pub mod employee;
pub mod error;

pub use definition::{Association, AssociationKind, Attribute, DataType, DefaultValue, ModelDefinition};
pub use display::Display;
pub use employee::{Employee, EmployeeChanges, NewEmployee, EMPLOYEE};
pub use error::ModelError;
