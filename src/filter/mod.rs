//! Query construction over a [`ModelDefinition`](crate::model::ModelDefinition).
//!
//! Filters are written against attribute names and compiled to parameterized SQL with the
//! soft-delete predicate appended unless `paranoid` is switched off.

pub mod types;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod error;

pub use types::*;
pub use filter::Filter;
pub use error::FilterError;
