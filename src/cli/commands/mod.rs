pub mod check;
pub mod migrate;
pub mod schema;
pub mod show;
