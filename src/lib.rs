pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod model;
pub mod validation;

pub use app::app;
