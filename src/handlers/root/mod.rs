// handlers/root/mod.rs - service description and health probe

pub mod health;
pub mod index;

pub use health::health;
pub use index::index;
