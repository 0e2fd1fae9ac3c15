pub mod bind;
pub mod employee_repository;
pub mod manager;

pub use employee_repository::EmployeeRepository;
pub use manager::{DatabaseError, DatabaseManager};
