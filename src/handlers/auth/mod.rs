// handlers/auth/mod.rs - credential routes guarded by body validation
//
// Both routes run behind `validate_body_middleware`, so a handler only ever sees a body
// whose fields passed every rule.

pub mod login;
pub mod registration;

pub use login::login;
pub use registration::registration;
