// handlers/users/mod.rs - /users routes
//
// Listing, update and delete are placeholders answering with a fixed text; only the
// single-user lookup reads the employees table.

pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use delete::user_delete;
pub use list::user_list;
pub use show::user_show;
pub use update::user_update;
