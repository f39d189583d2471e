//! Entity structs for Focus domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize` and `Deserialize` with the field names the HTTP clients use.

mod task;

pub use task::Task;
