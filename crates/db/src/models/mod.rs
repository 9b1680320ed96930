//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod content;
pub mod course;
pub mod item;
pub mod module;
pub mod role;
pub mod session;
pub mod subject;
pub mod user;
