//! Domain logic for the Educa course platform.
//!
//! Pure types and rules shared by the persistence and HTTP layers. Nothing in
//! this crate performs I/O; the database-facing pieces are expressed as traits
//! (see [`ordering::OrderLookup`]) implemented in `educa_db`.

pub mod content;
pub mod error;
pub mod formset;
pub mod ordering;
pub mod permissions;
pub mod roles;
pub mod types;
pub mod validation;
