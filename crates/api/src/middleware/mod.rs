//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireView`], [`rbac::RequireAdd`], [`rbac::RequireChange`],
//!   [`rbac::RequireDelete`] -- require one course permission.
//! - [`rbac::RequireContentEdit`] -- requires add, change and delete together.

pub mod auth;
pub mod rbac;
