pub mod auth;
pub mod content;
pub mod course;
pub mod module;
pub mod subject;
