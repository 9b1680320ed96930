//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or a transaction's connection) as the first argument.

pub mod content_repo;
pub mod course_repo;
pub mod item_repo;
pub mod module_repo;
pub mod role_repo;
pub mod session_repo;
pub mod subject_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use course_repo::CourseRepo;
pub use item_repo::ItemRepo;
pub use module_repo::ModuleRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
