//! Course permission codes and the role grants behind them.
//!
//! Course management endpoints each require one permission code. Content
//! editing requires the full set of course edit permissions at once.

use crate::roles::{ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT};

pub const VIEW_COURSE: &str = "courses.view_course";
pub const ADD_COURSE: &str = "courses.add_course";
pub const CHANGE_COURSE: &str = "courses.change_course";
pub const DELETE_COURSE: &str = "courses.delete_course";

/// Permissions required to create, edit or delete module content.
pub const CONTENT_EDIT: &[&str] = &[ADD_COURSE, DELETE_COURSE, CHANGE_COURSE];

const ALL_COURSE: &[&str] = &[VIEW_COURSE, ADD_COURSE, CHANGE_COURSE, DELETE_COURSE];

/// Permission codes granted to a role. Unknown roles get nothing.
pub fn granted(role: &str) -> &'static [&'static str] {
    match role {
        ROLE_ADMIN | ROLE_INSTRUCTOR => ALL_COURSE,
        ROLE_STUDENT => &[VIEW_COURSE],
        _ => &[],
    }
}

/// Whether `role` holds every permission in `required`.
pub fn has_all(role: &str, required: &[&str]) -> bool {
    let grants = granted(role);
    required.iter().all(|p| grants.contains(p))
}
