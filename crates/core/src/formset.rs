//! Bulk editing of a course's modules.
//!
//! The module editor submits every row at once: rows carrying an `id` edit or
//! delete an existing module, rows without one create a module, and blank new
//! rows (the spare slots the editor always shows) are ignored. [`plan_modules`]
//! checks the submission against the course's current modules and turns it
//! into a plan the repository applies in one transaction.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{validate_title, MAX_TITLE_LEN};

/// One submitted row of the module editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleForm {
    pub id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub delete: bool,
}

impl ModuleForm {
    fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

/// Field values for a created or updated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFields {
    pub title: String,
    pub description: String,
}

/// What to do with a course's modules, in application order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ModulePlan {
    pub deletes: Vec<DbId>,
    pub updates: Vec<(DbId, ModuleFields)>,
    /// Created in submission order, so they are appended in that order.
    pub creates: Vec<ModuleFields>,
}

impl ModulePlan {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.updates.is_empty() && self.creates.is_empty()
    }
}

/// Validate a module editor submission against the course's existing modules.
///
/// Fails when a row references a module outside the course, when the same
/// module appears twice, or when a kept row has an invalid title.
pub fn plan_modules(existing: &[DbId], rows: Vec<ModuleForm>) -> Result<ModulePlan, CoreError> {
    let existing: HashSet<DbId> = existing.iter().copied().collect();
    let mut seen = HashSet::new();
    let mut plan = ModulePlan::default();

    for (index, row) in rows.into_iter().enumerate() {
        match row.id {
            Some(id) => {
                if !existing.contains(&id) {
                    return Err(CoreError::Validation(format!(
                        "Row {index}: module {id} does not belong to this course"
                    )));
                }
                if !seen.insert(id) {
                    return Err(CoreError::Validation(format!(
                        "Row {index}: module {id} submitted more than once"
                    )));
                }
                if row.delete {
                    plan.deletes.push(id);
                    continue;
                }
                validate_row(index, &row)?;
                plan.updates.push((id, fields(row)));
            }
            None => {
                if row.delete || row.is_blank() {
                    continue;
                }
                validate_row(index, &row)?;
                plan.creates.push(fields(row));
            }
        }
    }

    Ok(plan)
}

fn validate_row(index: usize, row: &ModuleForm) -> Result<(), CoreError> {
    validate_title("title", &row.title, MAX_TITLE_LEN).map_err(|e| match e {
        CoreError::Validation(msg) => CoreError::Validation(format!("Row {index}: {msg}")),
        other => other,
    })
}

fn fields(row: ModuleForm) -> ModuleFields {
    ModuleFields {
        title: row.title.trim().to_string(),
        description: row.description,
    }
}
