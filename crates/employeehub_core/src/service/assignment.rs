//! Project assignment reconciliation.
//!
//! # Responsibility
//! - Diff a desired `(employee, role)` set for one project against current
//!   assignments and apply the minimal add/remove/role-update changes.
//!
//! # Invariants
//! - Idempotent: reconciling the same desired set twice changes nothing the
//!   second time.
//! - No employee ends with two assignments sharing a project id.
//! - When the desired set names an employee twice, the first entry wins.
//! - Desired entries for unknown employees are ignored.

use crate::model::employee::{Employee, EmployeeId, EmployeeRole, ProjectAssignment};
use crate::model::project::ProjectId;
use crate::repo::kv_repo::RepoResult;
use crate::service::directory::Directory;
use log::info;
use std::collections::BTreeMap;

/// Desired membership of one employee in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredAssignment {
    pub employee_id: EmployeeId,
    pub role: EmployeeRole,
}

impl DesiredAssignment {
    pub fn new(employee_id: EmployeeId, role: impl Into<EmployeeRole>) -> Self {
        Self {
            employee_id,
            role: role.into(),
        }
    }
}

/// Count of per-employee changes applied by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub added: usize,
    pub removed: usize,
    pub role_updated: usize,
}

impl ReconcileStats {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.role_updated == 0
    }
}

/// Computes the employee collection after reconciling `project_id`.
pub fn reconcile(
    employees: &[Employee],
    project_id: ProjectId,
    desired: &[DesiredAssignment],
) -> (Vec<Employee>, ReconcileStats) {
    let mut wanted: BTreeMap<EmployeeId, &str> = BTreeMap::new();
    for entry in desired {
        wanted.entry(entry.employee_id).or_insert(entry.role.as_str());
    }

    let mut stats = ReconcileStats::default();
    let next = employees
        .iter()
        .map(|employee| {
            let current = employee.assignment_for(project_id);
            match (current, wanted.get(&employee.id)) {
                (Some(_), None) => {
                    stats.removed += 1;
                    employee.without_project(project_id)
                }
                (None, Some(role)) => {
                    stats.added += 1;
                    let mut next = employee.clone();
                    next.project_assignments.push(ProjectAssignment {
                        project_id,
                        role: (*role).to_string(),
                    });
                    next
                }
                (Some(assignment), Some(role)) if assignment.role != *role => {
                    stats.role_updated += 1;
                    with_project_role(employee, project_id, role)
                }
                _ => employee.clone(),
            }
        })
        .collect();

    (next, stats)
}

fn with_project_role(employee: &Employee, project_id: ProjectId, role: &str) -> Employee {
    let mut seen = false;
    let project_assignments = employee
        .project_assignments
        .iter()
        .filter_map(|assignment| {
            if assignment.project_id != project_id {
                return Some(assignment.clone());
            }
            if seen {
                return None;
            }
            seen = true;
            Some(ProjectAssignment {
                project_id,
                role: role.to_string(),
            })
        })
        .collect();
    Employee {
        project_assignments,
        ..employee.clone()
    }
}

impl Directory {
    /// Makes `project_id` membership match `desired` exactly.
    ///
    /// The employee collection is swapped only when something changed.
    pub fn reconcile_assignments(
        &mut self,
        project_id: ProjectId,
        desired: &[DesiredAssignment],
    ) -> RepoResult<ReconcileStats> {
        let (next, stats) = reconcile(self.employees(), project_id, desired);
        if !stats.is_noop() {
            self.employees.set(next)?;
        }
        info!(
            "event=assignments_reconcile module=assignments status=ok project_id={project_id} desired={} added={} removed={} role_updated={}",
            desired.len(),
            stats.added,
            stats.removed,
            stats.role_updated
        );
        Ok(stats)
    }
}
