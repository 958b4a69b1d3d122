//! Employee records and their project assignments.
//!
//! # Invariants
//! - An employee holds at most one assignment per `project_id`.

use crate::model::project::ProjectId;
use crate::model::Kudos;
use serde::{Deserialize, Serialize};

pub type EmployeeId = u32;

/// Free-form role name, shared by primary roles and project roles.
pub type EmployeeRole = String;

/// One employee's participation in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAssignment {
    pub project_id: ProjectId,
    pub role: EmployeeRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: EmployeeRole,
    pub avatar_url: String,
    /// Cumulative kudos received; also the redemption currency.
    pub kudos_received: Kudos,
    /// Spendable kudos, debited on send and credited by streak bonuses.
    pub kudos_balance: Kudos,
    /// Cumulative kudos sent.
    pub kudos_sent: Kudos,
    #[serde(default)]
    pub project_assignments: Vec<ProjectAssignment>,
}

impl Employee {
    /// Returns the assignment for `project_id`, if any.
    pub fn assignment_for(&self, project_id: ProjectId) -> Option<&ProjectAssignment> {
        self.project_assignments
            .iter()
            .find(|assignment| assignment.project_id == project_id)
    }

    pub fn is_assigned_to(&self, project_id: ProjectId) -> bool {
        self.assignment_for(project_id).is_some()
    }

    /// True when the primary role or any project role equals `role`.
    pub fn holds_role(&self, role: &str) -> bool {
        self.role == role
            || self
                .project_assignments
                .iter()
                .any(|assignment| assignment.role == role)
    }

    /// Returns a copy without any assignment to `project_id`.
    pub fn without_project(&self, project_id: ProjectId) -> Self {
        Self {
            project_assignments: self
                .project_assignments
                .iter()
                .filter(|assignment| assignment.project_id != project_id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}
