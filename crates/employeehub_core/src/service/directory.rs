//! Directory of employees, projects, rewards and the kudos feed.
//!
//! # Responsibility
//! - Own the in-memory collections and their persistence hooks.
//! - Provide read accessors and project/employee CRUD.
//!
//! # Invariants
//! - Every mutation swaps in a whole new collection snapshot.
//! - Deleting a project leaves no assignment referencing it.
//! - Project ids are allocated sequentially and never reused in-process.

use crate::clock::Clock;
use crate::model::employee::{Employee, EmployeeId, EmployeeRole, ProjectAssignment};
use crate::model::kudo::{KudoId, KudoTransaction};
use crate::model::project::{NewProject, Project, ProjectId};
use crate::model::reward::{Reward, RewardId};
use crate::repo::json_store::{load_json, save_json, EMPLOYEES_KEY, PROJECTS_KEY};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::seed;
use crate::signal::Signal;
use log::info;
use serde::Serialize;
use std::rc::Rc;

/// Number of employees returned by [`Directory::leaderboard`].
pub const LEADERBOARD_SIZE: usize = 5;

pub struct Directory {
    pub(crate) store: Rc<dyn KeyValueStore>,
    pub(crate) clock: Rc<dyn Clock>,
    pub(crate) employees: Signal<Vec<Employee>>,
    projects: Signal<Vec<Project>>,
    rewards: Vec<Reward>,
    pub(crate) feed: Signal<Vec<KudoTransaction>>,
    next_project_id: ProjectId,
    pub(crate) next_kudo_id: KudoId,
}

impl Directory {
    /// Loads persisted collections, falling back to seed data, and wires
    /// persistence so every later swap is written back to `store`.
    pub fn open(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> RepoResult<Self> {
        let employees = load_json::<Vec<Employee>>(store.as_ref(), EMPLOYEES_KEY)?
            .unwrap_or_else(seed::employees);
        let projects = load_json::<Vec<Project>>(store.as_ref(), PROJECTS_KEY)?
            .unwrap_or_else(seed::projects);
        let feed = seed::feed(&employees, clock.now());

        let next_project_id = projects.iter().map(|project| project.id).max().unwrap_or(0) + 1;
        let next_kudo_id = feed.iter().map(|kudo| kudo.id).max().unwrap_or(0) + 1;

        info!(
            "event=directory_open module=directory status=ok employees={} projects={}",
            employees.len(),
            projects.len()
        );

        let mut directory = Self {
            employees: Signal::new(employees),
            projects: Signal::new(projects),
            rewards: seed::rewards(),
            feed: Signal::new(feed),
            next_project_id,
            next_kudo_id,
            store,
            clock,
        };
        directory.persist_collection_changes()?;
        Ok(directory)
    }

    fn persist_collection_changes(&mut self) -> RepoResult<()> {
        save_json(self.store.as_ref(), EMPLOYEES_KEY, self.employees.get())?;
        save_json(self.store.as_ref(), PROJECTS_KEY, self.projects.get())?;

        self.employees
            .subscribe(persist_to::<Vec<Employee>>(Rc::clone(&self.store), EMPLOYEES_KEY));
        self.projects
            .subscribe(persist_to::<Vec<Project>>(Rc::clone(&self.store), PROJECTS_KEY));
        Ok(())
    }

    pub fn employees(&self) -> &[Employee] {
        self.employees.get()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.get()
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    /// Kudos feed, newest first.
    pub fn feed(&self) -> &[KudoTransaction] {
        self.feed.get()
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees().iter().find(|employee| employee.id == id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects().iter().find(|project| project.id == id)
    }

    pub fn reward(&self, id: RewardId) -> Option<&Reward> {
        self.rewards.iter().find(|reward| reward.id == id)
    }

    /// Top employees by kudos received, descending; ties keep directory order.
    pub fn leaderboard(&self) -> Vec<Employee> {
        let mut ranked = self.employees().to_vec();
        ranked.sort_by(|a, b| b.kudos_received.cmp(&a.kudos_received));
        ranked.truncate(LEADERBOARD_SIZE);
        ranked
    }

    pub fn employees_for_project(&self, project_id: ProjectId) -> Vec<Employee> {
        self.employees()
            .iter()
            .filter(|employee| employee.is_assigned_to(project_id))
            .cloned()
            .collect()
    }

    /// True if any employee holds `role` as primary or project role.
    pub fn is_role_in_use(&self, role: &str) -> bool {
        self.employees().iter().any(|employee| employee.holds_role(role))
    }

    /// Creates a project with the next sequential id.
    pub fn add_project(&mut self, input: NewProject) -> RepoResult<Project> {
        let project = Project {
            id: self.next_project_id,
            name: input.name,
            description: input.description,
        };
        let created = project.clone();
        self.projects.update(|projects| {
            let mut next = projects.clone();
            next.push(created);
            next
        })?;
        self.next_project_id += 1;

        info!(
            "event=project_add module=directory status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    /// Replaces the project with the same id. Returns `false` if none exists.
    pub fn update_project(&mut self, project: Project) -> RepoResult<bool> {
        if self.project(project.id).is_none() {
            return Ok(false);
        }
        self.projects.update(|projects| {
            projects
                .iter()
                .map(|current| {
                    if current.id == project.id {
                        project.clone()
                    } else {
                        current.clone()
                    }
                })
                .collect()
        })?;
        Ok(true)
    }

    /// Removes the project and strips every assignment referencing it.
    ///
    /// The cascade runs even when the project is already gone, so stale
    /// assignments left by older data are cleaned up too.
    pub fn delete_project(&mut self, project_id: ProjectId) -> RepoResult<bool> {
        let existed = self.project(project_id).is_some();
        if existed {
            self.projects.update(|projects| {
                projects
                    .iter()
                    .filter(|project| project.id != project_id)
                    .cloned()
                    .collect()
            })?;
        }

        let stale = self
            .employees()
            .iter()
            .filter(|employee| employee.is_assigned_to(project_id))
            .count();
        if stale > 0 {
            self.employees.update(|employees| {
                employees
                    .iter()
                    .map(|employee| employee.without_project(project_id))
                    .collect()
            })?;
        }

        info!(
            "event=project_delete module=directory status=ok project_id={project_id} existed={existed} assignments_removed={stale}"
        );
        Ok(existed)
    }

    /// Sets an employee's primary role. Returns `false` for unknown ids.
    pub fn update_employee_role(
        &mut self,
        employee_id: EmployeeId,
        role: impl Into<EmployeeRole>,
    ) -> RepoResult<bool> {
        if self.employee(employee_id).is_none() {
            return Ok(false);
        }
        let role = role.into();
        self.replace_employee(employee_id, |employee| Employee {
            role: role.clone(),
            ..employee.clone()
        })?;
        Ok(true)
    }

    /// Adds one assignment. Existing assignments to the project are kept as is.
    ///
    /// Returns `true` only when a new assignment was appended.
    pub fn assign_employee_to_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ProjectId,
        role: impl Into<EmployeeRole>,
    ) -> RepoResult<bool> {
        match self.employee(employee_id) {
            Some(employee) if !employee.is_assigned_to(project_id) => {}
            _ => return Ok(false),
        }
        let assignment = ProjectAssignment {
            project_id,
            role: role.into(),
        };
        self.replace_employee(employee_id, |employee| {
            let mut next = employee.clone();
            next.project_assignments.push(assignment.clone());
            next
        })?;
        Ok(true)
    }

    /// Removes one assignment. Returns `true` when something was removed.
    pub fn unassign_employee_from_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ProjectId,
    ) -> RepoResult<bool> {
        match self.employee(employee_id) {
            Some(employee) if employee.is_assigned_to(project_id) => {}
            _ => return Ok(false),
        }
        self.replace_employee(employee_id, |employee| employee.without_project(project_id))?;
        Ok(true)
    }

    pub(crate) fn replace_employee(
        &mut self,
        employee_id: EmployeeId,
        change: impl Fn(&Employee) -> Employee,
    ) -> RepoResult<()> {
        self.employees.update(|employees| {
            employees
                .iter()
                .map(|employee| {
                    if employee.id == employee_id {
                        change(employee)
                    } else {
                        employee.clone()
                    }
                })
                .collect()
        })
    }
}

fn persist_to<T: Serialize>(
    store: Rc<dyn KeyValueStore>,
    key: &'static str,
) -> impl FnMut(&T) -> RepoResult<()> {
    move |value| save_json(store.as_ref(), key, value)
}
