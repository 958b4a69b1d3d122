//! Role catalog.
//!
//! # Invariants
//! - Default roles are always present and cannot be renamed or deleted.
//! - Role names are unique case-insensitively on add.
//! - Renaming or deleting a catalog role never touches employees already
//!   holding it.

use crate::model::employee::EmployeeRole;
use crate::repo::json_store::{load_json, save_json, ROLES_KEY};
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use crate::seed::{default_roles, DEFAULT_ROLES};
use crate::signal::Signal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

#[derive(Debug)]
pub enum RoleError {
    EmptyName,
    DuplicateRole(String),
    DefaultRoleProtected(String),
    RoleNotFound(String),
    /// Refused because an employee still holds the role.
    RoleInUse(String),
    Repo(RepoError),
}

impl Display for RoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Role name must not be blank."),
            Self::DuplicateRole(role) => write!(f, "Role \"{role}\" already exists."),
            Self::DefaultRoleProtected(role) => {
                write!(f, "Role \"{role}\" is a default role and cannot be changed.")
            }
            Self::RoleNotFound(role) => write!(f, "Role \"{role}\" does not exist."),
            Self::RoleInUse(role) => write!(
                f,
                "Cannot delete role \"{role}\" as it is currently assigned to one or more employees."
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RoleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub fn is_default_role(role: &str) -> bool {
    DEFAULT_ROLES.contains(&role)
}

pub struct RoleCatalog {
    roles: Signal<Vec<EmployeeRole>>,
}

impl RoleCatalog {
    /// Loads stored roles merged after the defaults, deduplicated in order.
    pub fn open(store: Rc<dyn KeyValueStore>) -> RepoResult<Self> {
        let stored = load_json::<Vec<EmployeeRole>>(store.as_ref(), ROLES_KEY)?.unwrap_or_default();
        let mut roles = default_roles();
        for role in stored {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }

        save_json(store.as_ref(), ROLES_KEY, &roles)?;
        let mut signal = Signal::new(roles);
        signal.subscribe(move |roles: &Vec<EmployeeRole>| {
            save_json(store.as_ref(), ROLES_KEY, roles)
        });
        Ok(Self { roles: signal })
    }

    pub fn roles(&self) -> &[EmployeeRole] {
        self.roles.get()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles().iter().any(|existing| existing == role)
    }

    /// Appends a trimmed role name.
    pub fn add_role(&mut self, role: &str) -> Result<EmployeeRole, RoleError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(RoleError::EmptyName);
        }
        if self
            .roles()
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(role))
        {
            return Err(RoleError::DuplicateRole(role.to_string()));
        }

        let added = role.to_string();
        let appended = added.clone();
        self.roles.update(|roles| {
            let mut next = roles.clone();
            next.push(appended);
            next
        })?;
        Ok(added)
    }

    /// Renames a custom role in place.
    pub fn update_role(&mut self, old_role: &str, new_role: &str) -> Result<(), RoleError> {
        let new_role = new_role.trim();
        if is_default_role(old_role) {
            return Err(RoleError::DefaultRoleProtected(old_role.to_string()));
        }
        if new_role.is_empty() {
            return Err(RoleError::EmptyName);
        }
        if self.contains(new_role) {
            return Err(RoleError::DuplicateRole(new_role.to_string()));
        }
        if !self.contains(old_role) {
            return Err(RoleError::RoleNotFound(old_role.to_string()));
        }

        self.roles.update(|roles| {
            roles
                .iter()
                .map(|role| {
                    if role == old_role {
                        new_role.to_string()
                    } else {
                        role.clone()
                    }
                })
                .collect()
        })?;
        Ok(())
    }

    /// Removes a custom role. Removing an unknown role is a no-op.
    pub fn delete_role(&mut self, role: &str) -> Result<(), RoleError> {
        if is_default_role(role) {
            return Err(RoleError::DefaultRoleProtected(role.to_string()));
        }
        if !self.contains(role) {
            return Ok(());
        }
        self.roles.update(|roles| {
            roles
                .iter()
                .filter(|existing| existing.as_str() != role)
                .cloned()
                .collect()
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RoleCatalog, RoleError};
    use crate::repo::json_store::{save_json, ROLES_KEY};
    use crate::repo::kv_repo::MemoryKeyValueStore;
    use std::rc::Rc;

    #[test]
    fn stored_roles_are_merged_after_defaults() {
        let store = Rc::new(MemoryKeyValueStore::new());
        save_json(
            store.as_ref(),
            ROLES_KEY,
            &["Designer".to_string(), "Developer".to_string()],
        )
        .unwrap();

        let catalog = RoleCatalog::open(store).unwrap();
        assert_eq!(
            catalog.roles(),
            ["Developer", "Business Analyst", "Project Manager", "Designer"]
        );
    }

    #[test]
    fn add_role_rejects_blank_and_case_insensitive_duplicates() {
        let mut catalog = RoleCatalog::open(Rc::new(MemoryKeyValueStore::new())).unwrap();
        assert!(matches!(catalog.add_role("  "), Err(RoleError::EmptyName)));
        assert!(matches!(
            catalog.add_role("developer"),
            Err(RoleError::DuplicateRole(_))
        ));
        assert_eq!(catalog.add_role(" Designer ").unwrap(), "Designer");
    }

    #[test]
    fn default_roles_cannot_be_renamed_or_deleted() {
        let mut catalog = RoleCatalog::open(Rc::new(MemoryKeyValueStore::new())).unwrap();
        assert!(matches!(
            catalog.update_role("Developer", "Engineer"),
            Err(RoleError::DefaultRoleProtected(_))
        ));
        assert!(matches!(
            catalog.delete_role("Project Manager"),
            Err(RoleError::DefaultRoleProtected(_))
        ));

        catalog.add_role("Designer").unwrap();
        catalog.update_role("Designer", "UX Designer").unwrap();
        assert!(catalog.contains("UX Designer"));
        catalog.delete_role("UX Designer").unwrap();
        assert!(!catalog.contains("UX Designer"));
    }
}
