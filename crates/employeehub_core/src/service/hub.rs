//! Application facade composing directory, roles and tasks.
//!
//! # Responsibility
//! - Open every collection against one store and clock.
//! - Expose `{success, message}` envelopes for transfer and redemption.
//! - Apply cross-collection rules (roles in use cannot be deleted).

use crate::clock::Clock;
use crate::model::employee::EmployeeId;
use crate::model::reward::RewardId;
use crate::model::Kudos;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::service::directory::Directory;
use crate::service::outcome::ActionOutcome;
use crate::service::role_service::{RoleCatalog, RoleError};
use crate::service::task_service::TaskBoard;
use std::rc::Rc;

pub struct EmployeeHub {
    pub directory: Directory,
    pub roles: RoleCatalog,
    pub tasks: TaskBoard,
}

impl EmployeeHub {
    pub fn open(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> RepoResult<Self> {
        Ok(Self {
            directory: Directory::open(Rc::clone(&store), Rc::clone(&clock))?,
            roles: RoleCatalog::open(Rc::clone(&store))?,
            tasks: TaskBoard::open(store, clock)?,
        })
    }

    /// Sends kudos; declines come back as `success: false`.
    pub fn send_kudos(
        &mut self,
        sender_id: EmployeeId,
        recipient_id: EmployeeId,
        amount: Kudos,
        message: impl Into<String>,
    ) -> RepoResult<ActionOutcome> {
        let result = self
            .directory
            .send_kudos(sender_id, recipient_id, amount, message);
        ActionOutcome::from_result(result, |receipt| receipt.message())
    }

    /// Redeems a reward; declines come back as `success: false`.
    pub fn redeem_reward(
        &mut self,
        requester_id: EmployeeId,
        reward_id: RewardId,
    ) -> RepoResult<ActionOutcome> {
        let result = self.directory.redeem_reward(requester_id, reward_id);
        ActionOutcome::from_result(result, |receipt| receipt.message())
    }

    /// Deletes a custom role unless an employee still holds it.
    pub fn delete_role(&mut self, role: &str) -> Result<(), RoleError> {
        if self.directory.is_role_in_use(role) {
            return Err(RoleError::RoleInUse(role.to_string()));
        }
        self.roles.delete_role(role)
    }
}
