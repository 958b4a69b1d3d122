//! Reward redemption.
//!
//! Redemption is paid from the requester's cumulative received total, not
//! from the spendable balance used for sending.

use crate::model::employee::{Employee, EmployeeId};
use crate::model::reward::{Reward, RewardId};
use crate::model::Kudos;
use crate::service::directory::Directory;
use crate::service::outcome::KudosError;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionReceipt {
    pub reward: Reward,
    /// Requester's received total after the deduction.
    pub remaining_points: Kudos,
}

impl RedemptionReceipt {
    pub fn message(&self) -> String {
        format!("You have successfully redeemed \"{}\"!", self.reward.name)
    }
}

impl Directory {
    /// Redeems `reward_id` for `requester_id`.
    pub fn redeem_reward(
        &mut self,
        requester_id: EmployeeId,
        reward_id: RewardId,
    ) -> Result<RedemptionReceipt, KudosError> {
        let checked = self.check_redemption(requester_id, reward_id);
        let (reward, available) = match checked {
            Ok(checked) => checked,
            Err(err) => {
                info!(
                    "event=reward_redeem module=rewards status=declined reason={} requester={requester_id} reward_id={reward_id}",
                    err.code()
                );
                return Err(err);
            }
        };

        self.replace_employee(requester_id, |employee| Employee {
            kudos_received: employee.kudos_received - reward.cost,
            ..employee.clone()
        })?;

        info!(
            "event=reward_redeem module=rewards status=ok requester={requester_id} reward_id={reward_id} cost={}",
            reward.cost
        );
        Ok(RedemptionReceipt {
            remaining_points: available - reward.cost,
            reward,
        })
    }

    fn check_redemption(
        &self,
        requester_id: EmployeeId,
        reward_id: RewardId,
    ) -> Result<(Reward, Kudos), KudosError> {
        let reward = self
            .reward(reward_id)
            .ok_or(KudosError::RewardNotFound(reward_id))?;
        let requester = self
            .employee(requester_id)
            .ok_or(KudosError::RequesterNotFound(requester_id))?;
        if requester.kudos_received < reward.cost {
            return Err(KudosError::InsufficientPoints {
                available: requester.kudos_received,
                cost: reward.cost,
            });
        }
        Ok((reward.clone(), requester.kudos_received))
    }
}
