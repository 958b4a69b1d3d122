use crate::model::Kudos;
use serde::{Deserialize, Serialize};

pub type RewardId = u32;

/// Redeemable reward. Seeded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    pub description: String,
    /// Deducted from the requester's received total on redemption.
    pub cost: Kudos,
    pub image_url: String,
}
