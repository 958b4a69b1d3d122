//! Kudos transfer records.
//!
//! # Invariants
//! - Transactions are append-only; the feed is ordered newest first.
//! - `from`/`to` are snapshots taken before the transfer was applied.

use crate::model::employee::Employee;
use crate::model::Kudos;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type KudoId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KudoTransaction {
    pub id: KudoId,
    pub from: Employee,
    pub to: Employee,
    pub amount: Kudos,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
