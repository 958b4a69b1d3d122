//! Consecutive-day sending streaks and the bonus they earn.
//!
//! # Invariants
//! - Streak state lives outside the employee record, one key pair per sender.
//! - Dates are compared as calendar days; a same-day send never rewrites the
//!   stored date.

use crate::model::employee::EmployeeId;
use crate::model::Kudos;
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use chrono::NaiveDate;

/// Streak length from which sends earn a refund.
pub const STREAK_BONUS_MIN_DAYS: u32 = 3;
/// Refund share of the sent amount, in percent. Must divide 100.
pub const STREAK_BONUS_PERCENT: Kudos = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakState {
    pub last_sent: Option<NaiveDate>,
    pub days: u32,
}

impl StreakState {
    /// State after one more send on `today`.
    pub fn after_send_on(self, today: NaiveDate) -> Self {
        match self.last_sent {
            None => Self {
                last_sent: Some(today),
                days: 1,
            },
            Some(last) if last == today => self,
            Some(last) if last.succ_opt() == Some(today) => Self {
                last_sent: Some(today),
                days: self.days + 1,
            },
            Some(_) => Self {
                last_sent: Some(today),
                days: 1,
            },
        }
    }
}

/// Refund for a send of `amount` at streak length `streak`.
///
/// Eligible sends get `amount * 10%` rounded down, but never less than 1.
pub fn streak_bonus(amount: Kudos, streak: u32) -> Kudos {
    if streak < STREAK_BONUS_MIN_DAYS {
        return 0;
    }
    (amount / (100 / STREAK_BONUS_PERCENT)).max(1)
}

/// Streak persistence over a key-value store.
pub struct StreakLedger<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> StreakLedger<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self, employee_id: EmployeeId) -> RepoResult<StreakState> {
        let date_key = last_sent_key(employee_id);
        let last_sent = match self.store.get(&date_key)? {
            Some(raw) => Some(NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(
                |err| RepoError::InvalidData {
                    key: date_key.clone(),
                    message: err.to_string(),
                },
            )?),
            None => None,
        };

        let days_key = streak_key(employee_id);
        let days = match self.store.get(&days_key)? {
            Some(raw) => raw.trim().parse::<u32>().map_err(|err| RepoError::InvalidData {
                key: days_key.clone(),
                message: err.to_string(),
            })?,
            None => 0,
        };

        Ok(StreakState { last_sent, days })
    }

    /// Advances the sender's streak for a send on `today` and persists it.
    pub fn record_send(
        &self,
        employee_id: EmployeeId,
        today: NaiveDate,
    ) -> RepoResult<StreakState> {
        let previous = self.load(employee_id)?;
        let next = previous.after_send_on(today);
        self.save(employee_id, previous, next)?;
        Ok(next)
    }

    /// Writes `next` over `previous`, touching the date key only when it changed.
    ///
    /// An absent date removes both keys, so restoring a sender who never sent
    /// leaves no trace in the store.
    pub fn save(
        &self,
        employee_id: EmployeeId,
        previous: StreakState,
        next: StreakState,
    ) -> RepoResult<()> {
        let Some(date) = next.last_sent else {
            self.store.remove(&last_sent_key(employee_id))?;
            return self.store.remove(&streak_key(employee_id));
        };
        if previous.last_sent != next.last_sent {
            self.store.set(
                &last_sent_key(employee_id),
                &date.format(DATE_FORMAT).to_string(),
            )?;
        }
        self.store
            .set(&streak_key(employee_id), &next.days.to_string())
    }
}

fn last_sent_key(employee_id: EmployeeId) -> String {
    format!("user_{employee_id}_last_kudo_sent_date")
}

fn streak_key(employee_id: EmployeeId) -> String {
    format!("user_{employee_id}_kudo_streak")
}
