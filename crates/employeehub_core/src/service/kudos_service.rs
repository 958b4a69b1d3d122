//! Kudos transfer between employees.
//!
//! # Responsibility
//! - Validate a transfer, advance the sender's streak and apply balances.
//! - Append the transfer to the feed.
//!
//! # Invariants
//! - Checks run in order: recipient exists, not self, sender exists,
//!   balance covers amount. The first failure wins and nothing is written.
//! - Both employees change in one swap of the employee collection.
//! - A storage failure leaves the employees, the streak and the feed as they
//!   were before the call.

use crate::logging::sanitize_message;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::kudo::KudoTransaction;
use crate::model::Kudos;
use crate::service::directory::Directory;
use crate::service::outcome::KudosError;
use crate::service::streak::{streak_bonus, StreakLedger, StreakState};
use log::{info, warn};
use std::rc::Rc;

const MAX_LOGGED_NAME_CHARS: usize = 64;

/// Details of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KudosReceipt {
    pub transaction: KudoTransaction,
    /// Sender's streak length after this send.
    pub streak: u32,
    /// Refunded to the sender's balance.
    pub bonus: Kudos,
}

impl KudosReceipt {
    pub fn message(&self) -> String {
        let mut message = format!("Successfully sent {} kudos!", self.transaction.amount);
        if self.bonus > 0 {
            message.push_str(&format!(
                " You got {} kudos back for your {}-day streak! 🔥",
                self.bonus, self.streak
            ));
        }
        message
    }
}

impl Directory {
    /// Transfers `amount` kudos from `sender_id` to `recipient_id`.
    pub fn send_kudos(
        &mut self,
        sender_id: EmployeeId,
        recipient_id: EmployeeId,
        amount: Kudos,
        message: impl Into<String>,
    ) -> Result<KudosReceipt, KudosError> {
        let (sender, recipient) = match self.check_transfer(sender_id, recipient_id, amount) {
            Ok(parties) => parties,
            Err(err) => {
                info!(
                    "event=kudos_send module=kudos status=declined reason={} from={sender_id} to={recipient_id} amount={amount}",
                    err.code()
                );
                return Err(err);
            }
        };

        let store = Rc::clone(&self.store);
        let ledger = StreakLedger::new(store.as_ref());
        let previous_streak = ledger.load(sender_id)?;
        let next_streak = previous_streak.after_send_on(self.clock.today());
        let streak = next_streak.days;
        let bonus = streak_bonus(amount, streak);

        let next_employees: Vec<Employee> = self
            .employees()
            .iter()
            .map(|employee| {
                if employee.id == sender_id {
                    Employee {
                        kudos_balance: (employee.kudos_balance - amount).saturating_add(bonus),
                        kudos_sent: employee.kudos_sent.saturating_add(amount),
                        ..employee.clone()
                    }
                } else if employee.id == recipient_id {
                    Employee {
                        kudos_received: employee.kudos_received.saturating_add(amount),
                        ..employee.clone()
                    }
                } else {
                    employee.clone()
                }
            })
            .collect();

        if let Err(err) = ledger.save(sender_id, previous_streak, next_streak) {
            restore_streak(&ledger, sender_id, next_streak, previous_streak);
            return Err(err.into());
        }
        if let Err(err) = self.employees.set(next_employees) {
            restore_streak(&ledger, sender_id, next_streak, previous_streak);
            warn!(
                "event=kudos_send module=kudos status=error reason=persist from={sender_id} to={recipient_id} amount={amount}"
            );
            return Err(err.into());
        }

        let transaction = KudoTransaction {
            id: self.next_kudo_id,
            from: sender,
            to: recipient,
            amount,
            message: message.into(),
            timestamp: self.clock.now(),
        };
        self.next_kudo_id += 1;

        let appended = transaction.clone();
        self.feed.update(|feed| {
            let mut next = Vec::with_capacity(feed.len() + 1);
            next.push(appended);
            next.extend(feed.iter().cloned());
            next
        })?;

        info!(
            "event=kudos_send module=kudos status=ok kudo_id={} from={sender_id} to={recipient_id} amount={amount} bonus={bonus} streak={streak} message_chars={}",
            transaction.id,
            transaction.message.chars().count()
        );
        info!(
            "event=team_notify module=kudos status=ok sender={} recipient={} amount={amount}",
            sanitize_message(&transaction.from.name, MAX_LOGGED_NAME_CHARS),
            sanitize_message(&transaction.to.name, MAX_LOGGED_NAME_CHARS)
        );

        Ok(KudosReceipt {
            transaction,
            streak,
            bonus,
        })
    }

    fn check_transfer(
        &self,
        sender_id: EmployeeId,
        recipient_id: EmployeeId,
        amount: Kudos,
    ) -> Result<(Employee, Employee), KudosError> {
        let recipient = self
            .employee(recipient_id)
            .ok_or(KudosError::RecipientNotFound(recipient_id))?;
        if sender_id == recipient_id {
            return Err(KudosError::SelfTransferRejected);
        }
        let sender = self
            .employee(sender_id)
            .ok_or(KudosError::SenderNotFound(sender_id))?;
        if sender.kudos_balance < amount {
            return Err(KudosError::InsufficientBalance {
                balance: sender.kudos_balance,
                requested: amount,
            });
        }
        Ok((sender.clone(), recipient.clone()))
    }
}

/// Puts the sender's streak back after a failed transfer.
fn restore_streak(
    ledger: &StreakLedger<'_>,
    sender_id: EmployeeId,
    written: StreakState,
    previous: StreakState,
) {
    if let Err(err) = ledger.save(sender_id, written, previous) {
        warn!("event=streak_restore module=kudos status=error employee_id={sender_id} error={err}");
    }
}
