//! Core domain logic for EmployeeHub.
//! This crate is the single source of truth for kudos and directory invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod signal;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::badge::Badge;
pub use model::employee::{Employee, EmployeeId, EmployeeRole, ProjectAssignment};
pub use model::kudo::{KudoId, KudoTransaction};
pub use model::project::{NewProject, Project, ProjectId};
pub use model::reward::{Reward, RewardId};
pub use model::task::{NewTask, Task, TaskId, TaskStatus};
pub use model::Kudos;
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::assignment::{reconcile, DesiredAssignment, ReconcileStats};
pub use service::badge_service::{all_badges, badges_for_employee};
pub use service::directory::{Directory, LEADERBOARD_SIZE};
pub use service::hub::EmployeeHub;
pub use service::kudos_service::KudosReceipt;
pub use service::outcome::{ActionOutcome, KudosError};
pub use service::reward_service::RedemptionReceipt;
pub use service::role_service::{RoleCatalog, RoleError};
pub use service::streak::{streak_bonus, StreakLedger, StreakState};
pub use service::task_service::{TaskBoard, TaskError};
pub use signal::Signal;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
