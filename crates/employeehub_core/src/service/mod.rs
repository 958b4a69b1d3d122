//! Use-case services over the recognition directory.
//!
//! # Responsibility
//! - Orchestrate validation, state swaps and persistence hooks.
//! - Keep CLI and other callers decoupled from storage details.

pub mod assignment;
pub mod badge_service;
pub mod directory;
pub mod hub;
pub mod kudos_service;
pub mod outcome;
pub mod reward_service;
pub mod role_service;
pub mod streak;
pub mod task_service;
