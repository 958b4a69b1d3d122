//! Flag and environment configuration.

use anyhow::{Context, Result};
use clap::Parser;
use employeehub_core::{
    default_log_level, init_logging, EmployeeHub, EmployeeId, KeyValueStore, MemoryKeyValueStore,
    SqliteKeyValueStore, SystemClock,
};
use std::path::PathBuf;
use std::rc::Rc;

use crate::commands::Command;

/// The signed-in user when none is given.
const DEFAULT_ACTING_USER: EmployeeId = 1;

#[derive(Parser)]
#[command(name = "employeehub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Employee recognition: kudos, rewards, projects, roles and tasks")]
pub struct Cli {
    /// SQLite file holding hub state; in-memory when omitted
    #[arg(long, global = true, env = "EMPLOYEEHUB_DATA")]
    pub data: Option<PathBuf>,

    /// Absolute directory for rotating log files; logging is off when omitted
    #[arg(long, global = true, env = "EMPLOYEEHUB_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "EMPLOYEEHUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Employee id acting as sender/requester
    #[arg(long = "as", global = true, default_value_t = DEFAULT_ACTING_USER)]
    pub acting_user: EmployeeId,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init_logging(&self) -> Result<()> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(());
        };
        let level = self.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(level, log_dir).context("failed to initialize logging")?;
        Ok(())
    }

    pub fn open_hub(&self) -> Result<EmployeeHub> {
        let store: Rc<dyn KeyValueStore> = match &self.data {
            Some(path) => Rc::new(
                SqliteKeyValueStore::open(path)
                    .with_context(|| format!("failed to open store at {}", path.display()))?,
            ),
            None => Rc::new(MemoryKeyValueStore::new()),
        };
        EmployeeHub::open(store, Rc::new(SystemClock)).context("failed to load hub state")
    }
}
