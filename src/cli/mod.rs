mod config;
pub use self::config::{Config, Host};

pub mod actions;

mod start;
pub use self::start::{action, get_config_path, start};

mod commands;
mod dispatch;
mod matches;

use crate::s3::{ConfigurationError, StorageError};

/// Exit code for a configuration problem (`EX_CONFIG`)
pub const EXIT_CONFIG: i32 = 78;

/// Process exit code for an error returned by [`start`] or [`actions::handle`]
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<StorageError>() {
        e.kind.exit_code()
    } else if err.downcast_ref::<ConfigurationError>().is_some() {
        EXIT_CONFIG
    } else {
        1
    }
}
