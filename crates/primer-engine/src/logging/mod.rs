//! Logger setup for the sample binaries.
//!
//! Library code only uses the `log` facade; `env_logger` is wired up here.

mod init;

pub use init::{LoggingConfig, init_logging};
