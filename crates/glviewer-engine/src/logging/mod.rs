//! Logging setup.
//!
//! Library code only talks to the `log` facade; the binary installs
//! `env_logger` through [`init_logging`].

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
