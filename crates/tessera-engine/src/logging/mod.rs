//! Logging utilities.
//!
//! Engine code logs through the `log` facade only. Hosts that have no logger of
//! their own call [`init_logging`] once; the C ABI does this from `tessera_init*`.

mod init;

pub use init::{init_logging, LoggingConfig};
