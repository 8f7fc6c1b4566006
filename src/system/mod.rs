//! System-level modules
//!
//! This module contains process-level functionality shared by the binary
//! and by hosts embedding the coordinator:
//! - Logging initialization

pub mod logging;

pub use logging::init_logging;
