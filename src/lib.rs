//! Order device capture
//!
//! Records, once per order, which kind of client device placed the order
//! and through which channel it arrived, without ever getting in the way
//! of order placement itself.
//!
//! # Features
//! - **woothee**: user-agent device detection through the `woothee` crate (default)
//!
//! # Architecture
//! - `device`: user-agent normalisation, detection capability, device names
//! - `area`: execution area and referer → channel code
//! - `capture`: capture coordinator, record type, repository port
//! - `storage`: SeaORM repository (SQLite, MySQL, PostgreSQL)
//! - `config`: Configuration management
//! - `interfaces`: Command-line interface
//! - `system`: Logging initialisation

pub mod area;
pub mod capture;
pub mod cli;
pub mod config;
pub mod device;
pub mod errors;
pub mod interfaces;
pub mod storage;
pub mod system;
