//! Shared application service layer for the hydrometer tools.
//!
//! Reads CSV tables and run manifests from disk, hands the parsed tables to
//! `hm-calc`, and writes the result table back out.

pub mod error;
pub mod io;
pub mod manifest;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use io::{load_config, read_table, write_table};
pub use manifest::RunManifest;
pub use run_service::{RunResponse, run, validate};
