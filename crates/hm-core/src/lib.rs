//! hm-core: shared foundation for the hydrometer workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - time (the four fixed sampling times and per-time records)
//! - table (in-memory string table with named columns)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod table;
pub mod time;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use table::{Column, DataTable};
pub use time::{PerTime, SampleTime};
