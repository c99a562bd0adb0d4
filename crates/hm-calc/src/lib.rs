//! hm-calc: hydrometer sedimentation readings to sand / silt / clay.
//!
//! Per sample row and for each of the four sampling times the pipeline
//! computes a temperature-corrected reading, the effective hydrometer depth,
//! the equivalent particle diameter (Stokes' law) and the percent finer. The
//! percent-finer curve is then interpolated on log diameter at 2 µm and
//! 50 µm to split the sample into size fractions.
//!
//! # Example
//!
//! ```no_run
//! use hm_calc::HydrometerCalc;
//! use hm_core::DataTable;
//!
//! # fn tables() -> (DataTable, DataTable, DataTable, DataTable) { unimplemented!() }
//! let (data, params, colnames, calcset) = tables();
//! let calc = HydrometerCalc::from_tables(&data, &params, &colnames, &calcset).unwrap();
//! let output = calc.calculate().unwrap();
//! for sample in &output.samples {
//!     println!("sand {:.1}%", sample.fractions.sand);
//! }
//! let result_table = output.to_table(&data).unwrap();
//! ```

pub mod calc;
pub mod error;
pub mod fractions;
pub mod interpolate;
pub mod output;
pub mod pipeline;
pub mod resolve;

pub use calc::{CalcOutput, HydrometerCalc, SampleResult, process_sample};
pub use error::{CalcError, CalcResult, FormulaError, MappingError};
pub use fractions::{CLAY_DIAMETER, SILT_DIAMETER, SizeFractions};
pub use interpolate::{DiameterPoint, Interpolated, Method, interpolate_percent_finer};
pub use output::derived_column_names;
pub use pipeline::{RawSample, TimeDerived, derive_sample, derive_time};
pub use resolve::{ColumnResolver, RawColumns};
