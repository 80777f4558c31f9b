//! Near-Earth object catalog ingestion.
//!
//! Loads the NEO catalog (CSV) and close-approach data (JSON) into
//! [`NearEarthObject`] and [`CloseApproach`] records, in file order, ready for
//! a downstream index.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod time;

pub use crate::core::domain::{CloseApproach, NearEarthObject};
pub use crate::error::{FieldError, FormatError, LoadError, LoadResult};
pub use crate::parsing::csv_parser::parse_neos_csv as load_neos;
pub use crate::parsing::json_parser::parse_approaches_json as load_approaches;
