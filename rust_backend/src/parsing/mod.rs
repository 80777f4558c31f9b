//! Parsers for the near-Earth object source formats.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Parse the NEO catalog (header-named CSV columns)
//! - [`json_parser`]: Parse close-approach data (positional rows under `data`)
//!
//! # Example
//!
//! ```no_run
//! use neo_ingest::parsing::csv_parser::parse_neos_csv;
//! use std::path::Path;
//!
//! let neos = parse_neos_csv(Path::new("neos.csv"))
//!     .expect("Failed to parse catalog");
//! ```

pub mod csv_parser;
pub mod json_parser;


pub use json_parser::ApproachContract;
