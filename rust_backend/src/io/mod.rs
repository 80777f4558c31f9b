//! High-level data loading utilities.
//!
//! This module wraps the parsers with file-kind detection, error context and
//! logging, and loads both catalog sources together from an
//! [`IngestConfig`](crate::config::IngestConfig).
//!
//! # Example
//!
//! ```no_run
//! use neo_ingest::io::loaders::CatalogLoader;
//! use std::path::Path;
//!
//! let catalog = CatalogLoader::load_from_paths(Path::new("neos.csv"), Path::new("cad.json"))
//!     .expect("Failed to load");
//! println!("Loaded {} NEOs", catalog.num_neos);
//! ```

pub mod loaders;


pub use loaders::{ApproachLoader, CatalogLoadResult, CatalogLoader, NeoLoader, SourceKind};
