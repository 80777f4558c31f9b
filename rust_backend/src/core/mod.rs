//! Core domain models for the near-Earth object catalog.
//!
//! This module defines the two record shapes produced by ingestion: catalog
//! entries for individual bodies and the close approaches that refer to them.

pub mod domain;

pub use domain::{CloseApproach, KilometersPerSecond, NearEarthObject};
