use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::config::IngestConfig;
use crate::core::domain::{CloseApproach, NearEarthObject};
use crate::parsing::csv_parser;
use crate::parsing::json_parser::{self, ApproachContract};

/// Represents the kind of data a source file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    NeoCsv,
    ApproachJson,
}

impl SourceKind {
    /// Detect the source kind from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "csv" => Ok(SourceKind::NeoCsv),
            "json" => Ok(SourceKind::ApproachJson),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }
}

/// Result of loading both catalog sources
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLoadResult {
    pub neos: Vec<NearEarthObject>,
    pub approaches: Vec<CloseApproach>,
    pub num_neos: usize,
    pub num_approaches: usize,
}

impl CatalogLoadResult {
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Self {
        let num_neos = neos.len();
        let num_approaches = approaches.len();
        Self {
            neos,
            approaches,
            num_neos,
            num_approaches,
        }
    }
}

/// Loads the NEO catalog
pub struct NeoLoader;

impl NeoLoader {
    /// Load NearEarthObject records from a CSV file
    pub fn load_from_file(csv_path: &Path) -> Result<Vec<NearEarthObject>> {
        csv_parser::parse_neos_csv(csv_path)
            .with_context(|| format!("Failed to load NEO catalog from {}", csv_path.display()))
    }

    /// Load NearEarthObject records from CSV text
    pub fn load_from_str(csv_str: &str) -> Result<Vec<NearEarthObject>> {
        csv_parser::parse_neos_csv_str(csv_str).context("Failed to parse NEO catalog string")
    }
}

/// Loads close-approach data
pub struct ApproachLoader;

impl ApproachLoader {
    /// Load CloseApproach records from a JSON file
    pub fn load_from_file(json_path: &Path) -> Result<Vec<CloseApproach>> {
        Self::load_from_file_with(json_path, &ApproachContract::default())
    }

    /// Load CloseApproach records from a JSON file with explicit metadata checks
    pub fn load_from_file_with(
        json_path: &Path,
        contract: &ApproachContract,
    ) -> Result<Vec<CloseApproach>> {
        json_parser::parse_approaches_json_with(json_path, contract).with_context(|| {
            format!(
                "Failed to load close approaches from {}",
                json_path.display()
            )
        })
    }

    /// Load CloseApproach records from a JSON string
    pub fn load_from_str(json_str: &str) -> Result<Vec<CloseApproach>> {
        json_parser::parse_approaches_json_str(json_str)
            .context("Failed to parse close approach JSON string")
    }
}

/// Unified interface for loading both sources
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load both sources named by a configuration
    pub fn load(config: &IngestConfig) -> Result<CatalogLoadResult> {
        Self::load_with(
            &config.sources.neos,
            &config.sources.approaches,
            &config.approach_contract(),
        )
    }

    /// Load both sources from explicit paths with default checks
    pub fn load_from_paths(neos_path: &Path, approaches_path: &Path) -> Result<CatalogLoadResult> {
        Self::load_with(neos_path, approaches_path, &ApproachContract::default())
    }

    fn load_with(
        neos_path: &Path,
        approaches_path: &Path,
        contract: &ApproachContract,
    ) -> Result<CatalogLoadResult> {
        ensure_kind(neos_path, SourceKind::NeoCsv)?;
        ensure_kind(approaches_path, SourceKind::ApproachJson)?;

        let neos = NeoLoader::load_from_file(neos_path)?;
        let approaches = ApproachLoader::load_from_file_with(approaches_path, contract)?;

        let result = CatalogLoadResult::new(neos, approaches);
        info!(
            "Catalog ready: {} NEOs, {} close approaches",
            result.num_neos, result.num_approaches
        );
        Ok(result)
    }
}

fn ensure_kind(path: &Path, expected: SourceKind) -> Result<()> {
    let kind = SourceKind::from_path(path)
        .with_context(|| format!("Cannot determine source kind of {}", path.display()))?;
    if kind != expected {
        anyhow::bail!(
            "Expected a {:?} source, but {} looks like {:?}",
            expected,
            path.display(),
            kind
        );
    }
    Ok(())
}
