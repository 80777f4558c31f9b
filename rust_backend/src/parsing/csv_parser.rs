use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::domain::NearEarthObject;
use crate::error::{FieldError, FormatError, LoadError, LoadResult};

/// Columns the NEO catalog header must name. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["pdes", "name", "diameter", "pha"];

/// One catalog row as it appears in the CSV. Empty cells decode to `None`.
#[derive(Debug, Deserialize)]
struct RawNeoRow {
    pdes: Option<String>,
    name: Option<String>,
    diameter: Option<String>,
    pha: Option<String>,
}

impl RawNeoRow {
    fn into_domain(self) -> Result<NearEarthObject, FieldError> {
        NearEarthObject::new(
            self.pdes.as_deref(),
            self.name.as_deref(),
            self.diameter.as_deref(),
            self.pha.as_deref(),
        )
    }
}

/// Parse a NEO catalog CSV file into NearEarthObject records, in file order
pub fn parse_neos_csv(csv_path: &Path) -> LoadResult<Vec<NearEarthObject>> {
    let file = File::open(csv_path).map_err(|e| LoadError::file_access(csv_path, e))?;
    debug!("Reading NEO catalog from {}", csv_path.display());

    let neos = read_neos(file, csv_path)?;

    info!("Loaded {} NEOs from {}", neos.len(), csv_path.display());
    Ok(neos)
}

/// Parse NEO catalog CSV data from any reader
pub fn parse_neos_csv_reader<R: Read>(reader: R) -> LoadResult<Vec<NearEarthObject>> {
    read_neos(reader, Path::new("<reader>"))
}

/// Parse NEO catalog CSV data from a string
pub fn parse_neos_csv_str(csv_str: &str) -> LoadResult<Vec<NearEarthObject>> {
    read_neos(csv_str.as_bytes(), Path::new("<string>"))
}

fn read_neos<R: Read>(reader: R, origin: &Path) -> LoadResult<Vec<NearEarthObject>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| header_error(e, origin))?
        .clone();
    ensure_required_columns(&headers)?;

    let mut neos = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| record_error(e, row, origin))?;
        let raw: RawNeoRow = record
            .deserialize(Some(&headers))
            .map_err(|e| record_error(e, row, origin))?;

        neos.push(raw.into_domain().map_err(|e| LoadError::field(row, e))?);
    }

    Ok(neos)
}

/// Fails with every required column the header does not name.
fn ensure_required_columns(headers: &csv::StringRecord) -> LoadResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormatError::MissingColumns(missing).into())
    }
}

fn header_error(err: csv::Error, origin: &Path) -> LoadError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::file_access(origin, source),
        _ => FormatError::Decode {
            path: "header".to_string(),
            message,
        }
        .into(),
    }
}

fn record_error(err: csv::Error, row: usize, origin: &Path) -> LoadError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::file_access(origin, source),
        _ => FormatError::Record { row, message }.into(),
    }
}
