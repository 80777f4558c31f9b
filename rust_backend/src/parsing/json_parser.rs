use log::{debug, info, warn};
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::core::domain::CloseApproach;
use crate::error::{json_type_name, FieldError, FormatError, LoadError, LoadResult};

/// Top-level key holding the approach rows
pub const DATA_KEY: &str = "data";
/// Optional top-level key naming the row positions
pub const FIELDS_KEY: &str = "fields";
/// Optional top-level key with the declared row count
pub const COUNT_KEY: &str = "count";

const DESIGNATION_POS: usize = 0;
const TIME_POS: usize = 3;
const DISTANCE_POS: usize = 4;
const VELOCITY_POS: usize = 7;

/// Minimum number of positions every row must carry.
pub const ROW_WIDTH: usize = VELOCITY_POS + 1;

/// Positions read from each row, with the name the CAD `fields` header uses for them.
pub const FIELD_POSITIONS: [(usize, &str); 4] = [
    (DESIGNATION_POS, "des"),
    (TIME_POS, "cd"),
    (DISTANCE_POS, "dist"),
    (VELOCITY_POS, "v_rel"),
];

/// Checks applied to the optional metadata of a close-approach payload.
///
/// Positions are fixed; these only control how strictly the self-description
/// shipped alongside the rows is compared against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproachContract {
    /// Reject payloads whose `fields` header disagrees with [`FIELD_POSITIONS`]
    pub verify_field_header: bool,
    /// Warn when the declared `count` differs from the number of rows
    pub check_count: bool,
}

impl Default for ApproachContract {
    fn default() -> Self {
        Self {
            verify_field_header: true,
            check_count: true,
        }
    }
}

impl ApproachContract {
    /// No metadata checks; only the rows themselves are validated.
    pub fn lenient() -> Self {
        Self {
            verify_field_header: false,
            check_count: false,
        }
    }
}

/// A JSON scalar that may stand in for a textual field
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

/// The four positions of an approach row that feed the domain model.
/// `null` decodes to `None`.
#[derive(Debug, Default)]
struct RawApproachRow {
    designation: Option<String>,
    time: Option<String>,
    distance: Option<String>,
    velocity: Option<String>,
}

impl RawApproachRow {
    fn into_domain(self) -> Result<CloseApproach, FieldError> {
        CloseApproach::new(
            self.designation.as_deref(),
            self.time.as_deref(),
            self.distance.as_deref(),
            self.velocity.as_deref(),
        )
    }
}

impl<'de> Deserialize<'de> for RawApproachRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RawApproachRowVisitor)
    }
}

struct RawApproachRowVisitor;

impl<'de> Visitor<'de> for RawApproachRowVisitor {
    type Value = RawApproachRow;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an array of at least {} approach fields", ROW_WIDTH)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut row = RawApproachRow::default();

        for position in 0..ROW_WIDTH {
            let slot = match position {
                DESIGNATION_POS => &mut row.designation,
                TIME_POS => &mut row.time,
                DISTANCE_POS => &mut row.distance,
                VELOCITY_POS => &mut row.velocity,
                _ => {
                    if seq.next_element::<IgnoredAny>()?.is_none() {
                        return Err(de::Error::invalid_length(position, &self));
                    }
                    continue;
                }
            };

            match seq.next_element::<Option<Scalar>>()? {
                Some(value) => *slot = value.map(Scalar::into_text),
                None => return Err(de::Error::invalid_length(position, &self)),
            }
        }

        // Trailing positions (v_inf, t_sigma_f, h, ...) are not used
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(row)
    }
}

/// Typed view of the payload once its shape has been checked
#[derive(Debug, Deserialize)]
struct ApproachPayload {
    data: Vec<RawApproachRow>,
}

/// Parse a close-approach JSON file into CloseApproach records, in file order
pub fn parse_approaches_json(json_path: &Path) -> LoadResult<Vec<CloseApproach>> {
    parse_approaches_json_with(json_path, &ApproachContract::default())
}

/// Parse a close-approach JSON file with explicit metadata checks
pub fn parse_approaches_json_with(
    json_path: &Path,
    contract: &ApproachContract,
) -> LoadResult<Vec<CloseApproach>> {
    let file = File::open(json_path).map_err(|e| LoadError::file_access(json_path, e))?;
    debug!("Reading close approaches from {}", json_path.display());

    let json_value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            LoadError::file_access(json_path, io::Error::from(e))
        } else {
            FormatError::Syntax(e.to_string()).into()
        }
    })?;

    let approaches = approaches_from_value(json_value, contract)?;

    info!(
        "Loaded {} close approaches from {}",
        approaches.len(),
        json_path.display()
    );
    Ok(approaches)
}

/// Parse close-approach JSON from a string
pub fn parse_approaches_json_str(json_str: &str) -> LoadResult<Vec<CloseApproach>> {
    parse_approaches_json_str_with(json_str, &ApproachContract::default())
}

/// Parse close-approach JSON from a string with explicit metadata checks
pub fn parse_approaches_json_str_with(
    json_str: &str,
    contract: &ApproachContract,
) -> LoadResult<Vec<CloseApproach>> {
    let json_value: Value =
        serde_json::from_str(json_str).map_err(|e| FormatError::Syntax(e.to_string()))?;

    approaches_from_value(json_value, contract)
}

fn approaches_from_value(
    json_value: Value,
    contract: &ApproachContract,
) -> LoadResult<Vec<CloseApproach>> {
    let root = match json_value {
        Value::Object(root) => root,
        other => return Err(FormatError::NotAnObject(json_type_name(&other)).into()),
    };

    let rows = match root.get(DATA_KEY) {
        Some(Value::Array(rows)) => rows,
        Some(other) => {
            return Err(FormatError::NotAnArray {
                key: DATA_KEY,
                found: json_type_name(other),
            }
            .into())
        }
        None => {
            let mut found: Vec<String> = root.keys().cloned().collect();
            found.sort();
            return Err(FormatError::MissingKey {
                key: DATA_KEY,
                found,
            }
            .into());
        }
    };

    ensure_row_shapes(rows)?;

    if contract.verify_field_header {
        verify_field_header(&root)?;
    }
    if contract.check_count {
        check_declared_count(&root, rows.len());
    }

    let payload: ApproachPayload = serde_path_to_error::deserialize(Value::Object(root))
        .map_err(|e| FormatError::Decode {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;

    payload
        .data
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| raw.into_domain().map_err(|e| LoadError::field(idx + 1, e)))
        .collect()
}

/// Every row must be an array wide enough to reach the last mapped position.
fn ensure_row_shapes(rows: &[Value]) -> LoadResult<()> {
    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        match row {
            Value::Array(fields) if fields.len() < ROW_WIDTH => {
                return Err(FormatError::RowTooShort {
                    row: row_number,
                    width: fields.len(),
                    expected: ROW_WIDTH,
                }
                .into())
            }
            Value::Array(_) => {}
            other => {
                return Err(FormatError::RowNotAnArray {
                    row: row_number,
                    found: json_type_name(other),
                }
                .into())
            }
        }
    }
    Ok(())
}

/// Compares the `fields` header, when present, against the positions read.
fn verify_field_header(root: &Map<String, Value>) -> LoadResult<()> {
    let Some(header) = root.get(FIELDS_KEY) else {
        return Ok(());
    };

    let Value::Array(names) = header else {
        return Err(FormatError::NotAnArray {
            key: FIELDS_KEY,
            found: json_type_name(header),
        }
        .into());
    };

    for (position, expected) in FIELD_POSITIONS {
        let found = names.get(position).and_then(Value::as_str);
        if found != Some(expected) {
            return Err(FormatError::FieldHeaderMismatch {
                position,
                expected,
                found: found.unwrap_or("<missing>").to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// The CAD API ships `count` as a string; integers are accepted too.
fn check_declared_count(root: &Map<String, Value>, rows: usize) {
    let Some(count) = root.get(COUNT_KEY) else {
        return;
    };

    let declared = match count {
        Value::String(s) => s.trim().parse::<usize>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        _ => None,
    };

    match declared {
        Some(n) if n != rows => warn!(
            "Declared count {} does not match {} approach rows",
            n, rows
        ),
        Some(_) => {}
        None => warn!("Ignoring unreadable '{}' value: {}", COUNT_KEY, count),
    }
}
