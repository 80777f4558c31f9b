//! Domain models for near-Earth objects and their close approaches.
//!
//! Records are built once per source row by the fixed-arity constructors
//! [`NearEarthObject::new`] and [`CloseApproach::new`], which own all
//! field-level coercion. They are not mutated afterwards.

use std::fmt;

use chrono::NaiveDateTime;
use qtty::velocity::Velocity;
use qtty::{AstronomicalUnits, Kilometer, Kilometers, Second};
use serde::Serialize;

use crate::error::FieldError;
use crate::time::{datetime_to_str, parse_approach_time};

/// Relative velocity in kilometres per second.
pub type KilometersPerSecond = Velocity<Kilometer, Second>;

/// A near-Earth object as described by one row of the NEO catalog.
///
/// # Fields
///
/// * `designation` - Primary designation, e.g. `"433"` or `"2020 AB"`
/// * `name` - IAU name, `None` for unnamed objects
/// * `diameter` - Estimated diameter, `None` when unknown
/// * `hazardous` - Whether the object is classified as potentially hazardous
///
/// # Examples
///
/// ```
/// use neo_ingest::core::domain::NearEarthObject;
///
/// let neo = NearEarthObject::new(Some("433"), Some("Eros"), Some("16.84"), Some("N")).unwrap();
///
/// assert_eq!(neo.fullname(), "433 (Eros)");
/// assert_eq!(neo.diameter.map(|d| d.value()), Some(16.84));
/// assert!(!neo.hazardous);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearEarthObject {
    pub designation: String,
    pub name: Option<String>,
    pub diameter: Option<Kilometers>,
    pub hazardous: bool,
}

impl NearEarthObject {
    /// Builds a record from the four textual catalog fields.
    ///
    /// # Arguments
    ///
    /// * `designation` - Primary designation (`pdes`), required
    /// * `name` - IAU name; empty means unnamed
    /// * `diameter` - Diameter in km; empty means unknown
    /// * `hazardous` - PHA marker (`Y`/`N`); empty means not hazardous
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] if the designation is missing, the diameter is
    /// not a number, or the hazard marker is not recognized.
    pub fn new(
        designation: Option<&str>,
        name: Option<&str>,
        diameter: Option<&str>,
        hazardous: Option<&str>,
    ) -> Result<Self, FieldError> {
        let designation = required_text("designation", designation)?;
        let name = non_empty(name).map(str::to_string);
        let diameter = optional_number("diameter", diameter)?.map(Kilometers::new);
        let hazardous = parse_hazard_flag(hazardous)?;

        Ok(Self {
            designation,
            name,
            diameter,
            hazardous,
        })
    }

    /// Designation followed by the name in parentheses, when there is one.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEO {} has ", self.fullname())?;
        match self.diameter {
            Some(d) => write!(f, "a diameter of {:.3} km", d.value())?,
            None => write!(f, "an unknown diameter")?,
        }
        let hazard = if self.hazardous { "is" } else { "is not" };
        write!(f, " and {} potentially hazardous.", hazard)
    }
}

/// A single close approach of a body to Earth.
///
/// The `designation` refers to a [`NearEarthObject`] by its primary
/// designation; resolving that reference is left to the caller.
///
/// # Examples
///
/// ```
/// use neo_ingest::core::domain::CloseApproach;
///
/// let approach = CloseApproach::new(
///     Some("433"),
///     Some("1900-Dec-27 01:30"),
///     Some("0.3149"),
///     Some("5.58"),
/// )
/// .unwrap();
///
/// assert_eq!(approach.time_str(), "1900-12-27 01:30");
/// assert_eq!(approach.distance.value(), 0.3149);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseApproach {
    pub designation: String,
    pub time: NaiveDateTime,
    pub distance: AstronomicalUnits,
    pub velocity: KilometersPerSecond,
}

impl CloseApproach {
    /// Builds a record from the four positional approach fields.
    ///
    /// # Arguments
    ///
    /// * `designation` - Designation of the approaching body
    /// * `time` - Calendar time of closest approach (UTC)
    /// * `distance` - Nominal approach distance in au
    /// * `velocity` - Velocity relative to Earth in km/s
    ///
    /// # Errors
    ///
    /// Every field is required; a missing or unparseable value yields a
    /// [`FieldError`].
    pub fn new(
        designation: Option<&str>,
        time: Option<&str>,
        distance: Option<&str>,
        velocity: Option<&str>,
    ) -> Result<Self, FieldError> {
        let designation = required_text("designation", designation)?;

        let raw_time = non_empty(time).ok_or(FieldError::Missing { field: "time" })?;
        let time = parse_approach_time(raw_time).ok_or_else(|| FieldError::InvalidTime {
            value: raw_time.to_string(),
        })?;

        let distance = required_number("distance", distance)?;
        let velocity = required_number("velocity", velocity)?;

        Ok(Self {
            designation,
            time,
            distance: AstronomicalUnits::new(distance),
            velocity: KilometersPerSecond::new(velocity),
        })
    }

    /// Approach time formatted as `YYYY-MM-DD HH:MM`.
    pub fn time_str(&self) -> String {
        datetime_to_str(&self.time)
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.designation,
            self.distance.value(),
            self.velocity.value()
        )
    }
}

/// Interprets a PHA marker. Empty counts as "not hazardous".
pub fn parse_hazard_flag(value: Option<&str>) -> Result<bool, FieldError> {
    let Some(marker) = non_empty(value) else {
        return Ok(false);
    };

    match marker.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        _ => Err(FieldError::InvalidFlag {
            value: marker.to_string(),
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    non_empty(value)
        .map(str::to_string)
        .ok_or(FieldError::Missing { field })
}

fn optional_number(field: &'static str, value: Option<&str>) -> Result<Option<f64>, FieldError> {
    non_empty(value)
        .map(|v| {
            v.trim().parse::<f64>().map_err(|_| FieldError::InvalidNumber {
                field,
                value: v.to_string(),
            })
        })
        .transpose()
}

fn required_number(field: &'static str, value: Option<&str>) -> Result<f64, FieldError> {
    optional_number(field, value)?.ok_or(FieldError::Missing { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neo_from_catalog_fields() {
        let neo = NearEarthObject::new(Some("433"), Some("Eros"), Some("16.84"), Some("N")).unwrap();
        assert_eq!(neo.designation, "433");
        assert_eq!(neo.name.as_deref(), Some("Eros"));
        assert_eq!(neo.diameter, Some(Kilometers::new(16.84)));
        assert!(!neo.hazardous);
    }

    #[test]
    fn test_neo_empty_fields_become_none() {
        let neo = NearEarthObject::new(Some("2020 AB"), Some(""), Some(""), Some("")).unwrap();
        assert!(neo.name.is_none());
        assert!(neo.diameter.is_none());
        assert!(!neo.hazardous);
        assert_eq!(neo.fullname(), "2020 AB");
    }

    #[test]
    fn test_neo_hazard_markers() {
        for marker in ["Y", "y", "yes", "TRUE"] {
            assert_eq!(parse_hazard_flag(Some(marker)), Ok(true), "{}", marker);
        }
        for marker in ["N", "n", "No", "false"] {
            assert_eq!(parse_hazard_flag(Some(marker)), Ok(false), "{}", marker);
        }
        assert_eq!(parse_hazard_flag(None), Ok(false));
        assert_eq!(
            parse_hazard_flag(Some("maybe")),
            Err(FieldError::InvalidFlag {
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn test_neo_bad_diameter() {
        let err = NearEarthObject::new(Some("433"), None, Some("huge"), Some("N")).unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidNumber {
                field: "diameter",
                value: "huge".to_string()
            }
        );
    }

    #[test]
    fn test_neo_requires_designation() {
        let err = NearEarthObject::new(Some("  "), Some("Eros"), None, None).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: "designation" });
    }

    #[test]
    fn test_neo_display() {
        let neo = NearEarthObject::new(Some("433"), Some("Eros"), Some("16.84"), Some("N")).unwrap();
        assert_eq!(
            neo.to_string(),
            "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous."
        );

        let unknown = NearEarthObject::new(Some("2020 AB"), None, None, Some("Y")).unwrap();
        assert_eq!(
            unknown.to_string(),
            "NEO 2020 AB has an unknown diameter and is potentially hazardous."
        );
    }

    #[test]
    fn test_approach_from_positional_fields() {
        let ca = CloseApproach::new(Some("433"), Some("2020-01-01"), Some("0.15"), Some("5.1")).unwrap();
        assert_eq!(ca.designation, "433");
        assert_eq!(ca.time_str(), "2020-01-01 00:00");
        assert_eq!(ca.distance, AstronomicalUnits::new(0.15));
        assert_eq!(ca.velocity.value(), 5.1);
    }

    #[test]
    fn test_approach_missing_fields() {
        let err = CloseApproach::new(Some("433"), None, Some("0.15"), Some("5.1")).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: "time" });

        let err = CloseApproach::new(Some("433"), Some("2020-01-01"), Some("0.15"), None).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: "velocity" });
    }

    #[test]
    fn test_approach_bad_time() {
        let err = CloseApproach::new(Some("433"), Some("soon"), Some("0.15"), Some("5.1")).unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidTime {
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_approach_display() {
        let ca = CloseApproach::new(Some("433"), Some("1900-Dec-27 01:30"), Some("0.3149"), Some("5.58")).unwrap();
        assert_eq!(
            ca.to_string(),
            "At 1900-12-27 01:30, '433' approaches Earth at a distance of 0.31 au and a velocity of 5.58 km/s."
        );
    }

    #[test]
    fn test_records_serialize_quantities_as_numbers() {
        let neo = NearEarthObject::new(Some("433"), Some("Eros"), Some("16.84"), Some("N")).unwrap();
        let json = serde_json::to_value(&neo).unwrap();
        assert_eq!(json["diameter"], serde_json::json!(16.84));
        assert_eq!(json["name"], serde_json::json!("Eros"));
    }
}
