pub mod calendar;

pub use calendar::{datetime_to_str, parse_approach_time, APPROACH_TIME_FORMAT};
