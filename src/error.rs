use std::ops::RangeInclusive;

use thiserror::Error as ThisError;

use crate::voting::Id;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    /// A vote targeted one or more options that already met their quota.
    #[error("option(s) already at capacity: {}", .0.join(", "))]
    QuotaExceeded(Vec<String>),

    #[error("{0} {1} was not found")]
    NotFound(&'static str, Id),

    #[error("{0} {1} is closed")]
    Closed(&'static str, Id),

    #[error("only the creator may change {0} {1}")]
    NotCreator(&'static str, Id),

    #[error("database error: {0}")]
    Db(#[from] diesel::result::Error),

    #[error("connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub fn option_count_out_of_range(limits: RangeInclusive<usize>, count: usize) -> Error {
    Error::Validation(format!(
        "must have between {} and {} options, got {count}",
        limits.start(),
        limits.end()
    ))
}

pub fn option_label_too_long(limit: usize, label: &str) -> Error {
    Error::Validation(format!("option label exceeds {limit} characters: {label}"))
}

pub fn duplicate_options(duplicates: &[String]) -> Error {
    Error::Validation(format!("duplicate option(s): {}", duplicates.join(", ")))
}

pub fn invalid_target(label: &str, target: i32) -> Error {
    Error::Validation(format!("option '{label}' has invalid vote target {target}"))
}

pub fn unknown_options(labels: &[String]) -> Error {
    Error::Validation(format!("no such option(s): {}", labels.join(", ")))
}

pub fn unknown_mode(mode: &str) -> Error {
    Error::Validation(format!("unknown mode '{mode}'"))
}

pub fn wrong_mode(kind: &'static str, expected: &'static str) -> Error {
    Error::Validation(format!("{kind} is not in {expected} mode"))
}

pub fn option_index_out_of_range(idx: i32, count: usize) -> Error {
    Error::Validation(format!("option index {idx} is out of range for {count} options"))
}

pub fn invalid_star_value(value: i32) -> Error {
    Error::Validation(format!("star rating must be between 1 and 5, got {value}"))
}

pub fn not_a_permutation(count: usize) -> Error {
    Error::Validation(format!("ordering must assign every position 1 to {count} exactly once"))
}

pub fn already_picked(idx: i32) -> Error {
    Error::Validation(format!("option {idx} has already been picked"))
}

pub fn bad_continuation(token: &str) -> Error {
    Error::Validation(format!("selection state '{token}' cannot be resumed"))
}

pub fn corrupt_row(table: &'static str, detail: &str) -> Error {
    Error::Validation(format!("stored {table} row is corrupt: {detail}"))
}
