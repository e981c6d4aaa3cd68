//! Provides `EpiError` and maps other errors to it.
//!
//! Configuration problems are always reported through `EpiError` before any state is touched.
//! Connection bookkeeping failures (unknown node, edge already present) are not errors; those
//! operations return `false` instead.
use std::fmt::{self, Debug, Display};
use std::io;

use crate::disease::DiseaseId;
use crate::network::GroupId;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpiError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// A required parameter key is absent or empty.
    MissingField(String),
    /// A parameter is present but could not be parsed.
    InvalidField {
        field: String,
        value: String,
    },
    /// A probability outside `[0, 1]`.
    RateOutOfRange {
        field: String,
        value: f64,
    },
    /// A spread larger than the mean it is applied to.
    DeltaExceedsAverage {
        field: String,
        avg: u32,
        delta: u32,
    },
    UnknownGroup(GroupId),
    UnknownGroupName(String),
    DuplicateGroupName(String),
    SelfConnection(GroupId),
    UnknownDisease(DiseaseId),
    UnknownDiseaseName(String),
    /// The simulation was started on a network with no active nodes.
    EmptyPopulation,
    EpiError(String),
}

impl From<io::Error> for EpiError {
    fn from(error: io::Error) -> Self {
        EpiError::IoError(error)
    }
}

impl From<serde_json::Error> for EpiError {
    fn from(error: serde_json::Error) -> Self {
        EpiError::JsonError(error)
    }
}

impl From<csv::Error> for EpiError {
    fn from(error: csv::Error) -> Self {
        EpiError::CsvError(error)
    }
}

impl From<String> for EpiError {
    fn from(error: String) -> Self {
        EpiError::EpiError(error)
    }
}

impl From<&str> for EpiError {
    fn from(error: &str) -> Self {
        EpiError::EpiError(error.to_string())
    }
}

impl std::error::Error for EpiError {}

impl Display for EpiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpiError::IoError(e) => write!(f, "I/O error: {e}"),
            EpiError::JsonError(e) => write!(f, "JSON error: {e}"),
            EpiError::CsvError(e) => write!(f, "CSV error: {e}"),
            EpiError::MissingField(field) => write!(f, "missing value for `{field}`"),
            EpiError::InvalidField { field, value } => {
                write!(f, "invalid value {value:?} for `{field}`")
            }
            EpiError::RateOutOfRange { field, value } => {
                write!(f, "`{field}` must be within [0, 1], got {value}")
            }
            EpiError::DeltaExceedsAverage { field, avg, delta } => write!(
                f,
                "delta has to be smaller than average for `{field}` (avg {avg}, delta {delta})"
            ),
            EpiError::UnknownGroup(id) => write!(f, "no group with id {id}"),
            EpiError::UnknownGroupName(name) => write!(f, "no group named {name:?}"),
            EpiError::DuplicateGroupName(name) => {
                write!(f, "group name {name:?} is used more than once")
            }
            EpiError::SelfConnection(id) => {
                write!(f, "group {id} cannot have external connections to itself")
            }
            EpiError::UnknownDisease(id) => write!(f, "no disease with id {id}"),
            EpiError::UnknownDiseaseName(name) => write!(f, "no disease named {name:?}"),
            EpiError::EmptyPopulation => {
                write!(f, "cannot start a simulation without active nodes")
            }
            EpiError::EpiError(msg) => write!(f, "{msg}"),
        }
    }
}
