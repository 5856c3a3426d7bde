//! Error types shared by the form, the submission pipeline and configuration

use crate::state::{CommutingType, MissingField};
use std::time::Duration;
use thiserror::Error;

/// Required fields were left empty when the user asked to submit
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{} campo(s) obligatorio(s) sin completar", .0.len())]
    Incomplete(Vec<MissingField>),
}

/// The commuting endpoint cannot be derived from configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no API base URL configured (set COMMUTING_API_URL or api_url)")]
    MissingBaseUrl,
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Reasons a submission attempt was refused before anything was dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no commuting type selected")]
    NothingSelected,
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

/// Failure of a single outbound record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("no answer after {0:?}")]
    Timeout(Duration),
    #[error("dispatch task panicked")]
    Panicked,
    #[error("dispatch task was cancelled")]
    Cancelled,
}

/// A record that failed, tagged with the commuting type it belonged to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {source}")]
pub struct TypedDispatchError {
    pub kind: CommutingType,
    #[source]
    pub source: DispatchError,
}

/// Text typed into a form field could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("fecha no válida {0:?} (use AAAA-MM-DD)")]
    InvalidDate(String),
    #[error("número no válido {0:?}")]
    InvalidNumber(String),
    #[error("valor no admitido en {0}")]
    Rejected(&'static str),
}
