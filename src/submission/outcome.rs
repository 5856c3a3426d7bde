//! Per-type outcomes and their reduction to one user-facing result

use crate::error::{DispatchError, TypedDispatchError};
use crate::state::CommutingType;
use serde_json::Value;
use uuid::Uuid;

/// Result of dispatching the record of one commuting type
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub kind: CommutingType,
    pub result: Result<Value, DispatchError>,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What the user is told about a whole attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOutcome {
    Succeeded,
    Failed,
}

impl AggregateOutcome {
    /// Notification text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::Succeeded => "Datos enviados con éxito",
            Self::Failed => "Error al enviar los datos",
        }
    }
}

/// Every outcome of one submission attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReport {
    pub attempt_id: Uuid,
    pub outcomes: Vec<SubmissionOutcome>,
}

impl SubmissionReport {
    /// Failure if any dispatch failed, success otherwise
    pub fn aggregate(&self) -> AggregateOutcome {
        if self.outcomes.iter().all(SubmissionOutcome::is_success) {
            AggregateOutcome::Succeeded
        } else {
            AggregateOutcome::Failed
        }
    }

    /// Failed dispatches tagged with their commuting type
    pub fn failures(&self) -> Vec<TypedDispatchError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| {
                outcome.result.as_ref().err().map(|err| TypedDispatchError {
                    kind: outcome.kind,
                    source: err.clone(),
                })
            })
            .collect()
    }
}

/// Submission lifecycle as seen by the form: `Idle → InFlight → {Succeeded,
/// Failed} → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

impl From<AggregateOutcome> for SubmissionStatus {
    fn from(outcome: AggregateOutcome) -> Self {
        match outcome {
            AggregateOutcome::Succeeded => Self::Succeeded,
            AggregateOutcome::Failed => Self::Failed,
        }
    }
}
