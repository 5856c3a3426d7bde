//! Concurrent dispatch of outbound records and outcome collection
//!
//! A submission is split in two steps so callers can disable re-submission
//! before any work is awaited:
//!
//! 1. [`Submitter::start`] checks the snapshot and configuration, sets the
//!    busy flag and derives the records.
//! 2. [`Submission::run`] spawns one task per record and waits for all of
//!    them, even after a failure, so the report always holds every outcome.
//!
//! The busy flag is owned by a guard inside [`Submission`], so it is cleared
//! when the report is produced, when a run panics, and when a started
//! submission is dropped without running. Dropping or aborting a run aborts
//! its dispatch tasks before the flag is released.

use super::outcome::{AggregateOutcome, SubmissionOutcome, SubmissionReport};
use super::record::{derive_records, OutboundRecord};
use crate::api::{commuting_endpoint, CommutingApi};
use crate::error::{DispatchError, SubmitError};
use crate::state::FormSnapshot;
use futures::future::join_all;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use url::Url;
use uuid::Uuid;

/// Per-dispatch limit when none is configured
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Orchestration settings resolved from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSettings {
    /// Raw base URL; validated on every submission
    pub base_url: Option<String>,
    pub dispatch_timeout: Duration,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
        }
    }
}

/// Turns form snapshots into concurrent record dispatches
#[derive(Clone)]
pub struct Submitter {
    api: Arc<dyn CommutingApi>,
    settings: SubmitSettings,
    in_flight: Arc<AtomicBool>,
}

impl Submitter {
    pub fn new(api: Arc<dyn CommutingApi>, settings: SubmitSettings) -> Self {
        Self {
            api,
            settings,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a started submission has not produced its report yet
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Begin a submission attempt.
    ///
    /// Refuses an empty selection, an unusable base URL and a second attempt
    /// while one is in flight. Nothing is dispatched until [`Submission::run`].
    pub fn start(&self, snapshot: &FormSnapshot) -> Result<Submission, SubmitError> {
        if snapshot.selected_count() == 0 {
            return Err(SubmitError::NothingSelected);
        }
        let endpoint = commuting_endpoint(self.settings.base_url.as_deref())?;
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::AlreadyInFlight)?;

        let records = derive_records(snapshot);
        let attempt_id = Uuid::new_v4();
        tracing::info!(%attempt_id, %endpoint, records = records.len(), "submission started");

        Ok(Submission {
            attempt_id,
            api: Arc::clone(&self.api),
            endpoint,
            records,
            dispatch_timeout: self.settings.dispatch_timeout,
            guard,
        })
    }

    /// Start and run a submission in one call
    #[cfg(test)]
    pub async fn submit(&self, snapshot: &FormSnapshot) -> Result<SubmissionReport, SubmitError> {
        Ok(self.start(snapshot)?.run().await)
    }
}

/// A started attempt holding the busy flag
pub struct Submission {
    attempt_id: Uuid,
    api: Arc<dyn CommutingApi>,
    endpoint: Url,
    records: Vec<OutboundRecord>,
    dispatch_timeout: Duration,
    guard: InFlightGuard,
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("attempt_id", &self.attempt_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl Submission {
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn records(&self) -> &[OutboundRecord] {
        &self.records
    }

    /// Dispatch every record concurrently and wait for all of them
    pub async fn run(self) -> SubmissionReport {
        let Submission {
            attempt_id,
            api,
            endpoint,
            records,
            dispatch_timeout,
            guard,
        } = self;

        let handles: Vec<_> = records
            .into_iter()
            .map(|record| {
                let kind = record.kind;
                let api = Arc::clone(&api);
                let endpoint = endpoint.clone();
                let handle = tokio::spawn(async move {
                    match tokio::time::timeout(dispatch_timeout, api.create_record(&endpoint, &record))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(DispatchError::Timeout(dispatch_timeout)),
                    }
                });
                (kind, handle)
            })
            .collect();
        let _dispatches = AbortOnDrop(
            handles
                .iter()
                .map(|(_, handle)| handle.abort_handle())
                .collect(),
        );

        let outcomes = join_all(handles.into_iter().map(|(kind, handle)| async move {
            let result = match handle.await {
                Ok(result) => result,
                Err(err) if err.is_panic() => Err(DispatchError::Panicked),
                Err(_) => Err(DispatchError::Cancelled),
            };
            SubmissionOutcome { kind, result }
        }))
        .await;

        for outcome in &outcomes {
            match &outcome.result {
                Ok(body) => tracing::debug!(%attempt_id, kind = %outcome.kind, %body, "record accepted"),
                Err(err) => tracing::warn!(%attempt_id, kind = %outcome.kind, error = %err, "record dispatch failed"),
            }
        }

        let report = SubmissionReport {
            attempt_id,
            outcomes,
        };
        match report.aggregate() {
            AggregateOutcome::Succeeded => tracing::info!(%attempt_id, "submission succeeded"),
            AggregateOutcome::Failed => tracing::warn!(
                %attempt_id,
                failed = report.failures().len(),
                total = report.outcomes.len(),
                "submission failed"
            ),
        }

        drop(guard);
        report
    }
}

/// Aborts the dispatch tasks of a run that is dropped before it completes.
/// Declared after the busy flag guard in `run`, so it drops first.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Holds the busy flag; releases it on drop
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
