//! Fan-out of a form snapshot into one outbound record per commuting type

mod orchestrator;
mod outcome;
mod record;

pub use orchestrator::{SubmitSettings, Submitter, DEFAULT_DISPATCH_TIMEOUT};
pub use outcome::{AggregateOutcome, SubmissionReport, SubmissionStatus};
pub use record::OutboundRecord;
