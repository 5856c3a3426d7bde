//! Trait abstraction for the commuting endpoint to enable mocking in tests

use crate::error::DispatchError;
use crate::submission::OutboundRecord;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Remote collaborator that accepts one commuting record per call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommutingApi: Send + Sync {
    /// Create one record at `endpoint`.
    ///
    /// Returns the response body (or `Value::Null` when there is none) on a
    /// success status, a [`DispatchError`] otherwise.
    async fn create_record(
        &self,
        endpoint: &Url,
        record: &OutboundRecord,
    ) -> Result<Value, DispatchError>;
}
