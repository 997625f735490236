//! Update-service abstraction plus an in-memory impl for tests/dev.

use thiserror::Error;

use crate::changeset::UpdateRequest;

/// Performs the remote partial update (transport abstraction).
///
/// The engine invokes `update` at most once per `submit` call and surfaces
/// any failure unchanged. Retry, backoff, timeouts and cancellation are the
/// implementation's business, not the engine's; errors are implementation-
/// specific, therefore the error type is associated.
pub trait UpdateService {
    type Error: std::error::Error + Send + Sync + 'static;

    fn update(&mut self, request: &UpdateRequest) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryServiceError {
    /// The service was armed to fail the next call.
    #[error("update rejected")]
    Rejected,
}

/// In-memory update service.
///
/// - No IO / no async
/// - Records every accepted request in order
/// - Can be armed to fail the next call, for dispatch-failure tests
#[derive(Debug, Default)]
pub struct InMemoryUpdateService {
    requests: Vec<UpdateRequest>,
    fail_next: bool,
}

impl InMemoryUpdateService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the service to reject the next `update` call.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// Requests accepted so far, oldest first.
    pub fn requests(&self) -> &[UpdateRequest] {
        &self.requests
    }
}

impl UpdateService for InMemoryUpdateService {
    type Error = InMemoryServiceError;

    fn update(&mut self, request: &UpdateRequest) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_next) {
            return Err(InMemoryServiceError::Rejected);
        }
        self.requests.push(request.clone());
        Ok(())
    }
}
