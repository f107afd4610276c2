use uploader_logging::{uploader_debug, uploader_info};

use crate::PredictionOutcome;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

/// Request lifecycle for the prediction call.
///
/// Every request is tagged with a fresh `RequestId`; only the completion for
/// the request currently in flight is applied.
#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    last_request: RequestId,
    in_flight: Option<RequestId>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Enters `Submitting`. Returns `None` when a request is already in flight.
    pub fn begin(&mut self) -> Option<RequestId> {
        if self.is_submitting() {
            uploader_debug!("Submit ignored; request {:?} in flight", self.in_flight);
            return None;
        }
        self.last_request += 1;
        let request_id = self.last_request;
        self.in_flight = Some(request_id);
        self.state = SubmissionState::Submitting;
        Some(request_id)
    }

    /// Applies a completion. Returns `false` when it belongs to a superseded request.
    pub fn settle(&mut self, request_id: RequestId, outcome: PredictionOutcome) -> bool {
        if self.in_flight != Some(request_id) {
            uploader_info!(
                "Discarding stale completion for request {} (in flight: {:?})",
                request_id,
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(label) => SubmissionState::Succeeded(label),
            Err(message) => SubmissionState::Failed(message),
        };
        true
    }

    /// Back to `Idle`; any request still in flight becomes stale.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.state = SubmissionState::Idle;
    }
}
