//! Submission client.
//!
//! The submission side of the report contract, kept independent of any
//! rendering surface: a display state machine that tracks which image the
//! UI should show, an HTTP client for the single `POST api/report` round
//! trip, and a controller combining the two. The embedded browser page
//! drives the same contract with the same rules; this module is the
//! implementation used by the CLI and the test suite.
//!
//! Display state starts at the instructions placeholder, moves to
//! `reports/<guid>.png` on each successful submission, and is left
//! untouched by failures. Overlapping submissions are resolved with
//! sequence tickets: the most recently issued submission wins, responses
//! to superseded submissions are discarded as stale.

use reqwest::StatusCode;
use thiserror::Error;

use crate::wire::{ReportResponse, SubmissionPayload};

/// Image shown before the first successful submission.
pub const INSTRUCTIONS_IMAGE: &str = "static/instructions.jpg";

/// Relative endpoint the submission posts to.
pub const REPORT_ENDPOINT: &str = "api/report";

/// Display path for a generated report.
pub fn report_image_path(guid: &str) -> String {
    format!("reports/{}.png", guid)
}

/// Ways a submission can fail. Every failure leaves the display unchanged.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The request never completed (connect, send or read failure).
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server replied with a non-success status.
    #[error("Server replied {0}")]
    Status(StatusCode),

    /// The response body was not a valid report acknowledgment.
    #[error("Invalid report response: {0}")]
    InvalidResponse(String),

    /// A newer submission was issued while this one was in flight.
    #[error("Submission superseded by a newer one")]
    Superseded,
}

/// Ticket identifying one issued submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What applying a completed submission did to the display state.
#[derive(Debug)]
pub enum Completion {
    /// Display now shows this report path.
    Updated(String),
    /// Submission failed; display unchanged.
    Failed(SubmissionError),
    /// A newer submission superseded this one; result discarded.
    Stale,
}

/// Display state machine.
///
/// `begin` hands out monotonically increasing tickets; `complete` applies
/// an outcome only when its ticket is still the newest one, so the last
/// *request* wins regardless of response arrival order.
#[derive(Debug)]
pub struct SubmissionState {
    current_image: String,
    issued: u64,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self {
            current_image: INSTRUCTIONS_IMAGE.to_string(),
            issued: 0,
        }
    }

    /// The image path the rendering surface should show.
    pub fn current_image(&self) -> &str {
        &self.current_image
    }

    /// Return to the placeholder. Outstanding submissions become stale.
    pub fn reset(&mut self) {
        self.current_image = INSTRUCTIONS_IMAGE.to_string();
        self.issued += 1;
    }

    /// Start a submission.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Apply the outcome of a submission.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, SubmissionError>,
    ) -> Completion {
        if ticket.0 != self.issued {
            return Completion::Stale;
        }
        match outcome {
            Ok(guid) => {
                let path = report_image_path(&guid);
                self.current_image = path.clone();
                Completion::Updated(path)
            }
            Err(e) => Completion::Failed(e),
        }
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the report endpoint.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit the eight slots and return the report guid.
    ///
    /// The body is the JSON serialization of the slot values, transmitted
    /// verbatim. The status is checked before the body is parsed, and a
    /// response without a non-empty `guid` is rejected, so a broken path
    /// can never reach the display state.
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<String, SubmissionError> {
        let url = format!("{}/{}", self.base_url, REPORT_ENDPOINT);
        let response = self.http.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status(status));
        }

        let body = response.text().await?;
        let ack: ReportResponse = serde_json::from_str(&body)
            .map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;
        if ack.guid.is_empty() {
            return Err(SubmissionError::InvalidResponse("empty guid".to_string()));
        }
        Ok(ack.guid)
    }
}

/// Display state plus client: `reset` and `submit`, nothing else.
#[derive(Debug)]
pub struct SubmissionController {
    state: SubmissionState,
    client: SubmissionClient,
}

impl SubmissionController {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            state: SubmissionState::new(),
            client: SubmissionClient::new(base_url),
        }
    }

    pub fn current_image(&self) -> &str {
        self.state.current_image()
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Run one full submission cycle and return the new display path.
    pub async fn submit(
        &mut self,
        payload: &SubmissionPayload,
    ) -> Result<String, SubmissionError> {
        let ticket = self.state.begin();
        let outcome = self.client.submit(payload).await;
        match self.state.complete(ticket, outcome) {
            Completion::Updated(path) => Ok(path),
            Completion::Failed(e) => Err(e),
            Completion::Stale => Err(SubmissionError::Superseded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> SubmissionError {
        SubmissionError::Status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[test]
    fn starts_at_the_placeholder() {
        let state = SubmissionState::new();
        assert_eq!(state.current_image(), "static/instructions.jpg");
    }

    #[test]
    fn success_updates_the_display_path() {
        let mut state = SubmissionState::new();
        let ticket = state.begin();
        let completion = state.complete(ticket, Ok("abc123".to_string()));
        assert!(matches!(completion, Completion::Updated(p) if p == "reports/abc123.png"));
        assert_eq!(state.current_image(), "reports/abc123.png");
    }

    #[test]
    fn failure_leaves_the_display_unchanged() {
        let mut state = SubmissionState::new();
        let first = state.begin();
        state.complete(first, Ok("abc".to_string()));

        let second = state.begin();
        let completion = state.complete(second, Err(failure()));
        assert!(matches!(completion, Completion::Failed(_)));
        assert_eq!(state.current_image(), "reports/abc.png");
    }

    #[test]
    fn last_request_wins_when_responses_arrive_in_reverse() {
        let mut state = SubmissionState::new();
        let first = state.begin();
        let second = state.begin();

        // Second (newer) request resolves first.
        state.complete(second, Ok("new".to_string()));
        // First (older) request resolves last and must be discarded.
        let completion = state.complete(first, Ok("old".to_string()));
        assert!(matches!(completion, Completion::Stale));
        assert_eq!(state.current_image(), "reports/new.png");
    }

    #[test]
    fn stale_failure_is_also_discarded() {
        let mut state = SubmissionState::new();
        let first = state.begin();
        let second = state.begin();
        state.complete(second, Ok("keep".to_string()));

        assert!(matches!(state.complete(first, Err(failure())), Completion::Stale));
        assert_eq!(state.current_image(), "reports/keep.png");
    }

    #[test]
    fn reset_restores_the_placeholder_and_invalidates_in_flight() {
        let mut state = SubmissionState::new();
        let ticket = state.begin();
        state.reset();
        assert_eq!(state.current_image(), INSTRUCTIONS_IMAGE);
        assert!(matches!(state.complete(ticket, Ok("late".to_string())), Completion::Stale));
        assert_eq!(state.current_image(), INSTRUCTIONS_IMAGE);
    }

    #[test]
    fn report_paths_are_derived_exactly() {
        assert_eq!(report_image_path("9f1a"), "reports/9f1a.png");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = SubmissionClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
