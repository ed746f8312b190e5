//! In-memory test doubles for the flow environment
//!
//! Responses are queued per operation; an empty queue answers with a
//! transport error so a test never hangs on an unexpected call.

use crate::environment::{ServiceFuture, Signal, SignalPlayer, TicketService};
use checkin_client::{ApiError, CheckinLogPage, ConfirmCheckinResponse, Ticket};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Calls {
    lookups: Vec<String>,
    confirmations: Vec<String>,
    log_pages: Vec<(u32, u64)>,
}

#[derive(Debug, Default)]
struct Responses {
    lookups: VecDeque<Result<Ticket, ApiError>>,
    confirmations: VecDeque<Result<ConfirmCheckinResponse, ApiError>>,
    log_pages: VecDeque<Result<CheckinLogPage, ApiError>>,
}

/// Scripted [`TicketService`] that records every call
///
/// Clones share calls and responses.
#[derive(Debug, Clone, Default)]
pub struct MockTicketService {
    calls: Arc<Mutex<Calls>>,
    responses: Arc<Mutex<Responses>>,
    latency: Option<Duration>,
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("no scripted response".to_string()))
}

impl MockTicketService {
    /// Creates a mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue the answer to the next lookup
    pub fn push_lookup(&self, response: Result<Ticket, ApiError>) {
        self.responses().lookups.push_back(response);
    }

    /// Queue the answer to the next confirmation
    pub fn push_confirm(&self, response: Result<ConfirmCheckinResponse, ApiError>) {
        self.responses().confirmations.push_back(response);
    }

    /// Queue the answer to the next history page request
    pub fn push_log_page(&self, response: Result<CheckinLogPage, ApiError>) {
        self.responses().log_pages.push_back(response);
    }

    /// Codes looked up so far
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.calls().lookups.clone()
    }

    /// Codes confirmed so far
    #[must_use]
    pub fn confirmations(&self) -> Vec<String> {
        self.calls().confirmations.clone()
    }

    /// `(limit, offset)` of each history request so far
    #[must_use]
    pub fn log_pages(&self) -> Vec<(u32, u64)> {
        self.calls().log_pages.clone()
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn responses(&self) -> std::sync::MutexGuard<'_, Responses> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond<T: Send + 'static>(&self, response: Result<T, ApiError>) -> ServiceFuture<T> {
        let latency = self.latency;
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            response
        })
    }
}

impl TicketService for MockTicketService {
    fn lookup(&self, ticket_code: String) -> ServiceFuture<Ticket> {
        self.calls().lookups.push(ticket_code);
        let response = self.responses().lookups.pop_front().unwrap_or_else(unscripted);
        self.respond(response)
    }

    fn confirm(&self, ticket_code: String) -> ServiceFuture<ConfirmCheckinResponse> {
        self.calls().confirmations.push(ticket_code);
        let response = self
            .responses()
            .confirmations
            .pop_front()
            .unwrap_or_else(unscripted);
        self.respond(response)
    }

    fn checkin_logs(&self, limit: u32, offset: u64) -> ServiceFuture<CheckinLogPage> {
        self.calls().log_pages.push((limit, offset));
        let response = self.responses().log_pages.pop_front().unwrap_or_else(unscripted);
        self.respond(response)
    }
}

/// [`SignalPlayer`] that remembers what it played
#[derive(Debug, Clone, Default)]
pub struct RecordingSignalPlayer {
    played: Arc<Mutex<Vec<Signal>>>,
}

impl RecordingSignalPlayer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals played so far, in order
    #[must_use]
    pub fn played(&self) -> Vec<Signal> {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SignalPlayer for RecordingSignalPlayer {
    fn play(&self, signal: Signal) {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(signal);
    }
}
