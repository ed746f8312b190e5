//! State and actions of the check-in flow

use checkin_client::{ApiError, ConfirmCheckinResponse, Ticket};
use chrono::{DateTime, Utc};

/// Where the flow currently is
///
/// `Idle → Checking → CheckResult → Confirming → FinalResult → Idle`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowStep {
    /// Waiting for a ticket code
    #[default]
    Idle,
    /// Lookup in flight
    Checking,
    /// Eligibility verdict shown
    CheckResult,
    /// Confirmation in flight
    Confirming,
    /// Confirmation outcome shown
    FinalResult,
}

impl FlowStep {
    /// Whether a remote call is in flight
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Checking | Self::Confirming)
    }
}

/// Outcome shown to the operator after a lookup or a confirmation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckResult {
    /// Whether the ticket may be (or was) admitted
    pub success: bool,
    /// Operator-facing message
    pub message: String,
    /// Ticket the verdict is about, when there is one to show
    pub ticket: Option<Ticket>,
}

impl CheckResult {
    /// A rejection
    #[must_use]
    pub fn rejected(message: impl Into<String>, ticket: Option<Ticket>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ticket,
        }
    }

    /// Code of the attached ticket, if any
    #[must_use]
    pub fn ticket_code(&self) -> Option<&str> {
        self.ticket
            .as_ref()?
            .ticket_code
            .as_deref()
            .filter(|code| !code.is_empty())
    }
}

/// State of one check-in screen
///
/// Transient and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckinFlowState {
    /// Current step
    pub step: FlowStep,
    /// Verdict or confirmation outcome; `None` while idle or checking
    pub result: Option<CheckResult>,
    /// When the last scan was accepted
    pub last_scan_at: Option<DateTime<Utc>>,
}

impl CheckinFlowState {
    /// Whether `Confirm` would start a confirmation
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.step == FlowStep::CheckResult
            && self
                .result
                .as_ref()
                .is_some_and(|result| result.success && result.ticket_code().is_some())
    }
}

/// Inputs to the check-in flow
#[derive(Debug, Clone, PartialEq)]
pub enum CheckinAction {
    // ========================================================================
    // Operator input
    // ========================================================================
    /// Code typed by the operator
    SubmitCode {
        /// Raw input; trimmed before use
        code: String,
    },

    /// Code decoded by the camera
    ScanCode {
        /// Decoded value; trimmed before use
        code: String,
    },

    /// Admit the ticket from the current verdict
    Confirm,

    /// Go back to idle from a verdict or an outcome
    Reset,

    // ========================================================================
    // Remote completions
    // ========================================================================
    /// Ticket lookup finished
    LookupCompleted {
        /// Lookup outcome
        result: Result<Ticket, ApiError>,
    },

    /// Confirmation finished
    ConfirmCompleted {
        /// Confirmation outcome
        result: Result<ConfirmCheckinResponse, ApiError>,
    },
}
