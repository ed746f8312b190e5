//! Eligibility rules applied to a looked-up ticket
//!
//! Rules run in a fixed order. Admission state and match state are checked
//! first so an already-used ticket is reported as such even when the backend
//! also omitted its identifier.

use crate::types::CheckResult;
use checkin_client::Ticket;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Operator-facing messages
pub mod messages {
    /// Ticket already admitted
    pub const ALREADY_CHECKED_IN: &str = "already checked in";
    /// Match is not in a sale state that admits entry
    pub const MATCH_NOT_OPEN: &str = "match not open";
    /// Lookup found nothing and the server gave no reason
    pub const INVALID_TICKET: &str = "invalid ticket";
    /// Match is on a later day
    pub const TOO_EARLY: &str = "not yet time to check in";
    /// Match was on an earlier day
    pub const EXPIRED: &str = "past check-in window";
    /// Ticket may be admitted
    pub const VALID: &str = "valid ticket";
    /// Match date or time missing or malformed
    pub const INVALID_INFO: &str = "invalid ticket information";
    /// Lookup request failed and the server gave no reason
    pub const LOOKUP_FAILED: &str = "error checking ticket";
    /// Confirmation failed and the server gave no reason
    pub const CONFIRM_FAILED: &str = "check-in failed";
    /// Confirmation succeeded and the server gave no message
    pub const CONFIRM_SUCCEEDED: &str = "check-in successful";
}

/// How the match time relates to now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Match is today (any time of day)
    Available,
    /// Match is on a later day
    TooEarly,
    /// Match was on an earlier day
    Expired,
    /// Match date or time missing or malformed
    Invalid,
}

impl TimeWindow {
    /// Operator-facing message for this window
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Available => messages::VALID,
            Self::TooEarly => messages::TOO_EARLY,
            Self::Expired => messages::EXPIRED,
            Self::Invalid => messages::INVALID_INFO,
        }
    }
}

/// Parse `YYYY-MM-DD` and `HH:MM[:SS[.fff]]` into a local date-time
#[must_use]
pub fn parse_match_datetime(match_date: &str, match_time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(match_date.trim(), "%Y-%m-%d").ok()?;
    let time = match_time.trim();
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}

/// Classify a match date and time against the local `now`
///
/// Only the calendar date decides availability; a match at 23:00 is
/// available from midnight on.
#[must_use]
pub fn time_window(
    match_date: Option<&str>,
    match_time: Option<&str>,
    now: NaiveDateTime,
) -> TimeWindow {
    let Some(match_at) = match_date
        .zip(match_time)
        .and_then(|(date, time)| parse_match_datetime(date, time))
    else {
        return TimeWindow::Invalid;
    };

    if match_at.date() == now.date() {
        TimeWindow::Available
    } else if now < match_at {
        TimeWindow::TooEarly
    } else {
        TimeWindow::Expired
    }
}

/// Evaluate a successful lookup into a verdict
///
/// `now` is the local wall-clock time at the venue.
#[must_use]
pub fn evaluate(ticket: Ticket, now: NaiveDateTime) -> CheckResult {
    if ticket.is_checked_in() {
        return CheckResult::rejected(messages::ALREADY_CHECKED_IN, Some(ticket));
    }

    // A record without an id is a "not found" body; it is reported below
    let match_closed = match ticket.match_status {
        Some(status) => !status.admits_checkin(),
        None => ticket.id.is_some(),
    };
    if match_closed {
        return CheckResult::rejected(messages::MATCH_NOT_OPEN, Some(ticket));
    }

    if ticket.id.is_none() {
        let message = ticket
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| messages::INVALID_TICKET.to_string());
        return CheckResult::rejected(message, None);
    }

    let window = time_window(
        ticket.match_date.as_deref(),
        ticket.match_time.as_deref(),
        now,
    );

    CheckResult {
        success: window == TimeWindow::Available,
        message: window.message().to_string(),
        ticket: Some(ticket),
    }
}
