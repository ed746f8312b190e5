//! Labels and formatting for showing tickets to the operator

use crate::environment::TimeZoneSetting;
use checkin_client::{CheckinStatus, MatchStatus, Ticket, TicketType};
use chrono::{DateTime, NaiveDate, Utc};

const UNKNOWN: &str = "unknown";

/// Label for a ticket tier
#[must_use]
pub const fn ticket_type_label(ticket_type: Option<TicketType>) -> &'static str {
    match ticket_type {
        Some(TicketType::Standard) => "standard ticket",
        Some(TicketType::Vip) => "VIP ticket",
        Some(TicketType::Unknown) | None => UNKNOWN,
    }
}

/// Label for a match sale state
#[must_use]
pub const fn match_status_label(status: Option<MatchStatus>) -> &'static str {
    match status {
        Some(MatchStatus::OpenSale) => "on sale",
        Some(MatchStatus::Draft) => "draft",
        Some(MatchStatus::Completed) => "played",
        Some(MatchStatus::Cancelled) => "cancelled",
        Some(MatchStatus::CloseSale) => "sales closed",
        Some(MatchStatus::Unknown) | None => UNKNOWN,
    }
}

/// Label for a ticket's admission state
#[must_use]
pub const fn checkin_status_label(status: Option<CheckinStatus>) -> &'static str {
    match status {
        Some(CheckinStatus::CheckedIn) => "checked in",
        Some(CheckinStatus::Pending) => "not checked in",
        Some(CheckinStatus::Unknown) | None => UNKNOWN,
    }
}

/// Holder name, family name first; "walk-in customer" when both are blank
#[must_use]
pub fn customer_name(ticket: &Ticket) -> String {
    let family = ticket.customer_family_name.as_deref().unwrap_or_default();
    let first = ticket.customer_first_name.as_deref().unwrap_or_default();
    let name = format!("{} {}", family.trim(), first.trim());
    let name = name.trim();

    if name.is_empty() {
        "walk-in customer".to_string()
    } else {
        name.to_string()
    }
}

/// `HH:MM` from `HH:MM[:SS]`; empty for a missing time
#[must_use]
pub fn format_time(time: Option<&str>) -> String {
    let Some(time) = time.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let mut parts = time.split(':');
    match (parts.next(), parts.next()) {
        (Some(hour), Some(minute)) => format!("{hour}:{minute}"),
        _ => time.to_string(),
    }
}

/// `DD/MM/YYYY` from `YYYY-MM-DD`; malformed dates are shown as received
#[must_use]
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return String::new();
    };

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |d| d.format("%d/%m/%Y").to_string())
}

/// `HH:MM:SS DD/MM/YYYY` in the venue zone from an RFC 3339 timestamp
#[must_use]
pub fn format_timestamp(timestamp: Option<&str>, zone: TimeZoneSetting) -> String {
    let Some(timestamp) = timestamp.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };

    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.to_string(),
        |instant| {
            zone.local(instant.with_timezone(&Utc))
                .format("%H:%M:%S %d/%m/%Y")
                .to_string()
        },
    )
}

/// Kick-off line: `HH:MM - DD/MM/YYYY`
#[must_use]
pub fn kickoff(ticket: &Ticket) -> String {
    format!(
        "{} - {}",
        format_time(ticket.match_time.as_deref()),
        format_date(ticket.match_date.as_deref())
    )
}
