//! Plain-text rendering of flow state for the terminal

use checkin_client::{CheckinLogEntry, SessionSnapshot, Ticket};
use checkin_flow::display::{
    checkin_status_label, customer_name, format_timestamp, kickoff, match_status_label,
    ticket_type_label,
};
use checkin_flow::{CheckResult, TimeZoneSetting};
use std::fmt::Write;

fn field(out: &mut String, label: &str, value: &str) {
    if !value.trim().is_empty() {
        let _ = writeln!(out, "  {label:<9} {value}");
    }
}

/// Ticket details block
pub fn ticket(ticket: &Ticket, zone: TimeZoneSetting) -> String {
    let mut out = String::new();
    field(&mut out, "code", ticket.ticket_code.as_deref().unwrap_or_default());
    field(&mut out, "match", ticket.match_name.as_deref().unwrap_or_default());
    field(&mut out, "kickoff", kickoff(ticket).trim_matches([' ', '-']));
    field(&mut out, "sale", match_status_label(ticket.match_status));
    field(&mut out, "holder", &customer_name(ticket));
    field(&mut out, "type", ticket_type_label(ticket.ticket_type));
    field(&mut out, "gate", ticket.gate_name.as_deref().unwrap_or_default());
    field(&mut out, "stand", ticket.stand_name.as_deref().unwrap_or_default());
    field(&mut out, "status", checkin_status_label(ticket.checkin_status));
    field(
        &mut out,
        "admitted",
        &format_timestamp(ticket.checkin_at.as_deref(), zone),
    );
    out
}

/// Verdict or confirmation outcome
pub fn result(result: &CheckResult, zone: TimeZoneSetting) -> String {
    let mark = if result.success { "OK" } else { "REFUSED" };
    let mut out = format!("[{mark}] {}\n", result.message);
    if let Some(t) = &result.ticket {
        out.push_str(&ticket(t, zone));
    }
    out
}

/// One history line: when, code, holder, match
pub fn history_entry(entry: &CheckinLogEntry, zone: TimeZoneSetting) -> String {
    let ticket = &entry.data;
    format!(
        "{:<19}  {:<12}  {:<24}  {}",
        format_timestamp(ticket.checkin_at.as_deref(), zone),
        ticket.ticket_code.as_deref().unwrap_or("-"),
        customer_name(ticket),
        ticket.match_name.as_deref().unwrap_or_default(),
    )
}

/// Stored club and sign-in state
pub fn status(snapshot: &SessionSnapshot, base_url: &str) -> String {
    let mut out = String::new();
    let tenant = &snapshot.tenant;
    field(&mut out, "club", tenant.club_name.as_deref().unwrap_or("(none)"));
    field(&mut out, "backend", base_url);
    field(
        &mut out,
        "resolved",
        if tenant.endpoint.is_some() { "yes" } else { "no" },
    );
    field(
        &mut out,
        "signed in",
        if snapshot.is_authenticated() { "yes" } else { "no" },
    );
    out
}
