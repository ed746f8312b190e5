//! Wire types for the ticketing backend and the endpoint resolver
//!
//! Everything here is remote-sourced and read-only. Fields the backend may
//! omit are `Option`, and enum values this client does not know about
//! deserialize to `Unknown` instead of failing the whole response.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket identifier; the backend sends either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketId {
    /// Numeric identifier
    Number(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Sale state of the match a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not yet published
    Draft,
    /// Tickets on sale
    OpenSale,
    /// Sales closed, match not played yet
    CloseSale,
    /// Match played
    Completed,
    /// Match called off
    Cancelled,
    /// Any value this client does not know
    #[serde(other)]
    Unknown,
}

impl MatchStatus {
    /// Whether tickets for a match in this state may be checked in
    #[must_use]
    pub const fn admits_checkin(self) -> bool {
        matches!(self, Self::OpenSale | Self::CloseSale)
    }
}

/// Whether a ticket has already been used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinStatus {
    /// Not admitted yet
    Pending,
    /// Already admitted
    CheckedIn,
    /// Any value this client does not know
    #[serde(other)]
    Unknown,
}

/// Ticket tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    /// Regular admission
    Standard,
    /// VIP admission
    Vip,
    /// Any value this client does not know
    #[serde(other)]
    Unknown,
}

/// A ticket as returned by the lookup endpoint
///
/// `matchDate` is `YYYY-MM-DD` and `matchTime` is `HH:MM[:SS]`, both in the
/// venue's local time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    /// Backend identifier; absent when the code matched nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TicketId>,
    /// Code printed on the ticket
    pub ticket_code: Option<String>,
    /// Display name of the match
    pub match_name: Option<String>,
    /// Local match date
    pub match_date: Option<String>,
    /// Local kick-off time
    pub match_time: Option<String>,
    /// Sale state of the match
    pub match_status: Option<MatchStatus>,
    /// Admission state of the ticket
    pub checkin_status: Option<CheckinStatus>,
    /// Ticket tier
    pub ticket_type: Option<TicketType>,
    /// Entry gate
    pub gate_name: Option<String>,
    /// Stand
    pub stand_name: Option<String>,
    /// Holder's family name
    pub customer_family_name: Option<String>,
    /// Holder's first name
    pub customer_first_name: Option<String>,
    /// When the ticket was admitted (history entries only)
    pub checkin_at: Option<String>,
    /// Server message accompanying the lookup
    pub message: Option<String>,
}

impl Ticket {
    /// Whether the ticket has already been admitted
    #[must_use]
    pub fn is_checked_in(&self) -> bool {
        self.checkin_status == Some(CheckinStatus::CheckedIn)
    }
}

/// Body of `POST /admin/tickets/checkin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCheckinRequest {
    /// Code of the ticket to admit
    pub ticket_code: String,
}

/// Response of `POST /admin/tickets/checkin`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfirmCheckinResponse {
    /// Server confirmation message
    pub message: Option<String>,
}

/// One entry of the check-in history
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckinLogEntry {
    /// Log entry identifier, unique across pages
    pub id: TicketId,
    /// The admitted ticket
    #[serde(default)]
    pub data: Ticket,
}

/// Paging metadata of a history page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    /// Total number of entries across all pages
    pub total: u64,
}

/// Response of `GET /admin/tickets/checkin/logs`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckinLogPage {
    /// Entries on this page
    pub items: Vec<CheckinLogEntry>,
    /// Paging metadata
    pub meta: PageMeta,
}

/// Body of `POST /auth/app/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Staff email
    pub email: String,
    /// Staff password
    pub password: String,
}

/// Response of `POST /auth/app/login`
///
/// `data` is kept as an opaque user record; `accessToken` and `endpoint`
/// are read out of it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    /// User record
    pub data: Option<serde_json::Value>,
}

impl LoginResponse {
    /// Access token, if the login succeeded
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.field("accessToken")
    }

    /// Tenant endpoint bound to the account, if any
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.field("endpoint")
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .get(name)?
            .as_str()
            .filter(|value| !value.is_empty())
    }
}

/// Body of `POST /auth/app/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Family name
    pub family_name: String,
    /// First name
    pub first_name: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
    /// Phone number
    pub phone_number: String,
}

/// Response of `DELETE /users/app/me` (also used for registration)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccountResponse {
    /// Server message
    pub message: Option<String>,
    /// Server status string
    pub status: Option<String>,
    /// Anything else the server returned
    pub data: Option<serde_json::Value>,
}

/// Body of the resolver's `POST /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveRequest {
    /// Club domain
    pub domain: String,
    /// Club passcode
    pub passcode: String,
}

/// Response of the resolver's `POST /`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveResponse {
    /// Tenant API base URL
    pub endpoint: Option<String>,
    /// Club display name
    pub club_name: Option<String>,
    /// Club logo URL
    pub logo: Option<String>,
    /// Refusal reason
    pub error: Option<String>,
    /// Refusal message
    pub message: Option<String>,
}

/// Successful domain resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Tenant API base URL
    pub endpoint: String,
    /// Club display name
    pub club_name: Option<String>,
    /// Club logo URL
    pub logo: Option<String>,
}

/// Body of the resolver's `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRegistration {
    /// Club display name
    pub club_name: String,
    /// Requested domain
    pub domain: String,
    /// Passcode staff will resolve the domain with
    pub passcode: String,
}

/// Body of the resolver's `DELETE /delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainDeletion {
    /// Domain to remove
    pub domain: String,
}

/// Response of the resolver's `/register` and `/delete`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverMessage {
    /// Server message
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn ticket_parses_full_lookup_body() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 42,
            "ticketCode": "KHC-0001",
            "matchName": "HAGL vs SLNA",
            "matchDate": "2025-01-01",
            "matchTime": "18:00:00",
            "matchStatus": "open_sale",
            "checkinStatus": "pending",
            "ticketType": "vip",
            "gateName": "A",
            "standName": "B",
            "customerFamilyName": "Nguyen",
            "customerFirstName": "An"
        }))
        .unwrap();

        assert_eq!(ticket.id, Some(TicketId::Number(42)));
        assert_eq!(ticket.match_status, Some(MatchStatus::OpenSale));
        assert_eq!(ticket.ticket_type, Some(TicketType::Vip));
        assert!(!ticket.is_checked_in());
    }

    #[test]
    fn unknown_enum_values_do_not_fail() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": "t-1",
            "matchStatus": "postponed",
            "checkinStatus": "refunded",
            "ticketType": "box"
        }))
        .unwrap();

        assert_eq!(ticket.id, Some(TicketId::Text("t-1".into())));
        assert_eq!(ticket.match_status, Some(MatchStatus::Unknown));
        assert_eq!(ticket.checkin_status, Some(CheckinStatus::Unknown));
        assert_eq!(ticket.ticket_type, Some(TicketType::Unknown));
    }

    #[test]
    fn bare_message_body_has_no_id() {
        let ticket: Ticket = serde_json::from_value(json!({ "message": "not found" })).unwrap();
        assert_eq!(ticket.id, None);
        assert_eq!(ticket.message.as_deref(), Some("not found"));
    }

    #[test]
    fn only_open_and_closed_sales_admit() {
        assert!(MatchStatus::OpenSale.admits_checkin());
        assert!(MatchStatus::CloseSale.admits_checkin());
        assert!(!MatchStatus::Draft.admits_checkin());
        assert!(!MatchStatus::Completed.admits_checkin());
        assert!(!MatchStatus::Cancelled.admits_checkin());
        assert!(!MatchStatus::Unknown.admits_checkin());
    }

    #[test]
    fn login_response_reads_token_and_endpoint() {
        let response: LoginResponse = serde_json::from_value(json!({
            "data": { "accessToken": "tok", "endpoint": "https://club.example", "email": "a@b.c" }
        }))
        .unwrap();
        assert_eq!(response.access_token(), Some("tok"));
        assert_eq!(response.endpoint(), Some("https://club.example"));

        let empty: LoginResponse = serde_json::from_value(json!({ "data": { "accessToken": "" } })).unwrap();
        assert_eq!(empty.access_token(), None);
    }

    #[test]
    fn domain_registration_uses_snake_case_fields() {
        let body = serde_json::to_value(DomainRegistration {
            club_name: "HAGL".into(),
            domain: "hagl".into(),
            passcode: "123456".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "club_name": "HAGL", "domain": "hagl", "passcode": "123456" }));
    }
}
