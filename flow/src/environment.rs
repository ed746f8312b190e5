//! Environment for the check-in flow and history reducers
//!
//! Everything the reducers reach for outside their state is injected here:
//! the ticket backend, the audible signal, the clock and the venue time zone.

use checkin_client::{ApiClient, ApiError, CheckinLogPage, ConfirmCheckinResponse, Ticket};
use checkin_core::environment::Clock;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use std::env;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by [`TicketService`] calls
pub type ServiceFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// Remote ticket operations the flows depend on
///
/// Production uses [`ApiClient`]; tests use `mocks::MockTicketService`.
pub trait TicketService: Send + Sync {
    /// Look a ticket up by code
    fn lookup(&self, ticket_code: String) -> ServiceFuture<Ticket>;

    /// Admit a ticket
    fn confirm(&self, ticket_code: String) -> ServiceFuture<ConfirmCheckinResponse>;

    /// Fetch one page of check-in history
    fn checkin_logs(&self, limit: u32, offset: u64) -> ServiceFuture<CheckinLogPage>;
}

impl TicketService for ApiClient {
    fn lookup(&self, ticket_code: String) -> ServiceFuture<Ticket> {
        let client = self.clone();
        Box::pin(async move { client.lookup_ticket(&ticket_code).await })
    }

    fn confirm(&self, ticket_code: String) -> ServiceFuture<ConfirmCheckinResponse> {
        let client = self.clone();
        Box::pin(async move { client.confirm_checkin(&ticket_code).await })
    }

    fn checkin_logs(&self, limit: u32, offset: u64) -> ServiceFuture<CheckinLogPage> {
        let client = self.clone();
        Box::pin(async move { client.checkin_logs(limit, offset).await })
    }
}

/// Audible feedback played to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Ticket admitted
    Success,
    /// Ticket refused or request failed
    Error,
}

/// Plays [`Signal`]s
///
/// Playback is fire-and-forget; implementations must not block.
pub trait SignalPlayer: Send + Sync {
    /// Play a signal
    fn play(&self, signal: Signal);
}

/// Time zone used to decide what "today" means at the venue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneSetting {
    /// The host's local zone
    #[default]
    System,
    /// A fixed IANA zone
    Named(chrono_tz::Tz),
}

impl TimeZoneSetting {
    /// Parse an IANA zone name; `None` for an unknown name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        name.trim().parse::<chrono_tz::Tz>().ok().map(Self::Named)
    }

    /// Wall-clock time at the venue
    #[must_use]
    pub fn local(self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::System => instant.with_timezone(&chrono::Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(&tz).naive_local(),
        }
    }
}

/// Shortest scan debounce the flow accepts, in milliseconds
pub const MIN_SCAN_DEBOUNCE_MS: u32 = 1500;

/// Scan debounce from a raw millisecond setting
///
/// Missing, malformed or negative values give the default; anything shorter
/// than [`MIN_SCAN_DEBOUNCE_MS`] is raised to it.
#[must_use]
pub fn scan_debounce_from(raw: Option<&str>) -> TimeDelta {
    let ms = raw
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map_or(MIN_SCAN_DEBOUNCE_MS, |ms| {
            if ms < MIN_SCAN_DEBOUNCE_MS {
                tracing::warn!(ms, min = MIN_SCAN_DEBOUNCE_MS, "Scan debounce too short, clamping");
            }
            ms.max(MIN_SCAN_DEBOUNCE_MS)
        });
    TimeDelta::milliseconds(i64::from(ms))
}

/// Flow settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    /// Venue time zone
    pub time_zone: TimeZoneSetting,
    /// Minimum gap between accepted scans
    pub scan_debounce: TimeDelta,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            time_zone: TimeZoneSetting::System,
            scan_debounce: TimeDelta::milliseconds(i64::from(MIN_SCAN_DEBOUNCE_MS)),
        }
    }
}

impl FlowConfig {
    /// Load flow settings from environment variables
    ///
    /// Environment variables:
    /// - `CHECKIN_TIMEZONE`: IANA zone name (default: host zone)
    /// - `CHECKIN_SCAN_DEBOUNCE_MS`: Scan debounce (default and minimum: 1500)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let time_zone = match env::var("CHECKIN_TIMEZONE") {
            Ok(name) if !name.trim().is_empty() => TimeZoneSetting::parse(&name).unwrap_or_else(|| {
                tracing::warn!(%name, "Unknown time zone, using the system zone");
                defaults.time_zone
            }),
            _ => defaults.time_zone,
        };

        let scan_debounce =
            scan_debounce_from(env::var("CHECKIN_SCAN_DEBOUNCE_MS").ok().as_deref());

        Self {
            time_zone,
            scan_debounce,
        }
    }
}

/// Environment for the check-in flow
#[derive(Clone)]
pub struct CheckinEnvironment {
    /// Ticket backend
    pub tickets: Arc<dyn TicketService>,
    /// Audible feedback
    pub signals: Arc<dyn SignalPlayer>,
    /// Clock for scan debounce and date windows
    pub clock: Arc<dyn Clock>,
    /// Flow settings
    pub config: FlowConfig,
}

impl CheckinEnvironment {
    /// Creates a new `CheckinEnvironment`.
    #[must_use]
    pub fn new(
        tickets: Arc<dyn TicketService>,
        signals: Arc<dyn SignalPlayer>,
        clock: Arc<dyn Clock>,
        config: FlowConfig,
    ) -> Self {
        Self {
            tickets,
            signals,
            clock,
            config,
        }
    }

    /// Wall-clock time at the venue
    #[must_use]
    pub fn local_now(&self) -> NaiveDateTime {
        self.config.time_zone.local(self.clock.now())
    }
}

/// Environment for the history pager
#[derive(Clone)]
pub struct HistoryEnvironment {
    /// Ticket backend
    pub tickets: Arc<dyn TicketService>,
}

impl HistoryEnvironment {
    /// Creates a new `HistoryEnvironment`.
    #[must_use]
    pub fn new(tickets: Arc<dyn TicketService>) -> Self {
        Self { tickets }
    }
}
