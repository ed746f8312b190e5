//! # Checkin Flow
//!
//! The ticket check-in state machine and the screens around it.
//!
//! ```text
//! SubmitCode / ScanCode ──► Checking ──LookupCompleted──► CheckResult
//!        ▲                                                 │      │
//!        └───────────────────── Reset ◄────────────────────┘   Confirm
//!        │                                                        ▼
//!        └──── Reset ◄── FinalResult ◄──ConfirmCompleted── Confirming
//! ```
//!
//! - [`reducer::CheckinReducer`]: the flow itself
//! - [`eligibility`]: rules turning a looked-up ticket into a verdict
//! - [`scan`]: camera debounce
//! - [`history::HistoryReducer`]: paged check-in log
//! - [`display`]: operator-facing labels
//! - [`mocks`]: scripted backend and signal recorder for tests
//!
//! Run the reducers in a `checkin_runtime::Store`; subscribe to the store's
//! state to render.

pub mod display;
pub mod eligibility;
pub mod environment;
pub mod history;
pub mod mocks;
pub mod reducer;
pub mod scan;
pub mod types;

pub use environment::{
    CheckinEnvironment, FlowConfig, HistoryEnvironment, Signal, SignalPlayer, TicketService,
    TimeZoneSetting,
};
pub use history::{HistoryAction, HistoryReducer, HistoryState, PAGE_LIMIT};
pub use reducer::CheckinReducer;
pub use types::{CheckResult, CheckinAction, CheckinFlowState, FlowStep};
