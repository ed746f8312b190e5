//! Check-in history pager
//!
//! Offset pagination over the check-in log. The first page replaces the
//! list, later pages append entries not already shown. A refresh keeps the
//! current list on screen until the new first page has arrived.

use crate::environment::HistoryEnvironment;
use checkin_client::{ApiError, CheckinLogEntry, CheckinLogPage};
use checkin_core::{effect::Effect, reducer::Reducer};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// Entries requested per page
pub const PAGE_LIMIT: u32 = 10;

/// History screen state
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    /// Entries shown, oldest page first
    pub entries: Vec<CheckinLogEntry>,
    /// Offset of the last requested page
    pub offset: u64,
    /// Offset the next `LoadMore` requests; advances only when a page arrives
    pub next_offset: u64,
    /// Whether another page may exist
    pub has_more: bool,
    /// Whether a page request is in flight
    pub fetching: bool,
    /// Message of the last failed request
    pub error: Option<String>,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            offset: 0,
            next_offset: 0,
            has_more: true,
            fetching: false,
            error: None,
        }
    }
}

/// History actions
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    /// Reload from the first page
    Refresh,
    /// Request the next page
    LoadMore,
    /// A page request finished
    PageLoaded {
        /// Offset the page was requested at
        offset: u64,
        /// Page or failure
        result: Result<CheckinLogPage, ApiError>,
    },
}

/// Reducer for the history pager
#[derive(Debug, Default, Clone)]
pub struct HistoryReducer;

impl HistoryReducer {
    /// Creates a new `HistoryReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn fetch(env: &HistoryEnvironment, offset: u64) -> Effect<HistoryAction> {
        let tickets = Arc::clone(&env.tickets);
        Effect::future(async move {
            let result = tickets.checkin_logs(PAGE_LIMIT, offset).await;
            Some(HistoryAction::PageLoaded { offset, result })
        })
    }
}

/// Append entries whose id is not already present
fn append_unique(entries: &mut Vec<CheckinLogEntry>, page: Vec<CheckinLogEntry>) {
    for entry in page {
        if !entries.iter().any(|existing| existing.id == entry.id) {
            entries.push(entry);
        }
    }
}

impl Reducer for HistoryReducer {
    type State = HistoryState;
    type Action = HistoryAction;
    type Environment = HistoryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            HistoryAction::Refresh => {
                state.offset = 0;
                state.next_offset = 0;
                state.has_more = true;
                state.fetching = true;
                state.error = None;
                smallvec![Self::fetch(env, 0)]
            },

            HistoryAction::LoadMore => {
                if state.fetching || !state.has_more {
                    return smallvec![Effect::None];
                }

                state.offset = state.next_offset;
                state.fetching = true;
                state.error = None;
                smallvec![Self::fetch(env, state.offset)]
            },

            HistoryAction::PageLoaded { offset, result } => {
                if offset != state.offset {
                    tracing::debug!(offset, current = state.offset, "Discarding stale page");
                    return smallvec![Effect::None];
                }
                state.fetching = false;

                match result {
                    Ok(page) => {
                        let received = page.items.len() as u64;
                        if offset == 0 {
                            state.entries = page.items;
                        } else {
                            append_unique(&mut state.entries, page.items);
                        }
                        state.next_offset = offset + u64::from(PAGE_LIMIT);
                        state.has_more = offset + received < page.meta.total;
                        tracing::debug!(
                            offset,
                            received,
                            total = page.meta.total,
                            "History page loaded"
                        );
                    },
                    Err(error) => {
                        tracing::warn!(%error, offset, "History page failed");
                        state.error = Some(
                            error
                                .message()
                                .unwrap_or("could not load check-in history")
                                .to_string(),
                        );
                    },
                }
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockTicketService;
    use checkin_client::{PageMeta, Ticket, TicketId};
    use checkin_testing::{ReducerTest, assertions};

    fn env() -> HistoryEnvironment {
        HistoryEnvironment::new(Arc::new(MockTicketService::new()))
    }

    fn entry(id: i64) -> CheckinLogEntry {
        CheckinLogEntry {
            id: TicketId::Number(id),
            data: Ticket::default(),
        }
    }

    fn page(ids: std::ops::Range<i64>, total: u64) -> CheckinLogPage {
        CheckinLogPage {
            items: ids.map(entry).collect(),
            meta: PageMeta { total },
        }
    }

    fn loaded(offset: u64, ids: std::ops::Range<i64>, total: u64) -> HistoryAction {
        HistoryAction::PageLoaded {
            offset,
            result: Ok(page(ids, total)),
        }
    }

    #[test]
    fn first_page_replaces_entries() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState {
                entries: vec![entry(99)],
                ..HistoryState::default()
            })
            .when_action(HistoryAction::Refresh)
            .when_action(loaded(0, 0..10, 25))
            .then_state(|s| {
                assert_eq!(s.entries.len(), 10);
                assert!(s.has_more);
                assert!(!s.fetching);
            })
            .run();
    }

    #[test]
    fn refresh_keeps_entries_until_page_arrives() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState {
                entries: vec![entry(99)],
                offset: 20,
                ..HistoryState::default()
            })
            .when_action(HistoryAction::Refresh)
            .then_state(|s| {
                assert_eq!(s.entries, vec![entry(99)]);
                assert_eq!(s.offset, 0);
                assert!(s.fetching);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn later_pages_append_without_duplicates() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState::default())
            .when_action(loaded(0, 0..10, 15))
            .when_action(HistoryAction::LoadMore)
            // The backend shifted by two entries since the first page
            .when_action(loaded(10, 8..15, 15))
            .then_state(|s| {
                let ids: Vec<_> = s.entries.iter().map(|e| e.id.clone()).collect();
                assert_eq!(ids, (0..15).map(TicketId::Number).collect::<Vec<_>>());
                assert!(!s.has_more);
            })
            .run();
    }

    #[test]
    fn load_more_is_noop_while_fetching_or_exhausted() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState {
                fetching: true,
                ..HistoryState::default()
            })
            .when_action(HistoryAction::LoadMore)
            .then_state(|s| assert_eq!(s.offset, 0))
            .then_effects(assertions::assert_no_effects)
            .run();

        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState {
                has_more: false,
                ..HistoryState::default()
            })
            .when_action(HistoryAction::LoadMore)
            .then_state(|s| assert_eq!(s.offset, 0))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failed_page_is_requested_again() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState::default())
            .when_action(loaded(0, 0..10, 30))
            .when_action(HistoryAction::LoadMore)
            .when_action(HistoryAction::PageLoaded {
                offset: 10,
                result: Err(ApiError::Transport("reset".into())),
            })
            .then_state(|s| {
                assert_eq!(s.next_offset, 10);
                assert_eq!(s.entries.len(), 10);
                assert!(s.has_more);
                assert!(!s.fetching);
                assert_eq!(s.error.as_deref(), Some("could not load check-in history"));
            })
            .run();
    }

    #[test]
    fn load_more_after_failed_first_page_requests_it_again() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState::default())
            .when_action(HistoryAction::Refresh)
            .when_action(HistoryAction::PageLoaded {
                offset: 0,
                result: Err(ApiError::Transport("offline".into())),
            })
            .when_action(HistoryAction::LoadMore)
            .then_state(|s| {
                assert_eq!(s.offset, 0);
                assert_eq!(s.next_offset, 0);
                assert!(s.fetching);
                assert_eq!(s.error, None);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn stale_page_is_discarded() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(env())
            .given_state(HistoryState {
                fetching: true,
                ..HistoryState::default()
            })
            .when_action(loaded(30, 30..40, 50))
            .then_state(|s| {
                assert!(s.entries.is_empty());
                assert!(s.fetching);
            })
            .run();
    }
}
