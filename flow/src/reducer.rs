//! Reducer for the ticket check-in flow
//!
//! Input arriving while the flow is not idle is dropped, never queued.
//! Completions are only applied in the step that started them, so a late
//! answer can never overwrite a newer verdict.

use crate::eligibility::{self, messages};
use crate::environment::{CheckinEnvironment, Signal};
use crate::scan;
use crate::types::{CheckResult, CheckinAction, CheckinFlowState, FlowStep};
use checkin_core::{effect::Effect, reducer::Reducer};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// Reducer for the check-in flow
#[derive(Debug, Default, Clone)]
pub struct CheckinReducer;

impl CheckinReducer {
    /// Creates a new `CheckinReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Start a lookup for `code`
    fn begin_lookup(
        state: &mut CheckinFlowState,
        code: String,
        env: &CheckinEnvironment,
    ) -> SmallVec<[Effect<CheckinAction>; 4]> {
        tracing::debug!(ticket_code = %code, "Looking up ticket");
        metrics::counter!("checkin.lookups.started").increment(1);

        state.step = FlowStep::Checking;
        state.result = None;

        let tickets = Arc::clone(&env.tickets);
        smallvec![Effect::future(async move {
            let result = tickets.lookup(code).await;
            Some(CheckinAction::LookupCompleted { result })
        })]
    }

    fn dropped(reason: &'static str) -> SmallVec<[Effect<CheckinAction>; 4]> {
        tracing::debug!(reason, "Input dropped");
        metrics::counter!("checkin.inputs.dropped", "reason" => reason).increment(1);
        smallvec![Effect::None]
    }
}

/// Play a signal without blocking the reducer
fn play(env: &CheckinEnvironment, signal: Signal) -> Effect<CheckinAction> {
    let player = Arc::clone(&env.signals);
    Effect::future(async move {
        player.play(signal);
        None
    })
}

impl Reducer for CheckinReducer {
    type State = CheckinFlowState;
    type Action = CheckinAction;
    type Environment = CheckinEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per flow transition
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ================================================================
            // Operator input
            // ================================================================
            CheckinAction::SubmitCode { code } => {
                if state.step != FlowStep::Idle {
                    return Self::dropped("busy");
                }

                let code = code.trim();
                if code.is_empty() {
                    return Self::dropped("blank");
                }

                Self::begin_lookup(state, code.to_string(), env)
            },

            CheckinAction::ScanCode { code } => {
                if state.step != FlowStep::Idle {
                    return Self::dropped("busy");
                }

                let code = code.trim();
                if code.is_empty() {
                    return Self::dropped("blank");
                }

                let now = env.clock.now();
                if !scan::clears_debounce(state.last_scan_at, now, env.config.scan_debounce) {
                    return Self::dropped("debounce");
                }
                state.last_scan_at = Some(now);

                Self::begin_lookup(state, code.to_string(), env)
            },

            CheckinAction::Confirm => {
                if !state.can_confirm() {
                    return Self::dropped("not confirmable");
                }

                let Some(code) = state
                    .result
                    .as_ref()
                    .and_then(CheckResult::ticket_code)
                    .map(str::to_string)
                else {
                    return Self::dropped("no ticket code");
                };

                tracing::debug!(ticket_code = %code, "Confirming check-in");
                state.step = FlowStep::Confirming;

                let tickets = Arc::clone(&env.tickets);
                smallvec![Effect::future(async move {
                    let result = tickets.confirm(code).await;
                    Some(CheckinAction::ConfirmCompleted { result })
                })]
            },

            CheckinAction::Reset => {
                if state.step.is_busy() {
                    return Self::dropped("busy");
                }

                state.step = FlowStep::Idle;
                state.result = None;
                smallvec![Effect::None]
            },

            // ================================================================
            // Remote completions
            // ================================================================
            CheckinAction::LookupCompleted { result } => {
                if state.step != FlowStep::Checking {
                    return Self::dropped("stale lookup");
                }

                let verdict = match result {
                    Ok(ticket) => eligibility::evaluate(ticket, env.local_now()),
                    Err(error) => {
                        tracing::warn!(%error, "Ticket lookup failed");
                        CheckResult::rejected(
                            error.message().unwrap_or(messages::LOOKUP_FAILED),
                            None,
                        )
                    },
                };

                tracing::info!(
                    success = verdict.success,
                    message = %verdict.message,
                    "Ticket checked"
                );
                metrics::counter!(
                    "checkin.lookups.completed",
                    "eligible" => if verdict.success { "true" } else { "false" }
                )
                .increment(1);

                let rejected = !verdict.success;
                state.step = FlowStep::CheckResult;
                state.result = Some(verdict);

                if rejected {
                    smallvec![play(env, Signal::Error)]
                } else {
                    smallvec![Effect::None]
                }
            },

            CheckinAction::ConfirmCompleted { result } => {
                if state.step != FlowStep::Confirming {
                    return Self::dropped("stale confirmation");
                }

                let (outcome, signal) = match result {
                    Ok(response) => (
                        CheckResult {
                            success: true,
                            message: response
                                .message
                                .filter(|m| !m.trim().is_empty())
                                .unwrap_or_else(|| messages::CONFIRM_SUCCEEDED.to_string()),
                            ticket: None,
                        },
                        Signal::Success,
                    ),
                    Err(error) => {
                        tracing::warn!(%error, "Check-in confirmation failed");
                        (
                            CheckResult::rejected(
                                error.message().unwrap_or(messages::CONFIRM_FAILED),
                                None,
                            ),
                            Signal::Error,
                        )
                    },
                };

                tracing::info!(
                    success = outcome.success,
                    message = %outcome.message,
                    "Check-in finished"
                );
                metrics::counter!(
                    "checkin.confirmations.completed",
                    "success" => if outcome.success { "true" } else { "false" }
                )
                .increment(1);

                state.step = FlowStep::FinalResult;
                state.result = Some(outcome);
                smallvec![play(env, signal)]
            },
        }
    }
}
