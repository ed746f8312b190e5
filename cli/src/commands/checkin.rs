//! Ticket check-in commands
//!
//! Both commands drive a `CheckinReducer` store and print each settled
//! verdict. `scan` treats every stdin line as a camera decode, so the scan
//! debounce applies exactly as it does at a gate.

use crate::context::{CliError, Context};
use crate::render;
use crate::signal::TerminalBell;
use checkin_core::environment::SystemClock;
use checkin_flow::{CheckinAction, CheckinEnvironment, CheckinFlowState, CheckinReducer, FlowStep};
use checkin_runtime::Store;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

type CheckinStore = Store<CheckinFlowState, CheckinAction, CheckinEnvironment, CheckinReducer>;

fn checkin_store(ctx: &Context) -> Result<CheckinStore, CliError> {
    let env = CheckinEnvironment::new(
        Arc::new(ctx.api()?),
        Arc::new(TerminalBell),
        Arc::new(SystemClock),
        ctx.flow,
    );
    Ok(Store::new(CheckinFlowState::default(), CheckinReducer::new(), env))
}

/// Send an action and return the state once its effects have settled
async fn settle(
    ctx: &Context,
    store: &CheckinStore,
    action: CheckinAction,
) -> Result<CheckinFlowState, CliError> {
    let view = store.subscribe_state();
    let mut handle = store.send(action).await?;
    handle.wait_with_timeout(ctx.settle_timeout()).await?;

    let state = view.borrow().clone();
    tracing::debug!(step = ?state.step, "Flow settled");
    Ok(state)
}

fn print_result(ctx: &Context, state: &CheckinFlowState) {
    if let Some(result) = &state.result {
        print!("{}", render::result(result, ctx.flow.time_zone));
    }
}

/// Look one ticket up, optionally admitting it
pub async fn check(ctx: &Context, code: String, confirm: bool) -> Result<(), CliError> {
    ctx.require_sign_in().await?;
    let store = checkin_store(ctx)?;

    let state = settle(ctx, &store, CheckinAction::SubmitCode { code }).await?;
    if state.step == FlowStep::Idle {
        println!("Nothing to check");
        return Ok(());
    }
    print_result(ctx, &state);

    if confirm {
        if state.can_confirm() {
            let state = settle(ctx, &store, CheckinAction::Confirm).await?;
            print_result(ctx, &state);
        } else {
            println!("Not admitted");
        }
    }
    Ok(())
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, question: &str) -> Result<bool, CliError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Check scanned codes until stdin closes
pub async fn scan(ctx: &Context) -> Result<(), CliError> {
    ctx.require_sign_in().await?;
    let store = checkin_store(ctx)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!("Waiting for scans");

    while let Some(line) = lines.next_line().await? {
        let state = settle(ctx, &store, CheckinAction::ScanCode { code: line }).await?;
        if state.step == FlowStep::Idle {
            tracing::debug!("Scan ignored");
            continue;
        }
        print_result(ctx, &state);

        if state.can_confirm() && prompt(&mut lines, "Admit? [y/N] ").await? {
            let state = settle(ctx, &store, CheckinAction::Confirm).await?;
            print_result(ctx, &state);
        }

        settle(ctx, &store, CheckinAction::Reset).await?;
    }

    Ok(())
}
