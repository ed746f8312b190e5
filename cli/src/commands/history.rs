//! Check-in history command

use crate::context::{CliError, Context};
use crate::render;
use checkin_flow::{HistoryAction, HistoryEnvironment, HistoryReducer, HistoryState};
use checkin_runtime::Store;
use std::sync::Arc;

/// Load up to `pages` pages of history and print them in server order
pub async fn show(ctx: &Context, pages: u32) -> Result<(), CliError> {
    ctx.require_sign_in().await?;

    let env = HistoryEnvironment::new(Arc::new(ctx.api()?));
    let store = Store::new(HistoryState::default(), HistoryReducer::new(), env);

    let mut action = HistoryAction::Refresh;
    for _ in 0..pages.max(1) {
        let mut handle = store.send(action).await?;
        handle.wait_with_timeout(ctx.settle_timeout()).await?;

        let (has_more, error) = store.state(|s| (s.has_more, s.error.clone())).await;
        if let Some(message) = error {
            return Err(CliError::Refused(message));
        }
        if !has_more {
            break;
        }
        action = HistoryAction::LoadMore;
    }

    let entries = store.state(|s| s.entries.clone()).await;
    if entries.is_empty() {
        println!("No check-ins yet");
    }
    for entry in &entries {
        println!("{}", render::history_entry(entry, ctx.flow.time_zone));
    }
    Ok(())
}
