// src/cli/trigger.rs
// Delivers edit events and sweeps to the dispatcher

use std::time::Duration;

use super::{CliContext, CliResult};
use crate::sheets::sync::{Dispatcher, EditEvent, TriggerEvent};

fn dispatcher(ctx: &CliContext) -> Dispatcher {
    Dispatcher::new(ctx.settings.sync.clone(), ctx.store.clone())
}

/// Write the edited value into the main workbook, then hand the edit to the
/// dispatcher the way a host would after a manual change.
pub fn run_edit(ctx: &CliContext, sheet: String, row: usize, column: usize, value: String) -> CliResult {
    let d = dispatcher(ctx);
    let main = ctx.store.open_by_id(&d.config().main_workbook)?;

    let edited = main
        .sheet(&sheet)?
        .ok_or_else(|| format!("sheet '{}' not found in workbook '{}'", sheet, main.id()))?;
    edited.set_cell(row, column, &value)?;
    edited.flush()?;

    let report = d.dispatch(
        &main,
        &TriggerEvent::Edit(EditEvent {
            sheet_name: sheet,
            row,
            column,
            new_value: value,
        }),
    );
    println!("{}", report);
    Ok(())
}

pub fn run_sweep(ctx: &CliContext) -> CliResult {
    let d = dispatcher(ctx);
    let main = ctx.store.open_by_id(&d.config().main_workbook)?;
    let report = d.dispatch(&main, &TriggerEvent::Sweep);
    println!("{}", report);
    Ok(())
}

/// Sweep every `interval_secs` seconds until Ctrl-C. Each sweep runs to
/// completion before the next tick is awaited.
pub fn run_watch(ctx: &CliContext, interval_secs: u64) -> CliResult {
    if interval_secs == 0 {
        return Err("watch interval must be at least one second".into());
    }
    let d = dispatcher(ctx);
    let main_id = d.config().main_workbook.clone();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!("Watching '{}' every {}s", main_id, interval_secs);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // The main workbook is reopened per sweep so that
                    // structural changes between sweeps are picked up.
                    match ctx.store.open_by_id(&main_id) {
                        Ok(main) => {
                            let report = d.dispatch(&main, &TriggerEvent::Sweep);
                            println!("{}", report);
                        }
                        Err(e) => tracing::error!("Cannot open main workbook '{}': {}", main_id, e),
                    }
                }
                result = &mut shutdown => {
                    if let Err(e) = result {
                        tracing::error!("Ctrl-C handler failed: {}", e);
                    }
                    tracing::info!("Stopping watch");
                    break;
                }
            }
        }
    });
    Ok(())
}
