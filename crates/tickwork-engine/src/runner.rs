//! The real-time tick loop.
//!
//! [`run`] paces [`run_tick`] on the clock's interval, feeds the demo's
//! clicks in before each tick, and stops at `max_ticks` or on Ctrl-C.

use tickwork_core::events::dispatch;
use tickwork_core::tick::{EngineState, TickSummary, run_tick};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::demo::Demo;
use crate::error::EngineError;

/// Ticks between progress lines at `info` level.
const PROGRESS_EVERY: u64 = 100;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured tick budget was reached.
    MaxTicks,
    /// Ctrl-C was received.
    Shutdown,
}

/// Result of a loop run.
#[derive(Debug)]
pub struct RunReport {
    /// Why the loop stopped.
    pub stop: StopReason,
    /// Ticks executed by this loop.
    pub total_ticks: u64,
    /// Runs released across all ticks.
    pub released: usize,
    /// The last tick summary, if any tick ran.
    pub final_summary: Option<TickSummary>,
}

/// Run the tick loop until `max_ticks` ticks have passed (0 runs until
/// Ctrl-C).
///
/// A demo click that fails to dispatch is logged and skipped.
///
/// # Errors
///
/// Returns [`EngineError::Tick`] when the clock overflows.
pub async fn run(
    state: &mut EngineState,
    demo: &Demo,
    max_ticks: u64,
) -> Result<RunReport, EngineError> {
    let mut interval = tokio::time::interval(state.clock.interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut total_ticks: u64 = 0;
    let mut released: usize = 0;
    let mut final_summary = None;

    info!(
        max_ticks,
        tick_interval = ?state.clock.interval(),
        "Tick loop starting"
    );

    let stop = loop {
        if max_ticks > 0 && total_ticks >= max_ticks {
            break StopReason::MaxTicks;
        }
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => break StopReason::Shutdown,
        }

        for event in demo.react(state) {
            if let Err(e) = dispatch(state, event) {
                warn!(error = %e, "demo click rejected");
            }
        }

        let summary = run_tick(state)?;
        total_ticks = total_ticks.saturating_add(1);
        released = released.saturating_add(summary.finished.len());
        debug!(
            tick = summary.tick,
            restored = summary.restored,
            advanced = summary.advanced,
            active = summary.active,
            finished = summary.finished.len(),
            "tick complete"
        );
        if summary.tick.checked_rem(PROGRESS_EVERY) == Some(0) {
            info!(
                tick = summary.tick,
                active = summary.active,
                released,
                "Tick loop progress"
            );
        }
        final_summary = Some(summary);
    };

    Ok(RunReport {
        stop,
        total_ticks,
        released,
        final_summary,
    })
}

/// Log the outcome of a loop run.
pub fn log_run_end(report: &RunReport) {
    info!(
        reason = ?report.stop,
        total_ticks = report.total_ticks,
        released = report.released,
        final_tick = report.final_summary.as_ref().map(|s| s.tick),
        "Tick loop ended"
    );
    if report.final_summary.is_none() {
        warn!("Tick loop ended with no ticks executed");
    }
}
