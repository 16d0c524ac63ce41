use std::time::Duration;

use tokio::task::JoinHandle;

pub const PROGRESS_TICK: Duration = Duration::from_millis(500);
pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_CEILING: u8 = 90;

pub fn next_progress(current: u8) -> u8 {
    current.saturating_add(PROGRESS_STEP).min(PROGRESS_CEILING)
}

/// Simulated upload progress. The transport reports no byte counts, so this just
/// climbs on a timer until the ceiling and waits there.
///
/// The timer task lives exactly as long as this value: dropping it aborts the task.
pub struct ProgressTicker {
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn start(tick: Duration, on_tick: impl Fn(u8) + Send + 'static) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // first tick fires immediately
            interval.tick().await;

            let mut progress = 0u8;
            while progress < PROGRESS_CEILING {
                interval.tick().await;
                progress = next_progress(progress);
                on_tick(progress);
            }
        });

        Self { handle: Some(handle) }
    }

    /// Aborts the timer and waits until the task is really gone, so no tick can
    /// land after this returns.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
