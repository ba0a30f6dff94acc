//! Cosmetic progress indicator.
//!
//! The percentage is not tied to transfer progress: it climbs in fixed steps
//! on a timer while the provider call is pending and jumps to 100 once audio
//! is ready to play.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

/// Timing of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Time between steps.
    pub interval: Duration,
    /// Percentage added per step.
    pub step: u8,
    /// Highest value reached by stepping alone.
    pub ceiling: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300),
            step: 5,
            ceiling: 90,
        }
    }
}

/// A running progress timer.
///
/// Publishes into a shared `watch` channel. Dropping the ticker cancels the
/// timer; [`ProgressTicker::finish`] cancels it and publishes 100. No step is
/// published once the ticker is stopped, even if the timer task is mid-poll
/// on another worker.
#[derive(Debug)]
pub struct ProgressTicker {
    progress: Arc<watch::Sender<u8>>,
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ProgressTicker {
    /// Starts stepping from 0. The first step lands one interval from now.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(progress: Arc<watch::Sender<u8>>, config: ProgressConfig) -> Self {
        progress.send_replace(0);

        let stopped = Arc::new(AtomicBool::new(false));
        let tx = progress.clone();
        let flag = stopped.clone();
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + config.interval, config.interval);
            let mut current: u8 = 0;
            while current < config.ceiling {
                ticks.tick().await;
                current = current.saturating_add(config.step).min(config.ceiling);
                // The flag is read under the channel's write lock, so a step
                // either lands before the final value or not at all.
                let published = tx.send_if_modified(|value| {
                    if flag.load(Ordering::SeqCst) {
                        return false;
                    }
                    *value = current;
                    true
                });
                if !published {
                    return;
                }
            }
        });

        Self {
            progress,
            stopped,
            task,
        }
    }

    /// Stops stepping and publishes 100.
    pub fn finish(self) {
        self.stop();
        self.progress.send_replace(100);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
