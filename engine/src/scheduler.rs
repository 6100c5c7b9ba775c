use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default spacing between auto-mode re-checks.
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Runs a recurring re-check on the tokio runtime until cancelled.
///
/// At most one task is armed at a time. The task stops when the scheduler is
/// cancelled or dropped, or when the tick callback returns `false`.
pub struct RecheckScheduler {
    interval: Duration,
    cancel_token: Mutex<Option<CancellationToken>>,
}

impl RecheckScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            cancel_token: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn token(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.cancel_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_armed(&self) -> bool {
        self.token()
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Start ticking. Returns `false` when no tokio runtime is available.
    ///
    /// Arming an already armed scheduler keeps the running task.
    pub fn arm<F>(&self, mut tick: F) -> bool
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let mut slot = self.token();
        if slot.as_ref().is_some_and(|token| !token.is_cancelled()) {
            return true;
        }

        let Ok(handle) = Handle::try_current() else {
            log::warn!("No async runtime available, theme re-check not scheduled");
            return false;
        };

        let token = CancellationToken::new();
        let task_token = token.clone();
        let interval = self.interval;

        handle.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if !tick() {
                            break;
                        }
                    }
                }
            }
            log::debug!("Theme re-check task stopped");
        });

        log::debug!("Theme re-check armed every {interval:?}");
        *slot = Some(token);
        true
    }

    pub fn cancel(&self) {
        if let Some(token) = self.token().take() {
            token.cancel();
            log::debug!("Theme re-check cancelled");
        }
    }
}

impl Default for RecheckScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_RECHECK_INTERVAL)
    }
}

impl Drop for RecheckScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_tick(counter: &Arc<AtomicUsize>) -> impl FnMut() -> bool + Send + 'static {
        let counter = counter.clone();
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(RecheckScheduler::default().interval(), DEFAULT_RECHECK_INTERVAL);
        assert_eq!(
            RecheckScheduler::new(Duration::ZERO).interval(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_arm_without_runtime_is_noop() {
        let scheduler = RecheckScheduler::default();
        assert!(!scheduler.arm(|| true));
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_interval() {
        let scheduler = RecheckScheduler::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));
        assert!(scheduler.arm(counting_tick(&counter)));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_keeps_single_task() {
        let scheduler = RecheckScheduler::new(Duration::from_secs(10));
        let counter = Arc::new(AtomicUsize::new(0));
        assert!(scheduler.arm(counting_tick(&counter)));
        assert!(scheduler.arm(counting_tick(&counter)));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticking() {
        let scheduler = RecheckScheduler::new(Duration::from_secs(10));
        let counter = Arc::new(AtomicUsize::new(0));
        scheduler.arm(counting_tick(&counter));

        tokio::time::sleep(Duration::from_secs(11)).await;
        scheduler.cancel();
        assert!(!scheduler.is_armed());

        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_returning_false_ends_task() {
        let scheduler = RecheckScheduler::new(Duration::from_secs(10));
        let counter = Arc::new(AtomicUsize::new(0));
        let task_counter = counter.clone();
        scheduler.arm(move || {
            task_counter.fetch_add(1, Ordering::SeqCst);
            false
        });

        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
