//! Cooperative shutdown signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Cooperative cancellation flag with an interruptible sleep.
///
/// The loop checks `triggered()` at the top of each iteration and uses
/// `sleep()` between iterations so a shutdown request cuts the wait
/// short instead of being noticed one poll interval late.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the signal on Ctrl-C. Spawns a background listener.
    pub fn listen_for_ctrl_c(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                this.trigger();
            }
        });
    }

    /// Request shutdown.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Check whether shutdown has been requested.
    pub fn triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sleep for `duration`, returning false if interrupted by a
    /// shutdown request.
    pub async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.notify.notified() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_interrupts_sleep() {
        let signal = ShutdownSignal::new();
        let sleeper = signal.clone();
        let handle = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(60)).await });

        tokio::task::yield_now().await;
        signal.trigger();

        assert!(!handle.await.unwrap());
        assert!(signal.triggered());
    }

    #[tokio::test]
    async fn test_undisturbed_sleep_completes() {
        let signal = ShutdownSignal::new();
        assert!(signal.sleep(Duration::from_millis(1)).await);
        assert!(!signal.triggered());
    }
}
