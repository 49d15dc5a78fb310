//! # Polling Supervisor
//!
//! Owns the lifecycle of the long-lived update-fetch loop. Transient
//! transport errors are logged and the loop keeps going; a fatal error
//! (the update stream was claimed by another consumer) stops the current
//! loop, waits out the restart policy's delay, and starts a fresh one.
//! The supervisor is the only component that ever mutates the polling
//! state; everything else can only read it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::bot::Router;
use crate::transport::{Transport, UpdateSource};

/// Lifecycle of the update-fetch loop. Exactly one instance exists for
/// the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingState {
    Stopped,
    Running,
    Restarting,
}

/// Delay policy applied between stopping a failed fetch loop and the next
/// start attempt. Kept behind a trait so capped exponential backoff can
/// replace the default without touching the supervisor's state machine.
pub trait RestartPolicy: Send + Sync {
    /// Delay before restart attempt number `attempt` (1-based)
    fn delay(&self, attempt: u32) -> Duration;
}

/// The default policy: the same fixed delay for every attempt, unbounded
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl RestartPolicy for FixedDelay {
    fn delay(&self, _attempt: u32) -> Duration {
        self.delay
    }
}

/// Read-only view of the supervisor state
#[derive(Clone)]
pub struct PollingStateHandle(Arc<Mutex<PollingState>>);

impl PollingStateHandle {
    pub fn get(&self) -> PollingState {
        *self.0.lock()
    }
}

/// Keeps the update-fetch loop alive across transport failures without
/// ever failing the process.
pub struct PollingSupervisor<S: UpdateSource, T: Transport> {
    source: S,
    router: Arc<Router<T>>,
    policy: Box<dyn RestartPolicy>,
    interval: Duration,
    state: Arc<Mutex<PollingState>>,
    restarts: u32,
}

impl<S: UpdateSource, T: Transport> PollingSupervisor<S, T> {
    pub fn new(
        source: S,
        router: Arc<Router<T>>,
        policy: Box<dyn RestartPolicy>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            router,
            policy,
            interval,
            state: Arc::new(Mutex::new(PollingState::Stopped)),
            restarts: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PollingState {
        *self.state.lock()
    }

    /// Cloneable read-only handle onto the lifecycle state
    pub fn state_handle(&self) -> PollingStateHandle {
        PollingStateHandle(Arc::clone(&self.state))
    }

    /// How many times the fetch loop has been restarted after a fatal
    /// transport error
    pub fn restart_count(&self) -> u32 {
        self.restarts
    }

    fn set_state(&self, state: PollingState) {
        *self.state.lock() = state;
    }

    /// Run the fetch loop until the shutdown signal fires.
    ///
    /// The loop is stopped synchronously before this returns, so no
    /// update can be fetched after shutdown and never dispatched.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            self.set_state(PollingState::Running);
            info!(interval_ms = self.interval.as_millis() as u64, "Polling started");

            // Fetch loop: leaves only on shutdown or a fatal transport error
            loop {
                let outcome = tokio::select! {
                    _ = shutdown.changed() => None,
                    result = self.source.poll_once() => Some(result),
                };

                match outcome {
                    None => {
                        self.set_state(PollingState::Stopped);
                        info!("Polling stopped");
                        return;
                    }
                    Some(Ok(updates)) => {
                        for update in updates {
                            self.router.dispatch(update).await;
                        }
                    }
                    Some(Err(e)) if e.is_fatal() => {
                        error!(error = %e, "Fatal transport error, stopping fetch loop");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Transient transport error");
                    }
                }

                // Inter-request pause
                if self.wait_or_shutdown(self.interval, &mut shutdown).await {
                    self.set_state(PollingState::Stopped);
                    info!("Polling stopped");
                    return;
                }
            }

            // The failed loop is fully stopped before a restart is
            // scheduled, so two fetch loops never race on the same
            // transport session.
            self.set_state(PollingState::Stopped);
            self.restarts += 1;
            let delay = self.policy.delay(self.restarts);
            warn!(
                attempt = self.restarts,
                delay_ms = delay.as_millis() as u64,
                "Restarting polling after delay"
            );

            self.set_state(PollingState::Restarting);
            if self.wait_or_shutdown(delay, &mut shutdown).await {
                self.set_state(PollingState::Stopped);
                info!("Polling stopped");
                return;
            }
        }
    }

    /// Sleep for `duration` unless the shutdown signal fires first.
    /// Returns true when shutdown was requested.
    async fn wait_or_shutdown(
        &self,
        duration: Duration,
        shutdown: &mut watch::Receiver<bool>,
    ) -> bool {
        tokio::select! {
            _ = shutdown.changed() => true,
            _ = tokio::time::sleep(duration) => false,
        }
    }
}
