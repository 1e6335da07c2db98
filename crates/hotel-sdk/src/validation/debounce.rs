//! Trailing debounce with a submit bypass

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

/// Shared switch flipped once a submit has been attempted.
///
/// While set, the debouncer forwards every event immediately.
#[derive(Debug, Clone, Default)]
pub struct SubmitFlag(Arc<AtomicBool>);

impl SubmitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Spawn a task that coalesces bursts from `rx` into one trailing call of
/// `on_fire` with the latest event, once `quiet` has passed without a new
/// one. Each event restarts the window. A pending event is flushed when the
/// channel closes.
pub fn spawn_debounced<T, F>(
    mut rx: mpsc::UnboundedReceiver<T>,
    quiet: Duration,
    bypass: SubmitFlag,
    mut on_fire: F,
) -> JoinHandle<()>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(mut latest) = rx.recv().await {
            if !bypass.is_set() {
                let window = sleep(quiet);
                tokio::pin!(window);

                loop {
                    tokio::select! {
                        _ = &mut window => break,
                        next = rx.recv() => match next {
                            Some(event) => {
                                latest = event;
                                if bypass.is_set() {
                                    break;
                                }
                                window.as_mut().reset(Instant::now() + quiet);
                            }
                            None => break,
                        },
                    }
                }
            }

            on_fire(latest);
        }
    })
}
