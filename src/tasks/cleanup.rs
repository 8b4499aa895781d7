//! TTL Sweeper Module
//!
//! Background thread that periodically purges expired cache entries. Spawned
//! only when a default TTL is configured; stopped by dropping its handle.

use std::hash::Hash;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::CacheCore;

// == Sweep Interval ==
/// Tick period for a given default TTL: half the TTL, clamped to
/// [1 second, 1 minute].
pub(crate) fn cleanup_interval(default_ttl: Duration) -> Duration {
    (default_ttl / 2).clamp(Duration::from_secs(1), Duration::from_secs(60))
}

// == Cleanup Handle ==
/// Owner handle for the sweeper thread.
///
/// Dropping the stop channel wakes the thread out of its sleep; `stop` then
/// joins it, so shutdown never leaves a detached sweeper behind.
#[derive(Debug)]
pub(crate) struct CleanupHandle {
    stop: mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

impl CleanupHandle {
    /// Stops the sweeper and waits for it to exit.
    pub(crate) fn stop(self) {
        let CleanupHandle { stop, thread } = self;
        drop(stop);
        let _ = thread.join();
    }
}

// == Spawn ==
/// Spawns the sweeper for `core`, ticking at the interval derived from
/// `default_ttl`.
///
/// Each tick takes the coordinator lock exclusively and purges expired
/// entries from the store.
pub(crate) fn spawn_cleanup_task<K, V>(
    core: Arc<CacheCore<K, V>>,
    default_ttl: Duration,
) -> CleanupHandle
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let interval = cleanup_interval(default_ttl);
    let (stop, stop_rx) = mpsc::channel::<()>();

    let thread = thread::Builder::new()
        .name("cachette-sweeper".into())
        .spawn(move || {
            debug!(?interval, "ttl sweeper started");

            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let removed = core.sweep();
                        if removed > 0 {
                            debug!(removed, "purged expired entries");
                        } else {
                            trace!("sweep found nothing expired");
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            debug!("ttl sweeper stopped");
        })
        .expect("failed to spawn ttl sweeper thread");

    CleanupHandle { stop, thread }
}
