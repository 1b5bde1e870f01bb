//! A named background thread running one cycle at a time until stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::clock::Clock;
use crate::error::Result;

struct Worker {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Holds at most one running worker.
#[derive(Default)]
pub struct WorkerSlot {
    worker: Mutex<Option<Worker>>,
}

impl WorkerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_some()
    }

    /// Spawn `cycle` on a thread named `name`, sleeping on `clock` for
    /// whatever each cycle returns. Returns `false` without spawning if a
    /// worker is already running.
    pub fn start<F>(&self, name: &str, clock: Arc<dyn Clock>, mut cycle: F) -> Result<bool>
    where
        F: FnMut() -> Duration + Send + 'static,
    {
        let mut worker = self.lock();
        if worker.is_some() {
            return Ok(false);
        }

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let handle = thread::Builder::new().name(name.into()).spawn(move || {
            while flag.load(Ordering::Acquire) {
                let pause = cycle();
                clock.sleep(pause);
            }
        })?;

        *worker = Some(Worker { running, handle });
        Ok(true)
    }

    /// Signal the worker and join it. Returns `false` if none was running.
    pub fn stop(&self) -> bool {
        let Some(worker) = self.lock().take() else {
            return false;
        };

        worker.running.store(false, Ordering::Release);
        if worker.handle.join().is_err() {
            log::warn!("background worker panicked");
        }
        true
    }
}

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn one_worker_at_a_time() -> Result<()> {
        let slot = WorkerSlot::new();
        let cycles = Arc::new(AtomicUsize::new(0));
        let clock = Arc::new(ManualClock::new());

        let counter = cycles.clone();
        assert!(slot.start("test-worker", clock.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Duration::from_millis(1)
        })?);
        assert!(!slot.start("test-worker", clock.clone(), || Duration::ZERO)?);
        assert!(slot.is_running());

        assert!(slot.stop());
        let after_stop = cycles.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(10));
        assert_eq!(cycles.load(Ordering::SeqCst), after_stop);
        assert!(!slot.stop());
        assert!(!slot.is_running());
        Ok(())
    }
}
