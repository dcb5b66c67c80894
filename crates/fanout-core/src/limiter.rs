//! Concurrency limiter shared by every unit of work in a run.
//!
//! Units reserve a permit before running their operation and give it back
//! when the permit is dropped, so at most `max_tasks` operation bodies are in
//! flight at once.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::config::ConfigError;

/// Counting limiter over a tokio semaphore, with in-flight and peak counters
/// for reporting.
#[derive(Debug)]
pub struct TaskLimiter {
    max_tasks: usize,
    semaphore: Semaphore,
    in_use: AtomicUsize,
    peak: AtomicUsize,
}

impl TaskLimiter {
    /// Create a limiter allowing `max_tasks` concurrent permits.
    /// Zero, or more than the semaphore can represent, is a configuration error.
    pub fn new(max_tasks: usize) -> Result<Self, ConfigError> {
        if max_tasks == 0 {
            return Err(ConfigError::InvalidMaxTasks(max_tasks));
        }
        if max_tasks > Semaphore::MAX_PERMITS {
            return Err(ConfigError::TooManyTasks {
                requested: max_tasks,
                max: Semaphore::MAX_PERMITS,
            });
        }
        Ok(Self {
            max_tasks,
            semaphore: Semaphore::new(max_tasks),
            in_use: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    pub fn max_tasks(&self) -> usize {
        self.max_tasks
    }

    /// Number of permits currently held.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Acquire)
    }

    /// Permits that could be granted right now.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Highest number of permits held at the same time since creation.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    /// Wait until a permit is free and take it.
    pub async fn acquire(&self) -> TaskPermit<'_> {
        let permit = self
            .semaphore
            .acquire()
            .await
            .expect("limiter semaphore is never closed");
        self.track(permit)
    }

    /// Take a permit if one is free, without waiting.
    pub fn try_acquire(&self) -> Option<TaskPermit<'_>> {
        self.semaphore.try_acquire().ok().map(|p| self.track(p))
    }

    fn track<'a>(&'a self, permit: SemaphorePermit<'a>) -> TaskPermit<'a> {
        let now = self.in_use.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(now, Ordering::AcqRel);
        TaskPermit {
            limiter: self,
            _permit: permit,
        }
    }
}

/// Held while an operation runs. Dropping it (on success, error or unwind)
/// releases the slot.
#[derive(Debug)]
pub struct TaskPermit<'a> {
    limiter: &'a TaskLimiter,
    _permit: SemaphorePermit<'a>,
}

impl Drop for TaskPermit<'_> {
    fn drop(&mut self) {
        // Runs before the semaphore permit field is dropped, so `in_use`
        // never overshoots `max_tasks`.
        self.limiter.in_use.fetch_sub(1, Ordering::AcqRel);
    }
}
