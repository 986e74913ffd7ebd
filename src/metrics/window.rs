use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One normalized utilization reading in `[0.0, 1.0]`.
pub type Sample = f64;

pub const DEFAULT_CAPACITY: usize = 20;

/// Convert a `[0, 100]` percentage reading into a [`Sample`].
///
/// Returns `None` for NaN or infinite input so the caller can treat the
/// reading as failed instead of storing garbage.
pub fn normalize_percent(percent: f64) -> Option<Sample> {
    if !percent.is_finite() {
        return None;
    }
    Some((percent / 100.0).clamp(0.0, 1.0))
}

/// Bounded FIFO of the most recent samples for one metric.
///
/// Every operation takes the window's lock exactly once, so a reader never
/// observes an append that has evicted but not yet pushed.
#[derive(Debug)]
pub struct SlidingWindow {
    samples: Mutex<VecDeque<Sample>>,
    capacity: usize,
}

impl SlidingWindow {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn append(&self, value: Sample) {
        let mut samples = self.lock();
        while samples.len() >= self.capacity {
            samples.pop_front();
        }
        samples.push_back(value);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Current contents, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.lock().iter().copied().collect()
    }

    /// Largest sample in the window, `0.0` when empty.
    pub fn max(&self) -> Sample {
        max_of(self.lock().iter().copied())
    }

    pub fn latest(&self) -> Option<Sample> {
        self.lock().back().copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Critical sections never leave the deque half-updated, so a poisoned
    // lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Sample>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

pub fn max_of(samples: impl IntoIterator<Item = Sample>) -> Sample {
    samples.into_iter().fold(0.0, f64::max)
}
