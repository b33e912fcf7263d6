use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled by the tile-parallel driver between tiles.
pub trait CancellationChecker: Sync {
    /// Returns true if the render should be abandoned
    fn is_cancelled(&self) -> bool;
}

/// Never cancels - for callers without a deadline
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancellationChecker for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cloneable handle around a shared flag.
///
/// Hand one clone to the render call and keep another to call [`cancel`](Self::cancel)
/// from elsewhere, e.g. a UI thread or a timer.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing flag.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl CancellationChecker for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl CancellationChecker for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}
