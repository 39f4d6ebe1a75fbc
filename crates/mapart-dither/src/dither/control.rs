//! Progress reporting and cooperative cancellation for long runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot of how far a pass has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Rows fully processed so far.
    pub rows_done: usize,
    /// Rows in the canvas.
    pub total_rows: usize,
    /// Canvas width, to express progress in pixels.
    pub width: usize,
}

impl ProgressEvent {
    /// Pixels fully processed so far.
    #[inline]
    pub fn pixels_done(&self) -> usize {
        self.rows_done * self.width
    }

    /// Pixels in the canvas.
    #[inline]
    pub fn total_pixels(&self) -> usize {
        self.total_rows * self.width
    }

    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.rows_done as f32 / self.total_rows as f32
        }
    }

    /// True once every row has been processed.
    pub fn is_complete(&self) -> bool {
        self.rows_done >= self.total_rows
    }
}

/// Receives one-way progress notifications from the engine.
///
/// Called synchronously on the dithering thread; implementations should
/// return quickly and must not expect to influence the run. Any
/// `Fn(ProgressEvent)` closure is a sink.
pub trait ProgressSink {
    /// Called after every configured interval of rows and after the last row.
    fn on_progress(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent),
{
    fn on_progress(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Shared flag to stop a run between rows.
///
/// Clones share the same flag, so one clone can be handed to the worker
/// running the engine and another kept by whoever may cancel it.
///
/// # Example
///
/// ```
/// use mapart_dither::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let handle = flag.clone();
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag that is not yet raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every run watching this flag to stop at its next row boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Lower the flag so it can be reused for another run.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
