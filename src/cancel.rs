//! Per-call cancellation signals.
//!
//! The transport decides when a call is cancelled; the core only polls.
//! Long-running loops (the search scan) call `is_cancelled()` once per
//! iteration and stop quietly when it turns true.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

/// Something that can tell whether the caller has given up.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotCancelled;

impl Cancellation for NotCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cancelled once a point in time has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline: never cancelled.
    pub fn none() -> Self {
        Self { at: None }
    }

    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    pub fn instant(&self) -> Option<Instant> {
        self.at
    }
}

impl Cancellation for Deadline {
    fn is_cancelled(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

/// An outbound channel whose receiver is gone means nobody is listening.
impl<T> Cancellation for mpsc::Sender<T> {
    fn is_cancelled(&self) -> bool {
        self.is_closed()
    }
}

impl<C: Cancellation + ?Sized> Cancellation for Arc<C> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<C: Cancellation + ?Sized> Cancellation for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Either signal cancels.
impl<A: Cancellation, B: Cancellation> Cancellation for (A, B) {
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled() || self.1.is_cancelled()
    }
}
