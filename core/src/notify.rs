//! User-facing failure notifications ("toasts").
//!
//! The client never talks to a UI directly. It hands a `Toast` to the
//! `Notifier` in its configuration; applications plug in their own.

use std::sync::{Mutex, PoisonError};

/// An error notification for one failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Receives toasts raised by failed requests.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: &Toast);
}

/// Default notifier: emits each toast as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: &Toast) {
        tracing::error!(target: "toast", "{}", toast.message);
    }
}

/// Notifier that keeps every toast in memory, for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|toast| toast.message).collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: &Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast.clone());
    }
}
