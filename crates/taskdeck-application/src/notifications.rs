//! Notification bus.
//!
//! A single-slot transient message queue: at most one toast is visible at
//! a time, a new request unconditionally preempts the visible one, and a
//! toast auto-dismisses after a fixed duration. A generation counter keeps
//! a preempted toast's dismiss timer from hiding its replacement.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tokio::sync::watch;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// The visual flavor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient, auto-dismissing user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

struct Inner {
    slot: watch::Sender<Option<Toast>>,
    generation: AtomicU64,
    duration: Duration,
}

/// The single-slot toast owner.
///
/// Cloning shares the slot; every clone shows into and observes the same
/// toast. `show` must be called from within a tokio runtime (it spawns the
/// dismiss timer).
#[derive(Clone)]
pub struct NotificationBus {
    inner: Arc<Inner>,
}

impl NotificationBus {
    /// Creates a bus with the standard toast duration.
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    /// Creates a bus with a custom duration (tests).
    pub fn with_duration(duration: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot,
                generation: AtomicU64::new(0),
                duration,
            }),
        }
    }

    /// Shows a toast, preempting any visible one.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.slot.send_replace(Some(Toast {
            message: message.into(),
            kind,
        }));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.duration).await;
            // Only dismiss if no newer toast took the slot meanwhile.
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.slot.send_replace(None);
            }
        });
    }

    /// Hides the visible toast immediately.
    pub fn hide(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.slot.send_replace(None);
    }

    /// The currently visible toast, if any.
    pub fn current(&self) -> Option<Toast> {
        self.inner.slot.borrow().clone()
    }

    /// Subscribes to slot changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.inner.slot.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_auto_dismisses_after_duration() {
        let bus = NotificationBus::new();
        bus.show("Task created successfully", ToastKind::Success);
        assert!(bus.current().is_some());

        tokio::time::sleep(TOAST_DURATION + Duration::from_millis(10)).await;
        assert!(bus.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_toast_preempts_first() {
        let bus = NotificationBus::new();
        bus.show("first", ToastKind::Info);
        bus.show("second", ToastKind::Error);

        let visible = bus.current().unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.kind, ToastKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_dismiss_timer_spares_replacement() {
        let bus = NotificationBus::new();
        bus.show("first", ToastKind::Info);

        // Replace just before the first toast's timer fires.
        tokio::time::sleep(TOAST_DURATION - Duration::from_millis(10)).await;
        bus.show("second", ToastKind::Info);

        // First timer fires now; the replacement must survive it.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(bus.current().unwrap().message, "second");

        // And the replacement still dismisses on its own schedule.
        tokio::time::sleep(TOAST_DURATION).await;
        assert!(bus.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_clears_immediately() {
        let bus = NotificationBus::new();
        bus.show("visible", ToastKind::Warning);
        bus.hide();
        assert!(bus.current().is_none());
    }
}
