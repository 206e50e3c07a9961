//! Transient notification queue.
//!
//! Toasts are shown in insertion order and removed either explicitly with
//! [`ToastQueue::remove`] or by [`ToastQueue::expire`] once their display
//! duration has passed. The owner's event loop calls `expire` when
//! [`ToastQueue::next_deadline`] is reached.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::event::{StateReceiver, Subscribers};

/// Display duration used by [`ToastQueue::add`].
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Identifier of a toast, unique within its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

/// Change notifications sent to queue subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Added(Toast),
    Removed(ToastId),
}

struct Entry {
    toast: Toast,
    deadline: Instant,
}

/// Ordered queue of visible toasts.
pub struct ToastQueue {
    entries: Vec<Entry>,
    next_id: u64,
    default_duration: Duration,
    clock: Box<dyn Clock>,
    subscribers: Subscribers<ToastEvent>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    /// Create an empty queue on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty queue on the given clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            default_duration: DEFAULT_TOAST_DURATION,
            clock: Box::new(clock),
            subscribers: Subscribers::default(),
        }
    }

    /// Set the duration used by [`add`](Self::add).
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Show an info toast for the default duration.
    pub fn add(&mut self, message: impl Into<String>) -> ToastId {
        self.add_with(message, ToastKind::Info, self.default_duration)
    }

    /// Show a toast for `duration`.
    pub fn add_with(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let toast = Toast {
            id,
            message: message.into(),
            kind,
        };
        self.entries.push(Entry {
            toast: toast.clone(),
            deadline: self.clock.now() + duration,
        });
        self.subscribers.notify(&ToastEvent::Added(toast));
        id
    }

    /// Remove the toast with `id`. Returns `None` if it is no longer shown.
    pub fn remove(&mut self, id: ToastId) -> Option<Toast> {
        let index = self.entries.iter().position(|entry| entry.toast.id == id)?;
        let entry = self.entries.remove(index);
        self.subscribers.notify(&ToastEvent::Removed(id));
        Some(entry.toast)
    }

    /// Remove every toast whose duration has passed, in display order.
    pub fn expire(&mut self) -> Vec<ToastId> {
        let now = self.clock.now();
        let mut expired = Vec::new();

        self.entries.retain(|entry| {
            if entry.deadline <= now {
                expired.push(entry.toast.id);
                false
            } else {
                true
            }
        });

        for id in &expired {
            self.subscribers.notify(&ToastEvent::Removed(*id));
        }
        expired
    }

    /// The earliest pending expiry, if any toast is shown.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Visible toasts in display order.
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|entry| &entry.toast)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn subscribe(&mut self) -> StateReceiver<ToastEvent> {
        self.subscribers.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::ManualClock;

    fn queue() -> (ToastQueue, ManualClock) {
        let clock = ManualClock::new();
        (ToastQueue::with_clock(clock.clone()), clock)
    }

    fn messages(queue: &ToastQueue) -> Vec<&str> {
        queue.toasts().map(|t| t.message.as_str()).collect()
    }

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let (mut queue, _clock) = queue();
        assert_eq!(queue.add("a"), ToastId(0));
        assert_eq!(queue.add("b"), ToastId(1));
        assert_eq!(queue.add_with("c", ToastKind::Error, Duration::from_secs(1)), ToastId(2));
    }

    #[test]
    fn test_add_defaults_to_info() {
        let (mut queue, _clock) = queue();
        queue.add("Saved");
        assert_eq!(
            queue.toasts().collect::<Vec<_>>(),
            vec![&Toast {
                id: ToastId(0),
                message: "Saved".to_owned(),
                kind: ToastKind::Info,
            }]
        );
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let (mut queue, _clock) = queue();
        let first = queue.add("a");
        queue.remove(first);
        assert_eq!(queue.add("b"), ToastId(1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (mut queue, _clock) = queue();
        queue.add("a");
        assert_eq!(queue.remove(ToastId(42)), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let (mut queue, _clock) = queue();
        queue.add("a");
        let b = queue.add("b");
        queue.add("c");

        let removed = queue.remove(b).unwrap();

        assert_eq!(removed.message, "b");
        assert_eq!(messages(&queue), vec!["a", "c"]);
    }

    #[test]
    fn test_expire_waits_for_duration() {
        let (mut queue, clock) = queue();
        let id = queue.add("hello");

        clock.advance(Duration::from_millis(2999));
        assert_eq!(queue.expire(), Vec::<ToastId>::new());
        assert_eq!(queue.len(), 1);

        clock.advance(Duration::from_millis(1));
        assert_eq!(queue.expire(), vec![id]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expire_after_manual_remove_is_noop() {
        let (mut queue, clock) = queue();
        let id = queue.add("x");
        queue.remove(id);

        clock.advance(DEFAULT_TOAST_DURATION);
        assert!(queue.expire().is_empty());
    }

    #[test]
    fn test_expire_in_display_order() {
        let (mut queue, clock) = queue();
        let slow = queue.add_with("slow", ToastKind::Info, Duration::from_millis(500));
        let fast = queue.add_with("fast", ToastKind::Info, Duration::from_millis(100));
        let kept = queue.add_with("kept", ToastKind::Info, Duration::from_secs(10));

        assert_eq!(
            queue.next_deadline().map(|d| d - clock.now()),
            Some(Duration::from_millis(100))
        );

        clock.advance(Duration::from_millis(600));
        assert_eq!(queue.expire(), vec![slow, fast]);
        assert_eq!(queue.toasts().map(|t| t.id).collect::<Vec<_>>(), vec![kept]);
    }

    #[test]
    fn test_custom_default_duration() {
        let clock = ManualClock::new();
        let mut queue =
            ToastQueue::with_clock(clock.clone()).with_default_duration(Duration::from_millis(10));
        queue.add("quick");

        clock.advance(Duration::from_millis(10));
        assert_eq!(queue.expire().len(), 1);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let (mut queue, clock) = queue();
        let events = queue.subscribe();

        let first = queue.add_with("done", ToastKind::Success, Duration::from_millis(5));
        let second = queue.add("info");
        queue.remove(second);
        clock.advance(Duration::from_millis(5));
        queue.expire();

        assert_eq!(
            events.drain(),
            vec![
                ToastEvent::Added(Toast {
                    id: first,
                    message: "done".to_owned(),
                    kind: ToastKind::Success,
                }),
                ToastEvent::Added(Toast {
                    id: second,
                    message: "info".to_owned(),
                    kind: ToastKind::Info,
                }),
                ToastEvent::Removed(second),
                ToastEvent::Removed(first),
            ]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let toast = Toast {
            id: ToastId(3),
            message: "Pushed".to_owned(),
            kind: ToastKind::Success,
        };
        assert_eq!(
            serde_json::to_value(&toast).unwrap(),
            serde_json::json!({"id": 3, "message": "Pushed", "type": "success"})
        );
    }
}
