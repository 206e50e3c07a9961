//! Change notification for state containers.
//!
//! Every store owns a [`Subscribers`] list. [`subscribe`](Subscribers::subscribe)
//! returns a [`StateReceiver`]; dropping the receiver unsubscribes it on the
//! next notification.

use std::sync::mpsc;

/// Receiver for state change events.
///
/// Wraps a [`std::sync::mpsc::Receiver`]. Poll with [`try_recv()`](Self::try_recv)
/// or collect everything queued with [`drain()`](Self::drain).
pub struct StateReceiver<E> {
    rx: mpsc::Receiver<E>,
}

impl<E> StateReceiver<E> {
    /// Wait for the next event (blocking).
    ///
    /// Returns `None` when the store is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<E> {
        self.rx.recv().ok()
    }

    /// Try to receive an event without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<E> {
        self.rx.try_recv().ok()
    }

    /// All events queued so far, without blocking.
    pub fn drain(&self) -> Vec<E> {
        self.rx.try_iter().collect()
    }
}

/// Senders of one store's subscribers.
pub(crate) struct Subscribers<E> {
    senders: Vec<mpsc::Sender<E>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            senders: Vec::new(),
        }
    }
}

impl<E: Clone> Subscribers<E> {
    pub(crate) fn subscribe(&mut self) -> StateReceiver<E> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        StateReceiver { rx }
    }

    /// Send `event` to every live subscriber, pruning dropped ones.
    pub(crate) fn notify(&mut self, event: &E) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_every_subscriber_receives() {
        let mut subscribers = Subscribers::default();
        let first = subscribers.subscribe();
        let second = subscribers.subscribe();

        subscribers.notify(&1);
        subscribers.notify(&2);

        assert_eq!(first.drain(), vec![1, 2]);
        assert_eq!(second.drain(), vec![1, 2]);
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let mut subscribers = Subscribers::default();
        let kept = subscribers.subscribe();
        drop(subscribers.subscribe());

        subscribers.notify(&"event");

        assert_eq!(subscribers.len(), 1);
        assert_eq!(kept.try_recv(), Some("event"));
        assert_eq!(kept.try_recv(), None);
    }

    #[test]
    fn test_recv_after_store_dropped() {
        let mut subscribers = Subscribers::<u8>::default();
        let receiver = subscribers.subscribe();
        drop(subscribers);
        assert_eq!(receiver.recv(), None);
    }
}
