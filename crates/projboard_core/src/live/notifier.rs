//! In-process table-change emitter.
//!
//! The store signals this hub after every committed write; each live query
//! holds a receiver. Signals carry no payload: subscribers re-read the
//! table instead of interpreting deltas.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

pub(crate) struct ChangeNotifier {
    subscribers: Mutex<Vec<Sender<()>>>,
}

impl ChangeNotifier {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a subscriber and returns its signal channel ends.
    ///
    /// The returned sender is a second handle to the same channel; a
    /// subscription uses it to wake its own worker on cancellation.
    pub(crate) fn subscribe(&self) -> (Sender<()>, Receiver<()>) {
        let (tx, rx) = channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx.clone());
        (tx, rx)
    }

    /// Signals every live subscriber; disconnected ones are pruned.
    pub(crate) fn notify_all(&self) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::ChangeNotifier;
    use std::sync::mpsc::TryRecvError;

    #[test]
    fn notify_reaches_every_subscriber() {
        let notifier = ChangeNotifier::new();
        let (_tx_a, rx_a) = notifier.subscribe();
        let (_tx_b, rx_b) = notifier.subscribe();

        notifier.notify_all();

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
        assert_eq!(rx_a.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let notifier = ChangeNotifier::new();
        let (tx, rx) = notifier.subscribe();
        drop(rx);
        drop(tx);

        // First notify observes the dead channel and prunes it.
        notifier.notify_all();
        notifier.notify_all();
    }
}
