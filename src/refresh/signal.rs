//! Reload notification between the updater and the pipeline.
//!
//! A bounded channel of unit values used as a boolean flag: the updater posts
//! after each successful refresh, the pipeline drains everything before each
//! event. Neither side ever blocks.

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Creates a connected notifier/listener pair.
///
/// `capacity` is clamped to at least 1.
pub fn refresh_signal(capacity: usize) -> (RefreshNotifier, RefreshListener) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (RefreshNotifier { tx }, RefreshListener { rx })
}

/// Producer half, held by the updater.
#[derive(Debug, Clone)]
pub struct RefreshNotifier {
    tx: mpsc::Sender<()>,
}

impl RefreshNotifier {
    /// Posts a reload request without waiting.
    ///
    /// Returns false when the post was dropped because the channel is full
    /// (a reload is already pending) or the listener is gone.
    pub fn notify(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                log::debug!("Reload already pending, dropping notification");
                false
            }
            Err(TrySendError::Closed(())) => {
                log::debug!("Reload listener gone, dropping notification");
                false
            }
        }
    }
}

/// Consumer half, held by the pipeline.
#[derive(Debug)]
pub struct RefreshListener {
    rx: mpsc::Receiver<()>,
}

impl RefreshListener {
    /// Drains every pending notification.
    ///
    /// Returns true if at least one was pending, collapsing any number of
    /// posts into a single reload.
    pub fn take_pending(&mut self) -> bool {
        let mut pending = false;
        loop {
            match self.rx.try_recv() {
                Ok(()) => pending = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signal_is_not_pending() {
        let (_notifier, mut listener) = refresh_signal(2);
        assert!(!listener.take_pending());
    }

    #[test]
    fn test_single_post_is_consumed_once() {
        let (notifier, mut listener) = refresh_signal(2);
        assert!(notifier.notify());
        assert!(listener.take_pending());
        assert!(!listener.take_pending());
    }

    #[test]
    fn test_multiple_posts_collapse() {
        let (notifier, mut listener) = refresh_signal(2);
        assert!(notifier.notify());
        assert!(notifier.notify());
        assert!(listener.take_pending());
        assert!(!listener.take_pending(), "two posts must yield one reload");
    }

    #[test]
    fn test_full_signal_drops_without_blocking() {
        let (notifier, mut listener) = refresh_signal(2);
        assert!(notifier.notify());
        assert!(notifier.notify());
        assert!(!notifier.notify(), "third post should be dropped");
        assert!(listener.take_pending());
        // Capacity is available again after draining
        assert!(notifier.notify());
        assert!(listener.take_pending());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let (notifier, mut listener) = refresh_signal(0);
        assert!(notifier.notify());
        assert!(listener.take_pending());
    }

    #[test]
    fn test_notify_after_listener_dropped() {
        let (notifier, listener) = refresh_signal(2);
        drop(listener);
        assert!(!notifier.notify());
    }

    #[test]
    fn test_pending_survives_notifier_drop() {
        let (notifier, mut listener) = refresh_signal(2);
        assert!(notifier.notify());
        drop(notifier);
        assert!(listener.take_pending());
        assert!(!listener.take_pending());
    }

    #[test]
    fn test_notify_from_another_thread() {
        let (notifier, mut listener) = refresh_signal(2);
        let handle = std::thread::spawn(move || notifier.notify());
        assert!(handle.join().expect("thread panicked"));
        assert!(listener.take_pending());
    }
}
