//! Viewport resize notifications.
//!
//! The host publishes viewport widths through a [`ResizeNotifier`]. Grids
//! subscribe while they are active and get a [`ResizeSubscription`] back;
//! dropping the subscription unregisters it, so a deactivated grid never
//! receives another notification.

use std::sync::{Arc, Weak};

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use slotmap::SlotMap;
use tracing::{debug, trace};

slotmap::new_key_type! {
    pub struct SubscriptionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportResized {
    /// New viewport width in pixels.
    pub width: i64,
}

type Subscribers = Mutex<SlotMap<SubscriptionId, Sender<ViewportResized>>>;

/// Something that can hand out resize subscriptions.
pub trait ResizeSource {
    fn subscribe(&self) -> ResizeSubscription;
}

#[derive(Clone, Default)]
pub struct ResizeNotifier {
    subscribers: Arc<Subscribers>,
}

impl ResizeNotifier {
    pub fn new() -> Self { Self::default() }

    /// Delivers `width` to every live subscription.
    pub fn notify(&self, width: i64) {
        let mut subscribers = self.subscribers.lock();
        trace!(width, subscribers = subscribers.len(), "viewport resized");
        subscribers.retain(|id, tx| {
            let delivered = tx.send(ViewportResized { width }).is_ok();
            if !delivered {
                debug!(?id, "dropping disconnected resize subscriber");
            }
            delivered
        });
    }

    pub fn subscriber_count(&self) -> usize { self.subscribers.lock().len() }
}

impl ResizeSource for ResizeNotifier {
    fn subscribe(&self) -> ResizeSubscription {
        let (tx, rx) = crossbeam_channel::unbounded();
        let id = self.subscribers.lock().insert(tx);
        debug!(?id, "resize subscription acquired");
        ResizeSubscription {
            id,
            rx,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }
}

/// A registered interest in resize notifications, released on drop.
pub struct ResizeSubscription {
    id: SubscriptionId,
    rx: Receiver<ViewportResized>,
    subscribers: Weak<Subscribers>,
}

impl ResizeSubscription {
    pub fn id(&self) -> SubscriptionId { self.id }

    /// Drains pending notifications and returns the most recent one.
    ///
    /// Intermediate widths are irrelevant once a newer one is known, so only
    /// the last survives.
    pub fn latest(&self) -> Option<ViewportResized> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(event) => latest = Some(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return latest,
            }
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().remove(self.id);
            debug!(id = ?self.id, "resize subscription released");
        }
    }
}
