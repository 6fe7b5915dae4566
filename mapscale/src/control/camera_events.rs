use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::control::{CameraEvent, CameraEventHandler};

type HandlerId = u64;

#[derive(Default)]
struct Registry {
    next_id: HandlerId,
    handlers: Vec<(HandlerId, Arc<dyn CameraEventHandler>)>,
    closed: bool,
    emitting: bool,
    pending: VecDeque<CameraEvent>,
}

impl Registry {
    fn contains(&self, id: HandlerId) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }
}

/// Publish-subscribe channel of [`CameraEvent`]s.
///
/// Cloning the channel gives another handle to the same set of subscribers. Events are delivered
/// synchronously, in the order of emission, to handlers in the order of subscription. The
/// internal lock is released while handlers run, so a handler can subscribe, cancel
/// subscriptions (including its own) or emit new events.
///
/// An event emitted while another one is being delivered is queued and delivered after every
/// handler has received the current one, so all subscribers see events in the same order.
#[derive(Clone, Default)]
pub struct CameraEvents {
    registry: Arc<Mutex<Registry>>,
}

impl CameraEvents {
    /// Creates a new open channel without subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler. The handler receives all events emitted after this call until the
    /// returned [`Subscription`] is cancelled or dropped, or the channel is closed.
    ///
    /// Subscribing to a closed channel returns an inactive subscription and drops the handler.
    pub fn subscribe(&self, handler: impl CameraEventHandler + 'static) -> Subscription {
        let mut registry = self.registry.lock();
        if registry.closed {
            log::debug!("Camera event channel is closed, subscription is not created");
            return Subscription::inactive();
        }

        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));

        log::debug!("Camera event handler {id} subscribed");

        Subscription {
            id: Some(id),
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Delivers the event to all current subscribers. Does nothing if the channel is closed.
    pub fn emit(&self, event: CameraEvent) {
        {
            let mut registry = self.registry.lock();
            if registry.closed {
                return;
            }

            registry.pending.push_back(event);
            if registry.emitting {
                return;
            }
            registry.emitting = true;
        }

        let mut guard = DispatchGuard {
            registry: &self.registry,
            finished: false,
        };

        loop {
            let next = {
                let mut registry = self.registry.lock();
                match registry.pending.pop_front() {
                    Some(event) => Some((event, registry.handlers.clone())),
                    None => {
                        registry.emitting = false;
                        None
                    }
                }
            };

            let Some((event, handlers)) = next else {
                guard.finished = true;
                return;
            };

            for (id, handler) in handlers {
                // The subscription might have been cancelled by one of the previous handlers.
                if !self.registry.lock().contains(id) {
                    continue;
                }

                handler.handle(&event);
            }
        }
    }

    /// Closes the channel. All subscriptions become inactive, their handlers are dropped and
    /// streams created with [`CameraEvents::stream`] end. Closing a closed channel does nothing.
    pub fn close(&self) {
        let handlers = {
            let mut registry = self.registry.lock();
            registry.closed = true;
            registry.pending.clear();
            std::mem::take(&mut registry.handlers)
        };

        if !handlers.is_empty() {
            log::debug!(
                "Camera event channel closed, {} handlers dropped",
                handlers.len()
            );
        }
    }

    /// Returns true if the channel was closed.
    pub fn is_closed(&self) -> bool {
        self.registry.lock().closed
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().handlers.len()
    }
}

/// Unblocks the channel if a handler panics in the middle of a dispatch loop.
struct DispatchGuard<'a> {
    registry: &'a Mutex<Registry>,
    finished: bool,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let mut registry = self.registry.lock();
            registry.emitting = false;
            registry.pending.clear();
        }
    }
}

/// Handle of a [`CameraEvents`] subscription. Dropping the handle cancels the subscription.
#[must_use = "the subscription is cancelled when the handle is dropped"]
pub struct Subscription {
    id: Option<HandlerId>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    fn inactive() -> Self {
        Self {
            id: None,
            registry: Weak::new(),
        }
    }

    /// Stops the delivery of events to the handler and drops the handler. Cancelling a
    /// subscription that is already cancelled, or whose channel is closed, does nothing.
    pub fn cancel(&self) {
        let (Some(id), Some(registry)) = (self.id, self.registry.upgrade()) else {
            return;
        };

        let removed = {
            let mut registry = registry.lock();
            registry
                .handlers
                .iter()
                .position(|(handler_id, _)| *handler_id == id)
                .map(|index| registry.handlers.remove(index))
        };

        if removed.is_some() {
            log::debug!("Camera event handler {id} unsubscribed");
        }
    }

    /// Returns true if the handler still receives events.
    pub fn is_active(&self) -> bool {
        let (Some(id), Some(registry)) = (self.id, self.registry.upgrade()) else {
            return false;
        };

        let is_active = registry.lock().contains(id);
        is_active
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
