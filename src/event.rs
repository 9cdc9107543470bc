//! Slice-completed notifications.

/// Identifies one subscription, handed back by [`SliceEvents::subscribe`]
/// so the owner can detach its handler later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// An explicit observer list: fire-and-forget callbacks invoked
/// synchronously, in subscription order, after a slice completes.
///
/// There is no payload beyond "a slice occurred". Subscriptions are
/// in-memory only and never persisted.
#[derive(Default)]
pub struct SliceEvents {
    next_id: u64,
    handlers: Vec<(SubscriberId, Box<dyn FnMut()>)>,
}

impl SliceEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handler; the returned id detaches it again.
    pub fn subscribe(&mut self, handler: impl FnMut() + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Detach a handler. Returns `false` when the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Invoke every handler once.
    pub fn notify(&mut self) {
        for (_, handler) in &mut self.handlers {
            handler();
        }
    }
}

impl std::fmt::Debug for SliceEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliceEvents")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
