//! Change notification between the host and the analysis layer.

use std::fmt;

use parking_lot::Mutex;

/// What changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A document was added, edited or removed
    Documents,
    /// A type index was replaced
    TypeIndex,
    /// The resolution conventions changed
    Config,
}

type Subscriber = Box<dyn Fn(ChangeKind) + Send + Sync>;

/// Fan-out signal raised whenever an input of the analysis changes.
///
/// Subscribers run synchronously on the notifying thread, in subscription
/// order, and must not block.
#[derive(Default)]
pub struct ChangeSignal {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(ChangeKind) + Send + Sync + 'static) {
        self.subscribers.lock().push(Box::new(subscriber));
    }

    pub fn notify(&self, kind: ChangeKind) {
        tracing::debug!("change: {:?}", kind);
        for subscriber in self.subscribers.lock().iter() {
            subscriber(kind);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
