use serde_json::Value;
use tokio::sync::broadcast;

/// A named lifecycle event with its JSON context, stamped at publication
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub name: String,
    pub context: Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Fan-out publisher for deployment lifecycle events.
///
/// Publication is fire-and-forget: events are broadcast whether or not
/// anyone is listening, and a slow subscriber lags (and may miss events)
/// rather than blocking the publishing operation.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

impl EventPublisher {
    /// Create a publisher whose subscribers buffer up to `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event, returning how many subscribers it was delivered to.
    /// Publishing with no subscribers is a normal condition and returns 0.
    pub fn publish(&self, event_name: impl Into<String>, context: Value) -> usize {
        let event = PublishedEvent {
            name: event_name.into(),
            context,
            published_at: chrono::Utc::now(),
        };

        // The only send error is "no receivers", which is not an error here
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to events published from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}
