//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use bundle_core::BundleEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CompletionEvent, DonationEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Donation broadcasts visible to every participant
    Donation,
    /// Bundle completions, milestones and achievement checks
    Completion,
    /// Per-view cues (slot animations, celebrations)
    Presentation,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Donation(DonationEvent),
    Completion(CompletionEvent),
    Presentation(BundleEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Donation(_) => Topic::Donation,
            Event::Completion(_) => Topic::Completion,
            Event::Presentation(_) => Topic::Presentation,
        }
    }
}

/// One broadcast channel per topic, created up front.
struct Channels {
    donation: broadcast::Sender<Event>,
    completion: broadcast::Sender<Event>,
    presentation: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Donation => &self.donation,
            Topic::Completion => &self.completion,
            Topic::Presentation => &self.presentation,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks, so the bus can be fed
/// from synchronous donation code.
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                donation: broadcast::channel(capacity).0,
                completion: broadcast::channel(capacity).0,
                presentation: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Events are best-effort: with no subscribers the event is dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if self.channels.get(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
