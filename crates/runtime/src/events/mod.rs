//! Topic-based event bus for runtime events.
//!
//! Engine broadcasts reach the bus through [`EventBusSink`]; presentation
//! cues are published by the board. Consumers subscribe only to the topics
//! they need.

mod bus;
mod sink;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use sink::EventBusSink;
pub use types::{CompletionEvent, DonationEvent};
