//! Runtime adapters and coordination for cooperative bundle donations.
//!
//! `bundle-core` decides what a donation does; this crate supplies everything
//! it needs from the outside world and wires participants together:
//! - [`board`] hosts [`BundleBoard`], the shared coordinator, and its builder
//! - [`session`] keeps one participant's open bundle views
//! - [`repository`] provides the shared slot table (in-memory and file-backed)
//! - [`events`] provides a topic-based event bus and a notification sink over it
//! - [`oracle`] builds items for previews and rewards from static content
//! - [`api`] exposes the error types surfaced to consumers
pub mod api;
pub mod board;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod session;

pub use api::{Result, RuntimeError};
pub use board::{BundleBoard, BundleBoardBuilder, RuntimeConfig};
pub use events::{CompletionEvent, DonationEvent, Event, EventBus, EventBusSink, Topic};
pub use oracle::{ItemOracleImpl, OracleRewardResolver};
pub use repository::{
    BundleRepository, FileBundleStore, InMemoryBundleStore, RepositoryError, StoreTable,
};
pub use session::ParticipantSession;
