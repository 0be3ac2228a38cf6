//! In-memory repository implementations for tests and single-process sessions.

mod store;

pub use store::InMemoryBundleStore;
