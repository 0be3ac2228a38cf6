//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod read_store;
mod validate_content;

pub use read_store::ReadStore;
pub use validate_content::ValidateContent;
