//! Runtime wrappers around static item content.
//!
//! The data is immutable at runtime; the slot table lives in repositories.
mod items;
mod rewards;

pub use items::ItemOracleImpl;
pub use rewards::OracleRewardResolver;
