//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the shared store, repositories, and content validation
//! so clients can bubble them up with consistent context.
use bundle_core::{BundleId, DefinitionError, EngineError, ErrorSeverity, StoreError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("bundle {0} is not defined on this board")]
    UnknownBundle(BundleId),

    #[error("no open view for bundle {0}")]
    ViewNotOpen(BundleId),

    #[error("bundle {0} is not complete")]
    BundleIncomplete(BundleId),

    #[error("reward for bundle {0} was already claimed")]
    RewardAlreadyClaimed(BundleId),

    #[error("reward resolver not set")]
    ResolverNotSet,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl EngineError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownBundle(_) | Self::ViewNotOpen(_) => ErrorSeverity::Validation,
            Self::BundleIncomplete(_) | Self::RewardAlreadyClaimed(_) => {
                ErrorSeverity::Recoverable
            }
            Self::ResolverNotSet => ErrorSeverity::Fatal,
            Self::Store(error) => error.severity(),
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::Definition(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBundle(_) => "RUNTIME_UNKNOWN_BUNDLE",
            Self::ViewNotOpen(_) => "RUNTIME_VIEW_NOT_OPEN",
            Self::BundleIncomplete(_) => "RUNTIME_BUNDLE_INCOMPLETE",
            Self::RewardAlreadyClaimed(_) => "RUNTIME_REWARD_ALREADY_CLAIMED",
            Self::ResolverNotSet => "RUNTIME_RESOLVER_NOT_SET",
            Self::Store(error) => error.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::Definition(error) => error.error_code(),
        }
    }
}
