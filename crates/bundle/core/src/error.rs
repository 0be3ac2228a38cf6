//! Common error infrastructure for bundle-core.
//!
//! Domain-specific errors (`DefinitionError`, `StoreError`, `DepositRejection`)
//! live next to the code that produces them. This module provides the shared
//! classification every one of them implements.
//!
//! # Design Principles
//!
//! - **Values, not panics**: donation failures are outcomes returned to the caller
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Load-time vs. donation-time**: only malformed definitions are fatal

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions; the donor keeps the item and may retry
/// - **Validation**: Invalid input for the current context, rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable configuration errors detected at load time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the item is returned and the donor may try again.
    ///
    /// Examples: no matching slot, store temporarily unavailable, lost race
    Recoverable,

    /// Validation error - the request is not valid in this context.
    ///
    /// Examples: donating from a read-only review view
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: store record length differs from the bundle definition
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - content cannot be loaded, engine cannot start.
    ///
    /// Examples: criterion without a matching mode, too many required slots
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or bad content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all bundle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log filtering and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_is_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
    }

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
