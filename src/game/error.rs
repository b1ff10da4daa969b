//! Session error types.

/// Error that can occur when creating or advancing a game session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// The guess is not a species of the active generation pool.
    #[display("'{}' is not a known species in this generation", _0)]
    InvalidGuess(#[error(not(source))] String),

    /// The session has reached a terminal status.
    #[display("Round is already over")]
    SessionAlreadyOver,

    /// No session has been started yet.
    #[display("No round has been started")]
    SessionNotStarted,

    /// The species has no description in the source language.
    #[display("Species has no usable description entries")]
    NoDescriptorAvailable,

    /// A transition broke a session invariant (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
