use lookbook_core::CoreError;
use lookbook_remote::RemoteError;

/// Failures surfaced by wardrobe store operations.
///
/// Every failure is caught at the store boundary: callers branch on the
/// returned `Result`, and a user-facing notice is published alongside.
/// Nothing propagates as a panic.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A mutating operation was attempted with no signed-in user. No
    /// remote call is made.
    #[error("No authenticated user")]
    Unauthenticated,

    /// A domain-level error: invalid draft, or a record missing from the
    /// local mirror.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The remote call failed. Local state is left untouched; the
    /// underlying error is logged, not shown verbatim to the user.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Convenience alias for store operation return values.
pub type StoreResult<T> = Result<T, StoreError>;
