//! Resolution errors.

use thiserror::Error;

/// Boxed error produced by repository backends and filter stages.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Repository adapter errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing data source could not be reached. Retry and timeout
    /// policy belongs to the adapter; the resolver only propagates.
    #[error("promo bar repository unavailable")]
    Unavailable(#[source] BoxError),
}

/// Errors surfaced by [`PromoBarResolver::resolve`].
///
/// A resolution error means "no promo bars can be safely determined",
/// never "zero are configured"; the resolver performs no fallback.
///
/// [`PromoBarResolver::resolve`]: crate::resolver::PromoBarResolver::resolve
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Candidate lookup failed.
    #[error("failed to load promo bar candidates")]
    Repository(#[from] RepositoryError),

    /// A filter pipeline stage failed. The partially transformed list is
    /// discarded; pipeline application is all-or-nothing.
    #[error("filter stage '{stage}' failed")]
    FilterStage {
        /// Registered name of the failing stage.
        stage: String,
        /// Underlying stage error.
        #[source]
        source: BoxError,
    },
}
