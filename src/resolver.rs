//! Availability Resolver

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::Span;

use crate::{
    context::ResolutionContext,
    errors::ResolveError,
    pipeline::FilterPipeline,
    records::PromoBarRecord,
    repository::PromoBarRepository,
};

/// Resolves the ordered set of promo bars available for a context.
///
/// Stateless; all inputs arrive through the [`ResolutionContext`] and the
/// output is a pure function of the repository snapshot, the context, and
/// the registered pipeline stages.
pub struct PromoBarResolver {
    repository: Arc<dyn PromoBarRepository>,
    pipeline: FilterPipeline,
}

impl PromoBarResolver {
    /// Build a resolver over a repository adapter and a filter pipeline.
    ///
    /// Pass [`FilterPipeline::new`] when no external stages are
    /// registered.
    #[must_use]
    pub fn new(repository: Arc<dyn PromoBarRepository>, pipeline: FilterPipeline) -> Self {
        Self {
            repository,
            pipeline,
        }
    }

    /// Resolve the available promo bars for `context`, in display order.
    ///
    /// Candidates come back from the repository coarse-filtered, are
    /// sorted ascending by `(weight, uuid)`, and are then handed through
    /// the filter pipeline. The pipeline's output is returned as-is: it is
    /// the final ordering authority and may have added, removed, or
    /// reordered records.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Repository`] when candidate lookup fails
    /// and [`ResolveError::FilterStage`] when a pipeline stage fails. An
    /// error always means "no promo bars can be safely determined"; the
    /// resolver never falls back to an empty list.
    #[tracing::instrument(
        name = "promo_bars.resolver.resolve",
        skip(self, context),
        fields(
            store_uuid = %context.store.uuid,
            candidate_count = tracing::field::Empty,
            resolved_count = tracing::field::Empty
        ),
        err
    )]
    pub async fn resolve(
        &self,
        context: &ResolutionContext,
    ) -> Result<Vec<PromoBarRecord>, ResolveError> {
        let mut candidates = self
            .repository
            .find_candidates(context.store.uuid, &context.roles, context.reference_time)
            .await?;

        let span = Span::current();

        span.record(
            "candidate_count",
            tracing::field::display(candidates.len()),
        );

        // Stable sort: the resolver's only ordering authority.
        candidates.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.uuid.cmp(&b.uuid)));

        let resolved = self.pipeline.run(candidates, context).await?;

        span.record("resolved_count", tracing::field::display(resolved.len()));

        Ok(resolved)
    }
}

impl Debug for PromoBarResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PromoBarResolver")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}
