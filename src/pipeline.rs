//! Filter Pipeline
//!
//! Ordered chain of externally supplied stages that can add, remove, or
//! reorder resolved candidates without the resolver knowing about them in
//! advance. The list-in/list-out contract keeps ordering explicit.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;

use crate::{
    context::ResolutionContext,
    errors::{BoxError, ResolveError},
    records::PromoBarRecord,
};

/// A single transformation over the candidate list.
///
/// Stages receive the previous stage's output and return a replacement
/// list. They are expected to be pure with respect to the list; an
/// asynchronous stage is awaited before the next stage runs, since stage
/// N's output is stage N+1's input.
#[async_trait]
pub trait FilterStage: Send + Sync {
    /// Transform the candidate list.
    ///
    /// # Errors
    ///
    /// A stage error aborts the whole resolution; no partially transformed
    /// list is ever returned.
    async fn apply(
        &self,
        promo_bars: Vec<PromoBarRecord>,
        context: &ResolutionContext,
    ) -> Result<Vec<PromoBarRecord>, BoxError>;
}

struct RegisteredStage {
    name: String,
    priority: i32,
    stage: Box<dyn FilterStage>,
}

/// Stages registered against a resolver, run in priority order.
///
/// Invocation order is priority ascending, then registration order for
/// equal priorities.
#[derive(Default)]
pub struct FilterPipeline {
    stages: Vec<RegisteredStage>,
}

impl FilterPipeline {
    /// An empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named stage at the given priority.
    pub fn register(&mut self, name: impl Into<String>, priority: i32, stage: Box<dyn FilterStage>) {
        self.stages.push(RegisteredStage {
            name: name.into(),
            priority,
            stage,
        });

        // Stable sort keeps registration order within a priority.
        self.stages.sort_by_key(|stage| stage.priority);
    }

    /// Number of registered stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no stages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order over `promo_bars`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::FilterStage`] naming the first failing
    /// stage; later stages are not run.
    pub async fn run(
        &self,
        promo_bars: Vec<PromoBarRecord>,
        context: &ResolutionContext,
    ) -> Result<Vec<PromoBarRecord>, ResolveError> {
        let mut current = promo_bars;

        for registered in &self.stages {
            current = registered
                .stage
                .apply(current, context)
                .await
                .map_err(|source| ResolveError::FilterStage {
                    stage: registered.name.clone(),
                    source,
                })?;
        }

        Ok(current)
    }
}

impl Debug for FilterPipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list()
            .entries(self.stages.iter().map(|stage| &stage.name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, tz::TimeZone};
    use rustc_hash::FxHashSet;
    use testresult::TestResult;

    use crate::{
        context::StoreContext,
        records::{PromoBarUuid, StoreUuid},
    };

    use super::*;

    fn context() -> ResolutionContext {
        ResolutionContext {
            store: StoreContext {
                uuid: StoreUuid::new(),
                time_zone: TimeZone::UTC,
            },
            roles: FxHashSet::default(),
            reference_time: Timestamp::default(),
            current_path: "/".to_string(),
        }
    }

    /// Appends its tag to every record name, recording execution order.
    struct Tagging(&'static str);

    #[async_trait]
    impl FilterStage for Tagging {
        async fn apply(
            &self,
            promo_bars: Vec<PromoBarRecord>,
            _context: &ResolutionContext,
        ) -> Result<Vec<PromoBarRecord>, BoxError> {
            Ok(promo_bars
                .into_iter()
                .map(|mut record| {
                    record.name.push(' ');
                    record.name.push_str(self.0);
                    record
                })
                .collect())
        }
    }

    struct Failing;

    #[async_trait]
    impl FilterStage for Failing {
        async fn apply(
            &self,
            _promo_bars: Vec<PromoBarRecord>,
            _context: &ResolutionContext,
        ) -> Result<Vec<PromoBarRecord>, BoxError> {
            Err("stage exploded".into())
        }
    }

    #[tokio::test]
    async fn runs_by_priority_then_registration_order() -> TestResult {
        let mut pipeline = FilterPipeline::new();
        pipeline.register("late", 10, Box::new(Tagging("late")));
        pipeline.register("first", 0, Box::new(Tagging("first")));
        pipeline.register("second", 0, Box::new(Tagging("second")));

        let record = PromoBarRecord::new(PromoBarUuid::new(), "banner");

        let out = pipeline.run(vec![record], &context()).await?;

        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["banner first second late"]);

        Ok(())
    }

    #[tokio::test]
    async fn empty_pipeline_returns_input_unchanged() -> TestResult {
        let pipeline = FilterPipeline::new();
        let record = PromoBarRecord::new(PromoBarUuid::new(), "banner");
        let uuid = record.uuid;

        let out = pipeline.run(vec![record], &context()).await?;

        let uuids: Vec<PromoBarUuid> = out.iter().map(|r| r.uuid).collect();
        assert_eq!(uuids, vec![uuid]);
        assert!(pipeline.is_empty(), "no stages were registered");

        Ok(())
    }

    #[tokio::test]
    async fn failing_stage_aborts_with_its_name() {
        let mut pipeline = FilterPipeline::new();
        pipeline.register("tagger", 0, Box::new(Tagging("tagged")));
        pipeline.register("blocklist", 5, Box::new(Failing));

        let record = PromoBarRecord::new(PromoBarUuid::new(), "banner");

        let result = pipeline.run(vec![record], &context()).await;

        assert!(
            matches!(result, Err(ResolveError::FilterStage { ref stage, .. }) if stage == "blocklist"),
            "expected FilterStage error for 'blocklist', got {result:?}"
        );
    }
}
