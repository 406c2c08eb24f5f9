//! Promo Bar Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{
    eligibility,
    errors::RepositoryError,
    records::{PromoBarRecord, StoreUuid},
};

/// Source of candidate promo bars for a store and visitor role set.
///
/// Implementations apply the coarse filter — status, time window, store
/// membership, role membership — and nothing more; page visibility stays a
/// rendering-time concern so callers can pull every candidate regardless
/// of per-page rules. A query-backed implementation may push the
/// predicates into the query; a dumb store may apply
/// [`eligibility::is_candidate`] in process.
#[automock]
#[async_trait]
pub trait PromoBarRepository: Send + Sync {
    /// Load the records plausibly relevant to `store` and `roles` at
    /// `reference_time`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] when the backing data
    /// source cannot be reached.
    async fn find_candidates(
        &self,
        store: StoreUuid,
        roles: &FxHashSet<String>,
        reference_time: Timestamp,
    ) -> Result<Vec<PromoBarRecord>, RepositoryError>;
}

/// Repository adapter over an in-memory snapshot of records.
///
/// Applies the coarse predicate in process. Useful for callers that
/// already hold their promo bar configuration in memory, and as the
/// reference adapter in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromoBarRepository {
    records: Vec<PromoBarRecord>,
}

impl InMemoryPromoBarRepository {
    /// Wrap a snapshot of records.
    #[must_use]
    pub fn new(records: Vec<PromoBarRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl PromoBarRepository for InMemoryPromoBarRepository {
    async fn find_candidates(
        &self,
        store: StoreUuid,
        roles: &FxHashSet<String>,
        reference_time: Timestamp,
    ) -> Result<Vec<PromoBarRecord>, RepositoryError> {
        let candidates: Vec<PromoBarRecord> = self
            .records
            .iter()
            .filter(|record| eligibility::is_candidate(record, store, roles, reference_time))
            .cloned()
            .collect();

        debug!(
            store_uuid = %store,
            candidate_count = candidates.len(),
            "loaded promo bar candidates"
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::records::PromoBarUuid;

    use super::*;

    fn active_record(name: &str) -> PromoBarRecord {
        PromoBarRecord {
            start_date: "2026-08-01T00:00:00Z".parse().ok(),
            ..PromoBarRecord::new(PromoBarUuid::new(), name)
        }
    }

    #[tokio::test]
    async fn applies_the_coarse_filter() -> TestResult {
        let store = StoreUuid::new();
        let other_store = StoreUuid::new();

        let everywhere = active_record("everywhere");
        let scoped = PromoBarRecord {
            stores: Some([other_store].into_iter().collect()),
            ..active_record("other store only")
        };
        let disabled = PromoBarRecord {
            enabled: false,
            ..active_record("disabled")
        };
        let vip_only = PromoBarRecord {
            customer_roles: Some(["vip".to_string()].into_iter().collect()),
            ..active_record("vip only")
        };

        let repository = InMemoryPromoBarRepository::new(vec![
            everywhere.clone(),
            scoped,
            disabled,
            vip_only,
        ]);

        let roles: FxHashSet<String> = ["customer".to_string()].into_iter().collect();
        let now: Timestamp = "2026-08-15T00:00:00Z".parse()?;

        let candidates = repository.find_candidates(store, &roles, now).await?;

        let names: Vec<&str> = candidates.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["everywhere"], "only the unrestricted record qualifies");

        Ok(())
    }

    #[tokio::test]
    async fn page_rules_do_not_affect_candidates() -> TestResult {
        let restricted = PromoBarRecord {
            pages: Some("/checkout".to_string()),
            ..active_record("page restricted")
        };

        let repository = InMemoryPromoBarRepository::new(vec![restricted]);

        let candidates = repository
            .find_candidates(
                StoreUuid::new(),
                &FxHashSet::default(),
                "2026-08-15T00:00:00Z".parse()?,
            )
            .await?;

        assert_eq!(
            candidates.len(),
            1,
            "page visibility must not participate in the coarse filter"
        );

        Ok(())
    }
}
