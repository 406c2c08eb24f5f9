//! Coarse Eligibility Predicates
//!
//! Status, time window, store membership, and role membership checks.
//! These make up the coarse filter applied before ordering; page
//! visibility is a separate rendering-time concern.

use jiff::Timestamp;
use rustc_hash::FxHashSet;

use crate::records::{PromoBarRecord, StoreUuid};

/// Whether the record is temporally active at `at`.
///
/// Active iff the record is enabled, has a start date at or before `at`,
/// and has no end date or one strictly after `at`. A record with no start
/// date is never active rather than an error, so one malformed record
/// cannot fail a render.
#[must_use]
pub fn is_active(record: &PromoBarRecord, at: Timestamp) -> bool {
    if !record.enabled {
        return false;
    }

    let Some(start) = record.start_date else {
        return false;
    };

    if at < start {
        return false;
    }

    match record.end_date {
        Some(end) => at < end,
        None => true,
    }
}

/// Whether the record applies to `store`.
///
/// An absent or empty store set means the record is valid for all stores.
#[must_use]
pub fn is_eligible_for_store(record: &PromoBarRecord, store: StoreUuid) -> bool {
    match &record.stores {
        Some(stores) if !stores.is_empty() => stores.contains(&store),
        _ => true,
    }
}

/// Whether the record applies to a visitor holding `roles`.
///
/// An absent or empty role set on the record means any visitor qualifies;
/// otherwise the visitor's roles must intersect the record's.
#[must_use]
pub fn is_eligible_for_roles(record: &PromoBarRecord, roles: &FxHashSet<String>) -> bool {
    match &record.customer_roles {
        Some(restricted) if !restricted.is_empty() => {
            restricted.iter().any(|role| roles.contains(role))
        }
        _ => true,
    }
}

/// The full coarse predicate: active, store-eligible, and role-eligible.
#[must_use]
pub fn is_candidate(
    record: &PromoBarRecord,
    store: StoreUuid,
    roles: &FxHashSet<String>,
    at: Timestamp,
) -> bool {
    is_active(record, at)
        && is_eligible_for_store(record, store)
        && is_eligible_for_roles(record, roles)
}
