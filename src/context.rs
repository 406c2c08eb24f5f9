//! Resolution Context

use jiff::{Timestamp, tz::TimeZone};
use rustc_hash::FxHashSet;

use crate::records::StoreUuid;

/// Store evaluating the request.
#[derive(Debug, Clone)]
pub struct StoreContext {
    /// Store identifier, matched against [`PromoBarRecord::stores`].
    ///
    /// [`PromoBarRecord::stores`]: crate::records::PromoBarRecord::stores
    pub uuid: StoreUuid,

    /// Store timezone. Used only when formatting countdown deadlines;
    /// eligibility comparisons happen in absolute time.
    pub time_zone: TimeZone,
}

/// Per-request inputs to resolution and selection.
///
/// Built once per render from the current store, visitor, and page. All
/// fields are immutable snapshots; the engine never samples the wall clock
/// itself, so identical contexts produce identical output.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// The storefront being rendered.
    pub store: StoreContext,

    /// Role identifiers of the current visitor.
    pub roles: FxHashSet<String>,

    /// The instant treated as "now" for the whole resolution.
    pub reference_time: Timestamp,

    /// Page path being rendered. Consulted only by the visibility
    /// evaluator.
    pub current_path: String,
}
