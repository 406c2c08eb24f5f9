//! Selection Policy
//!
//! Trims the visible records to the stacked-or-single final list and
//! derives the client-facing display metadata per selected record.

use jiff::{Timestamp, tz::TimeZone};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    context::ResolutionContext,
    records::{PromoBarRecord, PromoBarUuid},
};

/// How a block renders multiple available promo bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Render every visible promo bar, in resolved order.
    #[default]
    Stacked,

    /// Render only the last visible promo bar: the highest weight in
    /// resolved order, tie-broken by highest uuid.
    Single,
}

/// Client display metadata for one selected promo bar.
///
/// Serialized to the client keyed by record uuid, for consumption by the
/// downstream countdown/dismissal component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMetadata {
    /// Countdown deadline, ISO-8601 with the store offset. Present only
    /// while the deadline is still in the future; an elapsed deadline is
    /// simply omitted rather than marked expired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<String>,

    /// Whether the client may dismiss the banner.
    pub dismissible: bool,
}

/// Final list to present, plus per-record display metadata.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Records to render, in order.
    pub promo_bars: Vec<PromoBarRecord>,

    /// Display metadata keyed by record uuid, covering exactly the
    /// records in `promo_bars`.
    pub metadata: FxHashMap<PromoBarUuid, DisplayMetadata>,
}

/// Apply the display mode to the visible records and derive metadata.
///
/// `visible` is expected in resolved order; stacked mode preserves it and
/// single mode keeps only the last element. Countdown metadata is
/// evaluated against `context.reference_time` and formatted in the store
/// timezone.
#[must_use]
pub fn select(
    visible: Vec<PromoBarRecord>,
    mode: DisplayMode,
    context: &ResolutionContext,
) -> Selection {
    let mut visible = visible;

    let promo_bars = match mode {
        DisplayMode::Stacked => visible,
        DisplayMode::Single => visible.pop().into_iter().collect(),
    };

    let metadata = promo_bars
        .iter()
        .map(|record| (record.uuid, display_metadata(record, context)))
        .collect();

    Selection {
        promo_bars,
        metadata,
    }
}

fn display_metadata(record: &PromoBarRecord, context: &ResolutionContext) -> DisplayMetadata {
    let countdown = record
        .countdown_date
        .filter(|deadline| *deadline > context.reference_time)
        .map(|deadline| format_deadline(deadline, &context.store.time_zone));

    DisplayMetadata {
        countdown,
        dismissible: record.dismissible,
    }
}

/// ISO-8601 with a numeric UTC offset, e.g. `2026-08-23T18:00:00+02:00`.
fn format_deadline(deadline: Timestamp, time_zone: &TimeZone) -> String {
    deadline
        .to_zoned(time_zone.clone())
        .strftime("%Y-%m-%dT%H:%M:%S%:z")
        .to_string()
}
