//! Promo Bar Records

use jiff::Timestamp;
use rustc_hash::FxHashSet;

use crate::uuids::TypedUuid;

/// Promo Bar UUID
pub type PromoBarUuid = TypedUuid<PromoBarRecord>;

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record marker. Stores are owned by the commerce layer; only their
/// identifiers flow through this crate.
#[derive(Debug, Clone)]
pub struct StoreRecord {}

/// Promo Bar Record
///
/// Immutable snapshot of a configured promotional banner. Records are
/// created and edited by an external administrative surface; the engine
/// only reads them.
#[derive(Debug, Clone)]
pub struct PromoBarRecord {
    /// Stable unique identifier. Breaks ordering ties between equal weights.
    pub uuid: PromoBarUuid,

    /// Admin-facing name. Not consulted by resolution.
    pub name: String,

    /// Admin-facing description. Not consulted by resolution.
    pub description: String,

    /// Start of the active window. A record without one is never active.
    pub start_date: Option<Timestamp>,

    /// End of the active window. Absent means the record never expires.
    pub end_date: Option<Timestamp>,

    /// Countdown deadline shown to the client. Display metadata only;
    /// independent of `end_date` and irrelevant to availability.
    pub countdown_date: Option<Timestamp>,

    /// Disabled records are never eligible.
    pub enabled: bool,

    /// Primary ordering key. Lower weight sorts first.
    pub weight: i32,

    /// Stores the record is limited to. `None` or empty means all stores.
    pub stores: Option<FxHashSet<StoreUuid>>,

    /// Customer roles the record is limited to. `None` or empty means all
    /// roles.
    pub customer_roles: Option<FxHashSet<String>>,

    /// Newline-delimited page path patterns restricting where the record is
    /// shown. `None` or blank means every page. Consulted only by the
    /// visibility evaluator, never by the coarse filter.
    pub pages: Option<String>,

    /// Whether the client may dismiss the banner. Passed through verbatim
    /// as display metadata.
    pub dismissible: bool,

    /// Creation time of the record.
    pub created_at: Timestamp,
}

impl PromoBarRecord {
    /// Create an enabled record with no date window, weight zero, and no
    /// store, role, or page restrictions.
    #[must_use]
    pub fn new(uuid: PromoBarUuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            countdown_date: None,
            enabled: true,
            weight: 0,
            stores: None,
            customer_roles: None,
            pages: None,
            dismissible: false,
            created_at: Timestamp::now(),
        }
    }
}
