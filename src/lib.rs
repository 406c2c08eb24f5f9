//! Promo Bar
//!
//! Availability resolution for storefront promotional banners. Given a
//! store, the visitor's roles, a reference instant, and the current page
//! path, the engine decides which configured promo bars are eligible, in
//! what order, and with what client-visible metadata (countdown deadline,
//! dismissibility).
//!
//! The flow is: a [`repository::PromoBarRepository`] adapter supplies
//! coarse-filtered candidates, [`resolver::PromoBarResolver`] orders them
//! by `(weight, uuid)` and runs the registered [`pipeline`] stages, the
//! caller keeps the records passing [`visibility::is_visible_on_page`]
//! for the current path, and [`selection::select`] trims to the stacked
//! or single final list and derives the per-record display metadata.
//!
//! The engine is stateless and deterministic: it never samples the wall
//! clock, performs no I/O of its own, and holds no state between calls.

pub mod context;
pub mod eligibility;
pub mod errors;
pub mod pipeline;
pub mod records;
pub mod repository;
pub mod resolver;
pub mod selection;
mod uuids;
pub mod visibility;

pub use uuids::TypedUuid;
