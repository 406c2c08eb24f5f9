//! Page Visibility
//!
//! Per-record page path rules, evaluated at render time after resolution.
//! A record can be available for a store and visitor yet hidden on the
//! current page, which is why this check is deliberately not part of the
//! coarse repository filter.

use smallvec::SmallVec;

use crate::records::PromoBarRecord;

/// Whether the record may be shown on `current_path`.
///
/// An absent or blank pattern set means the record is visible everywhere.
/// Otherwise `pages` is split into one pattern per line and the record is
/// visible iff at least one pattern matches. Blank or malformed lines
/// simply do not match; a misconfigured rule must never hide a banner from
/// every page by erroring out of the render.
#[must_use]
pub fn is_visible_on_page(record: &PromoBarRecord, current_path: &str) -> bool {
    let Some(pages) = record.pages.as_deref() else {
        return true;
    };

    if pages.trim().is_empty() {
        return true;
    }

    let path: SmallVec<[&str; 8]> = segments(current_path).collect();

    pages.lines().any(|pattern| pattern_matches(pattern, &path))
}

/// Match one pattern line against a segmented path.
///
/// Patterns are slash-delimited. A `*` segment matches any single path
/// segment; a trailing `*` matches one or more remaining segments. The
/// bare pattern `/` matches only the front page.
fn pattern_matches(pattern: &str, path: &[&str]) -> bool {
    let pattern = pattern.trim();

    if pattern.is_empty() {
        return false;
    }

    let pattern_segments: SmallVec<[&str; 8]> = segments(pattern).collect();

    if pattern_segments.is_empty() {
        // Lone "/" (or slashes only): the front page.
        return path.is_empty();
    }

    let mut remaining = path;

    for (index, segment) in pattern_segments.iter().enumerate() {
        let is_last = index + 1 == pattern_segments.len();

        if *segment == "*" && is_last {
            return !remaining.is_empty();
        }

        let Some((head, tail)) = remaining.split_first() else {
            return false;
        };

        if *segment != "*" && *segment != *head {
            return false;
        }

        remaining = tail;
    }

    remaining.is_empty()
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
