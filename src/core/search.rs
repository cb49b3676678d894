//! # Search Engine
//!
//! Pure functions behind the search page: criteria parsing, filtering, and
//! pagination. Nothing here holds state; the controller in `state.rs` owns
//! the inputs and calls these on every render.
//!
//! ```text
//! catalog ──► filter(query, city) ──► page_slice(page, page_size) ──► cards
//!                                  └─► total_pages(page_size)
//! ```

use crate::core::catalog::Attraction;

/// Page size when the terminal is wider than the narrow breakpoint.
pub const DEFAULT_PAGE_SIZE_WIDE: usize = 30;
/// Page size at or below the narrow breakpoint.
pub const DEFAULT_PAGE_SIZE_NARROW: usize = 15;
/// Party size used when the input is missing or invalid.
pub const MIN_PARTY_SIZE: u32 = 1;

/// The inputs of one submitted search. Replaced wholesale on each submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: String,
    pub city: String,
    /// ISO date (`YYYY-MM-DD`), empty when unset.
    pub start: String,
    /// ISO date (`YYYY-MM-DD`), empty when unset.
    pub end: String,
    pub people: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            city: String::new(),
            start: String::new(),
            end: String::new(),
            people: 2,
        }
    }
}

impl SearchCriteria {
    /// Same criteria with a different city.
    pub fn with_city(&self, city: Option<&str>) -> Self {
        Self {
            city: city.unwrap_or_default().to_string(),
            ..self.clone()
        }
    }
}

/// Coerce free-form party-size input to a valid count.
///
/// Non-numeric, empty, or sub-1 values become [`MIN_PARTY_SIZE`].
pub fn parse_party_size(input: &str) -> u32 {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= i64::from(MIN_PARTY_SIZE))
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(MIN_PARTY_SIZE)
}

/// Entries whose name contains `query` and whose city contains `city`,
/// both case-insensitive. An empty filter matches everything. Catalog order
/// is kept as-is.
pub fn filter<'a>(catalog: &'a [Attraction], query: &str, city: &str) -> Vec<&'a Attraction> {
    let q = query.to_lowercase();
    let c = city.to_lowercase();
    catalog
        .iter()
        .filter(|a| q.is_empty() || a.name.to_lowercase().contains(&q))
        .filter(|a| c.is_empty() || a.city.to_lowercase().contains(&c))
        .collect()
}

/// `max(1, ceil(count / page_size))`. A zero page size is treated as one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// The items on a 1-based `page`.
///
/// Trusts the caller to pass a page in `[1, total_pages]`; an out-of-range
/// page yields an empty slice rather than panicking.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Clamp a requested page to `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Page-size policy: narrow terminals get fewer cards per page.
///
/// Must be evaluated per render so a resize takes effect immediately.
pub fn page_size_for(is_narrow: bool, wide: usize, narrow: usize) -> usize {
    if is_narrow { narrow.max(1) } else { wide.max(1) }
}

/// One slot in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Page numbers to show: first, last, and `current ± 1`, with a gap marker
/// wherever consecutive numbers are skipped.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    let mut prev: Option<usize> = None;
    for p in 1..=total {
        let near = p + 1 >= current && p <= current + 1;
        if p != 1 && p != total && !near {
            continue;
        }
        if prev.is_some_and(|q| q + 1 != p) {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(p));
        prev = Some(p);
    }
    links
}
