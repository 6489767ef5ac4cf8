//! Pure windowing math: page counts, slice bounds, offsets, page parsing.
//!
//! Every function here is total. A zero page size is treated as one so the
//! helpers never divide by zero, but callers are expected to have rejected
//! it earlier through [`PaginationMeta::new`](crate::types::PaginationMeta::new).

use std::ops::Range;

/// Number of pages needed for `total_items` at `per_page` items each.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1))
}

/// Clamp a page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of the items shown on `page` (1-based).
///
/// The end is clamped to `total_items`; a page past the end yields an empty
/// range at `total_items`.
pub fn page_range(total_items: usize, per_page: usize, page: usize) -> Range<usize> {
    let per_page = per_page.max(1);
    let start = page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(total_items);
    let end = start.saturating_add(per_page).min(total_items);
    start..end
}

/// The slice of `items` shown on `page`.
pub fn page_slice<T>(items: &[T], per_page: usize, page: usize) -> &[T] {
    &items[page_range(items.len(), per_page, page)]
}

/// Item offset of `page`, wrapped by `total_items`.
///
/// An empty dataset always has offset zero.
pub fn page_offset(page: usize, per_page: usize, total_items: usize) -> usize {
    if total_items == 0 {
        return 0;
    }
    page.saturating_sub(1).saturating_mul(per_page) % total_items
}

/// Whether "back" is available at `offset`.
pub fn can_go_back(offset: usize) -> bool {
    offset != 0
}

/// Whether "next" is available at `offset`.
pub fn can_go_next(offset: usize, per_page: usize, total_items: usize) -> bool {
    offset < total_items.saturating_sub(per_page)
}

/// Parse a raw page query value (`?page=3` or the first catch-all segment).
///
/// Missing, empty, non-numeric and zero values fall back to page 1. The
/// result is not clamped; use [`clamp_page`] once the page count is known.
pub fn parse_page_query(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(200, 10), 20);
    }

    #[test]
    fn total_pages_guards_zero_page_size() {
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn page_range_first_middle_last() {
        assert_eq!(page_range(25, 10, 1), 0..10);
        assert_eq!(page_range(25, 10, 2), 10..20);
        assert_eq!(page_range(25, 10, 3), 20..25);
    }

    #[test]
    fn page_range_past_end_is_empty() {
        let range = page_range(25, 10, 7);
        assert!(range.is_empty());
        assert_eq!(range.start, 25);
    }

    #[test]
    fn page_range_page_zero_is_first_page() {
        assert_eq!(page_range(25, 10, 0), 0..10);
    }

    #[test]
    fn pages_concatenate_to_dataset() {
        for total in [0usize, 1, 9, 10, 11, 57, 100] {
            for per_page in [1usize, 3, 10, 25] {
                let items: Vec<usize> = (0..total).collect();
                let pages = total_pages(total, per_page);
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|p| page_slice(&items, per_page, p).iter().copied())
                    .collect();
                assert_eq!(joined, items, "total={total} per_page={per_page}");
            }
        }
    }

    #[test]
    fn offset_wraps_by_total_items() {
        assert_eq!(page_offset(1, 10, 95), 0);
        assert_eq!(page_offset(3, 10, 95), 20);
        assert_eq!(page_offset(11, 10, 95), 5);
        assert_eq!(page_offset(4, 10, 0), 0);
    }

    #[test]
    fn back_disabled_only_at_zero_offset() {
        assert!(!can_go_back(0));
        assert!(can_go_back(10));
    }

    #[test]
    fn next_disabled_on_last_page() {
        // 95 items, 10 per page: last page starts at offset 90
        assert!(can_go_next(80, 10, 95));
        assert!(!can_go_next(90, 10, 95));
        // exact multiple: last page starts at 90 of 100
        assert!(!can_go_next(90, 10, 100));
        assert!(can_go_next(80, 10, 100));
    }

    #[test]
    fn next_disabled_when_everything_fits() {
        assert!(!can_go_next(0, 10, 4));
    }

    #[test]
    fn parse_page_query_defaults() {
        assert_eq!(parse_page_query(None), 1);
        assert_eq!(parse_page_query(Some("")), 1);
        assert_eq!(parse_page_query(Some("abc")), 1);
        assert_eq!(parse_page_query(Some("0")), 1);
        assert_eq!(parse_page_query(Some("-2")), 1);
        assert_eq!(parse_page_query(Some(" 7 ")), 7);
        assert_eq!(parse_page_query(Some("400")), 400);
    }
}
