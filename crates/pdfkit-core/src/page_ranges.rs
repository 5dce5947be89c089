//! Page range parsing for page-selection inputs
//!
//! Users type 1-based selections like "1-3, 5, 8-10"; PDF engines want
//! zero-based indices. Invalid segments are skipped with a warning rather
//! than failing the whole selection.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid page number in '{segment}'")]
    NotANumber { segment: String },

    #[error("Invalid range: start {start} > end {end}")]
    Reversed { start: usize, end: usize },

    #[error("Page {page} is outside 1-{total}")]
    OutOfBounds { page: usize, total: usize },
}

/// Parse a page range expression into sorted, unique, zero-based page indices.
///
/// An empty (or all-whitespace) expression selects every page.
///
/// # Examples
/// ```
/// use pdfkit_core::page_ranges::parse_page_ranges;
///
/// assert_eq!(parse_page_ranges("1-3, 5", 10), vec![0, 1, 2, 4]);
/// assert_eq!(parse_page_ranges("", 3), vec![0, 1, 2]);
/// assert_eq!(parse_page_ranges("2-1", 5), Vec::<usize>::new());
/// ```
pub fn parse_page_ranges(expression: &str, total_pages: usize) -> Vec<usize> {
    if expression.trim().is_empty() {
        return (0..total_pages).collect();
    }

    let mut indices = BTreeSet::new();

    for segment in segments(expression) {
        match parse_segment(segment, total_pages) {
            Ok(pages) => indices.extend(pages.map(|page| page - 1)),
            Err(e) => warn!(segment, error = %e, "Skipping invalid page range segment"),
        }
    }

    indices.into_iter().collect()
}

/// Check a page range expression without producing indices.
///
/// Returns the first invalid segment's error. An empty expression is valid
/// because it selects every page.
pub fn validate_page_ranges(expression: &str, total_pages: usize) -> Result<(), RangeError> {
    for segment in segments(expression) {
        parse_segment(segment, total_pages)?;
    }
    Ok(())
}

fn segments(expression: &str) -> impl Iterator<Item = &str> {
    expression
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Parse one trimmed segment into a 1-based inclusive page range.
fn parse_segment(segment: &str, total_pages: usize) -> Result<RangeInclusive<usize>, RangeError> {
    let mut bounds = segment.split('-');
    if let (Some(start), Some(end)) = (bounds.next(), bounds.next()) {
        // Anything after a second dash is ignored: "1-2-3" selects 1-2
        let start = parse_page_number(start, segment)?;
        let end = parse_page_number(end, segment)?;

        if start < 1 {
            return Err(RangeError::OutOfBounds {
                page: start,
                total: total_pages,
            });
        }
        if end > total_pages {
            return Err(RangeError::OutOfBounds {
                page: end,
                total: total_pages,
            });
        }
        if start > end {
            return Err(RangeError::Reversed { start, end });
        }

        Ok(start..=end)
    } else {
        let page = parse_page_number(segment, segment)?;
        if page < 1 || page > total_pages {
            return Err(RangeError::OutOfBounds {
                page,
                total: total_pages,
            });
        }
        Ok(page..=page)
    }
}

fn parse_page_number(value: &str, segment: &str) -> Result<usize, RangeError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| RangeError::NotANumber {
            segment: segment.to_string(),
        })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Result is sorted and unique
        #[test]
        fn result_is_strictly_ascending(range in "[0-9, -]*", total_pages in 0usize..100) {
            let result = parse_page_ranges(&range, total_pages);
            prop_assert!(result.windows(2).all(|w| w[0] < w[1]), "Not strictly ascending: {:?}", result);
        }

        /// Property: All indices are within bounds
        #[test]
        fn all_indices_in_bounds(range in "[0-9, -]*", total_pages in 0usize..100) {
            for index in parse_page_ranges(&range, total_pages) {
                prop_assert!(index < total_pages, "Index {} should be < {}", index, total_pages);
            }
        }

        /// Property: Empty input selects every page
        #[test]
        fn empty_input_is_identity(total_pages in 0usize..200) {
            let expected: Vec<usize> = (0..total_pages).collect();
            prop_assert_eq!(parse_page_ranges("", total_pages), expected);
        }

        /// Property: Single valid page produces its zero-based index
        #[test]
        fn single_page_works(page in 1usize..=100, total_pages in 1usize..=100) {
            let result = parse_page_ranges(&page.to_string(), total_pages);
            if page <= total_pages {
                prop_assert_eq!(result, vec![page - 1]);
            } else {
                prop_assert!(result.is_empty());
            }
        }

        /// Property: Reformatting the result as 1-based pages reparses to the same selection
        #[test]
        fn parsing_is_stable(range in "[0-9, -]+", total_pages in 1usize..100) {
            let first = parse_page_ranges(&range, total_pages);
            prop_assume!(!first.is_empty());

            let formatted = first
                .iter()
                .map(|i| (i + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            prop_assert_eq!(parse_page_ranges(&formatted, total_pages), first);
        }

        /// Property: Segment order doesn't affect output
        #[test]
        fn order_independent(a in 1usize..=10, b in 1usize..=10, c in 1usize..=10) {
            let r1 = parse_page_ranges(&format!("{}, {}-{}, {}", a, b.min(c), b.max(c), c), 10);
            let r2 = parse_page_ranges(&format!("{}, {}, {}-{}", c, a, b.min(c), b.max(c)), 10);
            prop_assert_eq!(r1, r2);
        }

        /// Property: validation agrees with parsing on fully valid input
        #[test]
        fn valid_expression_keeps_every_segment(start in 1usize..=20, len in 0usize..10, total_pages in 30usize..40) {
            let expr = format!("{}-{}", start, start + len);
            prop_assert!(validate_page_ranges(&expr, total_pages).is_ok());
            prop_assert_eq!(parse_page_ranges(&expr, total_pages).len(), len + 1);
        }
    }
}
