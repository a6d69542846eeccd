//! Page selection syntax for the PDF merger
//!
//! Comma-separated tokens: `8` (one page), `2-5` (inclusive range), `12-`
//! (page 12 to the end), `-3` (first three pages), `!10` or `!4-6`
//! (exclude). Blank tokens are ignored.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// One token of a page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    Single(u32),
    Range { start: u32, end: u32 },
    From(u32),
    Exclude(PageSpan),
}

/// Pages an exclusion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpan {
    Single(u32),
    Range { start: u32, end: u32 },
    From(u32),
}

impl PageSpan {
    fn contains(self, page: u32) -> bool {
        match self {
            Self::Single(p) => page == p,
            Self::Range { start, end } => (start..=end).contains(&page),
            Self::From(start) => page >= start,
        }
    }

    fn pages(self, page_count: u32) -> impl Iterator<Item = u32> {
        let (start, end) = match self {
            Self::Single(p) => (p, p),
            Self::Range { start, end } => (start, end),
            Self::From(start) => (start, page_count),
        };
        (start..=end.min(page_count)).filter(move |p| *p >= 1)
    }
}

impl From<PageSpan> for PageSelector {
    fn from(span: PageSpan) -> Self {
        match span {
            PageSpan::Single(p) => Self::Single(p),
            PageSpan::Range { start, end } => Self::Range { start, end },
            PageSpan::From(start) => Self::From(start),
        }
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(p) => write!(f, "{p}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
            Self::From(start) => write!(f, "{start}-"),
        }
    }
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(p) => write!(f, "{p}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
            Self::From(start) => write!(f, "{start}-"),
            Self::Exclude(span) => write!(f, "!{span}"),
        }
    }
}

/// Parse a selection such as `1-3, 8, !2`
///
/// An empty or blank input selects the whole document and yields no
/// selectors.
///
/// # Errors
/// Returns `Validation` naming the first malformed token
pub fn parse_page_selection(input: &str) -> CoreResult<Vec<PageSelector>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> CoreResult<PageSelector> {
    if let Some(rest) = token.strip_prefix('!') {
        return parse_span(rest.trim(), token).map(PageSelector::Exclude);
    }
    parse_span(token, token).map(PageSelector::from)
}

fn parse_span(text: &str, token: &str) -> CoreResult<PageSpan> {
    let invalid = || CoreError::Validation(format!("Invalid page selection: '{token}'"));
    let page = |s: &str| -> CoreResult<u32> {
        match s.trim().parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(invalid()),
        }
    };

    match text.split_once('-') {
        None => page(text).map(PageSpan::Single),
        Some((start, end)) if end.trim().is_empty() => page(start).map(PageSpan::From),
        Some((start, end)) if start.trim().is_empty() => Ok(PageSpan::Range {
            start: 1,
            end: page(end)?,
        }),
        Some((start, end)) => {
            let (start, end) = (page(start)?, page(end)?);
            if start > end {
                return Err(invalid());
            }
            Ok(PageSpan::Range { start, end })
        }
    }
}

/// Concrete page numbers a selection picks from a document
///
/// Included pages keep selection order; exclusions then drop pages. A
/// selection with only exclusions starts from the whole document. Pages past
/// the end are ignored.
#[must_use]
pub fn resolve_pages(selectors: &[PageSelector], page_count: u32) -> Vec<u32> {
    let mut excluded = Vec::new();
    let mut included = Vec::new();

    for selector in selectors {
        match *selector {
            PageSelector::Exclude(span) => excluded.push(span),
            PageSelector::Single(p) => included.extend(PageSpan::Single(p).pages(page_count)),
            PageSelector::Range { start, end } => {
                included.extend(PageSpan::Range { start, end }.pages(page_count));
            }
            PageSelector::From(start) => included.extend(PageSpan::From(start).pages(page_count)),
        }
    }

    if included.is_empty() && !excluded.is_empty() {
        included = (1..=page_count).collect();
    }

    let mut seen = std::collections::HashSet::new();
    included
        .into_iter()
        .filter(|p| !excluded.iter().any(|span| span.contains(*p)))
        .filter(|p| seen.insert(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        let selectors = parse_page_selection("2-5, 8, 12-, !10, -3").unwrap();
        assert_eq!(
            selectors,
            vec![
                PageSelector::Range { start: 2, end: 5 },
                PageSelector::Single(8),
                PageSelector::From(12),
                PageSelector::Exclude(PageSpan::Single(10)),
                PageSelector::Range { start: 1, end: 3 },
            ]
        );
    }

    #[test]
    fn test_blank_tokens_ignored() {
        assert!(parse_page_selection("").unwrap().is_empty());
        assert!(parse_page_selection(" , ,").unwrap().is_empty());
        assert_eq!(parse_page_selection("3,,").unwrap(), vec![PageSelector::Single(3)]);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["0", "a", "5-2", "1-2-3", "!", "!x", "1.5"] {
            let err = parse_page_selection(bad).unwrap_err();
            assert_eq!(err.code(), "VALIDATION_ERROR", "{bad}");
        }
    }

    #[test]
    fn test_display_round_trips_token() {
        for token in ["7", "2-5", "12-", "!4-6", "!9-"] {
            let parsed = parse_page_selection(token).unwrap();
            assert_eq!(parsed[0].to_string(), token);
        }
    }

    #[test]
    fn test_resolve_pages() {
        let selectors = parse_page_selection("1-5, !3").unwrap();
        assert_eq!(resolve_pages(&selectors, 10), vec![1, 2, 4, 5]);

        let selectors = parse_page_selection("!1-2").unwrap();
        assert_eq!(resolve_pages(&selectors, 4), vec![3, 4]);

        let selectors = parse_page_selection("8-, 2").unwrap();
        assert_eq!(resolve_pages(&selectors, 9), vec![8, 9, 2]);

        let selectors = parse_page_selection("20").unwrap();
        assert!(resolve_pages(&selectors, 3).is_empty());
    }
}
