//! Listing request and result types.

use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Page number used when none is given.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Raw listing query string.
///
/// Everything arrives as text so malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search_term: Option<String>,
    pub category: Option<String>,
}

/// A normalized page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed page number, always >= 1.
    pub page: u32,
    /// Items per page, always >= 1.
    pub page_size: u32,
    pub search_term: Option<String>,
    pub category: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: None,
            category: None,
        }
    }
}

impl PageRequest {
    /// Normalize raw parameters.
    ///
    /// - `page` absent, non-numeric, or `<= 0` becomes 1.
    /// - `pageSize` absent, non-numeric, or `<= 0` becomes 6, then is clamped
    ///   to `max_page_size` when one is configured.
    /// - Empty `searchTerm` / `category` count as not provided.
    pub fn from_params(params: &ListingParams, max_page_size: Option<u32>) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(leading_integer)
            .map_or(DEFAULT_PAGE, |n| clamp_to_u32(n).max(1));

        let page_size = params
            .page_size
            .as_deref()
            .and_then(leading_integer)
            .filter(|n| *n > 0)
            .map_or(DEFAULT_PAGE_SIZE, clamp_to_u32);
        let page_size = match max_page_size {
            Some(max) => page_size.min(max.max(1)),
            None => page_size,
        };

        Self {
            page,
            page_size,
            search_term: non_empty(params.search_term.as_deref()),
            category: non_empty(params.category.as_deref()),
        }
    }

    /// Number of matching records before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub total_count: u64,
    pub items: Vec<Document>,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl PageResult {
    /// Create a result with paging calculations.
    pub fn new(items: Vec<Document>, total_count: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size > 0 {
            total_count.div_ceil(u64::from(page_size))
        } else {
            0
        };

        Self {
            total_count,
            items,
            page,
            page_size,
            total_pages,
        }
    }
}

/// Parse an optionally signed run of leading digits, ignoring what follows.
///
/// `"3"`, `" 3 "`, and `"3abc"` all give 3; `"abc"` gives None.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overlong digit runs saturate rather than fail.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn clamp_to_u32(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}
