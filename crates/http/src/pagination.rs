//! Offset pagination over fully materialized result lists
use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 5;

/// Raw `?page=&limit=` query parameters.
///
/// Kept as strings so that malformed values fall back to defaults instead of
/// rejecting the request. As an extractor it never fails: repeated keys keep
/// their first value and an undecodable query string counts as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PageQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(rejection) => {
                tracing::debug!(error = %rejection, "ignoring undecodable page query");
                Vec::new()
            }
        };
        Ok(Self::from_pairs(pairs))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<&PageQuery> for Pagination {
    fn from(query: &PageQuery) -> Self {
        Self {
            page: positive_or(query.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(query.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

impl Pagination {
    pub fn offset(&self) -> usize {
        usize::try_from(self.page.saturating_sub(1).saturating_mul(self.limit))
            .unwrap_or(usize::MAX)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Slice one page out of `items` and describe it.
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> (Vec<T>, PageMeta) {
    let total = items.len() as u64;
    let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
    let page = items
        .into_iter()
        .skip(pagination.offset())
        .take(limit)
        .collect();

    let meta = PageMeta {
        total,
        page: pagination.page,
        limit: pagination.limit,
        total_pages: pagination.total_pages(total),
    };
    (page, meta)
}

/// Leading-integer parse: `"3"` and `"3abc"` give 3, anything without leading
/// digits or not positive gives `fallback`.
fn positive_or(raw: Option<&str>, fallback: u64) -> u64 {
    let Some(raw) = raw else {
        return fallback;
    };
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if negative || digits.is_empty() {
        return fallback;
    }
    match digits.parse::<u64>() {
        Ok(0) => fallback,
        Ok(value) => value,
        // Longer than u64 but still a positive number.
        Err(_) => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn absent_parameters_use_defaults() {
        assert_eq!(Pagination::from(&query(None, None)), Pagination::default());
    }

    #[test]
    fn malformed_parameters_fall_back() {
        let p = Pagination::from(&query(Some("abc"), Some("")));
        assert_eq!(p, Pagination { page: 1, limit: 5 });

        let p = Pagination::from(&query(Some("0"), Some("-3")));
        assert_eq!(p, Pagination { page: 1, limit: 5 });
    }

    #[test]
    fn leading_digits_are_used() {
        let p = Pagination::from(&query(Some("3abc"), Some(" 10")));
        assert_eq!(p, Pagination { page: 3, limit: 10 });
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let pairs = [("page", "2"), ("page", "7"), ("sort", "x"), ("limit", "3")]
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let parsed = PageQuery::from_pairs(pairs);
        assert_eq!(parsed, query(Some("2"), Some("3")));
    }

    #[tokio::test]
    async fn extractor_never_rejects() {
        for uri in ["/?page=1&page=2", "/?limit=%FF", "/?page", "/"] {
            let (mut parts, _) = axum::http::Request::get(uri).body(()).unwrap().into_parts();
            let query = PageQuery::from_request_parts(&mut parts, &()).await.unwrap();
            let pagination = Pagination::from(&query);
            assert_eq!(pagination.limit, DEFAULT_LIMIT, "{uri}");
            assert_eq!(pagination.page, DEFAULT_PAGE, "{uri}");
        }
    }

    #[test]
    fn twelve_items_in_pages_of_five() {
        let items: Vec<u32> = (1..=12).collect();

        let (first, meta) = paginate(items.clone(), Pagination { page: 1, limit: 5 });
        assert_eq!(first, vec![1, 2, 3, 4, 5]);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total, 12);

        let (last, meta) = paginate(items.clone(), Pagination { page: 3, limit: 5 });
        assert_eq!(last, vec![11, 12]);
        assert_eq!(meta.page, 3);

        let (beyond, _) = paginate(items, Pagination { page: 4, limit: 5 });
        assert!(beyond.is_empty());
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let (page, meta) = paginate(Vec::<u8>::new(), Pagination::default());
        assert!(page.is_empty());
        assert_eq!(
            meta,
            PageMeta {
                total: 0,
                page: 1,
                limit: 5,
                total_pages: 0,
            }
        );
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let p = Pagination::from(&query(Some("99999999999999999999999"), Some("50")));
        assert_eq!(p.page, u64::MAX);
        let (page, _) = paginate(vec![1, 2, 3], p);
        assert!(page.is_empty());
    }
}
