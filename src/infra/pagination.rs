//! Pagination parameters and the page they resolve to.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Page used when `page` is missing or unusable.
pub const DEFAULT_PAGE: i64 = 0;

/// Page size used when `pageSize` is missing or unusable.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Pagination parameters as they arrive in the query string.
///
/// Values are kept raw so that a malformed number falls back to its default
/// instead of rejecting the request. Build it from the raw query pairs with
/// [`FromIterator`]; a repeated key keeps its first value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// The 0-indexed page to fetch. Defaults to 0.
    #[param(value_type = Option<i64>)]
    page: Option<String>,
    /// The number of elements per page. Defaults to 10.
    #[param(value_type = Option<i64>)]
    page_size: Option<String>,
}

impl PaginationParams {
    /// Resolves the raw parameters, substituting defaults for anything
    /// missing, unparseable or negative.
    pub fn page(&self) -> Page {
        Page::new(
            parse_or(self.page.as_deref(), DEFAULT_PAGE),
            parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        )
    }
}

impl FromIterator<(String, String)> for PaginationParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    params.page.get_or_insert(value);
                }
                "pageSize" => {
                    params.page_size.get_or_insert(value);
                }
                _ => {}
            }
        }
        params
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|raw| raw.parse::<i64>().ok())
        .filter(|n| *n >= 0)
        .unwrap_or(default)
}

/// A zero-based page of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    page: i64,
    page_size: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

impl Page {
    /// A page with the given index and size.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.page_size)
    }
}
