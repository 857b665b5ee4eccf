//! List queries and the pages they return.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Page size the backend uses when none is negotiated.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The input of a paginated list fetch.
///
/// Only `page` and `search_term` go over the wire; `page_size_hint` is what
/// the client expects the server to use, and is needed to derive
/// `total_pages` when the server leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: u32,
    search_term: String,
    page_size_hint: u32,
}

impl ListQuery {
    /// A query for `page` (1-based) with no search filter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Page`] for page 0.
    pub fn new(page: u32) -> Result<Self, Error> {
        if page == 0 {
            return Err(InvalidInputError::Page { value: page }.into());
        }
        Ok(Self {
            page,
            search_term: String::new(),
            page_size_hint: DEFAULT_PAGE_SIZE,
        })
    }

    /// The first page, unfiltered.
    pub fn first() -> Self {
        Self {
            page: 1,
            search_term: String::new(),
            page_size_hint: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the search term. An empty string means "no filter".
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the expected page size. Zero is treated as 1.
    pub fn with_page_size_hint(mut self, hint: u32) -> Self {
        self.page_size_hint = hint.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page_size_hint(&self) -> u32 {
        self.page_size_hint
    }

    /// Move to another page. Values below 1 become 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Clamp `page` into `[1, total_pages]`.
    ///
    /// A `total_pages` of 0 (an empty result) leaves the page alone apart
    /// from the lower bound. Returns `true` if the page changed.
    pub fn clamp_to(&mut self, total_pages: u32) -> bool {
        let before = self.page;
        self.page = self.page.max(1);
        if total_pages > 0 && self.page > total_pages {
            self.page = total_pages;
        }
        before != self.page
    }

    /// Query parameters in wire order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("search".to_string(), self.search_term.clone()),
        ]
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a list, as the client displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// A page with server-provided counts, trusted as-is.
    pub fn new(items: Vec<T>, total: u64, total_pages: u32) -> Self {
        Self {
            items,
            total,
            total_pages,
        }
    }

    /// A page whose `total_pages` is derived from the size hint.
    pub fn with_computed_pages(items: Vec<T>, total: u64, page_size_hint: u32) -> Self {
        let total_pages = Self::pages_for(total, page_size_hint);
        Self::new(items, total, total_pages)
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    /// `ceil(total / page_size)`, saturating at `u32::MAX`.
    pub fn pages_for(total: u64, page_size: u32) -> u32 {
        let pages = total.div_ceil(u64::from(page_size.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_rejected() {
        assert!(ListQuery::new(0).is_err());
        assert_eq!(ListQuery::new(3).unwrap().page(), 3);
    }

    #[test]
    fn clamp_moves_page_to_last_valid() {
        let mut query = ListQuery::new(4).unwrap();
        assert!(query.clamp_to(3));
        assert_eq!(query.page(), 3);
        assert!(!query.clamp_to(3));
    }

    #[test]
    fn clamp_ignores_unknown_page_count() {
        let mut query = ListQuery::new(4).unwrap();
        assert!(!query.clamp_to(0));
        assert_eq!(query.page(), 4);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Page::<()>::pages_for(25, 10), 3);
        assert_eq!(Page::<()>::pages_for(30, 10), 3);
        assert_eq!(Page::<()>::pages_for(0, 10), 0);
        assert_eq!(Page::<()>::pages_for(5, 0), 5);
    }

    #[test]
    fn params_use_wire_names() {
        let query = ListQuery::new(2).unwrap().with_search("jane");
        assert_eq!(
            query.to_params(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "jane".to_string()),
            ]
        );
    }
}
