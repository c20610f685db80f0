//! Pagination helpers
//!
//! Turns a page/item-per-page request into an offset and limit, and derives the metadata that
//! goes along with every paginated list

use serde::Serialize;

/// Page used when none is requested
pub const DEFAULT_PAGE: u32 = 1;

/// Amount of items per page used when none is requested
pub const DEFAULT_ITEM_PER_PAGE: u32 = 10;

/// A requested page
///
/// Both values are at least 1, use [`PaginationParams::new`] to construct it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number, starting at 1
    page: u32,

    /// Amount of items per page
    item_per_page: u32,
}

impl PaginationParams {
    /// Create pagination parameters
    ///
    /// Fails with a human readable message when any of the values is 0
    pub fn new(page: u32, item_per_page: u32) -> Result<Self, &'static str> {
        if page < 1 {
            return Err("`page` must be at least 1");
        }

        if item_per_page < 1 {
            return Err("`item_per_page` must be at least 1");
        }

        Ok(Self {
            page,
            item_per_page,
        })
    }

    /// The requested page, starting at 1
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The requested amount of items per page
    #[must_use]
    pub fn item_per_page(&self) -> u32 {
        self.item_per_page
    }

    /// Amount of rows to skip before the requested page starts
    ///
    /// Saturates at `i64::MAX`, a page that far out is simply empty
    #[must_use]
    pub fn offset(&self) -> i64 {
        let offset = u64::from(self.page - 1) * u64::from(self.item_per_page);

        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    /// Maximum amount of rows on the requested page
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.item_per_page)
    }
}

/// Metadata of a paginated list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Total amount of matching items, over all pages
    pub total_item: u64,

    /// The current page
    pub page: u32,

    /// Amount of items per page
    pub item_per_page: u32,

    /// Total amount of pages, 0 when there are no items at all
    pub total_page: u64,
}

impl PaginationMeta {
    /// Derive the metadata from the total count and the requested page
    #[must_use]
    pub fn new(total_item: u64, params: &PaginationParams) -> Self {
        Self {
            total_item,
            page: params.page,
            item_per_page: params.item_per_page,
            total_page: total_item.div_ceil(u64::from(params.item_per_page)),
        }
    }
}
