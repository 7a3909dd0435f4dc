//! Page counts, page slices, and the `Page` result type.
//!
//! Page numbers are 1-based throughout. A page beyond the last one slices
//! to nothing; clamping to the last valid page is left to whoever serves
//! the listing (see [`Page::paginate`]).

use std::num::NonZeroU32;

use crate::api::error::ApiError;

/// Default number of articles per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Number of items per page; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Validates a page size.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] when `size` is zero.
    pub fn new(size: u32) -> Result<Self, ApiError> {
        NonZeroU32::new(size)
            .map(Self)
            .ok_or_else(|| ApiError::InvalidPagination {
                message: "page size must be at least 1".to_owned(),
            })
    }

    /// Returns the size as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    fn as_usize(self) -> usize {
        usize::try_from(self.get()).unwrap_or(usize::MAX)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

/// Number of pages needed for `total_items`; always at least one.
///
/// # Examples
///
/// ```
/// use techledger::listing::{compute_pages, PageSize};
///
/// let ten = PageSize::new(10).expect("non-zero size");
/// assert_eq!(compute_pages(25, ten), 3);
/// assert_eq!(compute_pages(0, ten), 1);
/// ```
#[must_use]
pub fn compute_pages(total_items: u64, page_size: PageSize) -> u32 {
    let pages = total_items.div_ceil(u64::from(page_size.get())).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamps `page` into `1..=total_pages`.
#[must_use]
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Returns the items on `page`, or an empty slice past the end.
///
/// Page 0 is treated as page 1.
#[must_use]
pub fn slice<T>(items: &[T], page: u32, page_size: PageSize) -> &[T] {
    let size = page_size.as_usize();
    let index = usize::try_from(page.max(1) - 1).unwrap_or(usize::MAX);
    let start = index.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page_number: u32,
    page_size: PageSize,
    total_items: u64,
    total_pages: u32,
}

impl<T> Page<T> {
    /// Builds a page from items already selected for `page_number`.
    ///
    /// Extra items beyond `page_size` are dropped and `total_pages` is
    /// derived from `total_items`.
    #[must_use]
    pub fn new(mut items: Vec<T>, page_number: u32, page_size: PageSize, total_items: u64) -> Self {
        items.truncate(page_size.as_usize());
        Self {
            items,
            page_number: page_number.max(1),
            page_size,
            total_items,
            total_pages: compute_pages(total_items, page_size),
        }
    }

    /// Serves `requested_page` out of the full result set.
    ///
    /// Out-of-range requests are served the nearest valid page, and the
    /// returned page reports the page number actually served.
    #[must_use]
    pub fn paginate(all: Vec<T>, requested_page: u32, page_size: PageSize) -> Self {
        let total_items = u64::try_from(all.len()).unwrap_or(u64::MAX);
        let served = clamp_page(requested_page, compute_pages(total_items, page_size));
        let size = page_size.as_usize();
        let skip = usize::try_from(served - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(size);
        let items = all.into_iter().skip(skip).take(size).collect();
        Self::new(items, served, page_size, total_items)
    }

    /// Items on this page, in listing order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based number of this page.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of items across every page.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages; at least one.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    /// Returns true when the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts the items while keeping the page position.
    #[must_use]
    pub fn map<U>(self, convert: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(convert).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
