//! Listing filter value and the state container that applies updates.
//!
//! [`ListingFilter`] is an immutable-style value with `with_*` builders.
//! [`FilterState`] owns the current filter and applies [`FilterUpdate`]s with
//! merge semantics: fields left unset keep their value, touching any field
//! other than the page sends the reader back to page 1, and selecting the
//! category that is already selected clears it.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Months, Utc};

/// Publication window applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRange {
    /// No restriction.
    #[default]
    AllTime,
    /// Published within the last day.
    Today,
    /// Published within the last seven days.
    Week,
    /// Published within the last month.
    Month,
    /// Published within the last three months.
    Quarter,
    /// Published within the last year.
    Year,
}

impl DateRange {
    /// Query parameter value, or `None` for [`DateRange::AllTime`].
    #[must_use]
    pub const fn as_param(self) -> Option<&'static str> {
        match self {
            Self::AllTime => None,
            Self::Today => Some("today"),
            Self::Week => Some("week"),
            Self::Month => Some("month"),
            Self::Quarter => Some("quarter"),
            Self::Year => Some("year"),
        }
    }

    /// Parses a query parameter value; anything unrecognised is
    /// [`DateRange::AllTime`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "today" => Self::Today,
            "week" => Self::Week,
            "month" => Self::Month,
            "quarter" => Self::Quarter,
            "year" => Self::Year,
            _ => Self::AllTime,
        }
    }

    /// Earliest publication time admitted by this range, relative to `now`.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::AllTime => None,
            Self::Today => now.checked_sub_signed(Duration::days(1)),
            Self::Week => now.checked_sub_signed(Duration::days(7)),
            Self::Month => now.checked_sub_months(Months::new(1)),
            Self::Quarter => now.checked_sub_months(Months::new(3)),
            Self::Year => now.checked_sub_months(Months::new(12)),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllTime => "All time",
            Self::Today => "Today",
            Self::Week => "This week",
            Self::Month => "This month",
            Self::Quarter => "This quarter",
            Self::Year => "This year",
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
    /// Most liked first, ties broken by views.
    Popular,
    /// Featured articles first, then newest.
    Featured,
    /// Most viewed first.
    Views,
}

impl SortBy {
    /// Query parameter value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
            Self::Featured => "featured",
            Self::Views => "views",
        }
    }

    /// Parses a query parameter value; anything unrecognised is
    /// [`SortBy::Latest`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            "featured" => Self::Featured,
            "views" => Self::Views,
            _ => Self::Latest,
        }
    }
}

/// The reader's current listing selection.
///
/// # Examples
///
/// ```
/// use techledger::listing::{ListingFilter, SortBy};
///
/// let filter = ListingFilter::default()
///     .with_category("Artificial Intelligence")
///     .with_tag("GPT-5")
///     .with_sort_by(SortBy::Popular);
/// assert!(filter.has_active_filters());
/// assert_eq!(filter.page(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingFilter {
    search: Option<String>,
    category: Option<String>,
    tags: BTreeSet<String>,
    date_range: DateRange,
    sort_by: SortBy,
    page: u32,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            tags: BTreeSet::new(),
            date_range: DateRange::AllTime,
            sort_by: SortBy::Latest,
            page: 1,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl ListingFilter {
    /// Sets the free-text search; an empty string clears it.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(search.into());
        self
    }

    /// Sets the category label; an empty string clears it.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    /// Adds one tag; empty tags are ignored.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        if let Some(tag_value) = non_empty(tag.into()) {
            self.tags.insert(tag_value);
        }
        self
    }

    /// Replaces the tag set; empty tags are ignored.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().filter_map(|tag| non_empty(tag.into())).collect();
        self
    }

    /// Sets the publication window.
    #[must_use]
    pub const fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Sets the page; zero is raised to 1.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Free-text search, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Selected category label, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Selected tags in lexical order.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Publication window.
    #[must_use]
    pub const fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Ordering.
    #[must_use]
    pub const fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Whether a category, tag, or date range narrows the listing.
    ///
    /// Search text and ordering do not count.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some() || !self.tags.is_empty() || self.date_range != DateRange::AllTime
    }
}

/// A partial change to a [`ListingFilter`].
///
/// Unset fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    search: Option<String>,
    category: Option<String>,
    tags: Option<BTreeSet<String>>,
    date_range: Option<DateRange>,
    sort_by: Option<SortBy>,
    page: Option<u32>,
}

impl FilterUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text; an empty string clears it.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Selects a category; selecting the current one clears it.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the publication window.
    #[must_use]
    pub const fn date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = Some(date_range);
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Moves to a page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Returns true when the update touches anything besides the page.
    #[must_use]
    pub const fn resets_page(&self) -> bool {
        self.search.is_some()
            || self.category.is_some()
            || self.tags.is_some()
            || self.date_range.is_some()
            || self.sort_by.is_some()
    }
}

/// Owns the current [`ListingFilter`] and applies updates to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    filter: ListingFilter,
}

impl FilterState {
    /// Starts from an existing filter, e.g. one parsed from a URL.
    #[must_use]
    pub const fn new(filter: ListingFilter) -> Self {
        Self { filter }
    }

    /// The current filter.
    #[must_use]
    pub const fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    /// Replaces the whole filter.
    pub fn replace(&mut self, filter: ListingFilter) {
        self.filter = filter;
    }

    /// Applies a partial update and returns the resulting filter.
    pub fn apply(&mut self, update: FilterUpdate) -> &ListingFilter {
        let resets_page = update.resets_page();
        let FilterUpdate {
            search,
            category,
            tags,
            date_range,
            sort_by,
            page,
        } = update;

        if let Some(search_text) = search {
            self.filter.search = non_empty(search_text);
        }
        if let Some(selected) = category {
            self.filter.category = if self.filter.category.as_deref() == Some(selected.as_str()) {
                None
            } else {
                non_empty(selected)
            };
        }
        if let Some(tag_set) = tags {
            self.filter.tags = tag_set.into_iter().filter(|tag| !tag.is_empty()).collect();
        }
        if let Some(range) = date_range {
            self.filter.date_range = range;
        }
        if let Some(order) = sort_by {
            self.filter.sort_by = order;
        }

        if resets_page {
            self.filter.page = 1;
        }
        if let Some(requested) = page {
            self.filter.page = requested.max(1);
        }
        &self.filter
    }

    /// Adds the tag if absent, removes it if present, and returns to page 1.
    pub fn toggle_tag(&mut self, tag: &str) -> &ListingFilter {
        if tag.is_empty() {
            return &self.filter;
        }
        if !self.filter.tags.remove(tag) {
            self.filter.tags.insert(tag.to_owned());
        }
        self.filter.page = 1;
        &self.filter
    }

    /// Resets every field to its default.
    pub fn clear_all(&mut self) -> &ListingFilter {
        self.filter = ListingFilter::default();
        &self.filter
    }

    /// Records the page actually served.
    pub fn set_served_page(&mut self, page: u32) {
        self.filter.page = page.max(1);
    }

    /// Pulls the page back into `1..=total_pages`.
    pub fn clamp_page(&mut self, total_pages: u32) {
        self.filter.page = super::pagination::clamp_page(self.filter.page, total_pages);
    }
}
