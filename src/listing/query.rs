//! Query-string encoding of listing filters.
//!
//! Parameter names are `q`, `category`, `tags`, `dateRange`, `sortBy`, and
//! `page` for the filter, followed by `limit`, `featured`, `status`, and
//! `author` for server-side queries. Tags are always repeated `tags`
//! parameters, one per tag. Decoding is lenient: unknown parameters are
//! ignored, unknown enum values fall back to defaults, and for repeated
//! scalar parameters the first occurrence wins.

use url::form_urlencoded;

use super::filter::{DateRange, ListingFilter, SortBy};
use crate::api::models::ArticleStatus;

/// Query parameter carrying the search text.
pub const SEARCH_PARAM: &str = "q";
/// Query parameter carrying the category label.
pub const CATEGORY_PARAM: &str = "category";
/// Repeated query parameter carrying tags.
pub const TAGS_PARAM: &str = "tags";
/// Query parameter carrying the date range.
pub const DATE_RANGE_PARAM: &str = "dateRange";
/// Query parameter carrying the sort order.
pub const SORT_BY_PARAM: &str = "sortBy";
/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

fn filter_pairs(filter: &ListingFilter, always_emit_page: bool) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = filter.search() {
        pairs.push((SEARCH_PARAM, search.to_owned()));
    }
    if let Some(category) = filter.category() {
        pairs.push((CATEGORY_PARAM, category.to_owned()));
    }
    pairs.extend(filter.tags().iter().map(|tag| (TAGS_PARAM, tag.clone())));
    if let Some(range) = filter.date_range().as_param() {
        pairs.push((DATE_RANGE_PARAM, range.to_owned()));
    }
    pairs.push((SORT_BY_PARAM, filter.sort_by().as_param().to_owned()));
    if always_emit_page || filter.page() > 1 {
        pairs.push((PAGE_PARAM, filter.page().to_string()));
    }
    pairs
}

fn encode(pairs: &[(&'static str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// Encodes a filter as a query string without the leading `?`.
///
/// Page 1 is implied and omitted.
///
/// # Examples
///
/// ```
/// use techledger::listing::{serialize, ListingFilter};
///
/// let filter = ListingFilter::default()
///     .with_search("gpt 5")
///     .with_tag("AI")
///     .with_tag("LLM")
///     .with_page(2);
/// assert_eq!(serialize(&filter), "q=gpt+5&tags=AI&tags=LLM&sortBy=latest&page=2");
/// ```
#[must_use]
pub fn serialize(filter: &ListingFilter) -> String {
    encode(&filter_pairs(filter, false))
}

#[derive(Default)]
struct RawParams {
    search: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    date_range: Option<String>,
    sort_by: Option<String>,
    page: Option<String>,
    limit: Option<String>,
    featured: Option<String>,
    status: Option<String>,
    author: Option<String>,
}

fn keep_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

impl RawParams {
    fn parse(query: &str) -> Self {
        let trimmed = query.strip_prefix('?').unwrap_or(query);
        let mut raw = Self::default();
        for (name, value) in form_urlencoded::parse(trimmed.as_bytes()) {
            let owned = value.into_owned();
            match name.as_ref() {
                SEARCH_PARAM => keep_first(&mut raw.search, owned),
                CATEGORY_PARAM => keep_first(&mut raw.category, owned),
                TAGS_PARAM => raw.tags.push(owned),
                DATE_RANGE_PARAM => keep_first(&mut raw.date_range, owned),
                SORT_BY_PARAM => keep_first(&mut raw.sort_by, owned),
                PAGE_PARAM => keep_first(&mut raw.page, owned),
                "limit" => keep_first(&mut raw.limit, owned),
                "featured" => keep_first(&mut raw.featured, owned),
                "status" => keep_first(&mut raw.status, owned),
                "author" => keep_first(&mut raw.author, owned),
                _ => {}
            }
        }
        raw
    }

    fn filter(&self) -> ListingFilter {
        let page = self
            .page
            .as_deref()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(1);

        ListingFilter::default()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(self.category.clone().unwrap_or_default())
            .with_tags(self.tags.iter().cloned())
            .with_date_range(
                self.date_range
                    .as_deref()
                    .map_or(DateRange::AllTime, DateRange::from_param),
            )
            .with_sort_by(
                self.sort_by
                    .as_deref()
                    .map_or(SortBy::Latest, SortBy::from_param),
            )
            .with_page(page)
    }
}

/// Decodes a query string (with or without a leading `?`) into a filter.
///
/// Missing parameters take their defaults: no search, no category, no tags,
/// all time, latest first, page 1.
#[must_use]
pub fn deserialize(query: &str) -> ListingFilter {
    RawParams::parse(query).filter()
}

/// A listing filter plus the parameters only the API understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Reader-facing selection.
    pub filter: ListingFilter,
    /// Page size requested from the server.
    pub limit: Option<u32>,
    /// Restrict to featured (or non-featured) articles.
    pub featured: Option<bool>,
    /// Restrict to a publication status.
    pub status: Option<ArticleStatus>,
    /// Restrict to one author.
    pub author: Option<String>,
}

impl ArticleQuery {
    /// Wraps a filter with no server-only parameters.
    #[must_use]
    pub fn from_filter(filter: ListingFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Sets the page size requested from the server.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restricts the query to featured articles.
    #[must_use]
    pub const fn featured_only(mut self) -> Self {
        self.featured = Some(true);
        self
    }

    /// Name/value pairs in wire order; the page is always present.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = filter_pairs(&self.filter, true);
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("featured", featured.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if let Some(author) = self.author.as_deref().filter(|value| !value.is_empty()) {
            pairs.push(("author", author.to_owned()));
        }
        pairs
    }

    /// Encodes the query without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        encode(&self.pairs())
    }

    /// Decodes a server-side query. Unparseable values are dropped.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let raw = RawParams::parse(query);
        Self {
            filter: raw.filter(),
            limit: raw.limit.as_deref().and_then(|value| value.parse().ok()),
            featured: raw.featured.as_deref().and_then(|value| value.parse().ok()),
            status: raw.status.as_deref().and_then(ArticleStatus::from_param),
            author: raw.author.filter(|value| !value.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{deserialize, serialize, ArticleQuery};
    use crate::api::models::ArticleStatus;
    use crate::listing::filter::{DateRange, ListingFilter, SortBy};

    #[rstest]
    #[case::default(ListingFilter::default())]
    #[case::search(ListingFilter::default().with_search("gpt & friends = 100%"))]
    #[case::category(ListingFilter::default().with_category("Artificial Intelligence"))]
    #[case::tags(ListingFilter::default().with_tags(["AI", "GPT-5", "a,b"]))]
    #[case::date(ListingFilter::default().with_date_range(DateRange::Quarter))]
    #[case::sort(ListingFilter::default().with_sort_by(SortBy::Views))]
    #[case::page(ListingFilter::default().with_page(7))]
    #[case::everything(
        ListingFilter::default()
            .with_search("rust")
            .with_category("Programming")
            .with_tag("async")
            .with_date_range(DateRange::Today)
            .with_sort_by(SortBy::Popular)
            .with_page(2)
    )]
    fn deserialize_inverts_serialize(#[case] filter: ListingFilter) {
        assert_eq!(deserialize(&serialize(&filter)), filter);
    }

    #[test]
    fn tags_are_repeated_parameters() {
        let filter = ListingFilter::default().with_tags(["b", "a"]);
        assert_eq!(serialize(&filter), "tags=a&tags=b&sortBy=latest");
    }

    #[test]
    fn comma_joined_tags_are_not_split() {
        let filter = deserialize("tags=AI%2CML");
        assert_eq!(
            filter.tags().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["AI,ML"]
        );
    }

    #[rstest]
    #[case("")]
    #[case("?")]
    #[case("unknown=1")]
    fn empty_queries_yield_defaults(#[case] query: &str) {
        assert_eq!(deserialize(query), ListingFilter::default());
    }

    #[rstest]
    #[case("page=0", 1)]
    #[case("page=abc", 1)]
    #[case("page=-2", 1)]
    #[case("page=4&page=9", 4)]
    fn page_values_are_coerced(#[case] query: &str, #[case] expected: u32) {
        assert_eq!(deserialize(query).page(), expected);
    }

    #[test]
    fn unknown_enum_values_use_defaults() {
        let filter = deserialize("?dateRange=decade&sortBy=random&category=");

        assert_eq!(filter.date_range(), DateRange::AllTime);
        assert_eq!(filter.sort_by(), SortBy::Latest);
        assert_eq!(filter.category(), None);
    }

    #[test]
    fn article_query_appends_server_parameters() {
        let query = ArticleQuery {
            filter: ListingFilter::default().with_category("Mobile"),
            limit: Some(9),
            featured: Some(true),
            status: Some(ArticleStatus::Published),
            author: Some("Jane Doe".to_owned()),
        };

        assert_eq!(
            query.to_query_string(),
            "category=Mobile&sortBy=latest&page=1&limit=9&featured=true&status=published&author=Jane+Doe"
        );
        assert_eq!(ArticleQuery::parse(&query.to_query_string()), query);
    }

    #[test]
    fn article_query_drops_unparseable_values() {
        let query = ArticleQuery::parse("limit=many&featured=maybe&status=gone");

        assert_eq!(query.limit, None);
        assert_eq!(query.featured, None);
        assert_eq!(query.status, None);
    }
}
