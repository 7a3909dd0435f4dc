//! In-memory article source backed by a JSON catalog.
//!
//! The catalog file holds `{"articles": [...], "categories": [...]}`; the
//! category list is optional and derived from the articles when absent.
//! Filtering and sorting here are the single local implementation of the
//! listing rules, so a catalog and the remote API answer the same
//! [`ArticleQuery`] the same way.

use std::cmp::Reverse;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::filter::{ListingFilter, SortBy};
use super::pagination::{Page, PageSize};
use super::query::ArticleQuery;
use crate::api::error::ApiError;
use crate::api::models::{Article, Category};
use crate::api::ArticleSource;
use crate::content::generate_slug;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    articles: Vec<Article>,
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

/// Articles and categories held in memory.
#[derive(Debug, Clone)]
pub struct Catalog {
    articles: Vec<Article>,
    categories: Vec<Category>,
    now: DateTime<Utc>,
}

/// Builds one category per distinct article label, in first-seen order.
#[must_use]
pub fn derive_categories(articles: &[Article]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    for article in articles {
        if let Some(existing) = categories
            .iter_mut()
            .find(|category| category.name == article.category)
        {
            existing.article_count = existing.article_count.saturating_add(1);
            continue;
        }
        let slug = generate_slug(&article.category);
        categories.push(Category {
            id: slug.clone(),
            name: article.category.clone(),
            slug,
            description: None,
            color: None,
            article_count: 1,
        });
    }
    categories
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches_filter(article: &Article, filter: &ListingFilter, now: DateTime<Utc>) -> bool {
    if let Some(search) = filter.search() {
        let needle = search.to_lowercase();
        let found = contains_folded(&article.title, &needle)
            || contains_folded(&article.excerpt, &needle)
            || contains_folded(&article.content, &needle)
            || article.tags.iter().any(|tag| contains_folded(tag, &needle));
        if !found {
            return false;
        }
    }

    if filter
        .category()
        .is_some_and(|category| article.category != category)
    {
        return false;
    }

    if !filter.tags().is_empty() && !filter.tags().iter().any(|tag| article.has_tag(tag)) {
        return false;
    }

    filter
        .date_range()
        .cutoff(now)
        .is_none_or(|cutoff| article.published_at >= cutoff)
}

fn matches_query(article: &Article, query: &ArticleQuery, now: DateTime<Utc>) -> bool {
    matches_filter(article, &query.filter, now)
        && query.featured.is_none_or(|featured| article.featured == featured)
        && query.status.is_none_or(|status| article.status == status)
        && query
            .author
            .as_deref()
            .is_none_or(|author| article.author == author)
}

fn sort_articles(articles: &mut [Article], sort_by: SortBy) {
    match sort_by {
        SortBy::Latest => articles.sort_by_key(|article| Reverse(article.published_at)),
        SortBy::Oldest => articles.sort_by_key(|article| article.published_at),
        SortBy::Popular => articles.sort_by_key(|article| {
            Reverse((article.likes.unwrap_or(0), article.views.unwrap_or(0)))
        }),
        SortBy::Views => articles.sort_by_key(|article| Reverse(article.views.unwrap_or(0))),
        SortBy::Featured => {
            articles.sort_by_key(|article| Reverse((article.featured, article.published_at)));
        }
    }
}

impl Catalog {
    /// Creates a catalog; categories are derived when not supplied.
    #[must_use]
    pub fn new(articles: Vec<Article>, categories: Option<Vec<Category>>) -> Self {
        let resolved = categories.unwrap_or_else(|| derive_categories(&articles));
        Self {
            articles,
            categories: resolved,
            now: Utc::now(),
        }
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the JSON does not match the catalog
    /// shape.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|error| ApiError::Decode {
            message: format!("catalog is malformed: {error}"),
        })?;
        Ok(Self::new(file.articles, file.categories))
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] when the file cannot be read and
    /// [`ApiError::Decode`] when it is malformed.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let json = std::fs::read_to_string(path).map_err(|error| ApiError::Io {
            message: format!("failed to read catalog {}: {error}", path.display()),
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            articles = catalog.articles.len(),
            categories = catalog.categories.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Fixes the instant date ranges are measured from.
    #[must_use]
    pub const fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Every article, in catalog order.
    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Articles matching the query, sorted, across all pages.
    #[must_use]
    pub fn matching(&self, query: &ArticleQuery) -> Vec<Article> {
        let mut selected: Vec<Article> = self
            .articles
            .iter()
            .filter(|article| matches_query(article, query, self.now))
            .cloned()
            .collect();
        sort_articles(&mut selected, query.filter.sort_by());
        selected
    }

    /// Serves one page of matching articles.
    ///
    /// The page size comes from `query.limit`, falling back to the default.
    /// Out-of-range pages are clamped to the last page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] for a zero limit.
    pub fn page(&self, query: &ArticleQuery) -> Result<Page<Article>, ApiError> {
        let page_size = query
            .limit
            .map_or_else(|| Ok(PageSize::default()), PageSize::new)?;
        let selected = self.matching(query);
        let page = Page::paginate(selected, query.filter.page(), page_size);
        debug!(
            requested = query.filter.page(),
            served = page.page_number(),
            total = page.total_items(),
            "served catalog page"
        );
        Ok(page)
    }

    fn find_category(&self, slug: &str) -> Result<&Category, ApiError> {
        self.categories
            .iter()
            .find(|category| category.slug == slug)
            .ok_or_else(|| ApiError::not_found(format!("category `{slug}`")))
    }
}

#[async_trait]
impl ArticleSource for Catalog {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>, ApiError> {
        self.page(query)
    }

    async fn article(&self, slug: &str) -> Result<Article, ApiError> {
        self.articles
            .iter()
            .find(|article| article.slug == slug)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("article `{slug}`")))
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories.clone())
    }

    async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        self.find_category(slug).cloned()
    }

    async fn category_articles(
        &self,
        slug: &str,
        query: &ArticleQuery,
    ) -> Result<Page<Article>, ApiError> {
        let category = self.find_category(slug)?;
        let mut scoped = query.clone();
        scoped.filter = query.filter.clone().with_category(category.name.as_str());
        self.page(&scoped)
    }

    async fn related_articles(
        &self,
        article_id: &str,
        limit: u32,
    ) -> Result<Vec<Article>, ApiError> {
        let anchor = self
            .articles
            .iter()
            .find(|article| article.id == article_id)
            .ok_or_else(|| ApiError::not_found(format!("article with id `{article_id}`")))?;
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .articles
            .iter()
            .filter(|article| article.category == anchor.category && article.id != anchor.id)
            .take(take)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::{derive_categories, Catalog};
    use crate::api::error::ApiError;
    use crate::api::models::test_support::{article, articles_in_category, reference_now};
    use crate::api::models::ArticleStatus;
    use crate::api::ArticleSource;
    use crate::listing::{ArticleQuery, DateRange, ListingFilter, SortBy};

    const AI: &str = "Artificial Intelligence";

    #[fixture]
    fn catalog() -> Catalog {
        let mut articles = articles_in_category(10, AI);

        let mut gpt = article("gpt", "OpenAI Releases GPT-5", AI);
        gpt.tags = vec!["GPT-5".to_owned(), "LLM".to_owned()];
        gpt.likes = Some(900);
        gpt.views = Some(10);
        gpt.featured = true;
        gpt.published_at = reference_now() - Duration::days(40);
        articles.push(gpt);

        let mut phone = article("phone", "Foldable phones return", "Mobile Tech");
        phone.tags = vec!["Hardware".to_owned()];
        phone.likes = Some(900);
        phone.views = Some(5000);
        phone.author = "Gadget Desk".to_owned();
        phone.status = ArticleStatus::Draft;
        phone.published_at = reference_now() - Duration::days(400);
        articles.push(phone);

        Catalog::new(articles, None).with_now(reference_now())
    }

    fn query(filter: ListingFilter) -> ArticleQuery {
        ArticleQuery::from_filter(filter)
    }

    #[rstest]
    fn category_pages_hold_nine_then_the_rest(catalog: Catalog) {
        let filter = ListingFilter::default().with_category(AI);

        let first = catalog.page(&query(filter.clone())).expect("page 1");
        let second = catalog.page(&query(filter.with_page(2))).expect("page 2");

        assert_eq!(first.items().len(), 9);
        assert_eq!(first.total_items(), 11);
        assert_eq!(second.items().len(), 2);
        assert_eq!(second.total_pages(), 2);
    }

    #[rstest]
    fn out_of_range_pages_clamp_to_the_last_page(catalog: Catalog) {
        let page = catalog
            .page(&query(ListingFilter::default().with_category(AI).with_page(3)))
            .expect("page");

        assert_eq!(page.page_number(), 2);
        assert!(!page.is_empty());
    }

    #[rstest]
    #[case("gpt")]
    #[case("GPT-5")]
    #[case("llm")]
    fn search_is_case_insensitive_across_fields(catalog: Catalog, #[case] search: &str) {
        let matched = catalog.matching(&query(ListingFilter::default().with_search(search)));

        assert_eq!(
            matched.iter().map(|item| item.id.as_str()).collect::<Vec<_>>(),
            vec!["gpt"]
        );
    }

    #[rstest]
    fn tags_match_any_selected_tag(catalog: Catalog) {
        let matched =
            catalog.matching(&query(ListingFilter::default().with_tags(["Hardware", "LLM"])));
        assert_eq!(matched.len(), 2);
    }

    #[rstest]
    #[case(DateRange::Today, 1)]
    #[case(DateRange::Week, 7)]
    #[case(DateRange::Month, 10)]
    #[case(DateRange::Quarter, 11)]
    #[case(DateRange::AllTime, 12)]
    fn date_ranges_use_the_injected_clock(
        catalog: Catalog,
        #[case] range: DateRange,
        #[case] expected: usize,
    ) {
        let matched = catalog.matching(&query(ListingFilter::default().with_date_range(range)));
        assert_eq!(matched.len(), expected);
    }

    #[rstest]
    fn popular_orders_by_likes_then_views(catalog: Catalog) {
        let matched =
            catalog.matching(&query(ListingFilter::default().with_sort_by(SortBy::Popular)));
        let leaders: Vec<&str> = matched.iter().take(2).map(|item| item.id.as_str()).collect();
        assert_eq!(leaders, vec!["phone", "gpt"]);
    }

    #[rstest]
    fn featured_sort_puts_featured_first(catalog: Catalog) {
        let matched =
            catalog.matching(&query(ListingFilter::default().with_sort_by(SortBy::Featured)));
        assert_eq!(matched.first().map(|item| item.id.as_str()), Some("gpt"));
        assert_eq!(matched.get(1).map(|item| item.id.as_str()), Some("1"));
    }

    #[rstest]
    fn oldest_sort_reverses_latest(catalog: Catalog) {
        let latest = catalog.matching(&query(ListingFilter::default()));
        let oldest =
            catalog.matching(&query(ListingFilter::default().with_sort_by(SortBy::Oldest)));

        assert_eq!(latest.first().map(|item| item.id.as_str()), Some("1"));
        assert_eq!(oldest.first().map(|item| item.id.as_str()), Some("phone"));
    }

    #[rstest]
    fn server_only_parameters_filter_exactly(catalog: Catalog) {
        let mut featured = ArticleQuery::default().featured_only();
        assert_eq!(catalog.matching(&featured).len(), 1);

        featured.featured = None;
        featured.status = Some(ArticleStatus::Draft);
        featured.author = Some("Gadget Desk".to_owned());
        assert_eq!(catalog.matching(&featured).len(), 1);
    }

    #[rstest]
    fn zero_limit_is_invalid(catalog: Catalog) {
        assert!(matches!(
            catalog.page(&ArticleQuery::default().with_limit(0)),
            Err(ApiError::InvalidPagination { .. })
        ));
    }

    #[test]
    fn categories_are_derived_with_counts() {
        let articles = vec![
            article("1", "One story", AI),
            article("2", "Two story", "Mobile Tech"),
            article("3", "Three story", AI),
        ];

        let categories = derive_categories(&articles);

        assert_eq!(categories.len(), 2);
        let first = categories.first().expect("first category");
        assert_eq!(first.slug, "artificial-intelligence");
        assert_eq!(first.article_count, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_report_not_found(catalog: Catalog) {
        assert_eq!(
            catalog.article("nope").await,
            Err(ApiError::not_found("article `nope`"))
        );
        assert!(matches!(
            catalog.category("nope").await,
            Err(ApiError::NotFound { .. })
        ));
        assert!(catalog.related_articles("nope", 3).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn category_articles_scope_by_slug(catalog: Catalog) {
        let page = catalog
            .category_articles("mobile-tech", &ArticleQuery::default())
            .await
            .expect("category listing");

        assert_eq!(page.total_items(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn related_articles_share_the_category(catalog: Catalog) {
        let related = catalog
            .related_articles("gpt", 3)
            .await
            .expect("related articles");

        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|item| item.category == AI && item.id != "gpt"));
    }

    #[test]
    fn catalog_json_may_omit_categories() {
        let catalog = Catalog::from_json(
            r#"{"articles":[{"id":"1","slug":"a","title":"A title","category":"Web3",
                "publishedAt":"2025-01-10"}]}"#,
        )
        .expect("catalog should parse");

        assert_eq!(catalog.articles().len(), 1);
    }

    #[test]
    fn malformed_catalogs_are_decode_errors() {
        assert!(matches!(
            Catalog::from_json("{\"articles\": 3}"),
            Err(ApiError::Decode { .. })
        ));
    }
}
