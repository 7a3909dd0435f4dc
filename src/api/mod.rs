//! Content API access.
//!
//! The traits in this module are the seams between listing logic and the
//! transport. [`HttpApiClient`] implements all of them against the JSON API;
//! the local [`Catalog`](crate::listing::Catalog) implements
//! [`ArticleSource`] over an in-memory article set.

pub mod error;
pub mod models;
pub mod validation;

mod client;
mod editorial;
mod engagement;

pub use client::{ApiClientConfig, HttpApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use editorial::ArticleMutations;
pub use engagement::Engagement;
pub use error::{ApiError, ErrorKind};
pub use models::{
    Article, ArticleAnalytics, ArticleDraft, ArticleStatus, Category, ContactForm,
    CreateArticleRequest, HealthStatus, NewsletterFrequency, NewsletterPreferences,
    NewsletterSubscription, UpdateArticleRequest,
};

use async_trait::async_trait;

use crate::listing::{ArticleQuery, Page};

/// Read access to articles and categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Lists one page of articles matching the query.
    ///
    /// The returned page reports the page number actually served, which may
    /// differ from the requested one when it was out of range.
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>, ApiError>;

    /// Looks up one article by slug.
    async fn article(&self, slug: &str) -> Result<Article, ApiError>;

    /// Lists every category.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Looks up one category by slug.
    async fn category(&self, slug: &str) -> Result<Category, ApiError>;

    /// Lists one page of articles in the category identified by `slug`.
    async fn category_articles(
        &self,
        slug: &str,
        query: &ArticleQuery,
    ) -> Result<Page<Article>, ApiError>;

    /// Lists up to `limit` articles related to the article with `article_id`.
    async fn related_articles(
        &self,
        article_id: &str,
        limit: u32,
    ) -> Result<Vec<Article>, ApiError>;
}

/// Write access used by editors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EditorialGateway: Send + Sync {
    /// Creates an article.
    async fn create_article(&self, request: &CreateArticleRequest) -> Result<Article, ApiError>;

    /// Updates an article.
    async fn update_article(&self, request: &UpdateArticleRequest) -> Result<Article, ApiError>;

    /// Deletes an article by identifier.
    async fn delete_article(&self, article_id: &str) -> Result<(), ApiError>;
}

/// Reader engagement endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementGateway: Send + Sync {
    /// Subscribes an address to the newsletter.
    async fn subscribe_newsletter(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<(), ApiError>;

    /// Removes an address from the newsletter.
    async fn unsubscribe_newsletter(&self, email: &str) -> Result<(), ApiError>;

    /// Sends a contact form.
    async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError>;

    /// Records one view of an article.
    async fn track_article_view(&self, article_id: &str) -> Result<(), ApiError>;
}
