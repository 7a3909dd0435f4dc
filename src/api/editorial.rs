//! Editorial facade: validates drafts and derives their computed fields.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::ApiError;
use super::models::{Article, ArticleDraft, CreateArticleRequest, UpdateArticleRequest};
use super::validation::validate_article;
use super::EditorialGateway;
use crate::content::{estimate_read_time, generate_slug};

/// Creates, updates, and deletes articles through a gateway.
pub struct ArticleMutations<'client, Gateway>
where
    Gateway: EditorialGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ArticleMutations<'client, Gateway>
where
    Gateway: EditorialGateway,
{
    /// Creates a facade over the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Validates a draft and publishes it now.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without contacting the API when the
    /// draft fails validation; otherwise propagates gateway failures.
    pub async fn create(&self, draft: ArticleDraft) -> Result<Article, ApiError> {
        self.create_at(draft, Utc::now()).await
    }

    /// Validates a draft and publishes it with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// See [`ArticleMutations::create`].
    pub async fn create_at(
        &self,
        draft: ArticleDraft,
        published_at: DateTime<Utc>,
    ) -> Result<Article, ApiError> {
        let request = prepare_article(draft, published_at)?;
        debug!(slug = %request.slug, "creating article");
        self.client.create_article(&request).await
    }

    /// Sends a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the identifier is blank;
    /// otherwise propagates gateway failures.
    pub async fn update(&self, request: UpdateArticleRequest) -> Result<Article, ApiError> {
        require_id(&request.id)?;
        self.client.update_article(&request).await
    }

    /// Deletes an article.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the identifier is blank;
    /// otherwise propagates gateway failures.
    pub async fn delete(&self, article_id: &str) -> Result<(), ApiError> {
        require_id(article_id)?;
        self.client.delete_article(article_id).await
    }
}

/// Validates a draft and fills in slug, read time, and publication time.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when the draft fails validation.
pub fn prepare_article(
    draft: ArticleDraft,
    published_at: DateTime<Utc>,
) -> Result<CreateArticleRequest, ApiError> {
    validate_article(&draft)?;
    Ok(CreateArticleRequest {
        slug: generate_slug(&draft.title),
        read_time: estimate_read_time(&draft.content),
        published_at,
        draft,
    })
}

fn require_id(article_id: &str) -> Result<(), ApiError> {
    if article_id.trim().is_empty() {
        return Err(ApiError::Validation {
            errors: vec!["Article id is required".to_owned()],
        });
    }
    Ok(())
}
