//! `reqwest` implementation of the API gateways.
//!
//! Every request carries `Content-Type: application/json` and, when a key is
//! configured, `Authorization: Bearer <key>`. Single resources come wrapped
//! in a `{success, data}` envelope; list endpoints return
//! `{data, pagination}` either directly or inside that envelope.

mod error_mapping;
mod http_utils;


use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use self::error_mapping::{map_decode_error, map_status_error, map_transport_error};
use self::http_utils::extract_api_message;
use super::error::ApiError;
use super::models::{
    ApiEnvelope, ApiPageBody, Article, ArticleAnalytics, Category, ContactForm,
    CreateArticleRequest, HealthStatus, NewsletterSubscription, UpdateArticleRequest,
};
use super::{ArticleSource, EditorialGateway, EngagementGateway};
use crate::listing::{ArticleQuery, Page, PageSize};

/// API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for [`HttpApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL that endpoint paths are appended to.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiClientConfig {
    /// Builds a configuration for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the bearer token; blank keys are ignored.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the content API.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpApiClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the base URL cannot be parsed or
    /// cannot carry a path, and [`ApiError::Configuration`] when the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ApiClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|error| ApiError::InvalidUrl(format!("{}: {error}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ApiError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn endpoint_with_query(
        &self,
        segments: &[&str],
        pairs: &[(&'static str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(segments)?;
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(name, value)| (*name, value.as_str())));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = self.api_key.as_deref() {
            return builder.bearer_auth(key);
        }
        builder
    }

    async fn execute(
        operation: &str,
        resource: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "API responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(
            operation,
            resource,
            status,
            extract_api_message(&body),
        ))
    }

    async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        serde_json::from_str(&body).map_err(|error| map_decode_error(operation, &error))
    }

    async fn send_enveloped<T: DeserializeOwned>(
        operation: &str,
        resource: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = Self::execute(operation, resource, builder).await?;
        let envelope: ApiEnvelope<T> = Self::decode(operation, response).await?;
        envelope.into_data(operation)
    }

    async fn send_ignoring_body(
        operation: &str,
        resource: &str,
        builder: RequestBuilder,
    ) -> Result<(), ApiError> {
        Self::execute(operation, resource, builder).await.map(drop)
    }

    async fn fetch_page(
        &self,
        operation: &str,
        resource: &str,
        url: Url,
        requested_size: Option<u32>,
    ) -> Result<Page<Article>, ApiError> {
        debug!(operation, url = %url, "requesting article page");
        let response = Self::execute(operation, resource, self.request(Method::GET, url)).await?;
        let raw: ApiPageBody<Article> = Self::decode(operation, response).await?;
        let body = raw.into_page(operation)?;

        let page_size = PageSize::new(body.pagination.limit)
            .or_else(|_| requested_size.map_or_else(|| Ok(PageSize::default()), PageSize::new))?;
        Ok(Page::new(
            body.data,
            body.pagination.page,
            page_size,
            body.pagination.total,
        ))
    }

    /// Fetches up to `limit` featured articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request or decoding fails.
    pub async fn featured_articles(&self, limit: u32) -> Result<Vec<Article>, ApiError> {
        let url = self.endpoint_with_query(
            &["articles"],
            &[
                ("featured", "true".to_owned()),
                ("limit", limit.to_string()),
                ("sortBy", "latest".to_owned()),
            ],
        )?;
        let page = self
            .fetch_page("fetch featured articles", "articles", url, Some(limit))
            .await?;
        Ok(page.into_items())
    }

    /// Lists articles matching `text`, on top of an existing query.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request or decoding fails.
    pub async fn search_articles(
        &self,
        text: &str,
        query: &ArticleQuery,
    ) -> Result<Page<Article>, ApiError> {
        let mut searched = query.clone();
        searched.filter = query.filter.clone().with_search(text);
        self.list_articles(&searched).await
    }

    /// Fetches engagement counters for an article.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request or decoding fails.
    pub async fn article_analytics(&self, article_id: &str) -> Result<ArticleAnalytics, ApiError> {
        let url = self.endpoint(&["analytics", "articles", article_id])?;
        Self::send_enveloped(
            "fetch article analytics",
            &format!("analytics for article `{article_id}`"),
            self.request(Method::GET, url),
        )
        .await
    }

    /// Checks that the API is reachable.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request or decoding fails.
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["health"])?;
        Self::send_enveloped("health check", "health endpoint", self.request(Method::GET, url))
            .await
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        operation: &str,
        segments: &[&str],
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        let resource = segments.join("/");
        Self::send_ignoring_body(
            operation,
            &resource,
            self.request(Method::POST, url).json(body),
        )
        .await
    }
}

#[async_trait]
impl ArticleSource for HttpApiClient {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>, ApiError> {
        let url = self.endpoint_with_query(&["articles"], &query.pairs())?;
        self.fetch_page("list articles", "articles", url, query.limit)
            .await
    }

    async fn article(&self, slug: &str) -> Result<Article, ApiError> {
        let url = self.endpoint(&["articles", slug])?;
        Self::send_enveloped(
            "fetch article",
            &format!("article `{slug}`"),
            self.request(Method::GET, url),
        )
        .await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(&["categories"])?;
        Self::send_enveloped("list categories", "categories", self.request(Method::GET, url))
            .await
    }

    async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        let url = self.endpoint(&["categories", slug])?;
        Self::send_enveloped(
            "fetch category",
            &format!("category `{slug}`"),
            self.request(Method::GET, url),
        )
        .await
    }

    async fn category_articles(
        &self,
        slug: &str,
        query: &ArticleQuery,
    ) -> Result<Page<Article>, ApiError> {
        let url = self.endpoint_with_query(&["categories", slug, "articles"], &query.pairs())?;
        self.fetch_page(
            "list category articles",
            &format!("category `{slug}`"),
            url,
            query.limit,
        )
        .await
    }

    async fn related_articles(
        &self,
        article_id: &str,
        limit: u32,
    ) -> Result<Vec<Article>, ApiError> {
        let url = self.endpoint_with_query(
            &["articles", article_id, "related"],
            &[("limit", limit.to_string())],
        )?;
        let page = self
            .fetch_page(
                "list related articles",
                &format!("article `{article_id}`"),
                url,
                Some(limit),
            )
            .await?;
        Ok(page.into_items())
    }
}

#[async_trait]
impl EditorialGateway for HttpApiClient {
    async fn create_article(&self, request: &CreateArticleRequest) -> Result<Article, ApiError> {
        let url = self.endpoint(&["articles"])?;
        Self::send_enveloped(
            "create article",
            "articles",
            self.request(Method::POST, url).json(request),
        )
        .await
    }

    async fn update_article(&self, request: &UpdateArticleRequest) -> Result<Article, ApiError> {
        let url = self.endpoint(&["articles", request.id.as_str()])?;
        Self::send_enveloped(
            "update article",
            &format!("article `{}`", request.id),
            self.request(Method::PUT, url).json(request),
        )
        .await
    }

    async fn delete_article(&self, article_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["articles", article_id])?;
        Self::send_ignoring_body(
            "delete article",
            &format!("article `{article_id}`"),
            self.request(Method::DELETE, url),
        )
        .await
    }
}

#[derive(Serialize)]
struct UnsubscribeBody<'a> {
    email: &'a str,
}

#[async_trait]
impl EngagementGateway for HttpApiClient {
    async fn subscribe_newsletter(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<(), ApiError> {
        self.post_json(
            "subscribe to newsletter",
            &["newsletter", "subscribe"],
            subscription,
        )
        .await
    }

    async fn unsubscribe_newsletter(&self, email: &str) -> Result<(), ApiError> {
        self.post_json(
            "unsubscribe from newsletter",
            &["newsletter", "unsubscribe"],
            &UnsubscribeBody { email },
        )
        .await
    }

    async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        self.post_json("submit contact form", &["contact"], form)
            .await
    }

    async fn track_article_view(&self, article_id: &str) -> Result<(), ApiError> {
        self.post_json(
            "track article view",
            &["analytics", "articles", article_id, "view"],
            &serde_json::json!({}),
        )
        .await
    }
}
