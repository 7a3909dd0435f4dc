//! Data models for articles, categories, and API payloads.
//!
//! Field names follow the API's camelCase JSON. Types prefixed with `Api`
//! are wire envelopes that convert into the public types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

mod timestamp;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Publication status of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Not yet visible to readers.
    Draft,
    /// Visible to readers.
    #[default]
    Published,
    /// Withdrawn from listings.
    Archived,
}

impl ArticleStatus {
    /// Returns the query parameter value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Parses a query parameter value.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// A published piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable unique identifier.
    pub id: String,
    /// URL-safe unique identifier derived from the title.
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Short teaser shown on cards.
    #[serde(default)]
    pub excerpt: String,
    /// Full body.
    #[serde(default)]
    pub content: String,
    /// Category label (e.g. "Artificial Intelligence").
    pub category: String,
    /// Byline.
    #[serde(default)]
    pub author: String,
    /// Publication timestamp.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub published_at: DateTime<Utc>,
    /// Last edit timestamp.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Display label such as "5 min read".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    /// Hero image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Tag labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether editors promoted the article.
    #[serde(default)]
    pub featured: bool,
    /// Publication status.
    #[serde(default)]
    pub status: ArticleStatus,
    /// View counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    /// Like counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Comment counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
}

impl Article {
    /// Returns true if the article carries the tag (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// A content category with its article count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier.
    pub id: String,
    /// Display name, which is also the label stored on articles.
    pub name: String,
    /// URL-safe identifier.
    pub slug: String,
    /// Optional blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional colour hint supplied by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Number of articles in the category.
    #[serde(default)]
    pub article_count: u64,
}

/// Fields an editor supplies when writing an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    /// Headline.
    pub title: String,
    /// Short teaser.
    pub excerpt: String,
    /// Full body.
    pub content: String,
    /// Category label.
    pub category: String,
    /// Byline.
    pub author: String,
    /// Tag labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the article should be promoted.
    #[serde(default)]
    pub featured: bool,
    /// Hero image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of `POST /articles`: a draft plus the fields derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    /// Editor-supplied fields.
    #[serde(flatten)]
    pub draft: ArticleDraft,
    /// Slug derived from the title.
    pub slug: String,
    /// Read-time label derived from the content.
    pub read_time: String,
    /// Publication timestamp.
    pub published_at: DateTime<Utc>,
}

/// Body of `PUT /articles/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    /// Identifier of the article to update.
    pub id: String,
    /// New headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New teaser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New byline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New featured flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// New hero image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// New publication status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
}

/// How often newsletter mail is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterFrequency {
    /// Once a day.
    Daily,
    /// Once a week.
    Weekly,
    /// Once a month.
    Monthly,
}

/// Optional subscriber preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterPreferences {
    /// Category names the reader wants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Delivery cadence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<NewsletterFrequency>,
}

/// Body of `POST /newsletter/subscribe`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    /// Subscriber address.
    pub email: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<NewsletterPreferences>,
}

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    /// Sender's first name.
    pub first_name: String,
    /// Sender's last name.
    pub last_name: String,
    /// Reply address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// Engagement counters for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleAnalytics {
    /// Article identifier.
    pub article_id: String,
    /// Page views.
    pub views: u64,
    /// Likes.
    pub likes: u64,
    /// Shares.
    pub shares: u64,
    /// Comments.
    pub comments: u64,
    /// Average read time in seconds.
    pub read_time: u64,
}

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Service status string (e.g. "ok").
    pub status: String,
    /// Server timestamp as reported.
    pub timestamp: String,
}

/// Standard `{success, data, message, error}` wrapper around single resources.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub(crate) success: bool,
    pub(crate) data: Option<T>,
    pub(crate) message: Option<String>,
    pub(crate) error: Option<String>,
}

const fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, treating `success: false` or a missing body as
    /// failures reported by the API.
    pub(crate) fn into_data(self, operation: &str) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "request was not successful".to_owned());
            return Err(ApiError::Status {
                status: 200,
                message: format!("{operation} failed: {message}"),
            });
        }

        self.data.ok_or_else(|| ApiError::Decode {
            message: format!("{operation} response did not contain data"),
        })
    }
}

/// `{data, pagination}` body returned by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPaginatedResponse<T> {
    pub(crate) data: Vec<T>,
    pub(crate) pagination: ApiPagination,
}

/// A list body either bare or wrapped in the standard envelope.
///
/// Featured and related article endpoints wrap their page in `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiPageBody<T> {
    Bare(ApiPaginatedResponse<T>),
    Enveloped(ApiEnvelope<ApiPaginatedResponse<T>>),
}

impl<T> ApiPageBody<T> {
    pub(crate) fn into_page(self, operation: &str) -> Result<ApiPaginatedResponse<T>, ApiError> {
        match self {
            Self::Bare(body) => Ok(body),
            Self::Enveloped(envelope) => envelope.into_data(operation),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPagination {
    pub(crate) page: u32,
    pub(crate) limit: u32,
    pub(crate) total: u64,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{ApiEnvelope, ApiPageBody, Article, ArticleStatus, Category};
    use crate::api::error::ApiError;

    #[test]
    fn article_deserialises_camel_case_fields_and_date_only_timestamps() {
        let article: Article = serde_json::from_value(json!({
            "id": "2",
            "slug": "openai-gpt-5-release",
            "title": "OpenAI Releases GPT-5",
            "category": "Artificial Intelligence",
            "author": "AI Reporter",
            "publishedAt": "2025-01-14",
            "readTime": "7 min read",
            "featured": true,
            "tags": ["AI", "GPT-5"]
        }))
        .expect("article should deserialise");

        assert_eq!(
            article.published_at,
            Utc.with_ymd_and_hms(2025, 1, 14, 0, 0, 0).single().expect("valid date")
        );
        assert_eq!(article.read_time.as_deref(), Some("7 min read"));
        assert_eq!(article.status, ArticleStatus::Published);
        assert!(article.has_tag("GPT-5"));
        assert!(!article.has_tag("gpt-5"));
        assert!(article.updated_at.is_none());
    }

    #[test]
    fn article_accepts_rfc3339_timestamps() {
        let article: Article = serde_json::from_value(json!({
            "id": "9",
            "slug": "nvidia-ai-chip-revolution",
            "title": "NVIDIA chips",
            "category": "Artificial Intelligence",
            "publishedAt": "2025-01-12T08:30:00+02:00",
            "updatedAt": "2025-01-13T00:00:00Z",
            "status": "archived"
        }))
        .expect("article should deserialise");

        assert_eq!(
            article.published_at,
            Utc.with_ymd_and_hms(2025, 1, 12, 6, 30, 0).single().expect("valid date")
        );
        assert!(article.updated_at.is_some());
        assert_eq!(article.status, ArticleStatus::Archived);
    }

    #[test]
    fn article_rejects_unparseable_timestamps() {
        let result = serde_json::from_value::<Article>(json!({
            "id": "1",
            "slug": "s",
            "title": "t",
            "category": "c",
            "publishedAt": "last tuesday"
        }));

        assert!(result.is_err(), "expected timestamp error");
    }

    #[test]
    fn category_defaults_article_count() {
        let category: Category = serde_json::from_value(json!({
            "id": "ai",
            "name": "Artificial Intelligence",
            "slug": "artificial-intelligence"
        }))
        .expect("category should deserialise");

        assert_eq!(category.article_count, 0);
    }

    #[test]
    fn envelope_reports_unsuccessful_payloads() {
        let envelope: ApiEnvelope<Category> = serde_json::from_value(json!({
            "success": false,
            "data": null,
            "error": "category disabled"
        }))
        .expect("envelope should deserialise");

        let error = envelope
            .into_data("get category")
            .expect_err("unsuccessful envelope should fail");

        assert_eq!(
            error,
            ApiError::Status {
                status: 200,
                message: "get category failed: category disabled".to_owned(),
            }
        );
    }

    #[test]
    fn envelope_without_data_is_a_decode_error() {
        let envelope: ApiEnvelope<Category> =
            serde_json::from_value(json!({ "success": true })).expect("should deserialise");

        assert!(matches!(
            envelope.into_data("get category"),
            Err(ApiError::Decode { .. })
        ));
    }

    #[test]
    fn page_bodies_accept_bare_and_enveloped_shapes() {
        let page = json!({ "data": [], "pagination": { "page": 2, "limit": 3, "total": 4 } });
        let bare: ApiPageBody<Category> =
            serde_json::from_value(page.clone()).expect("bare body should deserialise");
        let wrapped: ApiPageBody<Category> =
            serde_json::from_value(json!({ "success": true, "data": page }))
                .expect("enveloped body should deserialise");

        for body in [bare, wrapped] {
            let inner = body.into_page("list").expect("page should unwrap");
            assert_eq!(inner.pagination.page, 2);
            assert_eq!(inner.pagination.total, 4);
        }
    }
}
