//! Test helpers for constructing `Article` and `Category` fixtures.
//!
//! # Examples
//!
//! ```
//! use techledger::api::models::test_support::article;
//!
//! let article = article("2", "OpenAI Releases GPT-5", "Artificial Intelligence");
//! assert_eq!(article.slug, "openai-releases-gpt-5");
//! ```

use chrono::{DateTime, TimeZone, Utc};

use super::{Article, ArticleStatus, Category};
use crate::content::generate_slug;

/// Fixed reference instant used by fixtures: 2025-01-15T12:00:00Z.
#[must_use]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds a published article with the slug derived from the title.
///
/// The article is published one day before [`reference_now`] and carries
/// no tags or counters.
#[must_use]
pub fn article(id: &str, title: &str, category: &str) -> Article {
    Article {
        id: id.to_owned(),
        slug: generate_slug(title),
        title: title.to_owned(),
        excerpt: format!("Excerpt for {title}"),
        content: format!("Body of {title}"),
        category: category.to_owned(),
        author: "Staff Writer".to_owned(),
        published_at: reference_now() - chrono::Duration::days(1),
        updated_at: None,
        read_time: Some("1 min read".to_owned()),
        image: None,
        tags: Vec::new(),
        featured: false,
        status: ArticleStatus::Published,
        views: None,
        likes: None,
        comments: None,
    }
}

/// Builds `count` articles in one category, numbered from 1, each a day
/// older than the previous.
#[must_use]
pub fn articles_in_category(count: u32, category: &str) -> Vec<Article> {
    (1..=count)
        .map(|index| {
            let mut item = article(
                &index.to_string(),
                &format!("{category} story number {index}"),
                category,
            );
            item.published_at = reference_now() - chrono::Duration::days(i64::from(index));
            item
        })
        .collect()
}

/// Builds a category whose slug is derived from the name.
#[must_use]
pub fn category(id: &str, name: &str, article_count: u64) -> Category {
    Category {
        id: id.to_owned(),
        name: name.to_owned(),
        slug: generate_slug(name),
        description: None,
        color: None,
        article_count,
    }
}
