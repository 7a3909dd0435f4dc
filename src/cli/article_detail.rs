//! Single article view.

use std::io::Write;

use techledger::api::ArticleSource;
use techledger::render::write_article;
use techledger::{ApiError, LedgerConfig};
use tracing::warn;

const RELATED_LIMIT: u32 = 3;

/// Shows the configured article with up to three related articles.
///
/// A failure to load related articles is logged and otherwise ignored.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] without a slug, [`ApiError::NotFound`]
/// for an unknown slug, and any other source or I/O failure.
pub async fn run<W, S>(writer: &mut W, config: &LedgerConfig, source: &S) -> Result<(), ApiError>
where
    W: Write,
    S: ArticleSource,
{
    let slug = config
        .slug
        .as_deref()
        .ok_or_else(|| ApiError::Configuration {
            message: "an article slug is required (use --slug or -s)".to_owned(),
        })?;

    let article = source.article(slug).await?;
    let related = source
        .related_articles(&article.id, RELATED_LIMIT)
        .await
        .unwrap_or_else(|error| {
            warn!(%error, slug, "related articles unavailable");
            Vec::new()
        });

    write_article(writer, &article, &related)
}
