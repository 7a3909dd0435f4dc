//! Category index.

use std::io::Write;

use techledger::ApiError;
use techledger::api::ArticleSource;
use techledger::render::write_categories;

/// Lists every category with its article count.
///
/// # Errors
///
/// Propagates source and I/O failures.
pub async fn run<W, S>(writer: &mut W, source: &S) -> Result<(), ApiError>
where
    W: Write,
    S: ArticleSource,
{
    let categories = source.categories().await?;
    write_categories(writer, &categories)
}
