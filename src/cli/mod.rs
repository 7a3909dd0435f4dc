//! CLI operation mode handlers.
//!
//! - [`listing`]: list or search articles through the listing controller
//! - [`article_detail`]: show one article and its related articles
//! - [`categories`]: list categories
//!
//! Output helpers live in [`output`].

use std::io;

use techledger::api::ArticleSource;
use techledger::config::OperationMode;
use techledger::{ApiError, LedgerConfig};

pub mod article_detail;
pub mod categories;
pub mod listing;
pub mod output;

/// Dispatches on the configured operation mode, writing to stdout.
///
/// # Errors
///
/// Propagates failures from the selected handler.
pub async fn run<S>(config: &LedgerConfig, source: S) -> Result<(), ApiError>
where
    S: ArticleSource,
{
    let mut stdout = io::stdout().lock();
    match config.operation_mode() {
        OperationMode::ArticleDetail => {
            article_detail::run(&mut stdout, config, &source).await
        }
        OperationMode::CategoryIndex => categories::run(&mut stdout, &source).await,
        OperationMode::Listing => listing::run(&mut stdout, config, source).await,
    }
}
