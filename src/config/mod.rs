//! Application configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.techledger.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `TECHLEDGER_API_URL`, `TECHLEDGER_API_KEY`,
//!    and friends; the legacy `NEXT_PUBLIC_API_URL` and `NEXT_PUBLIC_API_KEY`
//!    are read only when nothing else supplies a value
//! 4. **Command-line arguments** – `--api-url`/`-a`, `--filter`/`-f`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://api.techledger.example/api"
//! api_key = "secret"
//! page_size = 12
//! filter = "category=Mobile+Tech&sortBy=popular"
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClientConfig, ApiError, DEFAULT_API_URL};
use crate::listing::{DEFAULT_PAGE_SIZE, ListingFilter, PageSize, deserialize};

/// Legacy environment variable holding the API base URL.
pub const LEGACY_API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";
/// Legacy environment variable holding the API key.
pub const LEGACY_API_KEY_ENV: &str = "NEXT_PUBLIC_API_KEY";

const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// What the binary should do, derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Show one article by slug.
    ArticleDetail,
    /// List categories.
    CategoryIndex,
    /// List articles matching the filter.
    Listing,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use techledger::LedgerConfig;
///
/// let config = LedgerConfig::load().expect("failed to load configuration");
/// let filter = config.listing_filter();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TECHLEDGER",
    discovery(
        dotfile_name = ".techledger.toml",
        config_file_name = "techledger.toml",
        app_name = "techledger"
    )
)]
pub struct LedgerConfig {
    /// Base URL of the content API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `TECHLEDGER_API_URL` or `NEXT_PUBLIC_API_URL` (legacy)
    /// - Config file: `api_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Bearer token for the content API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>` or `-k <KEY>`
    /// - Environment: `TECHLEDGER_API_KEY` or `NEXT_PUBLIC_API_KEY` (legacy)
    /// - Config file: `api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub api_key: Option<String>,

    /// Path to a local JSON catalog used instead of the API.
    #[ortho_config(cli_short = 'c')]
    pub catalog: Option<String>,

    /// Listing filter as a query string, e.g. `category=Mobile+Tech&page=2`.
    #[ortho_config(cli_short = 'f')]
    pub filter: Option<String>,

    /// Search text; overrides `q` in `filter`.
    #[ortho_config(cli_short = 'q')]
    pub search: Option<String>,

    /// Category label; overrides `category` in `filter`.
    #[ortho_config()]
    pub category: Option<String>,

    /// Page number; overrides `page` in `filter`.
    #[ortho_config(cli_short = 'p')]
    pub page: Option<u32>,

    /// Shows the article with this slug instead of a listing.
    #[ortho_config(cli_short = 's')]
    pub slug: Option<String>,

    /// Lists categories instead of articles.
    #[ortho_config()]
    pub categories: bool,

    /// Articles per listing page. Defaults to 9.
    #[ortho_config()]
    pub page_size: u32,

    /// HTTP timeout in seconds. Defaults to 20.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Path to a `minijinja` template used for listings.
    ///
    /// Can be provided via:
    /// - CLI: `--template <PATH>` or `-T <PATH>`
    /// - Environment: `TECHLEDGER_TEMPLATE`
    /// - Config file: `template = "..."`
    #[ortho_config(cli_short = 'T')]
    pub template: Option<String>,

    /// Writes listing telemetry to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            catalog: None,
            filter: None,
            search: None,
            category: None,
            page: None,
            slug: None,
            categories: false,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            template: None,
            telemetry: false,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}

impl LedgerConfig {
    /// Determines the operation mode.
    ///
    /// A slug selects the article view, the categories flag selects the
    /// category index, and anything else lists articles.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.slug.is_some() {
            OperationMode::ArticleDetail
        } else if self.categories {
            OperationMode::CategoryIndex
        } else {
            OperationMode::Listing
        }
    }

    /// Rejects inconsistent settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when `slug` and `categories` are
    /// both set or the timeout is zero, and [`ApiError::InvalidPagination`]
    /// when the page size is zero.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.slug.is_some() && self.categories {
            return Err(ApiError::Configuration {
                message: "--slug and --categories cannot be combined".to_owned(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ApiError::Configuration {
                message: "timeout_seconds must be at least 1".to_owned(),
            });
        }
        self.page_size().map(drop)
    }

    /// Resolves the API base URL, falling back to the legacy variable and
    /// then the built-in default.
    #[must_use]
    pub fn resolve_api_url(&self) -> String {
        non_blank(self.api_url.clone())
            .or_else(|| non_blank(env::var(LEGACY_API_URL_ENV).ok()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
    }

    /// Resolves the API key, falling back to the legacy variable.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        non_blank(self.api_key.clone()).or_else(|| non_blank(env::var(LEGACY_API_KEY_ENV).ok()))
    }

    /// Builds the HTTP client configuration.
    #[must_use]
    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig::new(self.resolve_api_url())
            .with_api_key(self.resolve_api_key())
            .with_timeout(Duration::from_secs(self.timeout_seconds))
    }

    /// Validated page size.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] when the page size is zero.
    pub fn page_size(&self) -> Result<PageSize, ApiError> {
        PageSize::new(self.page_size)
    }

    /// Builds the listing filter: `filter` first, then the individual
    /// `search`, `category`, and `page` overrides.
    #[must_use]
    pub fn listing_filter(&self) -> ListingFilter {
        let mut filter = deserialize(self.filter.as_deref().unwrap_or_default());
        if let Some(search) = self.search.as_deref() {
            filter = filter.with_search(search);
        }
        if let Some(category) = self.category.as_deref() {
            filter = filter.with_category(category);
        }
        if let Some(page) = self.page {
            filter = filter.with_page(page);
        }
        filter
    }
}

#[cfg(test)]
mod tests;
