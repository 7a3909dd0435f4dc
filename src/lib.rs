//! The Tech Ledger article listing library.
//!
//! The crate models the listing state behind the blog's article index: a
//! filter that round-trips through a URL query string, a controller that
//! fetches pages and drops stale responses, and an HTTP client for the
//! content API. A local [`Catalog`] implements the same source trait for
//! offline use and tests.

pub mod api;
pub mod config;
pub mod content;
pub mod listing;
pub mod render;
pub mod telemetry;

pub use api::{
    ApiClientConfig, ApiError, ArticleSource, EditorialGateway, EngagementGateway, ErrorKind,
    HttpApiClient,
};
pub use config::LedgerConfig;
pub use listing::{
    ArticleQuery, Catalog, DateRange, FilterState, FilterUpdate, ListingController,
    ListingFilter, ListingStatus, Page, PageSize, SortBy,
};
