//! Article listing: filter state, query strings, pagination, and the
//! controller that ties them to an [`ArticleSource`](crate::api::ArticleSource).

pub mod catalog;
pub mod controller;
pub mod filter;
pub mod pagination;
pub mod query;

pub use catalog::{derive_categories, Catalog};
pub use controller::{ListingController, ListingStatus, ListingTicket, Resolution};
pub use filter::{DateRange, FilterState, FilterUpdate, ListingFilter, SortBy};
pub use pagination::{clamp_page, compute_pages, slice, Page, PageSize, DEFAULT_PAGE_SIZE};
pub use query::{deserialize, serialize, ArticleQuery};
