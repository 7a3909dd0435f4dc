//! Listing controller: fetches pages for a filter and tracks their status.
//!
//! Requests are split into [`ListingController::begin`], a fetch against the
//! source, and [`ListingController::resolve`]. Each request carries a
//! generation number; only the response for the latest generation may
//! change the visible state, so a slow response for an older filter can
//! never overwrite a newer one.
//!
//! [`ListingController::fetch`] borrows the controller, so it suits one
//! request at a time. To keep several requests in flight, fetch through
//! [`ListingTicket::fetch_from`] with a clone of the source; the controller
//! stays free for further [`ListingController::begin`] calls.

use std::sync::Arc;

use tracing::{debug, warn};

use super::filter::{FilterState, FilterUpdate, ListingFilter};
use super::pagination::{Page, PageSize};
use super::query::ArticleQuery;
use crate::api::error::ApiError;
use crate::api::models::Article;
use crate::api::ArticleSource;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Visible state of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request returned a page.
    Loaded(Page<Article>),
    /// The latest request failed.
    Failed(ApiError),
}

impl ListingStatus {
    /// The loaded page, if any.
    #[must_use]
    pub const fn page(&self) -> Option<&Page<Article>> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Handle for one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTicket {
    generation: u64,
    filter: ListingFilter,
    query: ArticleQuery,
}

impl ListingTicket {
    /// Monotonic request number.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Filter the request was issued for.
    #[must_use]
    pub const fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    /// Query to send to the source.
    #[must_use]
    pub const fn query(&self) -> &ArticleQuery {
        &self.query
    }

    /// Fetches this ticket's page from `source` without borrowing the
    /// controller.
    ///
    /// # Errors
    ///
    /// Propagates the source's failure.
    pub async fn fetch_from<S>(&self, source: &S) -> Result<Page<Article>, ApiError>
    where
        S: ArticleSource + ?Sized,
    {
        source.list_articles(&self.query).await
    }
}

/// Outcome of [`ListingController::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response updated the visible state.
    Applied,
    /// The response belonged to a superseded request and was dropped.
    Discarded {
        /// Generation of the stale request.
        generation: u64,
        /// Generation of the latest issued request.
        latest: u64,
    },
}

/// Drives one listing against an [`ArticleSource`].
pub struct ListingController<S>
where
    S: ArticleSource,
{
    source: S,
    state: FilterState,
    page_size: PageSize,
    status: ListingStatus,
    latest_generation: u64,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<S> ListingController<S>
where
    S: ArticleSource,
{
    /// Creates an idle controller with the default filter.
    #[must_use]
    pub fn new(source: S, page_size: PageSize) -> Self {
        Self {
            source,
            state: FilterState::default(),
            page_size,
            status: ListingStatus::Idle,
            latest_generation: 0,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Records lifecycle events to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Starts from `filter` without issuing a request.
    #[must_use]
    pub fn with_filter(mut self, filter: ListingFilter) -> Self {
        self.state = FilterState::new(filter);
        self
    }

    /// The current filter.
    #[must_use]
    pub const fn filter(&self) -> &ListingFilter {
        self.state.filter()
    }

    /// The visible status.
    #[must_use]
    pub const fn status(&self) -> &ListingStatus {
        &self.status
    }

    /// The article source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Generation of the most recently issued request.
    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Issues a request for `filter` and moves to [`ListingStatus::Loading`].
    ///
    /// The page is sent as requested; out-of-range pages are corrected when
    /// the response arrives.
    pub fn begin(&mut self, requested: ListingFilter) -> ListingTicket {
        self.latest_generation = self.latest_generation.saturating_add(1);
        self.state.replace(requested.clone());
        self.status = ListingStatus::Loading;

        let query = ArticleQuery::from_filter(requested.clone()).with_limit(self.page_size.get());
        let encoded = query.to_query_string();
        debug!(generation = self.latest_generation, query = %encoded, "listing requested");
        self.telemetry.record(TelemetryEvent::ListingRequested {
            generation: self.latest_generation,
            query: encoded,
        });

        ListingTicket {
            generation: self.latest_generation,
            filter: requested,
            query,
        }
    }

    /// Fetches the page for a ticket without touching visible state.
    ///
    /// # Errors
    ///
    /// Propagates the source's failure.
    pub async fn fetch(&self, ticket: &ListingTicket) -> Result<Page<Article>, ApiError> {
        ticket.fetch_from(&self.source).await
    }

    /// Applies a response if it belongs to the latest request.
    ///
    /// The filter takes the served page, pulled back into range when the
    /// source answered an out-of-range request with an empty page.
    pub fn resolve(
        &mut self,
        ticket: ListingTicket,
        result: Result<Page<Article>, ApiError>,
    ) -> Resolution {
        if ticket.generation != self.latest_generation {
            debug!(
                generation = ticket.generation,
                latest = self.latest_generation,
                "discarding stale listing response"
            );
            self.telemetry.record(TelemetryEvent::StaleResponseDiscarded {
                generation: ticket.generation,
                latest: self.latest_generation,
            });
            return Resolution::Discarded {
                generation: ticket.generation,
                latest: self.latest_generation,
            };
        }

        match result {
            Ok(page) => {
                self.state.set_served_page(page.page_number());
                self.state.clamp_page(page.total_pages());
                self.telemetry.record(TelemetryEvent::ListingResolved {
                    generation: ticket.generation,
                    page: page.page_number(),
                    total_items: page.total_items(),
                });
                self.status = ListingStatus::Loaded(page);
            }
            Err(error) => {
                warn!(generation = ticket.generation, %error, "listing request failed");
                self.telemetry.record(TelemetryEvent::ListingFailed {
                    generation: ticket.generation,
                    message: error.to_string(),
                });
                self.status = ListingStatus::Failed(error);
            }
        }
        Resolution::Applied
    }

    /// Requests `filter` and applies the response.
    pub async fn load(&mut self, filter: ListingFilter) -> &ListingStatus {
        let ticket = self.begin(filter);
        let result = self.fetch(&ticket).await;
        self.resolve(ticket, result);
        &self.status
    }

    /// Applies a partial filter update and loads the result.
    pub async fn update(&mut self, update: FilterUpdate) -> &ListingStatus {
        let mut next = self.state.clone();
        let filter = next.apply(update).clone();
        self.load(filter).await
    }

    /// Moves to `page` of the current selection.
    pub async fn go_to_page(&mut self, page: u32) -> &ListingStatus {
        self.update(FilterUpdate::new().page(page)).await
    }

    /// Reloads the current filter.
    pub async fn reload(&mut self) -> &ListingStatus {
        let filter = self.state.filter().clone();
        self.load(filter).await
    }
}
