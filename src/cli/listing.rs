//! Article listing and search.

use std::io::Write;
use std::sync::Arc;

use techledger::api::ArticleSource;
use techledger::render::write_listing;
use techledger::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use techledger::{ApiError, LedgerConfig, ListingController, ListingStatus};

use super::output::load_template;

fn telemetry_sink(config: &LedgerConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}

/// Loads the configured listing page and renders it.
///
/// # Errors
///
/// Returns the listing failure, or template and I/O errors.
pub async fn run<W, S>(writer: &mut W, config: &LedgerConfig, source: S) -> Result<(), ApiError>
where
    W: Write,
    S: ArticleSource,
{
    let template = load_template(config.template.as_deref())?;
    let mut controller =
        ListingController::new(source, config.page_size()?).with_telemetry(telemetry_sink(config));

    controller.load(config.listing_filter()).await;
    match controller.status() {
        ListingStatus::Loaded(page) => {
            write_listing(writer, page, controller.filter(), template.as_deref())
        }
        ListingStatus::Failed(error) => Err(error.clone()),
        ListingStatus::Idle | ListingStatus::Loading => Ok(()),
    }
}
