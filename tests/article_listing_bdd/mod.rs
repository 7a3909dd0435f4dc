//! Scenario state for the article listing behaviour tests.

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use techledger::api::models::Article;
use techledger::{Catalog, ListingController};

#[path = "../support/runtime.rs"]
mod runtime;

pub(crate) use runtime::SharedRuntime;

#[derive(ScenarioState, Default)]
pub(crate) struct ListingState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) articles: Slot<Vec<Article>>,
    pub(crate) controller: Slot<ListingController<Catalog>>,
}

impl ListingState {
    /// Returns the scenario runtime, creating it on first use.
    pub(crate) fn runtime(&self) -> SharedRuntime {
        if self.runtime.with_ref(|_| ()).is_none() {
            self.runtime.set(SharedRuntime::current_thread());
        }
        self.runtime
            .get()
            .unwrap_or_else(|| panic!("runtime not initialised after set"))
    }

    /// Appends articles to the seeded catalog.
    pub(crate) fn seed(&self, extra: Vec<Article>) {
        let mut articles = self.articles.take().unwrap_or_default();
        articles.extend(extra);
        self.articles.set(articles);
    }
}
