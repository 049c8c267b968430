//! Dashboard state owned by the front-end

use crate::display::DashboardPage;
use crate::engine::{FilterState, FilteredView, apply};
use crate::loader::LoadOutcome;
use crate::models::StockFeed;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    SetRegion(String),
    SetSearch(String),
    ClearFilters,
    Reload,
}

/// What the caller must do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Rerender,
    /// Run a load and hand the outcome to [`AppState::finish_load`]
    Reload(LoadTicket),
}

/// Identifies one load request; only the latest one may update the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct AppState {
    feed: StockFeed,
    degraded: Option<String>,
    filter: FilterState,
    latest_ticket: u64,
    loading: bool,
}

impl AppState {
    pub fn new(outcome: LoadOutcome) -> Self {
        Self {
            feed: outcome.feed,
            degraded: outcome.degraded,
            filter: FilterState::default(),
            latest_ticket: 0,
            loading: false,
        }
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn feed(&self) -> &StockFeed {
        &self.feed
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn degraded(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dispatch(&mut self, event: Event) -> Effect {
        match event {
            Event::SetRegion(region) => self.filter.set_region(region),
            Event::SetSearch(term) => self.filter.set_search(&term),
            Event::ClearFilters => self.filter = FilterState::default(),
            Event::Reload => return Effect::Reload(self.begin_load()),
        }
        Effect::Rerender
    }

    /// Start a load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;
        LoadTicket(self.latest_ticket)
    }

    /// Apply a finished load; returns false when `ticket` is stale
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale load"
            );
            return false;
        }
        self.feed = outcome.feed;
        self.degraded = outcome.degraded;
        self.loading = false;
        true
    }

    pub fn view(&self) -> FilteredView<'_> {
        apply(&self.feed.stocks, &self.filter)
    }

    pub fn page(&self) -> DashboardPage {
        DashboardPage::new(&self.view(), &self.filter, &self.feed, self.degraded())
    }
}
