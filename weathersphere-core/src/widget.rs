//! Display state of the weather widget and the events that drive it.
//!
//! The presentation layer sends [`UiEvent`]s and renders [`DisplayState`]
//! snapshots. A report is only ever replaced as a whole, and only by the most
//! recently issued search: every search takes a ticket when it starts, and a
//! completion whose ticket has been superseded is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::{
    config::EmptyQueryPolicy,
    error::FetchError,
    fetcher::ForecastFetcher,
    model::WeatherReport,
    provider::WeatherProvider,
    recent::RecentCities,
};

/// Inputs accepted from the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryChanged(String),
    /// Enter pressed in the search box.
    Submit,
    RecentCityClicked(String),
    ToggleSidebar(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The report and recent list were replaced.
    Applied,
    /// The search failed; prior state is kept.
    Failed,
    /// A newer search was issued before this one finished.
    Stale,
    /// Blank query under [`EmptyQueryPolicy::Ignore`].
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loaded,
}

#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Last text typed or clicked; never cleared.
    pub query: String,
    pub report: Option<WeatherReport>,
    pub recent: RecentCities,
    pub sidebar_visible: bool,
    pub status: SearchStatus,
}

impl DisplayState {
    pub fn phase(&self) -> Phase {
        if self.report.is_some() {
            Phase::Loaded
        } else {
            Phase::Empty
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SearchTicket(u64);

#[derive(Debug)]
pub struct WeatherWidget<P> {
    fetcher: ForecastFetcher<P>,
    empty_query: EmptyQueryPolicy,
    state: RwLock<DisplayState>,
    latest_ticket: AtomicU64,
}

impl<P: WeatherProvider> WeatherWidget<P> {
    pub fn new(provider: P, empty_query: EmptyQueryPolicy) -> Self {
        Self {
            fetcher: ForecastFetcher::new(provider),
            empty_query,
            state: RwLock::new(DisplayState::default()),
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Copy of the current state for rendering.
    pub async fn display(&self) -> DisplayState {
        self.state.read().await.clone()
    }

    /// Apply one presentation event. Returns the search outcome for events
    /// that trigger a search.
    pub async fn handle(&self, event: UiEvent) -> Option<SearchOutcome> {
        match event {
            UiEvent::QueryChanged(text) => {
                self.state.write().await.query = text;
                None
            }
            UiEvent::Submit => {
                let query = self.state.read().await.query.clone();
                Some(self.search(&query).await)
            }
            UiEvent::RecentCityClicked(city) => {
                self.state.write().await.query = city.clone();
                Some(self.search(&city).await)
            }
            UiEvent::ToggleSidebar(visible) => {
                self.state.write().await.sidebar_visible = visible;
                None
            }
        }
    }

    /// Fetch `city` and publish the result if no newer search has started.
    pub async fn search(&self, city: &str) -> SearchOutcome {
        if city.trim().is_empty() {
            match self.empty_query {
                EmptyQueryPolicy::Forward => {}
                EmptyQueryPolicy::Ignore => return SearchOutcome::Ignored,
                EmptyQueryPolicy::Reject => {
                    let ticket = self.issue_ticket();
                    return self.complete(ticket, city, Err(FetchError::InvalidQuery)).await;
                }
            }
        }

        let ticket = self.issue_ticket();
        let result = self.fetcher.fetch_weather(city).await;
        self.complete(ticket, city, result).await
    }

    fn issue_ticket(&self) -> SearchTicket {
        SearchTicket(self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn complete(
        &self,
        ticket: SearchTicket,
        query: &str,
        result: Result<WeatherReport, FetchError>,
    ) -> SearchOutcome {
        let mut state = self.state.write().await;

        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket.0 != latest {
            warn!(query, ticket = ticket.0, latest, "discarding superseded search result");
            return SearchOutcome::Stale;
        }

        match result {
            Ok(report) => {
                info!(query, resolved = %report.snapshot.city, "search applied");
                state.recent.record(&report.snapshot.city);
                state.report = Some(report);
                state.status = SearchStatus::Idle;
                SearchOutcome::Applied
            }
            Err(err) => {
                error!(query, error = %err, "Error fetching weather data");
                state.status = SearchStatus::Failed(err.to_string());
                SearchOutcome::Failed
            }
        }
    }
}
