//! Search pipeline: input → fetch → present → render.
//!
//! The controller owns the search state machine and drives a [`RenderPort`].
//! Searches may overlap; each one is tagged with a generation number and only
//! the most recent generation is allowed to touch the view.

use parking_lot::Mutex;
use std::fmt::Debug;
use tracing::{debug, error, info};

use crate::{
    clock::Clock,
    present::{DisplayFields, present},
    provider::WeatherProvider,
};

/// Display capabilities the controller needs from a view.
pub trait RenderPort: Send + Sync {
    /// Show the loading indicator and hide the result view.
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_error(&self);
    fn hide_error(&self);
    fn show_result(&self, fields: &DisplayFields);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// What a call to [`SearchController::search`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank input; nothing happened.
    Ignored,
    Rendered,
    Failed,
    /// A newer search started before this one finished; its result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    state: SearchState,
}

pub struct SearchController<R: RenderPort> {
    provider: Box<dyn WeatherProvider>,
    clock: Box<dyn Clock>,
    view: R,
    inner: Mutex<Inner>,
}

impl<R: RenderPort> SearchController<R> {
    pub fn new(provider: Box<dyn WeatherProvider>, clock: Box<dyn Clock>, view: R) -> Self {
        Self { provider, clock, view, inner: Mutex::new(Inner::default()) }
    }

    pub fn state(&self) -> SearchState {
        self.inner.lock().state
    }

    pub fn view(&self) -> &R {
        &self.view
    }

    /// Run one search for `city` and render its outcome.
    pub async fn search(&self, city: &str) -> SearchOutcome {
        let city = city.trim();
        if city.is_empty() {
            return SearchOutcome::Ignored;
        }

        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.state = SearchState::Loading;
            self.view.hide_error();
            self.view.show_loading();
            inner.generation
        };

        debug!(city, generation, "Search started");
        let fetched = self.provider.fetch_weather(city).await;

        // Checking the generation and rendering under one lock keeps a stale
        // completion from interleaving with the current one.
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(city, generation, latest = inner.generation, "Discarding stale search result");
            return SearchOutcome::Superseded;
        }

        self.view.hide_loading();
        match fetched {
            Ok(result) => {
                let fields = present(&result, &self.clock.now());
                self.view.show_result(&fields);
                inner.state = SearchState::Success;
                info!(location = %fields.location_label, "Weather rendered");
                SearchOutcome::Rendered
            }
            Err(err) => {
                self.view.show_error();
                inner.state = SearchState::Failed;
                error!(city, kind = err.kind(), error = %err, "Error fetching weather data");
                SearchOutcome::Failed
            }
        }
    }
}

impl<R: RenderPort + Debug> Debug for SearchController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("provider", &self.provider)
            .field("clock", &self.clock)
            .field("view", &self.view)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        error::FetchError,
        model::{CurrentWeather, DailyForecastEntry, HourlySeries, Location, WeatherResult},
    };
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate};
    use std::{collections::HashMap, sync::Arc};
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        ShowLoading,
        HideLoading,
        ShowError,
        HideError,
        ShowResult(String),
    }

    #[derive(Debug, Default)]
    struct RecordingView {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<Event> {
            self.events.lock().clone()
        }
    }

    impl RenderPort for RecordingView {
        fn show_loading(&self) {
            self.events.lock().push(Event::ShowLoading);
        }
        fn hide_loading(&self) {
            self.events.lock().push(Event::HideLoading);
        }
        fn show_error(&self) {
            self.events.lock().push(Event::ShowError);
        }
        fn hide_error(&self) {
            self.events.lock().push(Event::HideError);
        }
        fn show_result(&self, fields: &DisplayFields) {
            self.events.lock().push(Event::ShowResult(fields.location_label.clone()));
        }
    }

    /// Answers from a fixed table; cities listed in `gates` wait for a notify.
    #[derive(Debug, Default)]
    struct StubProvider {
        places: HashMap<String, Location>,
        gates: HashMap<String, Arc<Notify>>,
    }

    impl StubProvider {
        fn with_city(mut self, name: &str, country: &str) -> Self {
            let location = Location {
                name: name.into(),
                country: country.into(),
                latitude: 1.0,
                longitude: 2.0,
            };
            self.places.insert(name.to_string(), location);
            self
        }

        fn gated(mut self, name: &str, gate: Arc<Notify>) -> Self {
            self.gates.insert(name.to_string(), gate);
            self
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
            if let Some(gate) = self.gates.get(city) {
                gate.notified().await;
            }

            let location = self
                .places
                .get(city)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(format!("no match for '{city}'")))?;

            Ok(WeatherResult {
                location,
                current: CurrentWeather { temperature: 12.3, weather_code: 2 },
                hourly: HourlySeries::default(),
                daily: vec![DailyForecastEntry {
                    date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
                    min_temp: Some(3.0),
                    max_temp: Some(9.0),
                    weather_code: Some(0),
                }],
            })
        }
    }

    fn clock() -> Box<dyn Clock> {
        let now = DateTime::parse_from_rfc3339("2024-01-15T10:00:00+01:00").expect("instant");
        Box::new(FixedClock(now))
    }

    fn controller(provider: StubProvider) -> SearchController<RecordingView> {
        SearchController::new(Box::new(provider), clock(), RecordingView::default())
    }

    #[tokio::test]
    async fn successful_search_renders_result() {
        let ctl = controller(StubProvider::default().with_city("Paris", "France"));

        let outcome = ctl.search("  Paris ").await;

        assert_eq!(outcome, SearchOutcome::Rendered);
        assert_eq!(ctl.state(), SearchState::Success);
        assert_eq!(
            ctl.view().events(),
            vec![
                Event::HideError,
                Event::ShowLoading,
                Event::HideLoading,
                Event::ShowResult("Paris, France".into()),
            ]
        );
    }

    #[tokio::test]
    async fn failed_search_shows_generic_error() {
        let ctl = controller(StubProvider::default());

        let outcome = ctl.search("Atlantis").await;

        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(ctl.state(), SearchState::Failed);
        assert_eq!(
            ctl.view().events(),
            vec![Event::HideError, Event::ShowLoading, Event::HideLoading, Event::ShowError]
        );
    }

    #[tokio::test]
    async fn blank_input_changes_nothing() {
        let ctl = controller(StubProvider::default().with_city("Paris", "France"));

        for input in ["", "   ", "\t"] {
            assert_eq!(ctl.search(input).await, SearchOutcome::Ignored);
        }

        assert_eq!(ctl.state(), SearchState::Idle);
        assert!(ctl.view().events().is_empty());
    }

    #[tokio::test]
    async fn blank_input_after_failure_keeps_failed_state() {
        let ctl = controller(StubProvider::default());
        ctl.search("Atlantis").await;
        let before = ctl.view().events();

        ctl.search(" ").await;

        assert_eq!(ctl.state(), SearchState::Failed);
        assert_eq!(ctl.view().events(), before);
    }

    #[tokio::test]
    async fn failed_then_successful_search_recovers() {
        let ctl = controller(StubProvider::default().with_city("Oslo", "Norway"));

        assert_eq!(ctl.search("Atlantis").await, SearchOutcome::Failed);
        assert_eq!(ctl.search("Oslo").await, SearchOutcome::Rendered);
        assert_eq!(ctl.state(), SearchState::Success);
        assert_eq!(ctl.view().events().last(), Some(&Event::ShowResult("Oslo, Norway".into())));
    }

    #[tokio::test]
    async fn stale_search_is_discarded() {
        let gate = Arc::new(Notify::new());
        let provider = StubProvider::default()
            .with_city("Paris", "France")
            .with_city("Rome", "Italy")
            .gated("Paris", gate.clone());
        let ctl = controller(provider);

        let slow = ctl.search("Paris");
        let fast = async {
            // Let the slow search register its generation first.
            tokio::task::yield_now().await;
            let outcome = ctl.search("Rome").await;
            gate.notify_one();
            outcome
        };

        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(fast, SearchOutcome::Rendered);
        assert_eq!(slow, SearchOutcome::Superseded);
        assert_eq!(ctl.state(), SearchState::Success);

        let results: Vec<_> = ctl
            .view()
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::ShowResult(_)))
            .collect();
        assert_eq!(results, vec![Event::ShowResult("Rome, Italy".into())]);
    }
}
