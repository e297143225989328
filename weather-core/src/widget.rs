//! The search widget: query text, last snapshot, error line and loading flag.
//!
//! A search moves `Idle -> Loading -> Idle`. [`SearchWidget::begin_search`]
//! validates and enters `Loading`, [`SearchWidget::finish_search`] applies the
//! provider result and always leaves `Loading`. [`SearchWidget::submit_search`]
//! runs both around a single provider call.

use tracing::{debug, info, warn};

use crate::{
    error::{FetchError, SearchError},
    model::WeatherSnapshot,
    provider::WeatherProvider,
    render::WidgetView,
};

/// Handle for one in-flight request. Results are only applied while the
/// ticket is still the latest one issued by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    location: String,
}

impl SearchTicket {
    /// Trimmed location to send to the provider.
    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug, Default)]
pub struct SearchWidget {
    query: String,
    snapshot: Option<WeatherSnapshot>,
    error: Option<SearchError>,
    loading: bool,
    generation: u64,
}

impl SearchWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query text (one keystroke or a whole pasted line).
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate the query and enter `Loading`.
    ///
    /// Returns `Ok(None)` while another search is in flight (submit disabled).
    /// A blank query sets the `EmptyInput` error and never enters `Loading`.
    pub fn begin_search(&mut self) -> Result<Option<SearchTicket>, SearchError> {
        if self.loading {
            debug!("search already in flight, ignoring submit");
            return Ok(None);
        }

        let location = self.query.trim();
        if location.is_empty() {
            self.error = Some(SearchError::EmptyInput);
            return Err(SearchError::EmptyInput);
        }

        let location = location.to_string();
        self.error = None;
        self.loading = true;
        self.generation += 1;

        debug!(generation = self.generation, %location, "search started");
        Ok(Some(SearchTicket { generation: self.generation, location }))
    }

    /// Apply a provider result and leave `Loading`.
    ///
    /// On failure the previous snapshot is kept next to the new error. A
    /// ticket superseded by [`SearchWidget::abandon_search`] is dropped without
    /// touching any state.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> Result<(), SearchError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding result of superseded search"
            );
            return Ok(());
        }

        self.loading = false;

        match result {
            Ok(snapshot) => {
                info!(location = %snapshot.location, "weather updated");
                self.snapshot = Some(snapshot);
                Ok(())
            }
            Err(err) => {
                warn!(location = %ticket.location, error = %err, "weather fetch failed");
                let err = SearchError::Fetch(err);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Detach the in-flight request, if any. Its result will be discarded.
    pub fn abandon_search(&mut self) {
        if self.loading {
            self.generation += 1;
            self.loading = false;
            debug!(generation = self.generation, "in-flight search abandoned");
        }
    }

    /// Validate, issue one provider request and apply its result.
    ///
    /// Returns `Ok(None)` when the submit was ignored because a search is
    /// already in flight.
    pub async fn submit_search(
        &mut self,
        provider: &dyn WeatherProvider,
    ) -> Result<Option<&WeatherSnapshot>, SearchError> {
        let Some(ticket) = self.begin_search()? else {
            return Ok(None);
        };

        let result = provider.current(ticket.location()).await;
        self.finish_search(ticket, result)?;

        Ok(self.snapshot.as_ref())
    }

    /// Current rendered surface.
    pub fn view(&self) -> WidgetView {
        WidgetView::from_state(self.loading, self.error.as_ref(), self.snapshot.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, FETCH_FAILURE_MESSAGE};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays queued results and records every requested location.
    #[derive(Debug, Default)]
    struct FakeProvider {
        responses: Mutex<Vec<Result<WeatherSnapshot, FetchError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn replying(responses: Vec<Result<WeatherSnapshot, FetchError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self { responses: Mutex::new(responses), calls: Mutex::default() }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(&self, location: &str) -> Result<WeatherSnapshot, FetchError> {
            self.calls.lock().unwrap().push(location.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(FetchError::Network("no response queued".into())))
        }
    }

    fn paris() -> WeatherSnapshot {
        WeatherSnapshot::celsius(22.0, "Partly cloudy".into(), "Paris".into())
    }

    #[tokio::test]
    async fn blank_query_never_hits_the_provider() {
        let provider = FakeProvider::default();

        for query in ["", "   ", "\t\n "] {
            let mut widget = SearchWidget::new();
            widget.set_query(query);

            let err = widget.submit_search(&provider).await.unwrap_err();

            assert_eq!(err, SearchError::EmptyInput);
            assert_eq!(widget.error_message().as_deref(), Some("Please enter a valid location."));
            assert!(!widget.is_loading());
        }

        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_search_stores_snapshot() {
        let provider = FakeProvider::replying(vec![Ok(paris())]);
        let mut widget = SearchWidget::new();
        widget.set_query("  Paris ");

        let snapshot = widget.submit_search(&provider).await.unwrap().cloned();

        assert_eq!(snapshot, Some(paris()));
        assert_eq!(provider.calls(), vec!["Paris".to_string()]);
        assert_eq!(
            widget.snapshot().map(WeatherSnapshot::label).as_deref(),
            Some("22°C - Moderate")
        );
        assert!(widget.error().is_none());
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_snapshot() {
        let provider = FakeProvider::replying(vec![Ok(paris()), Err(FetchError::NotFound(404))]);
        let mut widget = SearchWidget::new();

        widget.set_query("Paris");
        widget.submit_search(&provider).await.unwrap();

        widget.set_query("Atlantis");
        let err = widget.submit_search(&provider).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FetchFailure);
        assert_eq!(widget.error_message().as_deref(), Some(FETCH_FAILURE_MESSAGE));
        assert_eq!(widget.snapshot(), Some(&paris()));
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_error() {
        let provider = FakeProvider::replying(vec![
            Err(FetchError::Parse("missing field `current`".into())),
            Ok(paris()),
        ]);
        let mut widget = SearchWidget::new();
        widget.set_query("Paris");

        assert!(widget.submit_search(&provider).await.is_err());
        assert!(widget.error().is_some());

        widget.submit_search(&provider).await.unwrap();
        assert!(widget.error().is_none());
    }

    #[tokio::test]
    async fn repeated_search_yields_identical_snapshot() {
        let provider = FakeProvider::replying(vec![Ok(paris()), Ok(paris())]);
        let mut widget = SearchWidget::new();
        widget.set_query("Paris");

        let first = widget.submit_search(&provider).await.unwrap().cloned();
        let second = widget.submit_search(&provider).await.unwrap().cloned();

        assert_eq!(first, second);
        assert_eq!(provider.calls().len(), 2);
    }

    #[test]
    fn loading_is_true_only_between_begin_and_finish() {
        let mut widget = SearchWidget::new();
        widget.set_query("Paris");
        assert!(!widget.is_loading());

        let ticket = widget.begin_search().unwrap().expect("search should start");
        assert!(widget.is_loading());
        widget.finish_search(ticket, Ok(paris())).unwrap();
        assert!(!widget.is_loading());

        let ticket = widget.begin_search().unwrap().expect("search should start");
        assert!(widget.is_loading());
        widget.finish_search(ticket, Err(FetchError::NotFound(500))).unwrap_err();
        assert!(!widget.is_loading());
    }

    #[test]
    fn resubmission_is_ignored_while_loading() {
        let mut widget = SearchWidget::new();
        widget.set_query("Paris");

        let ticket = widget.begin_search().unwrap().expect("search should start");
        assert_eq!(widget.begin_search().unwrap(), None);

        widget.finish_search(ticket, Ok(paris())).unwrap();
        assert!(widget.begin_search().unwrap().is_some());
    }

    #[test]
    fn abandoned_search_result_is_discarded() {
        let mut widget = SearchWidget::new();
        widget.set_query("Paris");

        let stale = widget.begin_search().unwrap().expect("search should start");
        widget.abandon_search();
        assert!(!widget.is_loading());

        widget.set_query("Oslo");
        let fresh = widget.begin_search().unwrap().expect("search should start");
        assert_eq!(fresh.location(), "Oslo");

        widget.finish_search(stale, Err(FetchError::NotFound(404))).unwrap();
        assert!(widget.is_loading());
        assert!(widget.error().is_none());

        let oslo = WeatherSnapshot::celsius(3.0, "Light snow".into(), "Oslo".into());
        widget.finish_search(fresh, Ok(oslo.clone())).unwrap();
        assert_eq!(widget.snapshot(), Some(&oslo));
    }
}
