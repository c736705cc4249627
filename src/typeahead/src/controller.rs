//! Runtime that executes reducer effects.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use typeahead_client::SearchProvider;
use typeahead_core::{
    Change, Cursor, DisplayFormatter, Effect, Hint, Mode, NavKey, ResultSet, SelectOption,
    Selection, SelectorEvent, SelectorState, is_placeholder_id,
};

use crate::config::TypeaheadConfig;

type ChangeCallback = Box<dyn FnMut(&Change) + Send>;

/// Background work reporting back to the controller.
#[derive(Debug)]
enum Wakeup {
    DebounceElapsed {
        generation: u64,
    },
    Fetched {
        token: u64,
        query: String,
        outcome: Result<ResultSet, String>,
    },
}

/// One typeahead selector bound to a search provider.
///
/// Operations that can start background work (`input`, `key`, `blur`) must
/// run inside a tokio runtime. Background results are applied only when the
/// owner calls [`Typeahead::next_wakeup`] or [`Typeahead::settle`].
pub struct Typeahead {
    state: SelectorState,
    config: TypeaheadConfig,
    provider: Option<Arc<dyn SearchProvider>>,
    formatter: Arc<dyn DisplayFormatter>,
    on_change: Option<ChangeCallback>,
    wakeup_tx: mpsc::UnboundedSender<Wakeup>,
    wakeup_rx: mpsc::UnboundedReceiver<Wakeup>,
    debounce: Option<JoinHandle<()>>,
    debounce_generation: u64,
    in_flight: usize,
    select_all: bool,
}

impl fmt::Debug for Typeahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeahead")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("searchable", &self.provider.is_some())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Typeahead {
    /// Create a selector. Without a provider, typing never searches.
    pub fn new(
        config: TypeaheadConfig,
        provider: Option<Arc<dyn SearchProvider>>,
        formatter: Arc<dyn DisplayFormatter>,
    ) -> Self {
        let state = SelectorState::new(config.policy(provider.is_some()))
            .with_passthrough_records(config.passthrough_records);
        let (wakeup_tx, wakeup_rx) = mpsc::unbounded_channel();
        Self {
            state,
            config,
            provider,
            formatter,
            on_change: None,
            wakeup_tx,
            wakeup_rx,
            debounce: None,
            debounce_generation: 0,
            in_flight: 0,
            select_all: false,
        }
    }

    /// Register the host's change callback, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(&Change) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Host surface
    // ------------------------------------------------------------------

    /// Pass new `value` / `display_value` props from the host.
    pub fn set_props(&mut self, value: Option<&str>, display_value: Option<&str>) {
        self.dispatch(SelectorEvent::PropsChanged {
            value: value.map(str::to_owned),
            display_value: display_value.map(str::to_owned),
        });
    }

    /// The input text changed.
    pub fn input(&mut self, text: impl Into<String>) {
        self.dispatch(SelectorEvent::TextEdited(text.into()));
    }

    pub fn focus(&mut self) {
        self.dispatch(SelectorEvent::Focused);
    }

    pub fn blur(&mut self) {
        self.dispatch(SelectorEvent::Blurred);
    }

    pub fn key(&mut self, key: NavKey) {
        self.dispatch(SelectorEvent::Key(key));
    }

    /// Commit by identifier; `None` clears the selection.
    pub fn commit(&mut self, id: Option<&str>) {
        self.dispatch(SelectorEvent::Commit(id.map(str::to_owned)));
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn options(&self) -> Vec<&SelectOption> {
        self.state.results().options().collect()
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn hint(&self) -> Option<Hint> {
        self.state.hint()
    }

    /// Whether a debounce timer or a search is outstanding.
    pub fn has_pending(&self) -> bool {
        self.debounce.is_some() || self.in_flight > 0
    }

    /// Returns `true` once after focus asked for the input text to be selected.
    pub fn take_select_all(&mut self) -> bool {
        std::mem::take(&mut self.select_all)
    }

    // ------------------------------------------------------------------
    // Background work
    // ------------------------------------------------------------------

    /// Wait for one timer or search to report back and apply it.
    ///
    /// Returns `false` without waiting when nothing is outstanding.
    pub async fn next_wakeup(&mut self) -> bool {
        if !self.has_pending() {
            return false;
        }
        match self.wakeup_rx.recv().await {
            Some(wakeup) => {
                self.handle_wakeup(wakeup);
                true
            }
            None => false,
        }
    }

    /// Apply background results until nothing is outstanding.
    pub async fn settle(&mut self) {
        while self.next_wakeup().await {}
    }

    fn handle_wakeup(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::DebounceElapsed { generation } => {
                if generation != self.debounce_generation {
                    return;
                }
                self.debounce = None;
                self.dispatch(SelectorEvent::DebounceElapsed);
            }
            Wakeup::Fetched {
                token,
                query,
                outcome,
            } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let event = match outcome {
                    Ok(results) => SelectorEvent::FetchSucceeded {
                        token,
                        query,
                        results,
                    },
                    Err(message) => {
                        warn!(token, %query, error = %message, "Search failed");
                        SelectorEvent::FetchFailed {
                            token,
                            query,
                            message,
                        }
                    }
                };
                self.dispatch(event);
            }
        }
    }

    fn dispatch(&mut self, event: SelectorEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.state.apply(event) {
                if let Some(follow_up) = self.run(effect) {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    fn run(&mut self, effect: Effect) -> Option<SelectorEvent> {
        match effect {
            Effect::Notify(change) => {
                debug!(id = ?change.id, "Selection changed");
                if let Some(callback) = self.on_change.as_mut() {
                    callback(&change);
                }
                None
            }
            Effect::RestartDebounce => {
                self.restart_debounce();
                None
            }
            Effect::CancelDebounce => {
                self.cancel_debounce();
                None
            }
            Effect::Fetch { token, query } => self.fetch(token, query),
            Effect::SelectAllText => {
                self.select_all = true;
                None
            }
        }
    }

    fn restart_debounce(&mut self) {
        self.cancel_debounce();
        let generation = self.debounce_generation;
        let delay = self.config.debounce();
        let tx = self.wakeup_tx.clone();
        debug!(generation, ?delay, "Debounce scheduled");
        self.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Wakeup::DebounceElapsed { generation });
        }));
    }

    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        self.debounce_generation += 1;
    }

    /// Start a provider call; in-flight calls are never aborted.
    fn fetch(&mut self, token: u64, query: String) -> Option<SelectorEvent> {
        if is_placeholder_id(&query) {
            debug!(token, %query, "Refusing to search for a placeholder identifier");
            return Some(SelectorEvent::FetchSucceeded {
                token,
                query,
                results: ResultSet::default(),
            });
        }
        let Some(provider) = self.provider.clone() else {
            return Some(SelectorEvent::FetchSucceeded {
                token,
                query,
                results: ResultSet::default(),
            });
        };

        let formatter = Arc::clone(&self.formatter);
        let tx = self.wakeup_tx.clone();
        self.in_flight += 1;
        debug!(token, %query, "Search started");
        let search = {
            let query = query.clone();
            tokio::spawn(async move {
                provider
                    .search(&query)
                    .await
                    .map(|records| ResultSet::from_records(records, formatter.as_ref()))
                    .map_err(|e| e.to_string())
            })
        };
        // Every started call reports back, panics included.
        tokio::spawn(async move {
            let outcome = search
                .await
                .unwrap_or_else(|e| Err(format!("search task failed: {e}")));
            let _ = tx.send(Wakeup::Fetched {
                token,
                query,
                outcome,
            });
        });
        None
    }
}

impl Drop for Typeahead {
    fn drop(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }
}
