//! Controller behavior against a scripted provider on a paused clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;
use typeahead::{
    Change, ClientError, DefaultFormatter, Hint, Mode, NavKey, Record, SearchProvider, Typeahead,
    TypeaheadConfig,
};
use typeahead_client::ClientResult;

#[derive(Default)]
struct ScriptedProvider {
    queries: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    fail: bool,
}

impl ScriptedProvider {
    fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_owned(), delay);
        self
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().expect("object")
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, query: &str) -> ClientResult<Vec<Record>> {
        self.queries.lock().push(query.to_owned());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(ClientError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(vec![
            record(json!({"id": format!("{query}-1"), "name": format!("{query} one"), "rank": 1})),
            record(json!({"id": format!("{query}-2"), "name": format!("{query} two"), "rank": 2})),
        ])
    }
}

struct Harness {
    selector: Typeahead,
    provider: Arc<ScriptedProvider>,
    changes: Arc<Mutex<Vec<Change>>>,
}

impl Harness {
    fn new(provider: ScriptedProvider, config: TypeaheadConfig) -> Self {
        let provider = Arc::new(provider);
        let dyn_provider: Arc<dyn SearchProvider> = provider.clone();
        let mut selector = Typeahead::new(config, Some(dyn_provider), Arc::new(DefaultFormatter));
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        selector.on_change(move |change| sink.lock().push(change.clone()));
        Self {
            selector,
            provider,
            changes,
        }
    }

    fn changes(&self) -> Vec<Change> {
        self.changes.lock().clone()
    }

    fn option_ids(&self) -> Vec<String> {
        self.selector
            .options()
            .into_iter()
            .map(|option| option.id.clone())
            .collect()
    }
}

#[tokio::test(start_paused = true)]
async fn test_search_runs_once_after_quiet_interval() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.focus();
    for text in ["a", "ac", "acm", "acme"] {
        h.selector.input(text);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    h.selector.settle().await;

    assert_eq!(h.provider.queries(), vec!["acme".to_string()]);
    assert_eq!(h.option_ids(), vec!["acme-1", "acme-2"]);
    assert_eq!(h.selector.cursor().index(), Some(0));
    assert_eq!(h.selector.mode(), Mode::Searching);
    assert!(h.selector.is_open());
    assert!(!h.selector.has_pending());
}

#[tokio::test(start_paused = true)]
async fn test_short_text_never_searches() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.focus();
    h.selector.input("ac");
    h.selector.settle().await;

    assert!(h.provider.queries().is_empty());
    assert_eq!(h.selector.hint(), Some(Hint::TypeMore(1)));
    assert!(h.selector.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_min_search_length_is_configurable() {
    let config = TypeaheadConfig::default().with_min_search_length(1);
    let mut h = Harness::new(ScriptedProvider::default(), config);
    h.selector.input("a");
    h.selector.settle().await;

    assert_eq!(h.provider.queries(), vec!["a".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_is_overtaken() {
    let provider = ScriptedProvider::default().with_delay("acme", Duration::from_secs(1));
    let mut h = Harness::new(provider, TypeaheadConfig::default());
    h.selector.focus();
    h.selector.input("acme");
    assert!(h.selector.next_wakeup().await);
    assert!(h.selector.is_loading());

    h.selector.input("acme f");
    h.selector.settle().await;

    assert_eq!(
        h.provider.queries(),
        vec!["acme".to_string(), "acme f".to_string()]
    );
    assert_eq!(h.option_ids(), vec!["acme f-1", "acme f-2"]);
    assert!(!h.selector.is_loading());
    assert_eq!(h.selector.hint(), None);
}

#[tokio::test(start_paused = true)]
async fn test_enter_commits_with_record_passthrough() {
    let config = TypeaheadConfig::default().with_passthrough_records(true);
    let mut h = Harness::new(ScriptedProvider::default(), config);
    h.selector.focus();
    h.selector.input("acme");
    h.selector.settle().await;

    h.selector.key(NavKey::Down);
    h.selector.key(NavKey::Enter);

    let changes = h.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].id.as_deref(), Some("acme-2"));
    let record = changes[0].record.as_ref().expect("record passed through");
    assert_eq!(record["rank"], json!(2));
    assert_eq!(h.selector.text(), "acme two");
    assert_eq!(h.selector.mode(), Mode::Display);
    assert!(!h.selector.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_tab_commits_highlighted_row_without_record() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.focus();
    h.selector.input("acme");
    h.selector.settle().await;
    h.selector.key(NavKey::Tab);

    let changes = h.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].id.as_deref(), Some("acme-1"));
    assert_eq!(changes[0].record, None);
}

#[tokio::test(start_paused = true)]
async fn test_props_are_silent_and_blur_commits() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.set_props(Some("A1"), Some("Acme Corp"));
    assert!(h.changes().is_empty());
    assert_eq!(h.selector.text(), "Acme Corp");

    h.selector.focus();
    assert!(h.selector.take_select_all());
    assert!(!h.selector.take_select_all());

    h.selector.input("acme");
    h.selector.settle().await;
    h.selector.blur();

    let changes = h.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].id.as_deref(), Some("acme-1"));
    assert_eq!(h.selector.text(), "acme one");
}

#[tokio::test(start_paused = true)]
async fn test_blur_before_search_reverts_silently() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.set_props(Some("A1"), Some("Acme Corp"));
    h.selector.focus();
    h.selector.input("zzz");
    h.selector.blur();

    assert!(!h.selector.has_pending());
    assert!(h.changes().is_empty());
    assert_eq!(h.selector.text(), "Acme Corp");
    assert_eq!(h.selector.mode(), Mode::Display);

    h.selector.settle().await;
    assert!(h.provider.queries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_escape_restores_committed_label() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.set_props(Some("A1"), Some("Acme Corp"));
    h.selector.focus();
    h.selector.input("zzz");
    h.selector.key(NavKey::Escape);

    assert_eq!(h.selector.text(), "Acme Corp");
    assert!(!h.selector.is_open());
    assert!(!h.selector.has_pending());
}

#[tokio::test(start_paused = true)]
async fn test_failure_shows_hint_and_keeps_quiet() {
    let mut h = Harness::new(ScriptedProvider::failing(), TypeaheadConfig::default());
    h.selector.focus();
    h.selector.input("acme");
    h.selector.settle().await;

    assert_eq!(h.selector.hint(), Some(Hint::SearchFailed));
    assert!(h.selector.options().is_empty());
    assert!(h.changes().is_empty());
}

struct PanickingProvider;

#[async_trait]
impl SearchProvider for PanickingProvider {
    async fn search(&self, _query: &str) -> ClientResult<Vec<Record>> {
        panic!("provider bug");
    }
}

#[tokio::test(start_paused = true)]
async fn test_panicking_provider_counts_as_failure() {
    let provider: Arc<dyn SearchProvider> = Arc::new(PanickingProvider);
    let mut selector = Typeahead::new(
        TypeaheadConfig::default(),
        Some(provider),
        Arc::new(DefaultFormatter),
    );
    selector.focus();
    selector.input("acme");
    selector.settle().await;

    assert!(!selector.has_pending());
    assert!(!selector.is_loading());
    assert_eq!(selector.hint(), Some(Hint::SearchFailed));
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_query_is_not_sent() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.focus();
    h.selector.input("temp_123");
    h.selector.settle().await;

    assert!(h.provider.queries().is_empty());
    assert_eq!(h.selector.hint(), Some(Hint::NoResults));
}

#[tokio::test(start_paused = true)]
async fn test_commit_while_loading_orphans_search() {
    let provider = ScriptedProvider::default().with_delay("acme", Duration::from_secs(1));
    let mut h = Harness::new(provider, TypeaheadConfig::default());
    h.selector.focus();
    h.selector.input("acme");
    assert!(h.selector.next_wakeup().await);

    h.selector.commit(Some("Z1"));
    assert!(!h.selector.is_loading());
    h.selector.settle().await;

    assert_eq!(h.selector.text(), "Z1");
    assert_eq!(h.selector.mode(), Mode::Display);
    assert!(h.selector.options().is_empty());
    let changes = h.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].option, None);
}

#[tokio::test(start_paused = true)]
async fn test_commit_none_clears() {
    let mut h = Harness::new(ScriptedProvider::default(), TypeaheadConfig::default());
    h.selector.set_props(Some("A1"), Some("Acme Corp"));
    h.selector.commit(None);

    assert_eq!(h.changes(), vec![Change::cleared()]);
    assert_eq!(h.selector.text(), "");
    assert_eq!(h.selector.mode(), Mode::Neutral);
}

#[tokio::test(start_paused = true)]
async fn test_without_provider_typing_stays_local() {
    let mut selector = Typeahead::new(
        TypeaheadConfig::default(),
        None,
        Arc::new(DefaultFormatter),
    );
    selector.focus();
    selector.input("acme");
    selector.settle().await;

    assert_eq!(selector.mode(), Mode::Searching);
    assert_eq!(selector.hint(), None);
    assert!(!selector.is_open());
}
