use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use knn_scatter::{
    DataSource, Dataset, Explorer, ExplorerConfig, LoadError, Selection, clamp_k,
    filter_by_category, load_source,
};

// ---------------------------------------------------------------------------
// Dataset load lifecycle
// ---------------------------------------------------------------------------

/// Where the one-shot dataset load stands.
pub enum LoadState {
    /// Background read in flight; no interaction is meaningful yet.
    Loading {
        source: DataSource,
        receiver: Receiver<Result<Dataset, LoadError>>,
    },
    /// Dataset published.
    Ready(Explorer),
    /// Load failed. Not retried; the message is shown in a notice.
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// User actions
// ---------------------------------------------------------------------------

/// A change requested by a widget. Panels draw from one snapshot and
/// collect actions; they are applied once the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectCategory(String),
    SetQuery(f64),
    SetK(usize),
    Open(DataSource),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,
    pub load: LoadState,
    /// Current category / query / k. Replaced as a whole on every change.
    pub selection: Selection,
}

impl AppState {
    /// Start loading the configured dataset.
    pub fn new(config: ExplorerConfig) -> Self {
        let source = DataSource::from_location(&config.dataset);
        let mut state = Self::idle(config);
        state.begin_load(source);
        state
    }

    fn idle(config: ExplorerConfig) -> Self {
        let selection = Selection {
            category: String::new(),
            query_x: config.default_query,
            k: config.default_k,
        };
        let load = LoadState::Unavailable("no dataset loaded".to_string());
        Self {
            config,
            load,
            selection,
        }
    }

    /// Read `source` on a worker thread; [`AppState::poll_load`] picks up the result.
    pub fn begin_load(&mut self, source: DataSource) {
        let (sender, receiver) = mpsc::channel();
        let worker_source = source.clone();
        let spawned = thread::Builder::new()
            .name("dataset-load".to_string())
            .spawn(move || {
                // The receiver is gone if another load replaced this one.
                let _ = sender.send(load_source(&worker_source));
            });

        match spawned {
            Ok(_) => {
                log::info!("Loading dataset from {source}");
                self.load = LoadState::Loading { source, receiver };
            }
            Err(e) => {
                log::error!("Failed to start dataset load: {e}");
                self.load = LoadState::Unavailable(format!("Error: {e}"));
            }
        }
    }

    /// Check for a finished load. Returns true when the state changed.
    pub fn poll_load(&mut self) -> bool {
        let (source, polled) = match &self.load {
            LoadState::Loading { source, receiver } => (source.clone(), receiver.try_recv()),
            _ => return false,
        };
        match polled {
            Ok(result) => self.finish_load(&source, result),
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                log::error!("Dataset loader for {source} stopped without a result");
                self.load =
                    LoadState::Unavailable(format!("Error: loading {source} was interrupted"));
            }
        }
        true
    }

    /// Publish a loaded dataset or enter the unavailable state.
    pub fn finish_load(&mut self, source: &DataSource, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => {
                let explorer = Explorer::new(dataset, self.config.clone());
                self.selection = explorer.default_selection();
                self.load = LoadState::Ready(explorer);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e:#}");
                self.load = LoadState::Unavailable(format!("Error: {e:#}"));
            }
        }
    }

    pub fn explorer(&self) -> Option<&Explorer> {
        match &self.load {
            LoadState::Ready(explorer) => Some(explorer),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    /// Select a category; k is brought back into the new subset's range.
    pub fn set_category(&mut self, category: &str) {
        if let Some(explorer) = self.explorer() {
            self.selection = explorer.with_category(&self.selection, category);
        }
    }

    pub fn set_query(&mut self, query_x: f64) {
        self.selection = Selection {
            query_x,
            ..self.selection.clone()
        };
    }

    /// Set k, clamped to the legal range of the current subset.
    pub fn set_k(&mut self, k: usize) {
        let k = clamp_k(k, self.subset_len(), self.max_k());
        self.selection = Selection {
            k,
            ..self.selection.clone()
        };
    }

    /// Apply one user action collected while drawing a frame.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectCategory(category) => self.set_category(&category),
            Action::SetQuery(query_x) => self.set_query(query_x),
            Action::SetK(k) => self.set_k(k),
            Action::Open(source) => self.begin_load(source),
        }
    }

    fn subset_len(&self) -> usize {
        self.explorer().map_or(0, |explorer| {
            filter_by_category(explorer.dataset(), &self.selection.category).len()
        })
    }

    fn max_k(&self) -> usize {
        self.explorer()
            .map_or(self.config.max_k, |explorer| explorer.config().max_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use knn_scatter::parse;

    const ROSTER: &str = "year,player,sh,g\n2021,Ann,10,3\n2021,Bob,20,5\n2022,Cid,15,4\n";

    fn source() -> DataSource {
        DataSource::File(PathBuf::from("roster.csv"))
    }

    fn ready_state() -> AppState {
        let mut state = AppState::idle(ExplorerConfig::default());
        state.finish_load(&source(), Ok(parse(ROSTER)));
        state
    }

    #[test]
    fn publishing_sets_default_selection() {
        let state = ready_state();
        assert!(state.explorer().is_some());
        assert_eq!(state.selection.category, "2021");
        assert_eq!(state.selection.k, 2);
        let snap = state.explorer().unwrap().snapshot(&state.selection);
        assert_eq!(snap.valid_k_range(), 1..=2);
    }

    #[test]
    fn failed_load_is_unavailable() {
        let mut state = AppState::idle(ExplorerConfig::default());
        let err = LoadError::RemoteUnsupported("http://x/y.csv".into());
        state.finish_load(&source(), Err(err));
        match &state.load {
            LoadState::Unavailable(msg) => assert!(msg.contains("http://x/y.csv")),
            _ => panic!("expected unavailable state"),
        }
        assert!(state.explorer().is_none());
        // Inputs before a dataset exists change nothing that matters.
        state.set_category("2021");
        assert_eq!(state.selection.category, "");
        assert!(!state.poll_load());
    }

    #[test]
    fn inputs_replace_selection() {
        let mut state = ready_state();
        state.set_query(12.0);
        state.set_k(9);
        assert_eq!(state.selection.k, 2);
        state.set_category("2022");
        assert_eq!(state.selection.k, 1);
        assert_eq!(state.selection.query_x, 12.0);

        let explorer = state.explorer().unwrap();
        let snap = explorer.snapshot(&state.selection);
        assert_eq!(snap.active_subset()[0].label, "Cid");
        assert_eq!(snap.prediction(), 4.0);
    }

    #[test]
    fn actions_apply_in_order() {
        let mut state = ready_state();
        for action in [
            Action::SetK(2),
            Action::SetQuery(20.0),
            Action::SelectCategory("2099".to_string()),
            Action::SetK(40),
        ] {
            state.apply(action);
        }
        // Unknown category falls back to all three records.
        assert_eq!(state.selection.category, "2099");
        assert_eq!(state.selection.query_x, 20.0);
        assert_eq!(state.selection.k, 3);
    }

    #[test]
    fn k_is_capped_by_the_loaded_config() {
        let config = ExplorerConfig {
            max_k: 1,
            ..ExplorerConfig::default()
        };
        let mut state = AppState::idle(config);
        state.finish_load(&source(), Ok(parse(ROSTER)));
        state.set_k(5);
        assert_eq!(state.selection.k, 1);
        let snap = state.explorer().unwrap().snapshot(&state.selection);
        assert_eq!(snap.valid_k_range(), 1..=1);
    }

    #[test]
    fn k_without_dataset_is_one() {
        let mut state = AppState::idle(ExplorerConfig::default());
        state.set_k(7);
        assert_eq!(state.selection.k, 1);
        assert!(state.explorer().is_none());
    }

    #[test]
    fn background_load_publishes_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();

        let mut state = AppState::idle(ExplorerConfig::default());
        state.begin_load(DataSource::File(file.path().to_path_buf()));
        assert!(state.is_loading());

        let deadline = Instant::now() + Duration::from_secs(10);
        while !state.poll_load() {
            assert!(Instant::now() < deadline, "load did not finish");
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(state.explorer().unwrap().dataset().len(), 3);
    }

    #[test]
    fn background_load_of_missing_file_is_unavailable() {
        let mut state = AppState::idle(ExplorerConfig::default());
        state.begin_load(DataSource::File(PathBuf::from("/nonexistent/roster.csv")));

        let deadline = Instant::now() + Duration::from_secs(10);
        while !state.poll_load() {
            assert!(Instant::now() < deadline, "load did not finish");
            thread::sleep(Duration::from_millis(5));
        }
        assert!(matches!(state.load, LoadState::Unavailable(_)));
    }
}
