use crate::client::Analyzer;
use crate::ingest;
use crate::models::AnalysisResult;

/// The one user-facing message for any backend fault. The underlying error is
/// logged, never rendered.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze data. Please try a different file.";

/// Phase of the current analysis cycle. Exactly one is active; owned by
/// [`Flow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Idle,
    Parsing,
    Analyzing,
    Complete,
    Error,
}

/// Payload-free discriminant of the events [`Flow`] reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    FileSelected,
    IngestionComplete,
    IngestionFailed,
    AnalysisSucceeded,
    AnalysisFailed,
    Reset,
}

/// The transition table. `None` means the trigger is ignored in that state;
/// callers must leave all owned data untouched in that case.
pub fn transition(state: AppState, trigger: Trigger) -> Option<AppState> {
    use AppState::*;
    use Trigger::*;
    match (state, trigger) {
        (Idle, FileSelected) => Some(Parsing),
        (Parsing, IngestionComplete) => Some(Analyzing),
        (Parsing, IngestionFailed) => Some(Error),
        (Analyzing, AnalysisSucceeded) => Some(Complete),
        (Analyzing, AnalysisFailed) => Some(Error),
        (Complete, Reset) | (Error, Reset) => Some(Idle),
        _ => None,
    }
}

/// Token identifying one analysis cycle. Async completions must present the
/// token minted when their cycle started; anything else is stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle(u64);

/// The single source of truth for the upload→parse→analyze→display flow:
/// current state, the last result, the user-facing error, and the cycle
/// counter. At most one cycle is in flight; a second file selection while
/// busy is rejected.
#[derive(Debug, Default)]
pub struct Flow {
    state: AppState,
    analysis: Option<AnalysisResult>,
    error: Option<String>,
    cycle: u64,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a cycle for a newly selected file. Returns the cycle token, or
    /// `None` if a cycle is already in flight (the trigger is rejected, not
    /// queued). The file name is for logging only.
    pub fn file_selected(&mut self, file_name: &str) -> Option<Cycle> {
        if !self.advance(Trigger::FileSelected) {
            return None;
        }
        self.error = None;
        self.analysis = None;
        self.cycle += 1;
        log::info!("cycle {} started for {file_name:?}", self.cycle);
        Some(Cycle(self.cycle))
    }

    /// Ingestion finished; hand off to the analysis backend.
    pub fn ingestion_complete(&mut self, cycle: Cycle) -> bool {
        self.current(cycle) && self.advance(Trigger::IngestionComplete)
    }

    /// The file was rejected at the selection boundary (oversized, unreadable
    /// or not text).
    pub fn ingestion_failed(&mut self, cycle: Cycle, message: String) -> bool {
        if !(self.current(cycle) && self.advance(Trigger::IngestionFailed)) {
            return false;
        }
        self.error = Some(message);
        true
    }

    /// Store a validated result and complete the cycle.
    pub fn analysis_succeeded(&mut self, cycle: Cycle, result: AnalysisResult) -> bool {
        if !(self.current(cycle) && self.advance(Trigger::AnalysisSucceeded)) {
            return false;
        }
        self.analysis = Some(result);
        true
    }

    /// The backend failed; any partial or prior result is discarded and the
    /// generic user-facing message is stored.
    pub fn analysis_failed(&mut self, cycle: Cycle) -> bool {
        if !(self.current(cycle) && self.advance(Trigger::AnalysisFailed)) {
            return false;
        }
        self.analysis = None;
        self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
        true
    }

    /// Back to a pristine `Idle`: result and error cleared.
    pub fn reset(&mut self) -> bool {
        if !self.advance(Trigger::Reset) {
            return false;
        }
        self.analysis = None;
        self.error = None;
        true
    }

    /// Drive one full cycle to completion: ingest, analyze, settle. Used by
    /// the headless mode and tests; the GUI applies the same events from its
    /// task completions instead.
    pub async fn run_cycle(
        &mut self,
        analyzer: &dyn Analyzer,
        file_name: &str,
        raw_text: &str,
    ) -> AppState {
        let Some(cycle) = self.file_selected(file_name) else {
            return self.state;
        };
        let csv = ingest::ingest(raw_text);
        self.ingestion_complete(cycle);
        match analyzer.analyze(&csv).await {
            Ok(result) => {
                self.analysis_succeeded(cycle, result);
            }
            Err(err) => {
                log::error!("analysis failed: {err}");
                self.analysis_failed(cycle);
            }
        }
        self.state
    }

    fn current(&self, cycle: Cycle) -> bool {
        if cycle.0 == self.cycle {
            return true;
        }
        log::warn!(
            "dropping stale completion for cycle {} (current is {})",
            cycle.0,
            self.cycle
        );
        false
    }

    fn advance(&mut self, trigger: Trigger) -> bool {
        match transition(self.state, trigger) {
            Some(next) => {
                log::debug!("{:?} --{trigger:?}--> {next:?}", self.state);
                self.state = next;
                true
            }
            None => {
                log::warn!("ignoring {trigger:?} in state {:?}", self.state);
                false
            }
        }
    }
}
