use std::path::PathBuf;

use crate::flow::Cycle;
use crate::models::AnalysisResult;

#[derive(Debug, Clone)]
pub enum Message {
    /// Open the native file dialog.
    PickFile,
    /// Dialog closed; `None` means the user cancelled.
    FilePicked(Option<PathBuf>),
    /// File read and row-capped; `Err` carries the user-facing rejection.
    Ingested {
        cycle: Cycle,
        outcome: Result<String, String>,
    },
    /// Backend finished; `None` means it failed (already logged).
    AnalysisDone {
        cycle: Cycle,
        result: Option<Box<AnalysisResult>>,
    },
    /// Back to the landing screen.
    Reset,
}
