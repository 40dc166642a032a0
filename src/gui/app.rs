use std::sync::Arc;

use iced::{Element, Task, Theme};
use rfd::AsyncFileDialog;

use crate::client::{Analyzer, GeminiClient};
use crate::flow::{AppState, Flow};
use crate::ingest;

use super::Message;
use super::screens;

pub fn run(model_override: Option<String>) -> iced::Result {
    iced::application(
        move || InsightApp::new(model_override.clone()),
        InsightApp::update,
        InsightApp::view,
    )
    .title("InsightAI - CSV Intelligence Dashboard")
    .theme(InsightApp::theme)
    .run()
}

/// GUI shell around [`Flow`]. All application state lives in the flow
/// container; the shell only adds the backend client and display metadata.
pub struct InsightApp {
    flow: Flow,
    client: Option<Arc<GeminiClient>>,
    /// Set when the client could not be configured at startup (missing key);
    /// shown on the landing screen and upload stays disabled.
    startup_error: Option<String>,
    file_name: Option<String>,
}

impl InsightApp {
    pub fn new(model_override: Option<String>) -> (Self, Task<Message>) {
        let configured = GeminiClient::from_env().map(|client| match model_override {
            Some(model) => client.with_model(model),
            None => client,
        });
        let (client, startup_error) = match configured {
            Ok(client) => (Some(Arc::new(client)), None),
            Err(err) => {
                log::warn!("analysis backend unavailable: {err}");
                (None, Some(err.to_string()))
            }
        };
        (
            Self {
                flow: Flow::new(),
                client,
                startup_error,
                file_name: None,
            },
            Task::none(),
        )
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if self.client.is_none() {
                    return Task::none();
                }
                Task::perform(
                    AsyncFileDialog::new()
                        .set_title("Select a CSV file")
                        .add_filter("CSV data", &["csv", "txt"])
                        .pick_file(),
                    |handle| Message::FilePicked(handle.map(|h| h.path().to_path_buf())),
                )
            }
            Message::FilePicked(None) => Task::none(),
            Message::FilePicked(Some(path)) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                // Rejects a second upload while a cycle is in flight.
                let Some(cycle) = self.flow.file_selected(&name) else {
                    return Task::none();
                };
                self.file_name = Some(name);
                Task::perform(
                    async move {
                        let (_, raw) = ingest::load_csv_file(&path)?;
                        Ok(ingest::ingest(&raw))
                    },
                    move |outcome: Result<String, ingest::IngestionError>| Message::Ingested {
                        cycle,
                        outcome: outcome.map_err(|e| e.to_string()),
                    },
                )
            }
            Message::Ingested { cycle, outcome } => match outcome {
                Ok(csv) => {
                    if !self.flow.ingestion_complete(cycle) {
                        return Task::none();
                    }
                    let Some(client) = self.client.clone() else {
                        self.flow.analysis_failed(cycle);
                        return Task::none();
                    };
                    Task::perform(
                        async move { client.analyze(&csv).await },
                        move |result| match result {
                            Ok(result) => Message::AnalysisDone {
                                cycle,
                                result: Some(Box::new(result)),
                            },
                            Err(err) => {
                                log::error!("analysis failed: {err}");
                                Message::AnalysisDone {
                                    cycle,
                                    result: None,
                                }
                            }
                        },
                    )
                }
                Err(message) => {
                    self.flow.ingestion_failed(cycle, message);
                    Task::none()
                }
            },
            Message::AnalysisDone { cycle, result } => {
                match result {
                    Some(result) => {
                        self.flow.analysis_succeeded(cycle, *result);
                    }
                    None => {
                        self.flow.analysis_failed(cycle);
                    }
                }
                Task::none()
            }
            Message::Reset => {
                self.flow.reset();
                self.file_name = None;
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.flow.state() {
            AppState::Idle => screens::landing::view(self.startup_error.as_deref()),
            AppState::Parsing | AppState::Analyzing => {
                screens::loading::view(self.flow.state(), self.file_name.as_deref())
            }
            AppState::Complete => match self.flow.analysis() {
                Some(analysis) => screens::dashboard::view(analysis),
                None => screens::landing::view(self.startup_error.as_deref()),
            },
            AppState::Error => screens::error::view(
                self.flow
                    .error()
                    .unwrap_or(crate::flow::ANALYSIS_FAILED_MESSAGE),
            ),
        }
    }
}
