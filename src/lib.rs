pub mod client;
pub mod flow;
pub mod ingest;
pub mod models;

pub use client::{AnalysisError, Analyzer, GeminiClient};
pub use flow::{AppState, Cycle, Flow, Trigger, transition};
pub use ingest::{IngestionError, MAX_CSV_SIZE_BYTES, MAX_ROWS_FOR_ANALYSIS, ingest};
pub use models::{
    AnalysisResult, ChartConfig, ChartDataPoint, ChartType, FieldValue, Kpi, KpiIcon,
    SchemaViolation, TrendColor,
};

#[cfg(feature = "gui")]
pub mod gui;
