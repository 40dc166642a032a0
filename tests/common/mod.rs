mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from insightai for tests
pub use insightai::{
    AnalysisError, AnalysisResult, Analyzer, AppState, ChartConfig, ChartDataPoint, ChartType,
    FieldValue, Flow, Kpi, SchemaViolation, TrendColor, Trigger,
};
