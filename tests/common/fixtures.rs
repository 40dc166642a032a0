use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use insightai::{
    AnalysisError, AnalysisResult, Analyzer, ChartConfig, ChartDataPoint, ChartType, FieldValue,
    Kpi,
};

/// Build a CSV blob of `lines` rows: a header plus numbered data rows, no
/// trailing newline.
pub fn csv_of(lines: usize) -> String {
    let mut rows = Vec::with_capacity(lines);
    rows.push("name,value".to_string());
    for i in 1..lines {
        rows.push(format!("row{i},{i}"));
    }
    rows.join("\n")
}

/// A data point from (key, value) pairs.
pub fn point(pairs: &[(&str, FieldValue)]) -> ChartDataPoint {
    ChartDataPoint(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// The "Q1 Report" scenario result from the design notes.
pub fn q1_report() -> AnalysisResult {
    AnalysisResult {
        dashboard_title: "Q1 Report".to_string(),
        summary: "Revenue grew steadily.\n\nMarketing drove most of the gain.".to_string(),
        kpis: vec![Kpi {
            label: "Revenue".to_string(),
            value: FieldValue::Number(1000.0),
            trend: None,
            trend_color: None,
            icon: None,
        }],
        charts: vec![],
        recommendations: vec!["Expand marketing".to_string()],
    }
}

/// A result with one populated chart, for validation and renderer-contract
/// tests.
pub fn charted_result() -> AnalysisResult {
    AnalysisResult {
        charts: vec![ChartConfig {
            id: "sales".to_string(),
            title: "Sales by month".to_string(),
            description: "Monthly totals".to_string(),
            chart_type: ChartType::Bar,
            data_key: "value".to_string(),
            x_axis_key: "name".to_string(),
            data: vec![
                point(&[("name", "Jan".into()), ("value", 10.0.into())]),
                point(&[("name", "Feb".into()), ("value", 14.0.into())]),
            ],
            color: None,
        }],
        ..q1_report()
    }
}

/// `Analyzer` double: serves a fixed outcome and records every CSV payload it
/// receives.
pub struct MockAnalyzer {
    response: Option<AnalysisResult>,
    pub seen: Mutex<Vec<String>>,
}

impl MockAnalyzer {
    pub fn succeeding(result: AnalysisResult) -> Self {
        Self {
            response: Some(result),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn last_payload(&self) -> Option<String> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, csv_text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.seen.lock().unwrap().push(csv_text.to_string());
        match &self.response {
            Some(result) => Ok(result.clone()),
            None => Err(AnalysisError::EmptyResponse),
        }
    }
}
