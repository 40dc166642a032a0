use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structured report returned by the analysis backend.
///
/// Field names on the wire are camelCase (`dashboardTitle`, ...) because that
/// is the shape the backend is instructed to produce. The struct is immutable
/// once stored for a cycle; `kpis`, `charts` and `recommendations` are in
/// display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub dashboard_title: String,
    /// Narrative summary; embedded line breaks are preserved on display.
    pub summary: String,
    pub kpis: Vec<Kpi>,
    pub charts: Vec<ChartConfig>,
    pub recommendations: Vec<String>,
}

/// A single labeled metric shown as a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub label: String,
    /// Numeric or pre-formatted text, e.g. `1000` or `"$1.2M"`.
    pub value: FieldValue,
    /// Change description, e.g. "+5% vs last month".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_color: Option<TrendColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<KpiIcon>,
}

/// Semantic direction of a KPI trend. The view maps this to an actual color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendColor {
    Positive,
    Negative,
    Neutral,
}

/// Glyph tags the backend may attach to a KPI. Fixed set; anything else is a
/// schema violation caught at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiIcon {
    Dollar,
    Users,
    Trend,
    Activity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
    Scatter,
}

impl ChartType {
    pub fn label(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
        }
    }
}

/// A value in a chart data point or KPI: JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Display form: numbers without a trailing `.0`, text verbatim.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            FieldValue::Number(n) => format!("{n}"),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// One row of a chart: an open field-name → value mapping. Always carries a
/// `name` field; the fields named by the owning chart's `xAxisKey` and
/// `dataKey` must be present (enforced by [`AnalysisResult::validate`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartDataPoint(pub BTreeMap<String, FieldValue>);

impl ChartDataPoint {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(FieldValue::display)
    }

    pub fn name(&self) -> Option<String> {
        self.text("name")
    }
}

/// Description of one chart. Drawing is delegated to the chart widget, keyed
/// by `chart_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Unique within one `AnalysisResult`.
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// Name of the numeric field to plot (Y axis).
    pub data_key: String,
    /// Name of the categorical field for the axis (X axis).
    pub x_axis_key: String,
    pub data: Vec<ChartDataPoint>,
    /// Optional `#rrggbb` override for the series color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A structural defect in a backend response. One violation invalidates the
/// whole response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("duplicate chart id {0:?}")]
    DuplicateChartId(String),
    #[error("chart {chart:?}: data point {index} is missing field {key:?}")]
    MissingField {
        chart: String,
        index: usize,
        key: String,
    },
    #[error("chart {chart:?}: data point {index} has non-numeric {key:?}")]
    NonNumericValue {
        chart: String,
        index: usize,
        key: String,
    },
}

impl AnalysisResult {
    /// Check the invariants the renderer depends on: unique chart ids, every
    /// data point carries `name` plus the chart's `xAxisKey`, and a numeric
    /// `dataKey` value.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        let mut seen = HashSet::new();
        for chart in &self.charts {
            if !seen.insert(chart.id.as_str()) {
                return Err(SchemaViolation::DuplicateChartId(chart.id.clone()));
            }
            for (index, point) in chart.data.iter().enumerate() {
                for key in ["name", chart.x_axis_key.as_str()] {
                    if point.get(key).is_none() {
                        return Err(SchemaViolation::MissingField {
                            chart: chart.id.clone(),
                            index,
                            key: key.to_string(),
                        });
                    }
                }
                match point.get(&chart.data_key) {
                    None => {
                        return Err(SchemaViolation::MissingField {
                            chart: chart.id.clone(),
                            index,
                            key: chart.data_key.clone(),
                        });
                    }
                    Some(value) if value.as_number().is_none() => {
                        return Err(SchemaViolation::NonNumericValue {
                            chart: chart.id.clone(),
                            index,
                            key: chart.data_key.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
