//! Decoding tests for the backend response envelope: only structurally valid
//! dashboards may leave the client.

use insightai::{AnalysisError, GeminiClient};

mod common;
use common::charted_result;

fn envelope(inner: &str) -> String {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": inner } ] } }
        ]
    })
    .to_string()
}

#[test]
fn extracts_valid_response() -> anyhow::Result<()> {
    let inner = serde_json::to_string(&charted_result())?;
    let result = GeminiClient::extract_result(&envelope(&inner))?;
    assert_eq!(result, charted_result());
    Ok(())
}

#[test]
fn strips_markdown_code_fences() -> anyhow::Result<()> {
    let inner = format!("```json\n{}\n```", serde_json::to_string(&charted_result())?);
    let result = GeminiClient::extract_result(&envelope(&inner))?;
    assert_eq!(result.dashboard_title, "Q1 Report");
    Ok(())
}

#[test]
fn rejects_empty_candidates() {
    let err = GeminiClient::extract_result(r#"{ "candidates": [] }"#).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse), "{err}");
}

#[test]
fn rejects_blank_text() {
    let err = GeminiClient::extract_result(&envelope("   ")).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse), "{err}");
}

#[test]
fn rejects_malformed_inner_json() {
    let err = GeminiClient::extract_result(&envelope("not json at all")).unwrap_err();
    assert!(matches!(err, AnalysisError::Malformed(_)), "{err}");
}

#[test]
fn rejects_wrong_shape() {
    // Valid JSON, wrong fields.
    let err = GeminiClient::extract_result(&envelope(r#"{"title": "nope"}"#)).unwrap_err();
    assert!(matches!(err, AnalysisError::Malformed(_)), "{err}");
}

#[test]
fn schema_conforming_response_is_accepted() -> anyhow::Result<()> {
    // A backend that obeys the requested response schema to the letter
    // (dataKey "value", xAxisKey "name", points of {name, value}) must never
    // be rejected by the client's own validation.
    let inner = serde_json::json!({
        "dashboardTitle": "Sales",
        "summary": "Steady quarter.",
        "kpis": [{ "label": "Revenue", "value": "1200" }],
        "charts": [{
            "id": "revenue-by-month",
            "title": "Revenue by month",
            "description": "Monthly revenue totals",
            "type": "bar",
            "dataKey": "value",
            "xAxisKey": "name",
            "data": [
                { "name": "Jan", "value": 10 },
                { "name": "Feb", "value": 14 }
            ]
        }],
        "recommendations": ["Keep going"]
    })
    .to_string();

    let result = GeminiClient::extract_result(&envelope(&inner))?;
    assert_eq!(result.charts[0].data[0].number("value"), Some(10.0));
    Ok(())
}

#[test]
fn response_schema_keys_match_the_data_item_shape() {
    // The schema offers data points of exactly {name, value}, so the key
    // declarations must be pinned to those names; anything looser lets a
    // conforming response fail validation.
    let schema = insightai::client::response_schema();
    let chart = &schema["properties"]["charts"]["items"]["properties"];

    assert_eq!(chart["dataKey"]["enum"], serde_json::json!(["value"]));
    assert_eq!(chart["xAxisKey"]["enum"], serde_json::json!(["name"]));
    assert_eq!(
        chart["data"]["items"]["required"],
        serde_json::json!(["name", "value"])
    );
}

#[test]
fn client_configuration_is_explicit() -> anyhow::Result<()> {
    // Construction surfaces HTTP-client build failures instead of swallowing
    // them, and the model override threads through the builder.
    let client = GeminiClient::new("test-key", "gemini-2.5-flash")?;
    assert_eq!(client.model(), "gemini-2.5-flash");

    let client = client.with_model("gemini-2.5-pro");
    assert_eq!(client.model(), "gemini-2.5-pro");
    Ok(())
}

#[test]
fn rejects_schema_violations() -> anyhow::Result<()> {
    let mut result = charted_result();
    let copy = result.charts[0].clone();
    result.charts.push(copy);
    let inner = serde_json::to_string(&result)?;

    let err = GeminiClient::extract_result(&envelope(&inner)).unwrap_err();
    assert!(matches!(err, AnalysisError::Schema(_)), "{err}");
    Ok(())
}
