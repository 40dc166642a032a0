use iced::{
    Alignment::Center,
    Element, Length,
    widget::{button, column, container, row, text},
};

use crate::gui::Message;
use crate::gui::widgets::{accent_text, muted_text, panel};
use crate::ingest::{MAX_CSV_SIZE_BYTES, MAX_ROWS_FOR_ANALYSIS};

const FEATURES: [(&str, &str); 3] = [
    (
        "Visual Synthesis",
        "Auto-generated charts that adapt to your data's narrative.",
    ),
    (
        "Instant Insights",
        "AI-driven detection of anomalies and growth opportunities.",
    ),
    (
        "Strategic Briefs",
        "Executive summaries written in plain, actionable language.",
    ),
];

pub fn view(startup_error: Option<&str>) -> Element<'_, Message> {
    let limits = format!(
        "CSV up to {} MB; first {} rows are analyzed",
        MAX_CSV_SIZE_BYTES / (1024 * 1024),
        MAX_ROWS_FOR_ANALYSIS
    );

    let mut upload = button(text("Select CSV File").size(18)).padding([12.0, 24.0]);
    if startup_error.is_none() {
        upload = upload.on_press(Message::PickFile);
    }

    let features = row(FEATURES.map(|(title, desc)| {
        container(
            column![accent_text(title).size(18), muted_text(desc)].spacing(8),
        )
        .style(panel)
        .padding(20)
        .width(Length::FillPortion(1))
        .into()
    }))
    .spacing(16);

    let mut content = column![
        text("InsightAI").size(48),
        muted_text("Drop your CSV file into the analysis engine. It will identify patterns, visualize trends, and generate strategic insights."),
        upload,
        muted_text(limits).size(12),
        features,
    ]
    .spacing(24)
    .padding(40)
    .max_width(900)
    .align_x(Center);

    if let Some(error) = startup_error {
        content = content.push(
            container(text(format!("Analysis backend unavailable: {error}")))
                .style(panel)
                .padding(12),
        );
    }

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
