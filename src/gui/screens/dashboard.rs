use iced::{
    Element, Length,
    widget::{Column, Row, button, column, container, row, scrollable, space, text},
};

use crate::gui::Message;
use crate::gui::widgets::{accent_text, chart, kpi_card, muted_text, panel};
use crate::models::AnalysisResult;

/// The report view: pure function of a validated [`AnalysisResult`].
pub fn view(analysis: &AnalysisResult) -> Element<'_, Message> {
    let header = row![
        column![
            muted_text("Analysis complete").size(12),
            text(&analysis.dashboard_title).size(36),
        ]
        .spacing(4),
        space::horizontal(),
        button(text("New Analysis")).padding([10.0, 18.0]).on_press(Message::Reset),
    ]
    .spacing(16);

    let summary = container(
        column![
            accent_text("Strategic Briefing").size(20),
            // whitespace is significant here: paragraphs keep their breaks
            text(&analysis.summary),
        ]
        .spacing(12),
    )
    .style(panel)
    .padding(24)
    .width(Length::Fill);

    let kpis = Row::with_children(
        analysis
            .kpis
            .iter()
            .map(|kpi| kpi_card::view(kpi).into())
            .collect::<Vec<_>>(),
    )
    .spacing(16);

    let charts = Column::with_children(
        analysis
            .charts
            .iter()
            .enumerate()
            .map(|(index, config)| chart::view(config, index))
            .collect::<Vec<_>>(),
    )
    .spacing(24);

    let recommendations = Column::with_children(
        analysis
            .recommendations
            .iter()
            .enumerate()
            .map(|(index, rec)| {
                container(
                    row![
                        accent_text(format!("{:02}", index + 1)).size(16),
                        text(rec),
                    ]
                    .spacing(16),
                )
                .style(panel)
                .padding(16)
                .width(Length::Fill)
                .into()
            })
            .collect::<Vec<_>>(),
    )
    .spacing(12);

    let mut page = column![header, summary];
    if !analysis.kpis.is_empty() {
        page = page.push(kpis);
    }
    if !analysis.charts.is_empty() {
        page = page.push(charts);
    }
    if !analysis.recommendations.is_empty() {
        page = page
            .push(accent_text("Recommended Actions").size(24))
            .push(recommendations);
    }

    scrollable(page.spacing(24).padding(32).width(Length::Fill)).into()
}
