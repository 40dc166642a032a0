use iced::{
    Alignment::Center,
    Element, Length,
    widget::{column, container, text},
};

use crate::flow::AppState;
use crate::gui::Message;
use crate::gui::widgets::muted_text;

/// Indeterminate-progress screen shown while a cycle is in flight.
pub fn view(state: AppState, file_name: Option<&str>) -> Element<'_, Message> {
    let headline = match state {
        AppState::Parsing => "Ingesting data stream...",
        _ => "Analysis in progress...",
    };

    let mut content = column![
        text(headline).size(32),
        muted_text("Deconstructing rows, identifying correlations, and formulating strategy."),
    ]
    .spacing(16)
    .align_x(Center);

    if let Some(name) = file_name {
        content = content.push(muted_text(format!("File: {name}")).size(12));
    }

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
