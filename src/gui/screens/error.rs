use iced::{
    Alignment::Center,
    Element, Length,
    widget::{button, column, container, text},
};

use crate::gui::Message;
use crate::gui::widgets::{muted_text, panel};

pub fn view(message: &str) -> Element<'_, Message> {
    let card = container(
        column![
            text("Analysis Failed").size(28),
            muted_text(message),
            button(text("Retry"))
                .padding([10.0, 20.0])
                .on_press(Message::Reset),
        ]
        .spacing(16)
        .align_x(Center),
    )
    .style(panel)
    .padding(32)
    .max_width(480);

    container(card)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
