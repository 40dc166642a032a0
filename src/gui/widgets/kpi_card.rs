use iced::{
    Color, Element, Length,
    widget::{column, container, row, space, text},
};

use crate::gui::Message;
use crate::models::{Kpi, KpiIcon, TrendColor};

use super::{MUTED, muted_text, panel};

/// A labeled metric card: label + glyph on top, the value large, and an
/// optional trend line tinted by its semantic direction.
pub fn view(kpi: &Kpi) -> Element<'_, Message> {
    let mut header = row![muted_text(&kpi.label).size(13)].spacing(8);
    if let Some(icon) = kpi.icon {
        header = header.push(space::horizontal()).push(muted_text(glyph(icon)));
    }

    let mut card = column![header, text(kpi.value.display()).size(30)].spacing(8);
    if let Some(trend) = &kpi.trend {
        card = card.push(text(trend).size(13).color(trend_color(kpi.trend_color)));
    }

    container(card)
        .style(panel)
        .padding(20)
        .width(Length::FillPortion(1))
        .into()
}

fn glyph(icon: KpiIcon) -> &'static str {
    match icon {
        KpiIcon::Dollar => "$",
        KpiIcon::Users => "\u{1F465}",    // 👥
        KpiIcon::Trend => "\u{1F4C8}",    // 📈
        KpiIcon::Activity => "\u{26A1}",  // ⚡
    }
}

fn trend_color(color: Option<TrendColor>) -> Color {
    match color {
        Some(TrendColor::Positive) => Color::from_rgb8(0x34, 0xd3, 0x99),
        Some(TrendColor::Negative) => Color::from_rgb8(0xf8, 0x71, 0x71),
        Some(TrendColor::Neutral) | None => MUTED,
    }
}
