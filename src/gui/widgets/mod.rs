pub mod chart;
pub mod kpi_card;

use iced::widget::container::{self, bordered_box};
use iced::widget::text::{IntoFragment, Text};
use iced::{Color, Theme, border};

/// Fixed series palette (neon on dark), cycled by chart index.
const CHART_COLORS: [(u8, u8, u8); 7] = [
    (0x22, 0xd3, 0xee), // cyan
    (0xc0, 0x84, 0xfc), // purple
    (0xf4, 0x72, 0xb6), // pink
    (0x34, 0xd3, 0x99), // emerald
    (0xfb, 0xbf, 0x24), // amber
    (0x60, 0xa5, 0xfa), // blue
    (0xf8, 0x71, 0x71), // red
];

pub const MUTED: Color = Color::from_rgb(0.58, 0.64, 0.72);
pub const ACCENT: Color = Color::from_rgb(0.38, 0.65, 0.98);

pub fn chart_color(index: usize) -> Color {
    let (r, g, b) = CHART_COLORS[index % CHART_COLORS.len()];
    Color::from_rgb8(r, g, b)
}

/// Parse a `#rrggbb` series-color override. Anything unparseable yields
/// `None` and the caller falls back to the palette.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::from_rgb8(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

pub fn muted_text<'a>(content: impl IntoFragment<'a>) -> Text<'a> {
    iced::widget::text(content).color(MUTED)
}

pub fn accent_text<'a>(content: impl IntoFragment<'a>) -> Text<'a> {
    iced::widget::text(content).color(ACCENT)
}

/// Card background shared by every dashboard panel.
pub fn panel(theme: &Theme) -> container::Style {
    bordered_box(theme).border(border::rounded(12.0))
}
