use iced::widget::canvas::{self, Canvas, Frame, Path, Stroke, path::Arc};
use iced::{
    Color, Element, Length, Point, Radians, Rectangle, Renderer, Size, Theme, mouse,
    widget::{column, container},
};

use crate::gui::Message;
use crate::models::{ChartConfig, ChartType};

use super::{MUTED, chart_color, muted_text, panel, parse_hex_color};

const AXIS: Color = Color::from_rgb(0.28, 0.33, 0.41);
const MARGIN_LEFT: f32 = 44.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 28.0;
const MAX_X_LABELS: usize = 8;

/// A chart panel: title, description and the drawn chart. Drawing is keyed by
/// the config's `type`; the series color comes from the config override or
/// the palette slot for this chart's position.
pub fn view(config: &ChartConfig, index: usize) -> Element<'_, Message> {
    let color = config
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or_else(|| chart_color(index));

    let canvas = Canvas::new(ChartCanvas { config, color })
        .width(Length::Fill)
        .height(Length::Fixed(320.0));

    container(
        column![
            iced::widget::text(&config.title).size(20),
            muted_text(format!(
                "{} · {}",
                config.chart_type.label(),
                config.description
            ))
            .size(13),
            canvas,
        ]
        .spacing(10),
    )
    .style(panel)
    .padding(20)
    .width(Length::Fill)
    .into()
}

struct ChartCanvas<'a> {
    config: &'a ChartConfig,
    color: Color,
}

impl ChartCanvas<'_> {
    /// Resolve the plotted series. The result was validated before it reached
    /// the renderer, but fail closed anyway: rows missing either key are
    /// skipped rather than panicking.
    fn series(&self) -> Vec<(String, f64)> {
        self.config
            .data
            .iter()
            .filter_map(|point| {
                let label = point.text(&self.config.x_axis_key)?;
                let value = point.number(&self.config.data_key)?;
                Some((label, value))
            })
            .collect()
    }
}

impl<Message> canvas::Program<Message> for ChartCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let series = self.series();

        if series.is_empty() {
            frame.fill_text(canvas::Text {
                content: "No data points".to_string(),
                position: Point::new(MARGIN_LEFT, bounds.height / 2.0),
                color: MUTED,
                ..canvas::Text::default()
            });
            return vec![frame.into_geometry()];
        }

        match self.config.chart_type {
            ChartType::Pie => draw_pie(&mut frame, bounds.size(), &series),
            kind => draw_xy(&mut frame, bounds.size(), &series, kind, self.color),
        }

        vec![frame.into_geometry()]
    }
}

/// Plot rectangle and value→pixel mapping shared by the XY chart types.
struct Plot {
    area: Rectangle,
    min: f64,
    max: f64,
}

impl Plot {
    fn new(size: Size, series: &[(String, f64)]) -> Self {
        let mut min: f64 = 0.0;
        let mut max: f64 = 0.0;
        for (_, value) in series {
            min = min.min(*value);
            max = max.max(*value);
        }
        if (max - min).abs() < f64::EPSILON {
            max = min + 1.0;
        }
        Self {
            area: Rectangle {
                x: MARGIN_LEFT,
                y: MARGIN_TOP,
                width: (size.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
                height: (size.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            },
            min,
            max,
        }
    }

    fn y(&self, value: f64) -> f32 {
        let t = ((value - self.min) / (self.max - self.min)) as f32;
        self.area.y + self.area.height * (1.0 - t)
    }

    /// Center x of slot `i` out of `n`.
    fn x(&self, i: usize, n: usize) -> f32 {
        let slot = self.area.width / n as f32;
        self.area.x + slot * (i as f32 + 0.5)
    }
}

fn draw_xy(
    frame: &mut Frame,
    size: Size,
    series: &[(String, f64)],
    kind: ChartType,
    color: Color,
) {
    let plot = Plot::new(size, series);
    let n = series.len();

    // Axes: left edge and the zero baseline.
    let left = Path::line(
        Point::new(plot.area.x, plot.area.y),
        Point::new(plot.area.x, plot.area.y + plot.area.height),
    );
    let baseline_y = plot.y(0.0);
    let baseline = Path::line(
        Point::new(plot.area.x, baseline_y),
        Point::new(plot.area.x + plot.area.width, baseline_y),
    );
    let axis_stroke = Stroke::default().with_width(1.0).with_color(AXIS);
    frame.stroke(&left, axis_stroke.clone());
    frame.stroke(&baseline, axis_stroke);

    // Y extremes.
    for value in [plot.min, plot.max] {
        frame.fill_text(canvas::Text {
            content: format_value(value),
            position: Point::new(2.0, plot.y(value) - 6.0),
            color: MUTED,
            size: 11.0.into(),
            ..canvas::Text::default()
        });
    }

    match kind {
        ChartType::Bar => {
            let width = (plot.area.width / n as f32) * 0.7;
            for (i, (_, value)) in series.iter().enumerate() {
                let x = plot.x(i, n) - width / 2.0;
                let top = plot.y(value.max(0.0));
                let bottom = plot.y(value.min(0.0));
                frame.fill_rectangle(
                    Point::new(x, top),
                    Size::new(width, (bottom - top).max(1.0)),
                    color,
                );
            }
        }
        ChartType::Line | ChartType::Area => {
            let line = Path::new(|builder| {
                for (i, (_, value)) in series.iter().enumerate() {
                    let point = Point::new(plot.x(i, n), plot.y(*value));
                    if i == 0 {
                        builder.move_to(point);
                    } else {
                        builder.line_to(point);
                    }
                }
            });
            if kind == ChartType::Area {
                let fill = Path::new(|builder| {
                    builder.move_to(Point::new(plot.x(0, n), baseline_y));
                    for (i, (_, value)) in series.iter().enumerate() {
                        builder.line_to(Point::new(plot.x(i, n), plot.y(*value)));
                    }
                    builder.line_to(Point::new(plot.x(n - 1, n), baseline_y));
                    builder.close();
                });
                frame.fill(&fill, Color { a: 0.25, ..color });
            }
            frame.stroke(&line, Stroke::default().with_width(2.0).with_color(color));
        }
        ChartType::Scatter => {
            for (i, (_, value)) in series.iter().enumerate() {
                let dot = Path::circle(Point::new(plot.x(i, n), plot.y(*value)), 4.0);
                frame.fill(&dot, color);
            }
        }
        ChartType::Pie => unreachable!("pie is drawn by draw_pie"),
    }

    // X labels, thinned to stay readable.
    let step = n.div_ceil(MAX_X_LABELS);
    for (i, (label, _)) in series.iter().enumerate().step_by(step.max(1)) {
        frame.fill_text(canvas::Text {
            content: truncate(label, 10),
            position: Point::new(plot.x(i, n) - 14.0, size.height - MARGIN_BOTTOM + 6.0),
            color: MUTED,
            size: 11.0.into(),
            ..canvas::Text::default()
        });
    }
}

fn draw_pie(frame: &mut Frame, size: Size, series: &[(String, f64)]) {
    let total: f64 = series.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return;
    }

    let center = Point::new(size.width / 2.0, size.height / 2.0);
    let radius = (size.width.min(size.height) / 2.0 - 16.0).max(8.0);

    let mut angle = -std::f32::consts::FRAC_PI_2;
    for (i, (label, value)) in series.iter().enumerate() {
        let share = (value.max(0.0) / total) as f32;
        if share <= 0.0 {
            continue;
        }
        let sweep = share * std::f32::consts::TAU;
        let slice = Path::new(|builder| {
            builder.move_to(center);
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(angle),
                end_angle: Radians(angle + sweep),
            });
            builder.close();
        });
        frame.fill(&slice, chart_color(i));

        // Label at the slice midpoint, just outside the rim.
        let mid = angle + sweep / 2.0;
        frame.fill_text(canvas::Text {
            content: format!("{} ({:.0}%)", truncate(label, 10), share * 100.0),
            position: Point::new(
                center.x + (radius + 6.0) * mid.cos(),
                center.y + (radius + 6.0) * mid.sin(),
            ),
            color: MUTED,
            size: 11.0.into(),
            ..canvas::Text::default()
        });

        angle += sweep;
    }
}

fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let cut: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
