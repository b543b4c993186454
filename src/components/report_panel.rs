use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::state::{Theme, WeatherReport};

/// The outcome area of the card: exactly one of the error line, the result
/// block, or an idle hint. Gating is structural - all three come from the
/// single lookup field.
pub struct ReportPanel;

pub struct ReportPanelProps<'a> {
    pub lookup: &'a DataResource<WeatherReport>,
    pub theme: Theme,
    /// Wall-clock "now", sampled once per frame by the caller
    pub now: DateTime<Local>,
}

fn muted(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Rgb(110, 110, 120),
        Theme::Dark => Color::Rgb(150, 150, 160),
    }
}

fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Rgb(30, 110, 190),
        Theme::Dark => Color::Rgb(120, 180, 250),
    }
}

fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Rgb(200, 100, 100)),
        )),
    ]
}

fn report_lines(
    report: &WeatherReport,
    now: DateTime<Local>,
    theme: Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            report.city.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} °C", report.temperature),
            Style::default().fg(accent(theme)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            now.format("%A, %b %-d").to_string(),
            Style::default().fg(muted(theme)),
        )),
        Line::from(Span::styled(
            now.format("%H:%M:%S").to_string(),
            Style::default().fg(muted(theme)),
        )),
    ];

    if let Some(description) = &report.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(muted(theme)),
        )));
    }
    if let Some(feels_like) = report.feels_like {
        lines.push(Line::from(Span::styled(
            format!("feels like {} °C", feels_like),
            Style::default().fg(muted(theme)),
        )));
    }
    if let Some(humidity) = report.humidity {
        lines.push(Line::from(Span::styled(
            format!("humidity {}%", humidity),
            Style::default().fg(muted(theme)),
        )));
    }

    lines
}

fn hint_lines(theme: Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "Type a city and press Enter to get details",
            Style::default().fg(muted(theme)),
        )),
    ]
}

impl Component<Action> for ReportPanel {
    type Props<'a> = ReportPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = match props.lookup {
            DataResource::Failed(message) => error_lines(message),
            DataResource::Loaded(report) => report_lines(report, props.now, props.theme),
            DataResource::Empty | DataResource::Loading => hint_lines(props.theme),
        };

        frame.render_widget(
            Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
            area,
        );
    }
}
