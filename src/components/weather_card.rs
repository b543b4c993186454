use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle, centered_rect,
};

use super::{CityForm, CityFormProps, Component, ReportPanel, ReportPanelProps};
use crate::action::Action;
use crate::state::{AppState, Theme};

pub const CARD_WIDTH: u16 = 46;
pub const CARD_HEIGHT: u16 = 16;

/// The main card component: title, city form, outcome area, theme switch
pub struct WeatherCard {
    form: CityForm,
}

/// Props for WeatherCard - read-only view of state plus the frame clock
pub struct WeatherCardProps<'a> {
    pub state: &'a AppState,
    /// Wall-clock "now", sampled once per frame
    pub now: DateTime<Local>,
    pub is_focused: bool,
}

struct Palette {
    bg: Color,
    fg: Color,
    card_bg: Color,
    accent: Color,
    muted: Color,
}

impl Palette {
    fn of(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::Rgb(235, 235, 240),
                fg: Color::Rgb(30, 30, 35),
                card_bg: Color::Rgb(250, 250, 252),
                accent: Color::Rgb(30, 110, 190),
                muted: Color::Rgb(110, 110, 120),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(20, 20, 28),
                fg: Color::Rgb(225, 225, 230),
                card_bg: Color::Rgb(35, 35, 45),
                accent: Color::Rgb(120, 180, 250),
                muted: Color::Rgb(150, 150, 160),
            },
        }
    }
}

impl Default for WeatherCard {
    fn default() -> Self {
        Self {
            form: CityForm::new(),
        }
    }
}

impl WeatherCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn form_props<'a>(state: &'a AppState) -> CityFormProps<'a> {
        CityFormProps {
            city: &state.city,
            theme: state.theme,
            is_focused: true,
            on_change: Action::CityChange,
            on_submit: Action::LookupSubmit,
        }
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('d') => vec![Action::UiToggleTheme],
                KeyCode::Char('c') => vec![Action::Quit],
                _ => Vec::new(),
            };
        }

        if key.code == KeyCode::Esc {
            return vec![Action::Quit];
        }

        // Everything else goes to the input
        self.form
            .handle_event(event, Self::form_props(props.state))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.state.theme;
        let palette = Palette::of(theme);

        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let card_area = centered_rect(
            CARD_WIDTH.min(chunks[0].width),
            CARD_HEIGHT.min(chunks[0].height),
            chunks[0],
        );
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.card_bg)),
            card_area,
        );

        let rows = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1),
            Constraint::Length(3), // Input
            Constraint::Length(1),
            Constraint::Min(5),    // Error line / result block
            Constraint::Length(1), // Theme switch
        ])
        .split(card_area);

        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    "Weather App",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ))
                .centered(),
            ),
            rows[0],
        );

        self.form.render(frame, rows[2], Self::form_props(props.state));

        let mut panel = ReportPanel;
        panel.render(
            frame,
            rows[4],
            ReportPanelProps {
                lookup: &props.state.lookup,
                theme,
                now: props.now,
            },
        );

        let mark = if theme.is_dark() { "[x]" } else { "[ ]" };
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    format!("{} {}", mark, theme.switch_label()),
                    Style::default().fg(palette.muted),
                ))
                .centered(),
            ),
            rows[5],
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "get details"),
                    StatusBarHint::new("ctrl+d", "theme"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
