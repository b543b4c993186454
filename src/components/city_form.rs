use ratatui::{Frame, layout::Rect, style::Color};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::Theme;

/// The city input form. A controlled wrapper around [`TextInput`]: the value
/// lives in app state and every keystroke round-trips through an action.
pub struct CityForm {
    input: TextInput,
}

pub struct CityFormProps<'a> {
    pub city: &'a str,
    pub theme: Theme,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

fn input_colors(theme: Theme) -> (Color, Color) {
    match theme {
        Theme::Light => (Color::Rgb(255, 255, 255), Color::Rgb(30, 30, 35)),
        Theme::Dark => (Color::Rgb(50, 50, 60), Color::Rgb(230, 230, 235)),
    }
}

impl Default for CityForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl CityForm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CityForm {
    type Props<'a> = CityFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let (bg, fg) = input_colors(props.theme);
        let input_props = TextInputProps {
            value: props.city,
            placeholder: "Enter city name or pincode",
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(bg),
                    fg: Some(fg),
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (bg, fg) = input_colors(props.theme);
        let input_props = TextInputProps {
            value: props.city,
            placeholder: "Enter city name or pincode",
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(bg),
                    fg: Some(fg),
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, area, input_props);
    }
}
