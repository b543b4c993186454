//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Current conditions for a city, from the OpenWeatherMap API
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    /// Resolved location name (the API's `name` field)
    pub city: String,
    /// Temperature in Celsius, as returned (metric units are fixed)
    pub temperature: f32,
    pub feels_like: Option<f32>,
    /// Relative humidity in percent
    pub humidity: Option<u8>,
    /// Short condition text, e.g. "light rain"
    pub description: Option<String>,
}

/// Display theme preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Label for the theme switch, naming the mode a toggle would select
    pub fn switch_label(&self) -> &'static str {
        match self {
            Theme::Light => "Click for Dark Mode",
            Theme::Dark => "Click for Light Mode",
        }
    }
}

/// Application state - everything the UI needs to render
///
/// Data and error can never coexist: both live in the single `lookup` field.
/// The `Loading` variant of [`DataResource`] is never constructed - the UI
/// keeps its prior visual state while a request is outstanding.
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Current input text; mutated on every keystroke
    #[debug(section = "Form", label = "City")]
    pub city: String,

    /// Lookup outcome: Empty until a fetch resolves, then Loaded or Failed
    #[debug(section = "Lookup", label = "Outcome", debug_fmt)]
    pub lookup: DataResource<WeatherReport>,

    /// Generation token of the most recently issued request. Completions
    /// carrying an older token are discarded.
    #[debug(section = "Lookup", label = "Seq")]
    pub request_seq: u64,

    /// Display theme; toggling never touches the form or the lookup
    #[debug(section = "Ui", label = "Theme", debug_fmt)]
    pub theme: Theme,
}

impl AppState {
    /// Create state with the given input prefill. No request is issued.
    pub fn new(city: String) -> Self {
        Self {
            city,
            lookup: DataResource::Empty,
            request_seq: 0,
            theme: Theme::default(),
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.lookup.data()
    }

    pub fn error(&self) -> Option<&str> {
        self.lookup.error()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(String::new())
    }
}
