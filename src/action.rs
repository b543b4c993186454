//! Actions - every state transition enters through one of these

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form =====
    /// City input text changed (carries the full new value)
    CityChange(String),

    // ===== Lookup category =====
    /// Submit the form with the given input text (triggers async fetch)
    LookupSubmit(String),

    /// Result: weather arrived for the request with this generation token
    LookupDidLoad(u64, WeatherReport),

    /// Result: the request with this generation token failed
    LookupDidError(u64, String),

    // ===== UI category =====
    /// Toggle between light and dark theme
    UiToggleTheme,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic clock tick; only re-renders while a result is on screen
    Tick,

    /// Exit the application
    Quit,
}
