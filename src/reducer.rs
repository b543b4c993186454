//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::CityChange(city) => {
            state.city = city;
            // Editing the city always drops the previous result. A stale
            // error line stays until the next submit.
            if state.lookup.is_loaded() {
                state.lookup = DataResource::Empty;
            }
            DispatchResult::changed()
        }

        // ===== Lookup actions =====
        Action::LookupSubmit(city) => {
            if city.is_empty() {
                // No request, no state change
                return DispatchResult::unchanged();
            }
            state.city = city.clone();
            // Error is cleared at request start; a loaded result stays on
            // screen until the response resolves.
            if state.lookup.is_failed() {
                state.lookup = DataResource::Empty;
            }
            state.request_seq += 1;
            DispatchResult::changed_with(Effect::FetchWeather {
                city,
                seq: state.request_seq,
            })
        }

        Action::LookupDidLoad(seq, report) => {
            if seq != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.lookup = DataResource::Loaded(report);
            DispatchResult::changed()
        }

        Action::LookupDidError(seq, message) => {
            if seq != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.lookup = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiToggleTheme => {
            state.theme = state.theme.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            // The clock is only visible inside the result block
            if state.lookup.is_loaded() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
