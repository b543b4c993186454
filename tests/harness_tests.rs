//! Tests using the EffectStoreTestHarness
//!
//! These tests demonstrate the integrated testing pattern where
//! store, component, and render testing are combined.

use chrono::{DateTime, Local, TimeZone};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EventKind};
use weathercard::{
    action::Action,
    components::{Component, WeatherCard, WeatherCardProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Theme, WeatherReport},
};

fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 24, 17, 30, 0).unwrap()
}

/// Helper to create mock weather data
fn mock_report(city: &str, temperature: f32) -> WeatherReport {
    WeatherReport {
        city: city.into(),
        temperature,
        ..Default::default()
    }
}

/// Helper to create state with a result loaded
fn state_with_report() -> AppState {
    AppState {
        city: "London".into(),
        lookup: DataResource::Loaded(mock_report("London", 12.0)),
        ..Default::default()
    }
}

// ============================================================================
// Lookup flows
// ============================================================================

#[test]
fn test_lookup_success_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Submit - no loading state, the card just stays as it was
    harness.dispatch_collect(Action::LookupSubmit("London".into()));
    harness.assert_state(|s| s.lookup.is_empty());

    // Verify exactly one fetch was requested, carrying the city text
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { city, seq: 1 } if city == "London"),
    );

    // Simulate async completion
    harness.complete_action(Action::LookupDidLoad(1, mock_report("London", 12.0)));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.lookup.is_loaded());
    harness.assert_state(|s| s.report().map(|r| r.city.as_str()) == Some("London"));
    harness.assert_state(|s| s.error().is_none());
}

#[test]
fn test_lookup_not_found_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit("Nowhereville".into()));

    // Any non-2xx response surfaces as the fixed message
    harness.complete_action(Action::LookupDidError(1, "City not found".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.lookup.is_failed());
    harness.assert_state(|s| s.error() == Some("City not found"));
    harness.assert_state(|s| s.report().is_none());
}

#[test]
fn test_resubmit_clears_error_at_request_start() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit("Nowhereville".into()));
    harness.complete_action(Action::LookupDidError(1, "City not found".into()));
    harness.process_emitted();
    harness.assert_state(|s| s.lookup.is_failed());

    // A new submit drops the error line before the response arrives
    harness.dispatch_collect(Action::LookupSubmit("London".into()));
    harness.assert_state(|s| s.lookup.is_empty());
}

#[test]
fn test_superseded_request_is_discarded() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Two rapid submits: the second supersedes the first
    harness.dispatch_collect(Action::LookupSubmit("London".into()));
    harness.dispatch_collect(Action::LookupSubmit("Paris".into()));

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_all_match(|e| matches!(e, Effect::FetchWeather { .. }));

    // The London response resolves last-but-stale and must not win
    harness.complete_action(Action::LookupDidLoad(1, mock_report("London", 12.0)));
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 0, "Stale completion should not change state");
    harness.assert_state(|s| s.lookup.is_empty());

    harness.complete_action(Action::LookupDidLoad(2, mock_report("Paris", 18.5)));
    harness.process_emitted();
    harness.assert_state(|s| s.report().map(|r| r.city.as_str()) == Some("Paris"));
}

// ============================================================================
// Theme toggle
// ============================================================================

#[test]
fn test_theme_toggle_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.assert_state(|s| s.theme == Theme::Light);

    harness.dispatch_collect(Action::UiToggleTheme);
    harness.assert_state(|s| s.theme == Theme::Dark);

    harness.dispatch_collect(Action::UiToggleTheme);
    harness.assert_state(|s| s.theme == Theme::Light);
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Dispatch multiple actions at once
    let results = harness.dispatch_all([
        Action::UiToggleTheme,
        Action::UiToggleTheme,
        Action::UiToggleTheme,
    ]);

    // All should have changed state
    assert_eq!(results, vec![true, true, true]);

    // Net result: toggled 3 times = Dark
    harness.assert_state(|s| s.theme == Theme::Dark);
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_toggles_theme() {
    let mut harness = EffectStoreTestHarness::new(state_with_report(), reducer);
    let mut component = WeatherCard::new();

    harness.assert_state(|s| s.theme == Theme::Light);

    // Ctrl+d through the card component
    let event = EventKind::Key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
    let actions: Vec<_> = {
        let state = state_with_report();
        let props = WeatherCardProps {
            state: &state,
            now: fixed_now(),
            is_focused: true,
        };
        component.handle_event(&event, props).into_iter().collect()
    };

    actions.assert_count(1);
    actions.assert_first(Action::UiToggleTheme);

    // Dispatch the returned actions
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.theme == Theme::Dark);
    // Display-only: the form and the result are untouched
    harness.assert_state(|s| s.city == "London");
    harness.assert_state(|s| s.lookup.is_loaded());
}

#[test]
fn test_typing_clears_result() {
    let mut harness = EffectStoreTestHarness::new(state_with_report(), reducer);
    let mut component = WeatherCard::new();

    let event = EventKind::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
    let actions: Vec<_> = {
        let state = state_with_report();
        let props = WeatherCardProps {
            state: &state,
            now: fixed_now(),
            is_focused: true,
        };
        component.handle_event(&event, props).into_iter().collect()
    };

    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.lookup.is_empty());
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_after_success_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherCard::new();

    harness.dispatch_collect(Action::LookupSubmit("London".into()));
    harness.complete_action(Action::LookupDidLoad(1, mock_report("London", 12.0)));
    harness.process_emitted();

    let output = harness.render_plain(60, 24, |frame, area, state| {
        let props = WeatherCardProps {
            state,
            now: fixed_now(),
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("London") && output.contains("12 °C"),
        "Result block should be visible in output:\n{}",
        output
    );
}

#[test]
fn test_render_theme_toggle_changes_display() {
    let mut harness = EffectStoreTestHarness::new(state_with_report(), reducer);
    let mut component = WeatherCard::new();

    let light_output = harness.render_plain(60, 24, |frame, area, state| {
        let props = WeatherCardProps {
            state,
            now: fixed_now(),
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    harness.dispatch_collect(Action::UiToggleTheme);

    let dark_output = harness.render_plain(60, 24, |frame, area, state| {
        let props = WeatherCardProps {
            state,
            now: fixed_now(),
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    // The switch label flips with the theme
    assert_ne!(
        light_output, dark_output,
        "Light and dark renders should differ"
    );
    assert!(light_output.contains("Click for Dark Mode"));
    assert!(dark_output.contains("Click for Light Mode"));
}

// ============================================================================
// Effect Assertions Tests
// ============================================================================

#[test]
fn test_effect_assertions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Initially no effects
    let effects = harness.drain_effects();
    effects.effects_empty();

    // After submit, exactly one effect
    harness.dispatch_collect(Action::LookupSubmit("London".into()));
    let effects = harness.drain_effects();
    effects.effects_not_empty();
    effects.effects_count(1);
    effects.effects_all_match(|e| matches!(e, Effect::FetchWeather { .. }));
    effects.effects_none_match(|e| matches!(e, Effect::FetchWeather { seq: 99, .. }));
}

#[test]
fn test_empty_submit_requests_nothing() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit(String::new()));

    let effects = harness.drain_effects();
    effects.effects_empty();
    harness.assert_state(|s| s.city.is_empty());
    harness.assert_state(|s| s.request_seq == 0);
}

// ============================================================================
// Async Simulation Tests
// ============================================================================

#[test]
fn test_multiple_async_completions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit("London".into()));

    // Queue up multiple async completions
    harness.complete_action(Action::LookupDidLoad(1, mock_report("London", 12.0)));
    harness.complete_action(Action::UiToggleTheme);

    // Process all at once
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 2);

    // State should reflect both actions
    harness.assert_state(|s| s.lookup.is_loaded());
    harness.assert_state(|s| s.theme == Theme::Dark);
}
