//! City weather lookup TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weathercard::action::Action;
use weathercard::api::{self, ApiSettings};
use weathercard::components::{Component, WeatherCard, WeatherCardProps};
use weathercard::effect::Effect;
use weathercard::reducer::reducer;
use weathercard::state::AppState;

/// City weather lookup TUI
#[derive(Parser, Debug)]
#[command(name = "weathercard")]
#[command(about = "Look up current weather for a city")]
struct Args {
    /// Prefill the city input (no request is issued until submit)
    #[arg(long, short)]
    city: Option<String>,

    /// OpenWeatherMap API key (falls back to the OPENWEATHER_API_KEY
    /// environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Weather API base URL
    #[arg(long, default_value = api::DEFAULT_BASE_URL)]
    api_url: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CardComponentId {
    Card,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CardContext {
    Main,
}

impl EventRoutingState<CardComponentId, CardContext> for AppState {
    fn focused(&self) -> Option<CardComponentId> {
        Some(CardComponentId::Card)
    }

    fn modal(&self) -> Option<CardComponentId> {
        None
    }

    fn binding_context(&self, _id: CardComponentId) -> CardContext {
        CardContext::Main
    }

    fn default_context(&self) -> CardContext {
        CardContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        api_url,
        debug: debug_args,
    } = Args::parse();

    let Some(api_key) = api_key.or_else(|| std::env::var("OPENWEATHER_API_KEY").ok()) else {
        eprintln!("Error: no API key configured.");
        eprintln!("Pass --api-key or set OPENWEATHER_API_KEY.");
        std::process::exit(1);
    };
    let settings = ApiSettings {
        base_url: api_url,
        api_key,
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(city.unwrap_or_default()))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, settings, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct CardUi {
    card: WeatherCard,
}

impl CardUi {
    fn new() -> Self {
        Self {
            card: WeatherCard::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CardComponentId>,
    ) {
        event_ctx.set_component_area(CardComponentId::Card, area);

        let props = WeatherCardProps {
            state,
            now: Local::now(),
            is_focused: render_ctx.is_focused(),
        };
        self.card.render(frame, area, props);
    }

    fn handle_card_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = WeatherCardProps {
            state,
            now: Local::now(),
            is_focused: true,
        };
        let actions: Vec<_> = self.card.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    settings: ApiSettings,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CardUi::new()));
    let mut bus: EventBus<AppState, Action, CardComponentId, CardContext> = EventBus::new();
    let keybindings: Keybindings<CardContext> = Keybindings::new();

    let ui_card = Rc::clone(&ui);
    bus.register(CardComponentId::Card, move |event, state| {
        ui_card.borrow_mut().handle_card_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    let handle_effect = move |effect: Effect, ctx: &mut EffectContext<Action>| match effect {
        Effect::FetchWeather { city, seq } => {
            let settings = settings.clone();
            // Reusing the task key aborts any request still in flight; the
            // seq gate in the reducer catches completions already queued.
            ctx.tasks().spawn("weather", async move {
                match api::fetch_current_weather(&settings, &city).await {
                    Ok(report) => Action::LookupDidLoad(seq, report),
                    Err(err) => Action::LookupDidError(seq, err.to_string()),
                }
            });
        }
    };

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                // Keep the displayed clock current while a result is shown
                runtime
                    .subscriptions()
                    .interval("clock", Duration::from_secs(1), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}
