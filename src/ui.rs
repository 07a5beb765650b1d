//! Browser front end: builds the page, wires clicks and drives the countdown.
//!
//! All mutable state lives in the `APP` thread-local; event closures borrow it
//! for the duration of one callback. The countdown is a single one-second
//! `setTimeout` that is re-armed after every tick and cleared whenever a new
//! round starts or the game ends.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::color::SHADE_COUNT;
use crate::game::{Game, GameConfig, GameSnapshot, GuessOutcome, Phase, TickOutcome};
use crate::random::{self, GameRng};
use crate::storage::LocalStorageStore;

const TICK_MS: i32 = 1_000;
const ROOT_ID: &str = "gtc-root";

const RULES_TEXT: &str = "You will see a target color. Choose the correct color from six shades. \
Correct answers give points (faster guesses earn more points). Wrong answers deduct 5 points. \
If points reach 0, you lose!";

const ROOT_STYLE: &str = "max-width:520px; margin:40px auto; padding:24px; text-align:center; font-family:'Fira Code', monospace; background:#181818; color:#eee; border:2px solid #222; border-radius:18px; box-shadow:0 0 32px 0 rgba(0,0,0,0.18);";
const TARGET_STYLE: &str = "width:160px; height:160px; margin:16px auto; border-radius:12px; border:2px solid #333;";
const OPTION_STYLE: &str = "width:72px; height:72px; margin:6px; border-radius:10px; border:2px solid #333; cursor:pointer;";
const BUTTON_STYLE: &str = "margin-top:12px; padding:6px 14px; font-family:inherit; background:#333; color:#ffd166; border:1px solid #555; border-radius:6px; cursor:pointer;";
const MODAL_STYLE: &str = "position:fixed; left:50%; top:40%; transform:translate(-50%,-50%); max-width:360px; padding:18px; background:#222; color:#eee; border:1px solid #444; border-radius:12px; z-index:50;";

type Store = LocalStorageStore;
type ClickListener = Closure<dyn FnMut(web_sys::MouseEvent)>;

struct View {
    root: Element,
    target: Element,
    options: Vec<Element>,
    status: Element,
    score: Element,
    high_score: Element,
    timer: Element,
    rules: Element,
    game_over: Element,
}

struct App {
    game: Game<GameRng, Store>,
    view: View,
    pending_tick: Option<i32>,
    tick_cb: Closure<dyn FnMut()>,
    // dropped together with the page elements on remount
    _listeners: Vec<ClickListener>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Mount the game using the page's `?variant=` query parameter.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let query = win.location().search().unwrap_or_default();
    let config = GameConfig::from_query(&query).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount(config)
}

/// Mount the game with an explicit variant name (`"classic"` or `"blitz"`).
#[wasm_bindgen]
pub fn start_game_with_variant(name: &str) -> Result<(), JsValue> {
    let variant = name.parse().map_err(|e: crate::scoring::VariantParseError| JsValue::from_str(&e.to_string()))?;
    mount(GameConfig::for_variant(variant))
}

/// JSON snapshot of the running game, `None` before `start_game`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_state_json() -> Option<String> {
    APP.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|app| serde_json::to_string(&app.game.snapshot()).ok())
    })
}

fn mount(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    // Restarting replaces any previous instance.
    if let Some(old) = APP.with(|cell| cell.borrow_mut().take()) {
        old.cancel_tick();
        old.view.root.remove();
    }

    web_sys::console::log_1(&format!("guess-the-color: starting {} game", config.variant).into());

    let store = LocalStorageStore::open(&config.storage_key);
    let game = Game::new(config, random::from_entropy(), store, now_ms());
    let view = build_view(&doc)?;
    let listeners = wire_events(&view)?;

    let tick_cb = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
    let mut app = App { game, view, pending_tick: None, tick_cb, _listeners: listeners };
    app.schedule_tick();
    app.render();
    APP.with(|cell| cell.replace(Some(app)));
    Ok(())
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
        }
    });
}

fn on_tick() {
    with_app(|app| {
        app.pending_tick = None;
        match app.game.tick() {
            TickOutcome::Running(_) => app.schedule_tick(),
            TickOutcome::Expired => web_sys::console::log_1(&"round timed out".into()),
            TickOutcome::Idle => {}
        }
        app.render();
    });
}

impl App {
    fn schedule_tick(&mut self) {
        self.cancel_tick();
        let Some(win) = window() else { return };
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.tick_cb.as_ref().unchecked_ref(),
            TICK_MS,
        ) {
            Ok(handle) => self.pending_tick = Some(handle),
            Err(err) => web_sys::console::error_2(&"failed to schedule countdown:".into(), &err),
        }
    }

    fn cancel_tick(&self) {
        if let (Some(handle), Some(win)) = (self.pending_tick, window()) {
            win.clear_timeout_with_handle(handle);
        }
    }

    fn guess(&mut self, index: usize) {
        match self.game.guess(index, now_ms()) {
            Ok(GuessOutcome::Correct { points, new_high_score }) => {
                if new_high_score {
                    web_sys::console::log_1(
                        &format!("new high score: {} (+{points})", self.game.high_score()).into(),
                    );
                }
                // a correct guess deals a fresh round with a full clock
                self.schedule_tick();
            }
            Ok(GuessOutcome::Wrong { game_over: true }) => {
                self.cancel_tick();
                self.pending_tick = None;
                let variant = self.game.config().variant;
                web_sys::console::log_1(&format!("game over ({variant})").into());
            }
            Ok(GuessOutcome::Wrong { game_over: false }) => {}
            Err(err) => web_sys::console::log_1(&format!("guess ignored: {err}").into()),
        }
        self.render();
    }

    fn new_round(&mut self) {
        self.game.new_round(now_ms());
        self.schedule_tick();
        self.render();
    }

    fn render(&self) {
        render_snapshot(&self.view, &self.game.snapshot());
    }
}

fn render_snapshot(view: &View, snap: &GameSnapshot) {
    let _ = view
        .target
        .set_attribute("style", &format!("{TARGET_STYLE} background-color:{};", snap.target));
    for (el, color) in view.options.iter().zip(&snap.shades) {
        let _ = el.set_attribute("style", &format!("{OPTION_STYLE} background-color:{color};"));
    }
    view.status.set_text_content(Some(&snap.status));
    view.score.set_text_content(Some(&format!("Score: {}", snap.score)));
    view.high_score
        .set_text_content(Some(&format!("Highest Score: {}", snap.high_score)));
    view.timer
        .set_text_content(Some(&format!("Time Left: {} sec", snap.seconds_left)));
    let show_game_over = snap.phase == Phase::GameOver && snap.variant.game_over_dialog();
    set_visible(&view.game_over, show_game_over);
}

fn set_visible(el: &Element, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = el.set_attribute("style", &format!("{MODAL_STYLE} display:{display};"));
}

fn child(doc: &Document, parent: &Element, tag: &str, id: &str, text: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_id(id);
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn build_view(doc: &Document) -> Result<View, JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let root = doc.create_element("div")?;
    root.set_id(ROOT_ID);
    root.set_attribute("style", ROOT_STYLE)?;
    body.append_child(&root)?;

    child(doc, &root, "h1", "gtc-title", "Color Guessing Game")?;
    let instructions = child(doc, &root, "p", "gtc-instructions", "Guess the correct color! ")?;
    let info = child(doc, &instructions, "span", "gtc-info", "ℹ️")?;
    info.set_attribute("style", "cursor:pointer;")?;

    let target = child(doc, &root, "div", "gtc-target", "")?;
    let options_row = child(doc, &root, "div", "gtc-options", "")?;
    let options = (0..SHADE_COUNT)
        .map(|i| child(doc, &options_row, "button", &format!("gtc-option-{i}"), ""))
        .collect::<Result<Vec<_>, _>>()?;

    let status = child(doc, &root, "p", "gtc-status", "")?;
    let score = child(doc, &root, "p", "gtc-score", "")?;
    let high_score = child(doc, &root, "p", "gtc-high-score", "")?;
    let timer = child(doc, &root, "p", "gtc-timer", "")?;
    let new_game = child(doc, &root, "button", "gtc-new-game", "New Game")?;
    new_game.set_attribute("style", BUTTON_STYLE)?;

    let rules = child(doc, &root, "div", "gtc-rules", "")?;
    child(doc, &rules, "h3", "gtc-rules-title", "Game Rules")?;
    child(doc, &rules, "p", "gtc-rules-text", RULES_TEXT)?;
    let close = child(doc, &rules, "button", "gtc-rules-close", "Close")?;
    close.set_attribute("style", BUTTON_STYLE)?;
    set_visible(&rules, false);

    let game_over = child(doc, &root, "div", "gtc-game-over", "")?;
    child(doc, &game_over, "h2", "gtc-game-over-title", "Game Over!")?;
    child(doc, &game_over, "p", "gtc-game-over-text", "You ran out of points. Try again?")?;
    let restart = child(doc, &game_over, "button", "gtc-restart", "Start New Game")?;
    restart.set_attribute("style", BUTTON_STYLE)?;
    set_visible(&game_over, false);

    Ok(View { root, target, options, status, score, high_score, timer, rules, game_over })
}

// The returned closure must outlive the element's listener; `App` keeps it.
fn on_click(el: &Element, mut f: impl FnMut() + 'static) -> Result<ClickListener, JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| f()) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn find(id: &str) -> Result<Element, JsValue> {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn wire_events(view: &View) -> Result<Vec<ClickListener>, JsValue> {
    let mut listeners = Vec::with_capacity(SHADE_COUNT + 4);
    for (i, el) in view.options.iter().enumerate() {
        listeners.push(on_click(el, move || with_app(|app| app.guess(i)))?);
    }
    listeners.push(on_click(&find("gtc-new-game")?, || with_app(App::new_round))?);
    listeners.push(on_click(&find("gtc-restart")?, || with_app(App::new_round))?);
    listeners.push(on_click(&find("gtc-info")?, || with_app(|app| set_visible(&app.view.rules, true)))?);
    listeners.push(on_click(&find("gtc-rules-close")?, || {
        with_app(|app| set_visible(&app.view.rules, false))
    })?);
    Ok(listeners)
}
