//! Browser presentation adapter.
//!
//! Owns the single [`GameSession`] of the page in a thread-local, binds the
//! buttons and the Enter key, and runs a `requestAnimationFrame` loop that
//! feeds `performance.now()` into [`GameSession::advance`]. After every input or
//! frame the session's events are drained and mirrored into the DOM.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, window};

mod audio;
mod dom;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Clock, GameEvent, GameSession, highlight_slots};
use crate::input;
use audio::Sounds;

/// `performance.now()` backed clock.
struct PerformanceClock;

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}

struct WebGame {
    doc: Document,
    session: GameSession,
    clock: PerformanceClock,
    sounds: Sounds,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
    static CONTROLS_BOUND: Cell<bool> = const { Cell::new(false) };
    static LOOP_RUNNING: Cell<bool> = const { Cell::new(false) };
}

fn with_game(f: impl FnOnce(&mut WebGame)) {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            f(game);
        }
    });
}

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    dom::ensure_layout(&doc)?;

    let clock = PerformanceClock;
    let mut session = GameSession::new(config).map_err(to_js)?;
    session.new_game(clock.now_ms());
    let mut game = WebGame {
        doc: doc.clone(),
        session,
        clock,
        sounds: Sounds::default(),
    };
    game.flush()?;
    GAME.with(|cell| cell.replace(Some(game)));

    // A restart swaps the session; listeners and the frame loop are reused.
    if !CONTROLS_BOUND.with(Cell::get) {
        bind_controls(&doc)?;
        CONTROLS_BOUND.with(|b| b.set(true));
    }
    if !LOOP_RUNNING.with(Cell::get) {
        LOOP_RUNNING.with(|r| r.set(true));
        start_loop();
    }
    Ok(())
}

/// Stop the countdown, any pending search and the frame loop.
pub fn stop() {
    GAME.with(|cell| {
        if let Some(mut game) = cell.borrow_mut().take() {
            game.session.shutdown();
            log::info!("game torn down");
        }
    });
}

impl WebGame {
    fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    fn insert(&mut self) {
        if !self.session.is_active() {
            return;
        }
        let parsed = input::parse_index("index", &dom::input_value(&self.doc, "insert-index"))
            .and_then(|i| {
                input::parse_digit("value", &dom::input_value(&self.doc, "insert-value"))
                    .map(|v| (i, v))
            });
        let result = parsed.and_then(|(index, value)| self.session.insert(index, value));
        if result.is_ok() {
            dom::clear_input(&self.doc, "insert-value");
            dom::focus(&self.doc, "insert-index");
        }
        self.finish(result);
    }

    fn delete(&mut self) {
        if !self.session.is_active() {
            return;
        }
        let result = input::parse_index("index", &dom::input_value(&self.doc, "delete-index"))
            .and_then(|index| self.session.delete(index).map(drop));
        if result.is_ok() {
            dom::clear_input(&self.doc, "delete-index");
            dom::focus(&self.doc, "delete-index");
        }
        self.finish(result);
    }

    fn search(&mut self) {
        if !self.session.is_active() {
            return;
        }
        let now = self.now();
        let result = input::parse_pattern(&dom::input_value(&self.doc, "search-pattern"))
            .and_then(|pattern| self.session.search(pattern, now));
        self.finish(result);
    }

    fn reset_array(&mut self) {
        let result = self.session.reset_array();
        self.finish(result);
    }

    fn new_game(&mut self) {
        let now = self.now();
        self.session.new_game(now);
        self.finish(Ok(()));
    }

    fn frame(&mut self) {
        let now = self.now();
        self.session.advance(now);
        self.finish(Ok(()));
    }

    /// Report a refused operation, then mirror whatever the session emitted.
    fn finish(&mut self, result: Result<(), GameError>) {
        if let Err(err) = result {
            if !err.is_silent() {
                log::debug!("rejected: {err:?}");
                let feedback = crate::game::Feedback::new(err.to_string(), err.severity());
                dom::show_feedback(&self.doc, &feedback);
                self.sounds.play(feedback.severity);
            }
        }
        if let Err(err) = self.flush() {
            log::error!("render failed: {err:?}");
        }
    }

    fn flush(&mut self) -> Result<(), JsValue> {
        let events = self.session.drain_events();
        if events.is_empty() {
            return Ok(());
        }
        let doc = &self.doc;
        for event in &events {
            if event.changes_array() {
                dom::render_array(doc, self.session.slots())?;
            }
            match event {
                GameEvent::GameStarted { target, .. } => {
                    dom::show_modal(doc, None)?;
                    dom::set_victory(doc, false)?;
                    dom::update_target(doc, target);
                }
                GameEvent::LevelStarted { target, .. } => {
                    dom::set_victory(doc, false)?;
                    dom::update_target(doc, target);
                }
                GameEvent::Inserted { index, .. } => dom::mark_cell(doc, *index, "inserting")?,
                GameEvent::Probing { offset, len } => {
                    let cells = highlight_slots(self.session.slots(), *offset, *len);
                    dom::highlight(doc, &cells, "searching")?;
                }
                GameEvent::SearchFound { offset, len } => {
                    let cells = highlight_slots(self.session.slots(), *offset, *len);
                    dom::highlight(doc, &cells, "found")?;
                }
                GameEvent::SearchStarted { .. }
                | GameEvent::ProbeMissed { .. }
                | GameEvent::SearchNotFound
                | GameEvent::SearchCancelled
                | GameEvent::ArrayReset => dom::clear_highlights(doc)?,
                GameEvent::LevelComplete { .. } => dom::set_victory(doc, true)?,
                GameEvent::GameOver(outcome) => dom::show_modal(doc, Some(*outcome))?,
                GameEvent::TimerTick { .. } | GameEvent::Deleted { .. } => {}
            }
            if let Some(feedback) = event.feedback() {
                dom::show_feedback(doc, &feedback);
                self.sounds.play(feedback.severity);
            }
        }
        dom::update_hud(doc, self.session.level(), self.session.timer_seconds());
        Ok(())
    }
}

fn on_click(doc: &Document, id: &str, action: fn(&mut WebGame)) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id(id) else {
        log::warn!("missing control #{id}");
        return Ok(());
    };
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        with_game(action);
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_controls(doc: &Document) -> Result<(), JsValue> {
    on_click(doc, "insert-btn", WebGame::insert)?;
    on_click(doc, "delete-btn", WebGame::delete)?;
    on_click(doc, "search-btn", WebGame::search)?;
    on_click(doc, "reset-btn", WebGame::reset_array)?;
    on_click(doc, "new-game-btn", WebGame::new_game)?;
    on_click(doc, "play-again-btn", WebGame::new_game)?;

    // Enter in a field runs that field's operation
    let key_doc = doc.clone();
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.key() != "Enter" {
            return;
        }
        let Some(active) = key_doc.active_element() else { return };
        let action: fn(&mut WebGame) = match active.id().as_str() {
            "insert-index" | "insert-value" => WebGame::insert,
            "delete-index" => WebGame::delete,
            "search-pattern" => WebGame::search,
            _ => return,
        };
        with_game(action);
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let alive = GAME.with(|cell| cell.borrow().is_some());
        if !alive {
            // torn down: stop rescheduling
            LOOP_RUNNING.with(|r| r.set(false));
            return;
        }
        with_game(WebGame::frame);
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
