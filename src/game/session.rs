// Level / countdown state machine and the paced search driver.
use log::{debug, info};

use super::{
    ArrayStore, GameEvent, GameState, Outcome, PatternGenerator, SearchScan, SecondTimer, Slot,
};
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};

/// Scan in flight plus the time its next comparison is due.
#[derive(Debug)]
struct ActiveSearch {
    scan: SearchScan,
    next_step_ms: f64,
}

/// Work that `advance` can have pending, in the order same-instant work runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Due {
    SearchStep,
    Celebration,
    Tick,
}

/// A whole game, owned by the caller. Time only moves when the caller passes a
/// timestamp into [`GameSession::advance`], [`GameSession::new_game`] or
/// [`GameSession::search`].
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    array: ArrayStore,
    patterns: PatternGenerator,
    target: Vec<u8>,
    level: u32,
    timer_seconds: u32,
    state: GameState,
    timer: Option<SecondTimer>,
    search: Option<ActiveSearch>,
    celebration_until: Option<f64>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let patterns = PatternGenerator::from_seed_opt(config.seed);
        Ok(Self {
            array: ArrayStore::new(config.capacity, &config.initial_slots),
            patterns,
            target: Vec::new(),
            level: 1,
            timer_seconds: config.level_seconds,
            state: GameState::Idle,
            timer: None,
            search: None,
            celebration_until: None,
            events: Vec::new(),
            config,
        })
    }

    // --- Accessors ------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// True while a search scan is in flight.
    pub fn is_busy(&self) -> bool {
        self.search.is_some()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn timer_seconds(&self) -> u32 {
        self.timer_seconds
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    pub fn array(&self) -> &ArrayStore {
        &self.array
    }

    pub fn slots(&self) -> &[Slot] {
        self.array.slots()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Lifecycle --------------------------------------------------------------

    /// Start over at level 1 from any state. Cancels an in-flight scan and
    /// restarts the countdown phase at `now`.
    pub fn new_game(&mut self, now: f64) {
        self.cancel_search();
        self.level = 1;
        self.timer_seconds = self.config.level_seconds;
        self.array.reset();
        self.target = self.patterns.generate(self.level);
        self.state = GameState::Running;
        self.timer = Some(SecondTimer::new(now));
        self.celebration_until = None;
        info!("new game, target {:?}", self.target);
        self.events.push(GameEvent::GameStarted {
            level: self.level,
            target: self.target.clone(),
        });
    }

    /// Restore the array fixture without touching level or timer.
    pub fn reset_array(&mut self) -> GameResult<()> {
        self.ensure_running()?;
        self.cancel_search();
        self.array.reset();
        self.events.push(GameEvent::ArrayReset);
        Ok(())
    }

    /// Stop everything. Used when the page tears the game down.
    pub fn shutdown(&mut self) {
        self.cancel_search();
        self.timer = None;
        self.celebration_until = None;
        self.state = GameState::Idle;
    }

    // --- Player operations ------------------------------------------------------

    pub fn insert(&mut self, index: usize, value: u8) -> GameResult<()> {
        self.ensure_accepting_edits()?;
        self.array.insert_at(index, value)?;
        debug!("insert {value} at {index} -> {}", self.array);
        self.events.push(GameEvent::Inserted { index, value });
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> GameResult<u8> {
        self.ensure_accepting_edits()?;
        let value = self.array.delete_at(index)?;
        debug!("delete at {index} -> {}", self.array);
        self.events.push(GameEvent::Deleted { index, value });
        Ok(value)
    }

    /// Begin a paced scan for `pattern` over the compacted array. The first
    /// window is highlighted immediately; comparisons run from `advance`, one
    /// every `search_step_ms`.
    pub fn search(&mut self, pattern: Vec<u8>, now: f64) -> GameResult<()> {
        self.ensure_accepting_edits()?;
        if pattern.is_empty() {
            return Err(GameError::PatternLength);
        }
        if let Some(&bad) = pattern.iter().find(|&&d| d > 9) {
            return Err(GameError::Digit { value: bad as i64 });
        }
        let scan = SearchScan::new(self.array.compact(), pattern.clone());
        self.events.push(GameEvent::SearchStarted { pattern });
        match scan.peek_offset() {
            Some(offset) => {
                self.events.push(GameEvent::Probing {
                    offset,
                    len: scan.pattern().len(),
                });
                self.search = Some(ActiveSearch {
                    scan,
                    next_step_ms: now + self.config.search_step_ms,
                });
            }
            None => self.events.push(GameEvent::SearchNotFound),
        }
        Ok(())
    }

    // --- Time -------------------------------------------------------------------

    /// Run every timer tick, search step and celebration deadline due at or
    /// before `now`, earliest first.
    pub fn advance(&mut self, now: f64) {
        while let Some((at, due)) = self.next_due(now) {
            match due {
                Due::SearchStep => self.run_search_step(at),
                Due::Celebration => self.finish_celebration(),
                Due::Tick => self.tick(now),
            }
        }
    }

    fn next_due(&self, now: f64) -> Option<(f64, Due)> {
        let candidates = [
            self.search.as_ref().map(|s| (s.next_step_ms, Due::SearchStep)),
            self.celebration_until.map(|t| (t, Due::Celebration)),
            self.timer.as_ref().map(|t| (t.next_tick_ms(), Due::Tick)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|&(at, _)| at <= now)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
    }

    fn tick(&mut self, now: f64) {
        let Some(timer) = self.timer.as_mut() else { return };
        if !timer.take_tick(now) {
            return;
        }
        self.timer_seconds = self.timer_seconds.saturating_sub(1);
        self.events.push(GameEvent::TimerTick { remaining: self.timer_seconds });
        if self.timer_seconds == 0 {
            self.enter_over(Outcome::Lost);
        }
    }

    fn run_search_step(&mut self, at: f64) {
        let step_ms = self.config.search_step_ms;
        let Some(active) = self.search.as_mut() else { return };
        let Some(step) = active.scan.next() else {
            self.search = None;
            self.events.push(GameEvent::SearchNotFound);
            return;
        };
        debug!("probe offset {} matched={}", step.offset, step.matched);
        if step.matched {
            let pattern = active.scan.pattern().to_vec();
            self.search = None;
            self.events.push(GameEvent::SearchFound {
                offset: step.offset,
                len: step.len,
            });
            if pattern == self.target {
                self.objective_met(at);
            }
            return;
        }
        self.events.push(GameEvent::ProbeMissed { offset: step.offset });
        match active.scan.peek_offset() {
            Some(offset) => {
                active.next_step_ms = at + step_ms;
                self.events.push(GameEvent::Probing { offset, len: step.len });
            }
            None => {
                self.search = None;
                self.events.push(GameEvent::SearchNotFound);
            }
        }
    }

    fn objective_met(&mut self, at: f64) {
        info!("level {} objective met", self.level);
        self.state = GameState::Celebrating;
        self.celebration_until = Some(at + self.config.celebration_ms);
        self.events.push(GameEvent::LevelComplete {
            level: self.level,
            target: self.target.clone(),
        });
    }

    fn finish_celebration(&mut self) {
        self.celebration_until = None;
        if self.level >= self.config.max_level {
            self.enter_over(Outcome::WonGame);
            return;
        }
        self.level += 1;
        self.timer_seconds = self.config.level_seconds;
        self.target = self.patterns.generate(self.level);
        self.array.reset();
        self.state = GameState::Running;
        info!("level {} started, target {:?}", self.level, self.target);
        self.events.push(GameEvent::LevelStarted {
            level: self.level,
            target: self.target.clone(),
        });
    }

    fn enter_over(&mut self, outcome: Outcome) {
        self.cancel_search();
        self.timer = None;
        self.celebration_until = None;
        self.state = GameState::Over(outcome);
        info!("game over: {outcome:?} at level {}", self.level);
        self.events.push(GameEvent::GameOver(outcome));
    }

    fn cancel_search(&mut self) {
        if self.search.take().is_some() {
            debug!("search cancelled");
            self.events.push(GameEvent::SearchCancelled);
        }
    }

    // --- Guards -----------------------------------------------------------------

    fn ensure_running(&self) -> GameResult<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(GameError::Inactive)
        }
    }

    fn ensure_accepting_edits(&self) -> GameResult<()> {
        self.ensure_running()?;
        if self.is_busy() {
            return Err(GameError::Busy);
        }
        Ok(())
    }
}
