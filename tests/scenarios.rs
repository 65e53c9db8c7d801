// End-to-end scenarios for the game session (native, no browser APIs).
// Time is driven through a ManualClock so countdown and search pacing are exact.

use code_breaker::game::{Clock, ManualClock, SearchOutcome, find};
use code_breaker::{GameConfig, GameError, GameEvent, GameSession, GameState, Outcome};

fn start(seed: u64) -> (GameSession, ManualClock) {
    let clock = ManualClock::new(0.0);
    let mut session = GameSession::new(GameConfig::default().with_seed(seed)).unwrap();
    session.new_game(clock.now_ms());
    session.drain_events();
    (session, clock)
}

/// Run time forward in frame-sized steps, like the browser loop does.
fn run_for(session: &mut GameSession, clock: &ManualClock, ms: f64) {
    let end = clock.now_ms() + ms;
    while clock.now_ms() < end {
        session.advance(clock.advance(16.0));
    }
}

/// Append the current target to the array, search for it and wait out the scan
/// and the celebration.
fn crack_level(session: &mut GameSession, clock: &ManualClock) {
    let target = session.target().to_vec();
    for &digit in &target {
        let end = session.array().len();
        session.insert(end, digit).unwrap();
    }
    session.search(target, clock.now_ms()).unwrap();
    let deadline = clock.now_ms() + 6_000.0;
    while session.is_busy() && clock.now_ms() < deadline {
        session.advance(clock.advance(16.0));
    }
    assert_eq!(session.state(), GameState::Celebrating);
    while session.state() == GameState::Celebrating {
        session.advance(clock.advance(16.0));
    }
}

#[test]
fn scenario_a_pattern_found_in_initial_array() {
    let (session, _) = start(1);
    assert_eq!(session.array().compact(), vec![3, 1, 7, 2, 1, 4, 9]);
    assert_eq!(find(&session.array().compact(), &[1, 4]), SearchOutcome::Found(4));
}

#[test]
fn scenario_a_through_the_session() {
    let (mut session, clock) = start(1);
    session.search(vec![1, 4], clock.now_ms()).unwrap();
    run_for(&mut session, &clock, 3_000.0);
    let events = session.drain_events();
    assert!(events.contains(&GameEvent::SearchFound { offset: 4, len: 2 }));
    let probes = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Probing { .. }))
        .count();
    assert_eq!(probes, 5);
}

#[test]
fn scenario_b_pattern_not_found() {
    let (mut session, clock) = start(1);
    assert_eq!(find(&session.array().compact(), &[9, 9]), SearchOutcome::NotFound);
    session.search(vec![9, 9], clock.now_ms()).unwrap();
    run_for(&mut session, &clock, 4_000.0);
    let events = session.drain_events();
    assert!(events.contains(&GameEvent::SearchNotFound));
    assert!(!session.is_busy());
}

#[test]
fn scenario_c_insert() {
    let (mut session, _) = start(1);
    session.insert(3, 5).unwrap();
    assert_eq!(
        session.slots(),
        &[Some(3), Some(1), Some(7), Some(5), None, Some(2), Some(1), Some(4), Some(9)]
    );
    assert_eq!(session.array().compact(), vec![3, 1, 7, 5, 2, 1, 4, 9]);
}

#[test]
fn scenario_d_delete() {
    let (mut session, _) = start(1);
    assert_eq!(session.delete(0), Ok(3));
    assert_eq!(
        session.slots(),
        &[Some(1), Some(7), None, Some(2), Some(1), Some(4), Some(9), None]
    );
}

#[test]
fn scenario_e_timer_expiry_blocks_input() {
    let (mut session, clock) = start(1);
    run_for(&mut session, &clock, 60_050.0);
    assert_eq!(session.state(), GameState::Over(Outcome::Lost));
    assert_eq!(session.timer_seconds(), 0);
    assert!(session.drain_events().contains(&GameEvent::GameOver(Outcome::Lost)));

    assert_eq!(session.insert(0, 1), Err(GameError::Inactive));
    assert_eq!(session.delete(0), Err(GameError::Inactive));
    assert_eq!(session.search(vec![1], clock.now_ms()), Err(GameError::Inactive));
    assert_eq!(session.reset_array(), Err(GameError::Inactive));

    // the countdown is stopped for good
    run_for(&mut session, &clock, 5_000.0);
    assert!(session.drain_events().is_empty());
}

#[test]
fn scenario_f_last_level_wins_game() {
    let (mut session, clock) = start(7);
    crack_level(&mut session, &clock);
    assert_eq!(session.level(), 2);
    assert_eq!(session.target().len(), 3);
    crack_level(&mut session, &clock);
    assert_eq!(session.level(), 3);
    crack_level(&mut session, &clock);
    assert_eq!(session.state(), GameState::Over(Outcome::WonGame));
    assert_eq!(session.level(), 3);
    assert!(session.drain_events().contains(&GameEvent::GameOver(Outcome::WonGame)));
}

#[test]
fn level_transition_resets_timer_and_array() {
    let (mut session, clock) = start(11);
    run_for(&mut session, &clock, 10_000.0);
    assert!(session.timer_seconds() <= 50);
    crack_level(&mut session, &clock);
    assert_eq!(session.state(), GameState::Running);
    assert_eq!(session.level(), 2);
    assert_eq!(session.array().compact(), vec![3, 1, 7, 2, 1, 4, 9]);
    let events = session.drain_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::LevelComplete { level: 1, .. })));
    let started = events
        .iter()
        .position(|e| matches!(e, GameEvent::LevelStarted { level: 2, .. }))
        .unwrap();
    // the tick phase carries over, so a tick may land in the same frame
    let ticks_since = events[started..]
        .iter()
        .filter(|e| matches!(e, GameEvent::TimerTick { .. }))
        .count() as u32;
    assert!(ticks_since <= 1);
    assert_eq!(session.timer_seconds(), 60 - ticks_since);
}

#[test]
fn new_game_cancels_scan_and_restarts() {
    let (mut session, clock) = start(3);
    session.search(vec![9, 9], clock.now_ms()).unwrap();
    run_for(&mut session, &clock, 700.0);
    session.drain_events();

    session.new_game(clock.now_ms());
    let events = session.drain_events();
    assert_eq!(events[0], GameEvent::SearchCancelled);
    assert!(matches!(events[1], GameEvent::GameStarted { level: 1, .. }));

    // no stale search results after the restart
    run_for(&mut session, &clock, 5_000.0);
    assert!(
        session
            .drain_events()
            .iter()
            .all(|e| matches!(e, GameEvent::TimerTick { .. }))
    );
}

#[test]
fn new_game_recovers_from_game_over() {
    let (mut session, clock) = start(3);
    run_for(&mut session, &clock, 61_000.0);
    assert!(session.state().is_over());
    session.new_game(clock.now_ms());
    assert_eq!(session.state(), GameState::Running);
    assert_eq!(session.timer_seconds(), 60);
    assert_eq!(session.level(), 1);
    assert!(session.insert(0, 1).is_ok());
}

#[test]
fn seeded_sessions_share_targets() {
    let (a, _) = start(99);
    let (b, _) = start(99);
    assert_eq!(a.target(), b.target());
}
