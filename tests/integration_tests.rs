//! Integration tests for the intermission lifecycle

use intermission::core::{
    CompletedLevelStats, Intermission, IntermissionConfig, IntermissionError, LevelTable, Phase,
    PlayerResult, SessionFlags, TickSignal,
};
use intermission::types::{Buttons, Cue, LevelId, NextLevel, TickInput};

fn catalog() -> LevelTable {
    LevelTable::new()
        .with_level(LevelId(4), "Holding Area", Some(120))
        .with_level(LevelId(5), "Tech Center", Some(90))
}

fn fire() -> TickInput {
    TickInput::none().with_player(0, Buttons::ATTACK)
}

fn start_single(stats: &CompletedLevelStats) -> Intermission {
    let mut wi = Intermission::default();
    wi.start(
        stats,
        NextLevel::Map(LevelId(5)),
        SessionFlags::single_player(),
        &catalog(),
    )
    .unwrap();
    wi
}

#[test]
fn test_full_lifecycle_42_kills() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(42, 0, 0));
    let mut wi = start_single(&stats);
    assert_eq!(wi.phase(), Phase::Counting);

    let mut shown = Vec::new();
    for _ in 0..21 {
        assert_eq!(wi.ticker(&TickInput::none()).unwrap(), TickSignal::Continue);
        shown.push(wi.session().unwrap().player(0).unwrap().kills.shown());
    }
    assert_eq!(shown[0], 2);
    assert_eq!(shown[20], 42);
    assert_eq!(wi.phase(), Phase::WaitingForInput);

    assert_eq!(wi.ticker(&fire()).unwrap(), TickSignal::Advance);
    assert_eq!(wi.phase(), Phase::Finished);
    assert!(wi.take_cues().contains(&Cue::Advance));

    assert_eq!(wi.stop().unwrap(), NextLevel::Map(LevelId(5)));
    assert_eq!(wi.phase(), Phase::Uninitialized);
    assert!(wi.session().is_none());
}

#[test]
fn test_displayed_values_never_decrease_or_overshoot() {
    let stats = CompletedLevelStats::new(LevelId(4))
        .with_player(0, PlayerResult::new(37, 11, 3))
        .with_time_seconds(417);
    let mut wi = start_single(&stats);

    let mut prev = wi.snapshot().shown[0];
    for _ in 0..200 {
        wi.ticker(&TickInput::none()).unwrap();
        if wi.phase() != Phase::Counting {
            break;
        }
        let now = wi.snapshot().shown[0];
        for (before, after) in prev.iter().zip(now.iter()) {
            assert!(after >= before);
        }
        prev = now;
    }
    let entry = wi.session().unwrap().player(0).unwrap();
    assert_eq!(entry.kills.shown(), 37);
    assert_eq!(entry.items.shown(), 11);
    assert_eq!(entry.secrets.shown(), 3);
    assert_eq!(entry.time.shown(), 417);
}

#[test]
fn test_negative_counts_are_sanitized() {
    let stats = CompletedLevelStats::new(LevelId(4))
        .with_player(0, PlayerResult::new(-3, 4, 0))
        .with_time_tics(-35);
    let wi = start_single(&stats);

    let entry = wi.session().unwrap().player(0).unwrap();
    assert_eq!(entry.kills.raw(), 0);
    assert_eq!(entry.items.raw(), 4);
    assert_eq!(entry.time.raw(), 0);
}

#[test]
fn test_all_zero_stats_still_honor_min_delay() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(0, 0, 0));
    let mut wi = start_single(&stats);

    let min = IntermissionConfig::default().min_count_ticks;
    for _ in 1..min {
        wi.ticker(&TickInput::none()).unwrap();
        assert_eq!(wi.phase(), Phase::Counting);
    }
    wi.ticker(&TickInput::none()).unwrap();
    assert_eq!(wi.phase(), Phase::WaitingForInput);
}

#[test]
fn test_restart_rejected_while_active() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(1, 0, 0));
    let mut wi = start_single(&stats);

    let err = wi
        .start(
            &stats,
            NextLevel::Map(LevelId(5)),
            SessionFlags::single_player(),
            &catalog(),
        )
        .unwrap_err();
    assert_eq!(err, IntermissionError::AlreadyActive(Phase::Counting));
    assert_eq!(wi.phase(), Phase::Counting);
}

#[test]
fn test_unknown_next_level_rejected() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(1, 0, 0));
    let mut wi = Intermission::default();
    let err = wi
        .start(
            &stats,
            NextLevel::Map(LevelId(99)),
            SessionFlags::single_player(),
            &catalog(),
        )
        .unwrap_err();
    assert_eq!(err, IntermissionError::UnknownLevel(LevelId(99)));
    assert_eq!(wi.phase(), Phase::Uninitialized);

    // End of episode needs no catalog entry.
    wi.start(
        &stats,
        NextLevel::EndOfEpisode,
        SessionFlags::single_player(),
        &catalog(),
    )
    .unwrap();
}

#[test]
fn test_misuse_is_reported() {
    let mut wi = Intermission::default();
    assert_eq!(wi.ticker(&TickInput::none()), Err(IntermissionError::NotActive));
    assert_eq!(wi.stop(), Err(IntermissionError::NotActive));

    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(0, 0, 0));
    let mut wi = start_single(&stats);
    assert_eq!(
        wi.stop(),
        Err(IntermissionError::NotFinished(Phase::Counting))
    );

    wi.ticker(&TickInput::none()).unwrap();
    wi.ticker(&fire()).unwrap();
    wi.ticker(&TickInput::none()).unwrap();
    assert_eq!(wi.ticker(&fire()).unwrap(), TickSignal::Advance);
    assert_eq!(wi.ticker(&fire()), Err(IntermissionError::AlreadyFinished));

    wi.stop().unwrap();
    assert_eq!(wi.ticker(&TickInput::none()), Err(IntermissionError::NotActive));
    assert_eq!(wi.stop(), Err(IntermissionError::NotActive));
}

#[test]
fn test_skip_then_advance() {
    let stats = CompletedLevelStats::new(LevelId(4))
        .with_player(0, PlayerResult::new(200, 100, 10))
        .with_time_seconds(3000);
    let mut wi = start_single(&stats);

    for _ in 0..3 {
        wi.ticker(&TickInput::none()).unwrap();
    }
    wi.ticker(&fire()).unwrap();
    assert_eq!(wi.phase(), Phase::WaitingForInput);
    assert!(wi.session().unwrap().all_done());

    wi.ticker(&TickInput::none()).unwrap();
    assert_eq!(wi.ticker(&fire()).unwrap(), TickSignal::Advance);
}

#[test]
fn test_use_held_from_exit_switch_keeps_counting() {
    let stats = CompletedLevelStats::new(LevelId(4))
        .with_player(0, PlayerResult::new(80, 20, 3))
        .with_time_seconds(300);
    let mut wi = start_single(&stats);
    let use_held = TickInput::none().with_player(0, Buttons::USE);

    assert_eq!(wi.ticker(&use_held).unwrap(), TickSignal::Continue);
    assert_eq!(wi.phase(), Phase::Counting);
    let kills = wi.session().unwrap().player(0).unwrap().kills;
    assert_eq!((kills.shown(), kills.raw()), (2, 80));

    wi.ticker(&use_held).unwrap();
    assert_eq!(wi.phase(), Phase::Counting);

    wi.ticker(&TickInput::none()).unwrap();
    wi.ticker(&use_held).unwrap();
    assert_eq!(wi.phase(), Phase::WaitingForInput);
    assert_eq!(wi.session().unwrap().player(0).unwrap().kills.shown(), 80);
}

#[test]
fn test_demo_session_advances_on_its_own() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(4, 0, 0));
    let config = IntermissionConfig {
        demo_wait_ticks: 20,
        ..IntermissionConfig::default()
    };
    let mut wi = Intermission::new(config);
    wi.start(
        &stats,
        NextLevel::EndOfEpisode,
        SessionFlags::single_player().non_interactive(),
        &catalog(),
    )
    .unwrap();

    let mut ticks = 0;
    loop {
        ticks += 1;
        if wi.ticker(&TickInput::none()).unwrap() == TickSignal::Advance {
            break;
        }
        assert!(ticks < 100, "demo session never advanced");
    }
    // 10 counting ticks, then 20 idle ticks.
    assert_eq!(ticks, 30);
    assert_eq!(wi.stop().unwrap(), NextLevel::EndOfEpisode);
}

#[test]
fn test_interactive_session_waits_forever_by_default() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(0, 0, 0));
    let mut wi = start_single(&stats);
    for _ in 0..5_000 {
        assert_eq!(wi.ticker(&TickInput::none()).unwrap(), TickSignal::Continue);
    }
    assert_eq!(wi.phase(), Phase::WaitingForInput);
}

#[test]
fn test_other_players_can_advance_in_coop() {
    let stats = CompletedLevelStats::new(LevelId(4))
        .with_player(0, PlayerResult::new(0, 0, 0))
        .with_player(3, PlayerResult::new(0, 0, 0));
    let mut wi = Intermission::default();
    wi.start(
        &stats,
        NextLevel::Map(LevelId(5)),
        SessionFlags::cooperative(),
        &catalog(),
    )
    .unwrap();

    wi.ticker(&TickInput::none()).unwrap();

    // Slot 2 is not in game and is ignored.
    let p2 = TickInput::none().with_player(2, Buttons::USE);
    wi.ticker(&p2).unwrap();
    assert_eq!(wi.phase(), Phase::Counting);

    let p3 = TickInput::none().with_player(3, Buttons::USE);
    wi.ticker(&p3).unwrap();
    assert_eq!(wi.phase(), Phase::WaitingForInput);
}

#[test]
fn test_abort_from_waiting_then_restart() {
    let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(0, 0, 0));
    let mut wi = start_single(&stats);
    wi.ticker(&TickInput::none()).unwrap();
    wi.ticker(&fire()).unwrap();
    assert_eq!(wi.phase(), Phase::WaitingForInput);

    assert_eq!(wi.abort().unwrap(), NextLevel::Map(LevelId(5)));
    assert_eq!(wi.phase(), Phase::Uninitialized);

    wi.start(
        &stats,
        NextLevel::Map(LevelId(5)),
        SessionFlags::single_player(),
        &catalog(),
    )
    .unwrap();
    assert_eq!(wi.phase(), Phase::Counting);
    assert_eq!(wi.session().unwrap().count_ticks(), 0);
}
