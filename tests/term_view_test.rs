use intermission::core::{
    CompletedLevelStats, Intermission, IntermissionError, LevelTable, PlayerResult, SessionFlags,
};
use intermission::term::{FrameBuffer, IntermissionView, Viewport};
use intermission::types::{Buttons, LevelId, NextLevel, TickInput};

fn waiting_intermission() -> Intermission {
    let catalog = LevelTable::new()
        .with_level(LevelId(1), "Staging Area", Some(30))
        .with_level(LevelId(2), "The Terraformer", None);
    let stats = CompletedLevelStats::new(LevelId(1))
        .with_player(0, PlayerResult::new(42, 7, 1))
        .with_totals(50, 10, 2)
        .with_time_seconds(125);
    let mut wi = Intermission::default();
    wi.start(
        &stats,
        NextLevel::Map(LevelId(2)),
        SessionFlags::single_player(),
        &catalog,
    )
    .unwrap();
    wi.ticker(&TickInput::none()).unwrap();
    wi.ticker(&TickInput::none().with_player(0, Buttons::ATTACK))
        .unwrap();
    wi
}

#[test]
fn term_view_renders_stats_rows() {
    let wi = waiting_intermission();
    let fb = IntermissionView::new()
        .render(&wi, Viewport::new(80, 24))
        .unwrap();

    assert_eq!(fb.width(), 80);
    assert_eq!(fb.height(), 24);
    let text = fb.to_text();
    assert!(text.contains("Staging Area"));
    assert!(text.contains("FINISHED"));
    assert!(text.contains("84%"));
    assert!(text.contains("02:05"));
    assert!(text.contains("ENTERING"));
    assert!(text.contains("The Terraformer"));

    // KILLS sits on virtual y=70, i.e. row 7 of 24.
    assert!(fb.row_text(7).contains("KILLS"));
    assert!(fb.row_text(7).contains("42"));
}

#[test]
fn term_view_right_aligns_counts() {
    let wi = waiting_intermission();
    let fb = IntermissionView::new()
        .render(&wi, Viewport::new(80, 24))
        .unwrap();

    // Counts end just before column 54 (virtual x=216).
    assert_eq!(fb.get(52, 7).unwrap().ch, '4');
    assert_eq!(fb.get(53, 7).unwrap().ch, '2');
    assert_eq!(fb.get(54, 7).unwrap().ch, ' ');
}

#[test]
fn term_view_reuses_framebuffer_on_resize() {
    let wi = waiting_intermission();
    let view = IntermissionView::new();
    let mut fb = FrameBuffer::new(10, 5);

    view.render_into(&wi, Viewport::new(100, 30), &mut fb).unwrap();
    assert_eq!((fb.width(), fb.height()), (100, 30));
    assert!(fb.to_text().contains("KILLS"));

    view.render_into(&wi, Viewport::new(60, 20), &mut fb).unwrap();
    assert_eq!((fb.width(), fb.height()), (60, 20));
    assert!(fb.to_text().contains("KILLS"));
}

#[test]
fn term_view_without_session_fails() {
    let wi = Intermission::default();
    let err = IntermissionView::new()
        .render(&wi, Viewport::new(80, 24))
        .unwrap_err();
    assert_eq!(err, IntermissionError::NotActive);
}
