//! Integration tests for the game rules and the session loop

use sporktris::core::{catalog, ActivePiece, Board, GameState, Phase, SimpleRng, TickOutcome};
use sporktris::engine::{ManualClock, Session, SessionConfig};
use sporktris::input::{ButtonState, ScriptedController};
use sporktris::term::PixelGrid;
use sporktris::types::{Button, PlayOutcome, ShapeId};

/// Tick until the active piece lands, returning the landing outcome.
fn drop_active(state: &mut GameState) -> TickOutcome {
    for _ in 0..64 {
        match state.tick() {
            TickOutcome::Fell => continue,
            outcome => return outcome,
        }
    }
    panic!("piece never landed");
}

fn bottom_row_with_gap(gap: usize) -> Board {
    let mut board = Board::new(10, 20).unwrap();
    for x in 0..10 {
        if x != gap {
            board.set(x as i16, 19, true);
        }
    }
    board
}

#[test]
fn test_filling_gap_flashes_then_collapses_by_one() {
    let mut board = bottom_row_with_gap(5);
    board.set(0, 18, true);
    board.set(9, 18, true);
    let mut state = GameState::with_board(board, SimpleRng::new(1));

    // The vertical I spawns in column 5, right above the gap.
    let spawned = state.spawn(catalog(ShapeId::I));
    assert_eq!(spawned.cells().map(|(x, _)| x).collect::<Vec<_>>(), vec![5; 4]);

    match drop_active(&mut state) {
        TickOutcome::Landed { lines } => assert_eq!(lines.as_slice(), &[19]),
        other => panic!("unexpected outcome {:?}", other),
    }

    // Flash frame: the full row is already empty, nothing above has moved.
    assert_eq!(state.phase(), Phase::LinesPendingCollapse);
    assert!(state.board().line_is_empty(19));
    assert!(state.board().is_occupied(0, 18));
    assert!(state.board().is_occupied(5, 16));
    assert_eq!(state.lines_cleared(), 1);

    // The next tick collapses instead of applying gravity.
    assert_eq!(state.tick(), TickOutcome::Collapsed);
    let rows = state.board().to_rows();
    assert_eq!(rows[16], "..........");
    assert_eq!(rows[17], ".....#....");
    assert_eq!(rows[18], ".....#....");
    assert_eq!(rows[19], "#....#...#");
    assert_eq!(state.phase(), Phase::Spawning);
}

#[test]
fn test_clearing_two_rows_at_once() {
    let mut board = Board::new(4, 6).unwrap();
    for y in 4..6 {
        board.set(0, y, true);
        board.set(3, y, true);
    }
    board.set(0, 3, true);
    let mut state = GameState::with_board(board, SimpleRng::new(1));
    // O is two wide; place it over columns 1..=2.
    state.set_active(catalog(ShapeId::O), 0, -2);

    match drop_active(&mut state) {
        TickOutcome::Landed { lines } => assert_eq!(lines.as_slice(), &[5, 4]),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(state.tick(), TickOutcome::Collapsed);
    assert_eq!(
        state.board().to_rows(),
        vec!["....", "....", "....", "....", "....", "#..."]
    );
}

#[test]
fn test_landing_with_top_cell_at_row_minus_one_is_game_over() {
    let mut board = Board::new(10, 20).unwrap();
    board.set(5, 1, true);
    let mut state = GameState::with_board(board, SimpleRng::new(1));
    // O cells on rows -1 and 0, columns 5 and 6; row 1 blocks the fall.
    state.set_active(catalog(ShapeId::O), 4, -3);

    assert_eq!(state.tick(), TickOutcome::GameOver);
    assert!(state.game_over());
    assert_eq!(state.phase(), Phase::GameOver);
    // Only on-board cells were committed.
    assert!(state.board().is_occupied(5, 0));
    assert!(state.board().is_occupied(6, 0));
    assert_eq!(state.board().occupied_count(), 3);

    assert!(!state.spawn_piece());
    assert_eq!(state.tick(), TickOutcome::Idle);
}

#[test]
fn test_landing_fully_on_board_is_not_game_over() {
    let mut state = GameState::new(10, 20, 1).unwrap();
    state.spawn(catalog(ShapeId::O));
    match drop_active(&mut state) {
        TickOutcome::Landed { lines } => assert!(lines.is_empty()),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!state.game_over());
    assert!(state.needs_new_piece());
    assert_eq!(state.pieces_landed(), 1);
}

#[test]
fn test_rejected_rotation_leaves_piece_unchanged() {
    let mut state = GameState::new(10, 20, 1).unwrap();
    state.board_mut().set(1, 10, true);
    // Vertical I in column 2; turning it would cover columns 1..=4 on row 10.
    state.set_active(catalog(ShapeId::I), 1, 9);
    let before: Option<ActivePiece> = state.active();

    assert!(!state.try_rotate(true));
    assert_eq!(state.active(), before);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(10, 20, 99).unwrap();
    let mut b = GameState::new(10, 20, 99).unwrap();
    for _ in 0..10 {
        a.spawn_piece();
        b.spawn_piece();
        assert_eq!(a.active(), b.active());
        while drop_active(&mut a) == TickOutcome::Collapsed {}
        while drop_active(&mut b) == TickOutcome::Collapsed {}
    }
}

#[test]
fn test_held_left_is_accepted_once_per_interval() {
    let mut session = Session::new(SessionConfig::default(), 3).unwrap();
    let mut display = PixelGrid::new(10, 20).unwrap();
    // Left held on every poll, polled every 30 ms for 600 ms.
    let mut controller = ScriptedController::new(
        std::iter::repeat(ButtonState::new().with(Button::Left)).take(21),
    );
    session.start(0);
    session.state_mut().spawn(catalog(ShapeId::T));

    let mut accepted = Vec::new();
    let mut last = None;
    for now in (0..=600).step_by(30) {
        session.step(now, &mut controller, &mut display).unwrap();
        let at = session.debounce().last_accepted_ms(Button::Left);
        if at != last {
            accepted.extend(at);
            last = at;
        }
    }

    // T spawns at x = 4 and may only reach x = 0.
    assert_eq!(accepted, vec![0, 120, 240, 360]);
    assert_eq!(session.state().active().map(|a| a.x), Some(0));
    for pair in accepted.windows(2) {
        assert!(pair[1] - pair[0] > 100);
    }
}

#[test]
fn test_session_play_reports_game_over_not_exit() {
    let mut session = Session::new(SessionConfig::default().with_tick_ms(20), 11).unwrap();
    let mut display = PixelGrid::new(10, 20).unwrap();
    let mut controller = ScriptedController::default();
    let clock = ManualClock::new(0).with_step(7);

    let outcome = session.play(&mut controller, &mut display, &clock).unwrap();
    assert_eq!(outcome, PlayOutcome::GameOver);
    assert!(!outcome.exit_requested());
    // The final frame is on the display.
    assert!(display.lit_count() > 0);
}
