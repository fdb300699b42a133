use draughts_core::{BoardGeometry, BoardState, FrameObservation, Occupancy, Square};
use draughts_tracker::{
    AnalysisSession, ConfirmedChange, FrameOutcome, MoveStrategy, TemporalCorrelator, TrackerParams,
};

fn sq(n: u8) -> Square {
    Square::new(n).unwrap()
}

fn frame(board: BoardState) -> FrameObservation {
    FrameObservation {
        board,
        foreground_pixels: board.piece_count() * 1400,
    }
}

/// Board sequence of a game as seen frame by frame: each position held for
/// `hold` frames, with one noisy frame per position.
fn play(positions: &[BoardState], hold: u64) -> Vec<FrameObservation> {
    let mut frames = Vec::new();
    for pos in positions {
        for i in 0..hold {
            let mut seen = *pos;
            if i == 2 {
                // flicker on an untouched square
                seen.set(sq(32), Occupancy::Empty);
            }
            frames.push(frame(seen));
        }
    }
    frames
}

fn after_moves(moves: &[(u8, u8, Option<u8>)]) -> Vec<BoardState> {
    let mut board = BoardState::starting_position();
    let mut out = vec![board];
    for &(from, to, taken) in moves {
        let piece = board.get(sq(from));
        board.set(sq(from), Occupancy::Empty);
        board.set(sq(to), piece);
        if let Some(t) = taken {
            board.set(sq(t), Occupancy::Empty);
        }
        out.push(board);
    }
    out
}

#[test]
fn temporal_correlation_records_move_exactly_once() {
    let changes = vec![
        ConfirmedChange {
            square: Square::from_index(8).unwrap(),
            frame: 100,
            before: Occupancy::WhiteMan,
            after: Occupancy::Empty,
        },
        ConfirmedChange {
            square: Square::from_index(12).unwrap(),
            frame: 103,
            before: Occupancy::Empty,
            after: Occupancy::WhiteMan,
        },
    ];
    let correlator = TemporalCorrelator::new(10);
    let mut log = Vec::new();
    for f in 103..=113 {
        correlator.correlate(f, &changes, &mut log);
    }
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].from.number(), 9);
    assert_eq!(log[0].to.number(), 13);
    assert_eq!(log[0].piece, Occupancy::WhiteMan);
    assert_eq!(log[0].frame, 103);
}

#[test]
fn geometric_session_follows_a_short_game_with_capture() {
    // 12-16, 23-19, 16x23 (over 19), 27x18 (over 23)
    let positions = after_moves(&[
        (12, 16, None),
        (23, 19, None),
        (16, 23, Some(19)),
        (27, 18, Some(23)),
    ]);
    assert_eq!(sq(16).between(sq(23)), Some(sq(19)));
    assert_eq!(sq(27).between(sq(18)), Some(sq(23)));

    let mut session = AnalysisSession::new(TrackerParams::default(), BoardGeometry::default());
    for (i, obs) in play(&positions, 20).iter().enumerate() {
        session.process_frame(i as u64, obs);
    }

    let moves: Vec<(u8, u8)> = session
        .moves()
        .iter()
        .map(|m| (m.from.number(), m.to.number()))
        .collect();
    assert_eq!(moves, vec![(12, 16), (23, 19), (16, 23), (27, 18)]);
    assert_eq!(session.moves()[2].captured, vec![sq(19)]);
    assert_eq!(session.settled(), positions.last().unwrap());
    assert_eq!(session.previous(), positions.last().unwrap());
    assert_eq!(session.settled().piece_count(), 22);
}

#[test]
fn temporal_session_also_pairs_captured_square_with_landing() {
    let positions = after_moves(&[(12, 16, None), (23, 19, None), (16, 23, Some(19))]);
    let mut session = AnalysisSession::new(
        TrackerParams::with_strategy(MoveStrategy::Temporal),
        BoardGeometry::default(),
    );
    for (i, obs) in play(&positions, 20).iter().enumerate() {
        session.process_frame(i as u64, obs);
    }
    let moves: Vec<(u8, u8)> = session
        .moves()
        .iter()
        .map(|m| (m.from.number(), m.to.number()))
        .collect();
    // the vacated capture square is indistinguishable from a source here
    assert!(moves.contains(&(16, 23)));
    assert!(moves.contains(&(19, 23)));
}

#[test]
fn hand_over_board_defers_frames() {
    let mut session = AnalysisSession::new(TrackerParams::default(), BoardGeometry::default());
    let busy = FrameObservation {
        board: BoardState::empty(),
        foreground_pixels: 70_000,
    };
    for f in 0..20 {
        assert!(matches!(
            session.process_frame(f, &busy),
            FrameOutcome::Deferred { limit: 60_000, .. }
        ));
    }
    assert!(session.changes().is_empty());
    assert_eq!(session.previous(), &BoardState::starting_position());
}

#[test]
fn outcomes_serialise_with_tag() {
    let json = serde_json::to_string(&FrameOutcome::Deferred {
        foreground_pixels: 5,
        limit: 4,
    })
    .unwrap();
    assert_eq!(json, r#"{"outcome":"deferred","foreground_pixels":5,"limit":4}"#);
}
