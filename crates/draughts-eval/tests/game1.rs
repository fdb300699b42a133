use draughts_core::{BoardState, Color, Occupancy, Square};
use draughts_eval::{replay, ConfusionMatrix, GroundTruth};
use draughts_tracker::GeometricValidator;

fn game() -> GroundTruth {
    GroundTruth::draughts_game1().expect("embedded ground truth")
}

#[test]
fn replaying_the_move_list_reproduces_every_position() {
    let gt = game();
    let positions = gt.positions().unwrap();
    assert_eq!(positions[0], BoardState::starting_position());

    let replayed = replay(positions[0], &gt.moves).expect("legal game");
    assert_eq!(replayed.len(), 68);
    for (i, (got, expected)) in replayed.iter().zip(&positions[1..]).enumerate() {
        assert_eq!(got, expected, "position after move {}", i + 1);
    }

    let last = replayed.last().unwrap();
    assert_eq!(last.piece_list(Color::White), "");
    assert_eq!(last.piece_list(Color::Black), "K2,K4,15,19,20");
}

#[test]
fn piece_count_never_increases() {
    let gt = game();
    let positions = gt.positions().unwrap();
    for pair in positions.windows(2) {
        assert!(pair[1].piece_count() <= pair[0].piece_count());
    }
}

#[test]
fn geometric_inference_explains_consecutive_positions() {
    let gt = game();
    let positions = gt.positions().unwrap();
    let validator = GeometricValidator::new();
    for (i, pair) in positions.windows(2).enumerate() {
        let m = validator
            .infer_move(&pair[0], &pair[1])
            .unwrap_or_else(|| panic!("no move explains position {}", i + 1));
        assert_eq!((m.from, m.to), (gt.moves[i].from, gt.moves[i].to), "move {}", i + 1);
    }
}

#[test]
fn ground_truth_against_itself_is_perfect() {
    let gt = game();
    let mut man = ConfusionMatrix::man_only();
    let mut king = ConfusionMatrix::king_aware();
    for b in gt.positions().unwrap() {
        man.record_board(&b, &b);
        king.record_board(&b, &b);
    }
    assert_eq!(man.total(), 32 * 69);
    assert_eq!(king.total(), 32 * 69);
    assert_eq!(man.correct(), man.total());
    assert_eq!(king.correct(), king.total());
}

#[test]
fn multi_jump_in_move_twenty_captures_two() {
    let gt = game();
    let positions = gt.positions().unwrap();
    let m = &gt.moves[19];
    assert_eq!((m.from.number(), m.to.number()), (18, 2));
    let sq = |n| Square::new(n).unwrap();
    assert_eq!(positions[19].get(sq(15)), Occupancy::WhiteMan);
    assert_eq!(positions[20].get(sq(15)), Occupancy::Empty);
    assert_eq!(positions[20].get(sq(2)), Occupancy::BlackKing);
}
