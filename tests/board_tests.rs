//! Board tests - collision, locking and line clearing

use blockfall::core::Board;
use blockfall::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(Cell::Empty), "({x}, {y})");
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Cell::Occupied(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Cell::Occupied(PieceKind::T)));

    assert!(board.set(5, 10, Cell::Empty));
    assert_eq!(board.get(5, 10), Some(Cell::Empty));

    // Writes outside the grid are refused.
    assert!(!board.set(-1, 0, Cell::Occupied(PieceKind::I)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Cell::Occupied(PieceKind::I)));
}

#[test]
fn test_collision_rule() {
    let mut board = Board::new();
    board.set(4, 0, Cell::Occupied(PieceKind::O));

    // Walls and floor.
    assert!(board.collides_at(-1, 5));
    assert!(board.collides_at(BOARD_WIDTH as i8, 5));
    assert!(board.collides_at(0, BOARD_HEIGHT as i8));

    // Above the visible board is free, unless off to the side.
    assert!(!board.collides_at(0, -1));
    assert!(!board.collides_at(4, -3));
    assert!(board.collides_at(-1, -1));

    // Locked cells.
    assert!(board.collides_at(4, 0));
    assert!(!board.collides_at(5, 0));
}

#[test]
fn test_lock_cells_drops_cells_above_board() {
    let mut board = Board::new();
    let locked = board.lock_cells(&[(3, -1), (4, -1), (3, 0), (4, 0)], PieceKind::O);

    assert_eq!(locked, 2);
    assert!(board.is_occupied(3, 0));
    assert!(board.is_occupied(4, 0));
    assert_eq!(board.cells().iter().filter(|c| c.is_occupied()).count(), 2);
}

#[test]
fn test_clear_single_row_shifts_stack_down() {
    let mut board = Board::from_rows(
        BOARD_WIDTH,
        BOARD_HEIGHT,
        &["..T.......", "...S......", "IIIIIIIIII"],
    );

    assert_eq!(board.clear_full_rows(), 1);

    assert_eq!(board.get(2, 18), Some(Cell::Occupied(PieceKind::T)));
    assert_eq!(board.get(3, 19), Some(Cell::Occupied(PieceKind::S)));
    assert!(board.is_row_empty(17));
    assert!(board.is_row_empty(0));
}

#[test]
fn test_clear_adjacent_full_rows() {
    let mut board = Board::from_rows(
        BOARD_WIDTH,
        BOARD_HEIGHT,
        &["J.........", "ZZZZZZZZZZ", "LLLLLLLLLL"],
    );

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.get(0, 19), Some(Cell::Occupied(PieceKind::J)));
    for y in 0..19 {
        assert!(board.is_row_empty(y), "row {y} should be empty");
    }
}

#[test]
fn test_clear_non_adjacent_full_rows() {
    let mut board = Board::from_rows(
        BOARD_WIDTH,
        BOARD_HEIGHT,
        &["OOOOOOOOOO", "T.T.T.T.T.", "IIIIIIIIII"],
    );

    assert_eq!(board.clear_full_rows(), 2);
    assert!(board.row(19).unwrap().iter().step_by(2).all(|c| c.is_occupied()));
    assert!(board.row(19).unwrap().iter().skip(1).step_by(2).all(|c| c.is_empty()));
    assert!(board.is_row_empty(18));
}

#[test]
fn test_clear_top_row_enters_empty() {
    let mut board = Board::with_size(4, 4);
    for x in 0..4 {
        board.set(x, 0, Cell::Occupied(PieceKind::I));
    }

    assert_eq!(board.clear_full_rows(), 1);
    assert!(board.cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_clear_nothing_when_no_full_rows() {
    let mut board = Board::from_rows(BOARD_WIDTH, BOARD_HEIGHT, &["IIIIIIIII."]);
    let before = board.clone();

    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}
