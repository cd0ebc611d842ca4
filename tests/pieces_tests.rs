//! Pieces module tests - shapes, spawn poses and wall kick order

use autotris::core::grid::Grid;
use autotris::core::pieces::{get_shape, kick_offsets, try_rotate};
use autotris::core::piece::Piece;
use autotris::types::{Cell, Direction, PieceKind, Rotation};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::Spawn),
        [(1, 0), (1, 1), (1, 2), (1, 3)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::Clockwise),
        [(0, 2), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::Flip),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::CounterClockwise),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
}

#[test]
fn test_o_piece_never_changes() {
    let spawn = get_shape(PieceKind::O, Rotation::Spawn);
    for turns in 1..4 {
        assert_eq!(get_shape(PieceKind::O, Rotation::from_index(turns)), spawn);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::T, Rotation::Spawn),
        [(0, 1), (1, 0), (1, 1), (1, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::Clockwise),
        [(0, 1), (1, 1), (1, 2), (2, 1)]
    );
}

// ============== Rotation Tests ==============

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        for direction in [Direction::Cw, Direction::Ccw] {
            let start = Piece::new(kind, 7, 3, Rotation::Flip);
            let mut piece = start;
            for _ in 0..4 {
                piece = piece.rotated(direction);
            }
            assert_eq!(piece, start, "{:?} {:?}", kind, direction);
        }
    }
}

#[test]
fn test_rotation_wraps_mod_four() {
    assert_eq!(Rotation::from_index(5), Rotation::Clockwise);
    assert_eq!(Rotation::Spawn.rotate(Direction::Ccw), Rotation::CounterClockwise);
    assert_eq!(Rotation::CounterClockwise.rotate(Direction::Cw), Rotation::Spawn);
}

// ============== Wall Kick Tests ==============

/// For every (rotation, direction) pair and every kick test `k`, free exactly the cells the
/// rotated piece occupies at offset `k`: the rotation must resolve to that offset.
#[test]
fn test_first_valid_kick_follows_table_order() {
    let (row, col) = (8, 4);
    for kind in PieceKind::ALL {
        for from in 0..4 {
            let rotation = Rotation::from_index(from);
            for direction in [Direction::Cw, Direction::Ccw] {
                let target = rotation.rotate(direction);
                let shape = get_shape(kind, target);
                for (k, &(dr, dc)) in kick_offsets(kind, rotation, direction).iter().enumerate() {
                    let free: Vec<(i32, i32)> = shape
                        .iter()
                        .map(|&(r, c)| (row + dr + r, col + dc + c))
                        .collect();
                    let result =
                        try_rotate(kind, rotation, row, col, direction, |r, c| free.contains(&(r, c)));
                    let first_match = kick_offsets(kind, rotation, direction)
                        .iter()
                        .position(|&offset| offset == (dr, dc))
                        .unwrap_or(k);
                    assert_eq!(
                        result,
                        Some((target, kick_offsets(kind, rotation, direction)[first_match])),
                        "{:?} {:?} {:?} test {}",
                        kind,
                        rotation,
                        direction,
                        k
                    );
                }
            }
        }
    }
}

#[test]
fn test_i_kick_tables_differ_from_jlstz() {
    assert_ne!(
        kick_offsets(PieceKind::I, Rotation::Spawn, Direction::Cw),
        kick_offsets(PieceKind::T, Rotation::Spawn, Direction::Cw)
    );
    assert_eq!(
        kick_offsets(PieceKind::O, Rotation::Spawn, Direction::Cw),
        kick_offsets(PieceKind::T, Rotation::Spawn, Direction::Cw)
    );
}

#[test]
fn test_t_kicks_off_right_wall() {
    let grid = Grid::new(20, 10);
    // Counter-clockwise T hugging the right wall: stem in column 9.
    let piece = Piece::new(PieceKind::T, 10, 8, Rotation::CounterClockwise);
    assert!(grid.is_valid(&piece));

    // Rotating back to spawn needs columns 8..=10; the first kick shifts it left.
    let rotated = grid.try_rotate(&piece, Direction::Cw).unwrap();
    assert_eq!(rotated.rotation, Rotation::Spawn);
    assert_eq!((rotated.row, rotated.col), (10, 7));
    assert!(grid.is_valid(&rotated));
}

#[test]
fn test_blocked_rotation_fails() {
    // A vertical I in a one-wide shaft cannot turn flat.
    let mut grid = Grid::new(20, 10);
    for row in 0..20 {
        for col in 0..10 {
            if col != 4 {
                grid.set(row, col, Cell::Filled(PieceKind::Z));
            }
        }
    }
    let piece = Piece::new(PieceKind::I, 10, 2, Rotation::Clockwise);
    assert!(grid.is_valid(&piece));
    assert_eq!(grid.try_rotate(&piece, Direction::Cw), None);
    assert_eq!(grid.try_rotate(&piece, Direction::Ccw), None);
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_poses() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!(piece.row, -2);
        assert_eq!(piece.rotation, Rotation::Spawn);
        let expected_col = if kind == PieceKind::O { 4 } else { 3 };
        assert_eq!(piece.col, expected_col);
        // Spawned minos are all above the visible grid.
        assert!(piece.cells().iter().all(|&(r, _)| r < 0));
    }
}
