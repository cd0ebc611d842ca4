//! Pieces module - tetromino shape tables and wall kick data
//!
//! Every kind lives in a square box (4x4 for I, 2x2 for O, 3x3 otherwise). Shapes are
//! listed as `(row, col)` offsets inside that box; rotating clockwise moves box cell
//! `(r, c)` to `(c, n - 1 - r)`.
//!
//! Kick offsets are `(drow, dcol)` with rows growing downward.

use crate::types::{Direction, PieceKind, Rotation};

/// Offset of a single mino relative to the box origin, `(row, col)`
pub type MinoOffset = (i32, i32);

/// Shape of a piece - 4 mino offsets from the box origin
pub type PieceShape = [MinoOffset; 4];

/// Ordered kick candidates tried for one rotation transition
pub type KickTests = [(i32, i32); 5];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => I_SHAPES[rotation.index()],
        PieceKind::J => J_SHAPES[rotation.index()],
        PieceKind::L => L_SHAPES[rotation.index()],
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPES[rotation.index()],
        PieceKind::T => T_SHAPES[rotation.index()],
        PieceKind::Z => Z_SHAPES[rotation.index()],
    }
}

/// Spawn mask as rows of 0/1, the form the shapes are derived from
pub fn spawn_mask(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
        PieceKind::J => &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
        PieceKind::L => &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
        PieceKind::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    }
}

// Spawn, Clockwise, Flip, CounterClockwise
const I_SHAPES: [PieceShape; 4] = [
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 0), (2, 1)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(0, 2), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
];

const O_SHAPE: PieceShape = [(0, 0), (0, 1), (1, 0), (1, 1)];

const S_SHAPES: [PieceShape; 4] = [
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 1), (1, 2), (2, 0), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
];

const T_SHAPES: [PieceShape; 4] = [
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 2), (1, 1), (1, 2), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(0, 1), (1, 0), (1, 1), (2, 0)],
];

/// Kick table indexed by `[from_rotation][direction]` (0 = Cw, 1 = Ccw)
pub type KickTable = [[KickTests; 2]; 4];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// Kick candidates for rotating `kind` out of `from` in `direction`
pub fn kick_offsets(kind: PieceKind, from: Rotation, direction: Direction) -> &'static KickTests {
    let dir = match direction {
        Direction::Cw => 0,
        Direction::Ccw => 1,
    };
    &get_kick_table(kind)[from.index()][dir]
}

/// Kick table shared by J, L, O, S, T, Z (O never needs more than the first test)
const JLSTZ_KICKS: KickTable = [
    // Spawn
    [
        [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    ],
    // Clockwise
    [
        [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    ],
    // Flip
    [
        [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
        [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
    ],
    // CounterClockwise
    [
        [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    ],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // Spawn
    [
        [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    ],
    // Clockwise
    [
        [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
        [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
    ],
    // Flip
    [
        [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
    ],
    // CounterClockwise
    [
        [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
    ],
];

/// Try to rotate a piece with wall kicks
///
/// Returns `Some((new_rotation, kick_offset))` for the first kick test whose cells all satisfy
/// `is_free`, or `None` if every test collides.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    row: i32,
    col: i32,
    direction: Direction,
    is_free: impl Fn(i32, i32) -> bool,
) -> Option<(Rotation, (i32, i32))> {
    let new_rotation = rotation.rotate(direction);
    let new_shape = get_shape(kind, new_rotation);

    for &(dr, dc) in kick_offsets(kind, rotation, direction) {
        let valid = new_shape
            .iter()
            .all(|&(mr, mc)| is_free(row + dr + mr, col + dc + mc));

        if valid {
            return Some((new_rotation, (dr, dc)));
        }
    }

    None
}

/// Spawn anchor `(row, col)` for a kind
pub fn spawn_position(kind: PieceKind) -> (i32, i32) {
    use crate::types::{SPAWN_COL, SPAWN_COL_O, SPAWN_ROW};
    match kind {
        PieceKind::O => (SPAWN_ROW, SPAWN_COL_O),
        _ => (SPAWN_ROW, SPAWN_COL),
    }
}
