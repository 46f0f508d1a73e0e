// This file is part of the gambit library.
// Copyright (C) 2017-2025 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Movement rules of the individual pieces.
//!
//! These functions answer whether a piece could move from one square to
//! another on a given board, without regard to the safety of its own king
//! (*pseudo-legal* moves). They never mutate the board.
//!
//! # Examples
//!
//! ```
//! use gambit::{rules, Board, Color, Square};
//!
//! let board = Board::default();
//!
//! assert!(rules::is_pseudo_legal(Color::White.knight(), Square::G1, Square::F3, &board));
//! assert!(rules::is_pseudo_legal(Color::White.pawn(), Square::E2, Square::E4, &board));
//!
//! // Blocked by the own pawn on e2.
//! assert!(!rules::is_pseudo_legal(Color::White.queen(), Square::D1, Square::H5, &board));
//! ```

use crate::{
    board::Board,
    castling_side::{king_home, CastlingSide},
    color::Color,
    role::Role,
    square::Square,
    types::Piece,
};

/// Tests if `piece`, standing on `from`, may move to `to` according to its
/// movement geometry, obstruction and destination rules.
///
/// Castling counts as a pseudo-legal king move if all its preconditions
/// hold (see [`castling_side()`]). En passant counts as a pseudo-legal pawn
/// move if the last move on the board allows it (see [`is_en_passant()`]).
///
/// A move to the origin square itself, or onto a piece of the same color,
/// is never pseudo-legal.
pub fn is_pseudo_legal(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    if from == to || !(board.is_empty(to) || board.is_opponent_piece(to, piece.color)) {
        return false;
    }

    match piece.role {
        Role::Pawn => is_pawn_move(piece.color, from, to, board),
        Role::Knight => is_knight_step(from, to),
        Role::Bishop => is_diagonal(from, to) && is_path_clear(from, to, board),
        Role::Rook => is_straight(from, to) && is_path_clear(from, to, board),
        Role::Queen => {
            (is_diagonal(from, to) || is_straight(from, to)) && is_path_clear(from, to, board)
        }
        Role::King => {
            is_king_step(from, to) || castling_side(piece.color, from, to, board).is_some()
        }
    }
}

/// Tests if `piece`, standing on `from`, threatens `target`.
///
/// Unlike [`is_pseudo_legal()`] the occupant of `target` is not considered,
/// pawns only threaten diagonally forward, and kings only threaten
/// adjacent squares.
pub fn attacks(piece: Piece, from: Square, target: Square, board: &Board) -> bool {
    if from == target {
        return false;
    }

    match piece.role {
        Role::Pawn => {
            let (drow, dcol) = from.delta(target);
            drow == piece.color.forward() && dcol.abs() == 1
        }
        Role::Knight => is_knight_step(from, target),
        Role::Bishop => is_diagonal(from, target) && is_path_clear(from, target, board),
        Role::Rook => is_straight(from, target) && is_path_clear(from, target, board),
        Role::Queen => {
            (is_diagonal(from, target) || is_straight(from, target))
                && is_path_clear(from, target, board)
        }
        Role::King => is_king_step(from, target),
    }
}

fn is_pawn_move(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let (drow, dcol) = from.delta(to);
    let forward = color.forward();

    match dcol {
        0 if drow == forward => board.is_empty(to),
        0 if drow == 2 * forward && from.row() == color.pawn_row() => {
            board.is_empty(to)
                && from
                    .offset(forward, 0)
                    .is_some_and(|skipped| board.is_empty(skipped))
        }
        -1 | 1 if drow == forward => {
            board.is_opponent_piece(to, color) || is_en_passant(color, from, to, board)
        }
        _ => false,
    }
}

/// Tests if a pawn of `color` on `from` may capture en passant by moving
/// to `to`.
///
/// The destination must be the empty square diagonally forward, and the
/// last move on the board must have been a two-row advance of an opposing
/// pawn that landed next to `from`, on the destination column.
///
/// # Examples
///
/// ```
/// use gambit::{fen::Fen, rules, Color, Square};
///
/// let fen: Fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse()?;
/// let board = fen.board;
///
/// assert!(rules::is_en_passant(Color::White, Square::E5, Square::D6, &board));
/// assert!(!rules::is_en_passant(Color::White, Square::E5, Square::F6, &board));
/// # Ok::<_, gambit::fen::ParseFenError>(())
/// ```
pub fn is_en_passant(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let (drow, dcol) = from.delta(to);
    if drow != color.forward() || dcol.abs() != 1 || !board.is_empty(to) {
        return false;
    }

    let captured = Square::from_row_col(from.row(), to.col());
    board
        .last_move()
        .is_some_and(|last| last.is_double_pawn_push() && last.to == captured)
        && board.piece_at(captured) == Some(color.other().pawn())
}

/// Checks the castling preconditions for a king of `color` moving from
/// `from` to `to`, and returns the castling side if they all hold:
///
/// * the king moves two columns from its original square and has not
///   moved before,
/// * an unmoved rook of the same color stands on the corner of that side,
/// * every square strictly between king and rook is empty,
/// * neither the origin of the king, nor the square it passes, nor its
///   destination is attacked by the opponent.
pub fn castling_side(
    color: Color,
    from: Square,
    to: Square,
    board: &Board,
) -> Option<CastlingSide> {
    let (drow, dcol) = from.delta(to);
    if drow != 0 || from != king_home(color) {
        return None;
    }
    let side = CastlingSide::from_col_delta(dcol)?;

    let king = board.placed_at(from)?;
    if king.piece != color.king() || king.has_moved {
        return None;
    }

    let rook = board.placed_at(side.rook_from(color))?;
    if rook.piece != color.rook() || rook.has_moved {
        return None;
    }

    let row = from.row();
    let (lo, hi) = min_max(from.col(), side.rook_from_col());
    if (lo + 1..hi).any(|col| !board.is_empty(Square::from_row_col(row, col))) {
        return None;
    }

    let (lo, hi) = min_max(from.col(), side.king_to_col());
    if (lo..=hi).any(|col| board.is_under_attack(Square::from_row_col(row, col), color)) {
        return None;
    }

    Some(side)
}

const fn min_max(a: u8, b: u8) -> (u8, u8) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn is_knight_step(from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    matches!((drow.abs(), dcol.abs()), (1, 2) | (2, 1))
}

fn is_king_step(from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs() <= 1 && dcol.abs() <= 1
}

fn is_diagonal(from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs() == dcol.abs()
}

fn is_straight(from: Square, to: Square) -> bool {
    from.row() == to.row() || from.col() == to.col()
}

/// Checks that all squares strictly between `from` and `to` are empty.
/// The squares must be on a common row, column or diagonal.
fn is_path_clear(from: Square, to: Square, board: &Board) -> bool {
    let (drow, dcol) = from.delta(to);
    let (step_row, step_col) = (drow.signum(), dcol.signum());

    let mut sq = from;
    while let Some(next) = sq.offset(step_row, step_col) {
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        sq = next;
    }
    false
}
