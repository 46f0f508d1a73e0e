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

use core::fmt::{self, Display, Write as _};

use arrayvec::ArrayVec;

use crate::{castling_side::CastlingSide, role::Role, square::Square};

/// A move as resolved against a position: what moved, what it captured,
/// and which of the special move protocols it used.
///
/// Moves are requested with origin and destination only, as
/// [`Uci`](crate::uci::Uci), and resolved by
/// [`Chess::play()`](crate::Chess::play) or enumerated by
/// [`Chess::legal_moves()`](crate::Chess::legal_moves).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A normal move, e.g., `Bd3xh7`.
    Normal {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: Option<Role>,
    },
    /// An en passant capture, e.g., `e5xd6`.
    EnPassant { from: Square, to: Square },
    /// A castling move, `O-O` or `O-O-O`. Stores the origin squares of
    /// king and rook.
    Castle { king: Square, rook: Square },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(self) -> Role {
        match self {
            Move::Normal { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle { .. } => Role::King,
        }
    }

    /// Gets the origin square. For castling moves this is the king square.
    pub const fn from(self) -> Square {
        match self {
            Move::Normal { from, .. } | Move::EnPassant { from, .. } => from,
            Move::Castle { king, .. } => king,
        }
    }

    /// Gets the square the moved piece lands on. For castling moves this
    /// is the destination of the king.
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::EnPassant { to, .. } => to,
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king.col() < rook.col());
                Square::from_row_col(king.row(), side.king_to_col())
            }
        }
    }

    /// Gets the role of the captured piece or `None`.
    pub const fn capture(self) -> Option<Role> {
        match self {
            Move::Normal { capture, .. } => capture,
            Move::EnPassant { .. } => Some(Role::Pawn),
            Move::Castle { .. } => None,
        }
    }

    /// Checks if the move is a capture.
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Checks if the move is en passant.
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Checks if the move zeros the half-move clock.
    pub const fn is_zeroing(self) -> bool {
        matches!(
            self,
            Move::Normal {
                role: Role::Pawn,
                ..
            } | Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Gets the castling side.
    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle { king, rook } => {
                Some(CastlingSide::from_king_side(king.col() < rook.col()))
            }
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// Gets the promotion role.
    pub const fn promotion(self) -> Option<Role> {
        match self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }

    /// Checks if the move is a promotion.
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            Move::Normal {
                promotion: Some(_),
                ..
            }
        )
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }

                write!(
                    f,
                    "{}{}{}",
                    from,
                    if capture.is_some() { 'x' } else { '-' },
                    to
                )?;

                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }

                Ok(())
            }
            Move::EnPassant { from, to } => write!(f, "{from}x{to}"),
            Move::Castle { king, rook } => f.write_str(if king < rook { "O-O" } else { "O-O-O" }),
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough to hold the legal moves of any chess position.
pub type MoveList = ArrayVec<Move, 256>;

#[cfg(test)]
mod tests {
    use core::mem;

    use super::*;

    #[test]
    fn test_move_size() {
        assert!(mem::size_of::<Move>() <= 8);
    }

    #[test]
    fn test_castle_destination() {
        let m = Move::Castle {
            king: Square::E8,
            rook: Square::A8,
        };
        assert_eq!(m.to(), Square::C8);
        assert_eq!(m.castling_side(), Some(CastlingSide::QueenSide));

        let m = Move::Castle {
            king: Square::E1,
            rook: Square::H1,
        };
        assert_eq!(m.to(), Square::G1);
        assert!(!m.is_capture());
    }
}
