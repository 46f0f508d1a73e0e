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

use core::{error::Error, fmt, num::NonZeroU32, str::FromStr};

#[cfg(feature = "alloc")]
use alloc::string::{String, ToString as _};
use log::{debug, log_enabled, trace, Level};

use crate::{
    bitboard::Bitboard,
    board::Board,
    castling_side::{CastlingRights, CastlingSide},
    color::Color,
    m::{Move, MoveList},
    role::Role,
    rules,
    square::Square,
    types::{LastMove, PlacedPiece},
    uci::Uci,
};

/// Outcome of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }

    pub fn from_ascii(bytes: &[u8]) -> Result<Outcome, ParseOutcomeError> {
        Ok(match bytes {
            b"1-0" => Outcome::Decisive {
                winner: Color::White,
            },
            b"0-1" => Outcome::Decisive {
                winner: Color::Black,
            },
            b"1/2-1/2" => Outcome::Draw,
            _ => return Err(ParseOutcomeError),
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// Error when parsing an [`Outcome`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        Outcome::from_ascii(s.as_bytes())
    }
}

/// Game state of one side, as evaluated by [`Chess::status()`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    /// Not in check, with at least one legal move.
    Ongoing,
    /// In check, with at least one legal move.
    Check,
    /// In check, without legal moves.
    Checkmate,
    /// Not in check, without legal moves.
    Stalemate,
}

impl Status {
    /// Checks if the game is over.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }

    pub const fn is_check(self) -> bool {
        matches!(self, Status::Check | Status::Checkmate)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Status::Ongoing => "ongoing",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a [`Status`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseStatusError;

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid status")
    }
}

impl Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Status, ParseStatusError> {
        [
            Status::Ongoing,
            Status::Check,
            Status::Checkmate,
            Status::Stalemate,
        ]
        .into_iter()
        .find(|status| status.as_str() == s)
        .ok_or(ParseStatusError)
    }
}

/// Reason a [`Board`] does not describe a playable position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PositionError {
    /// There is no king of the given color.
    MissingKing(Color),
    /// There is more than one king of the given color.
    TooManyKings(Color),
    /// There are pawns on the first or eighth rank.
    PawnsOnBackrank,
    /// The player not to move is in check.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PositionError::MissingKing(color) => write!(f, "{color} king missing"),
            PositionError::TooManyKings(color) => write!(f, "more than one {color} king"),
            PositionError::PawnsOnBackrank => f.write_str("pawns on backrank"),
            PositionError::OppositeCheck => f.write_str("player not to move is in check"),
        }
    }
}

impl Error for PositionError {}

/// Reason a requested move was rejected by [`Chess::play()`].
///
/// The position is unchanged after any of these.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlayError {
    /// There is no piece on the origin square.
    NoPiece,
    /// The piece on the origin square belongs to the side not to move.
    WrongTurn,
    /// The piece cannot move that way.
    IllegalMove,
    /// A two column king move that does not satisfy the castling
    /// conditions.
    IllegalCastling,
    /// A diagonal pawn move to an empty square that is not a valid en
    /// passant capture.
    IllegalEnPassant,
    /// The move would leave or put the own king in check.
    LeavesKingInCheck,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            PlayError::NoPiece => "no piece on origin square",
            PlayError::WrongTurn => "piece of the player not to move",
            PlayError::IllegalMove => "illegal move",
            PlayError::IllegalCastling => "castling not allowed",
            PlayError::IllegalEnPassant => "en passant not allowed",
            PlayError::LeavesKingInCheck => "move leaves king in check",
        })
    }
}

impl Error for PlayError {}

/// A standard chess position.
///
/// A `Chess` can only be obtained from the starting position or from a
/// validated [`Board`] (see [`Chess::from_board()`]), so both kings are
/// always present and the player not to move is never in check. It only
/// changes by playing legal moves.
///
/// # Examples
///
/// ```
/// use gambit::{uci::Uci, Chess, Color, Status};
///
/// let mut pos = Chess::default();
/// for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     pos.play(uci.parse::<Uci>()?)?;
/// }
///
/// assert!(pos.is_checkmate(Color::White));
/// assert_eq!(pos.status(Color::White), Status::Checkmate);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chess {
    board: Board,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

impl Default for Chess {
    fn default() -> Chess {
        Chess {
            board: Board::new(),
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }
}

impl Chess {
    /// The starting position.
    pub fn new() -> Chess {
        Chess::default()
    }

    /// Validates `board` and sets up a position with fresh move counters.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] if the board lacks a king, has more than
    /// one king per color, has pawns on a back rank, or the player not to
    /// move is in check.
    pub fn from_board(board: Board) -> Result<Chess, PositionError> {
        Chess::from_parts(board, 0, NonZeroU32::MIN)
    }

    /// Like [`Chess::from_board()`], but with explicit move counters.
    pub fn from_parts(
        board: Board,
        halfmoves: u32,
        fullmoves: NonZeroU32,
    ) -> Result<Chess, PositionError> {
        for color in Color::ALL {
            board.king_of(color)?;
        }

        if board
            .pieces()
            .any(|placed| placed.role() == Role::Pawn && is_back_row(placed.square))
        {
            return Err(PositionError::PawnsOnBackrank);
        }

        if board.is_in_check(!board.turn())? {
            return Err(PositionError::OppositeCheck);
        }

        Ok(Chess {
            board,
            halfmoves,
            fullmoves,
        })
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// The side to move.
    #[inline]
    pub const fn turn(&self) -> Color {
        self.board.turn()
    }

    /// Number of half-moves since the last capture or pawn move.
    #[inline]
    pub const fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Move number, starting at 1 and incremented after each move of
    /// Black.
    #[inline]
    pub const fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    /// Castling rights, as far as they can be read from the board. See
    /// [`Board::castling_rights()`].
    pub fn castling_rights(&self) -> CastlingRights {
        self.board.castling_rights()
    }

    /// The square skipped by the last move, if it was a two-row pawn
    /// advance.
    ///
    /// This is reported whether or not an en passant capture is possible.
    pub fn ep_square(&self) -> Option<Square> {
        self.board
            .last_move()
            .and_then(|last| last.en_passant_target())
    }

    /// Checks if the piece on `from` could move to `to`, according to its
    /// movement rules alone.
    pub fn is_pseudo_legal(&self, from: Square, to: Square) -> bool {
        self.board
            .piece_at(from)
            .is_some_and(|piece| rules::is_pseudo_legal(piece, from, to, &self.board))
    }

    /// Checks if the piece of `color` on `from` may legally move to `to`,
    /// i.e. pseudo-legally, without leaving its own king in check.
    ///
    /// The move is tried out on a copy of the board, so the position is
    /// unchanged afterwards. `color` does not need to be the side to move.
    pub fn is_legal(&self, from: Square, to: Square, color: Color) -> bool {
        self.board
            .placed_at(from)
            .filter(|placed| placed.color() == color)
            .is_some_and(|placed| self.legal_move(placed, to).is_some())
    }

    /// Checks if the king of `color` is attacked.
    ///
    /// # Panics
    ///
    /// Panics if there is not exactly one king of `color`. Positions are
    /// validated on construction, so this indicates a bug.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_attacked(&self.board, color)
    }

    /// Checks if `color` has at least one legal move.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.pieces_of(color)
            .any(|placed| self.legal_moves_of(placed).next().is_some())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Classifies the situation of `color`.
    pub fn status(&self, color: Color) -> Status {
        match (self.is_in_check(color), self.has_legal_move(color)) {
            (false, true) => Status::Ongoing,
            (true, true) => Status::Check,
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
        }
    }

    /// The outcome of the game, if the side to move is checkmated or
    /// stalemated.
    pub fn outcome(&self) -> Option<Outcome> {
        let turn = self.turn();
        match self.status(turn) {
            Status::Checkmate => Some(Outcome::Decisive { winner: !turn }),
            Status::Stalemate => Some(Outcome::Draw),
            Status::Ongoing | Status::Check => None,
        }
    }

    /// Checks if the game is over, due to checkmate or stalemate.
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Collects all legal moves of `color`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gambit::{Chess, Color};
    ///
    /// let pos = Chess::default();
    /// assert_eq!(pos.legal_moves(Color::White).len(), 20);
    /// assert_eq!(pos.legal_moves(Color::Black).len(), 20);
    /// ```
    pub fn legal_moves(&self, color: Color) -> MoveList {
        self.pieces_of(color)
            .flat_map(|placed| self.legal_moves_of(placed))
            .collect()
    }

    /// The squares the piece on `from` can legally move to. For castling
    /// this is the destination of the king.
    pub fn legal_destinations(&self, from: Square) -> Bitboard {
        self.board
            .placed_at(from)
            .map(|placed| self.legal_moves_of(placed).map(Move::to).collect())
            .unwrap_or_default()
    }

    /// Validates and plays a move of the side to move.
    ///
    /// Castling is requested as a king move of two columns, en passant as a
    /// diagonal pawn move to the empty square behind the captured pawn.
    /// Pawns reaching the last rank are always promoted to a queen, ignoring
    /// any other requested promotion.
    ///
    /// # Errors
    ///
    /// Returns a [`PlayError`] if the move is not legal. The position is
    /// unchanged in that case.
    pub fn play(&mut self, uci: Uci) -> Result<Move, PlayError> {
        let color = self.turn();

        let played = self.to_move(uci).and_then(|m| {
            let mut after = self.clone();
            after.play_unchecked(m);
            if after.is_in_check(color) {
                Err(PlayError::LeavesKingInCheck)
            } else {
                Ok((m, after))
            }
        });

        match played {
            Ok((m, after)) => {
                *self = after;
                self.log_played(color, m, uci);
                Ok(m)
            }
            Err(err) => {
                trace!("{color} {uci} rejected: {err}");
                Err(err)
            }
        }
    }

    /// Plays a move from `from` to `to` for the side to move, and reports
    /// whether it was legal.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        self.play(Uci {
            from,
            to,
            promotion: None,
        })
        .is_ok()
    }

    /// Plays a move without validation.
    ///
    /// The move must be one of the [legal moves](Chess::legal_moves) of the
    /// side to move. Otherwise the position may become inconsistent.
    pub fn play_unchecked(&mut self, m: Move) {
        let color = self.turn();

        do_move(&mut self.board, m);

        self.halfmoves = if m.is_zeroing() {
            0
        } else {
            self.halfmoves.saturating_add(1)
        };
        if color.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
    }

    /// Renders the position as a FEN.
    #[cfg(feature = "alloc")]
    pub fn fen(&self) -> String {
        crate::fen::Fen::from_position(self).to_string()
    }

    /// Resolves a move request of the side to move. Castling and en passant
    /// are recognized by their shape and checked against their own
    /// conditions before anything else.
    fn to_move(&self, uci: Uci) -> Result<Move, PlayError> {
        let Uci { from, to, .. } = uci;
        let color = self.turn();

        let placed = self.board.placed_at(from).ok_or(PlayError::NoPiece)?;
        if placed.color() != color {
            return Err(PlayError::WrongTurn);
        }

        let (_, dcol) = from.delta(to);
        match placed.role() {
            Role::King if dcol.abs() == 2 => rules::castling_side(color, from, to, &self.board)
                .map(|side| Move::Castle {
                    king: from,
                    rook: side.rook_from(color),
                })
                .ok_or(PlayError::IllegalCastling),
            Role::Pawn if dcol.abs() == 1 && self.board.is_empty(to) => {
                if rules::is_en_passant(color, from, to, &self.board) {
                    Ok(Move::EnPassant { from, to })
                } else {
                    Err(PlayError::IllegalEnPassant)
                }
            }
            _ => {
                let m = pseudo_legal_move(&self.board, placed, to).ok_or(PlayError::IllegalMove)?;
                if is_king_attacked(&simulate(&self.board, m), color) {
                    Err(PlayError::LeavesKingInCheck)
                } else {
                    Ok(m)
                }
            }
        }
    }

    fn log_played(&self, color: Color, m: Move, uci: Uci) {
        match m {
            Move::Castle { .. } => {
                let side = if m.castling_side().is_some_and(CastlingSide::is_king_side) {
                    "king side"
                } else {
                    "queen side"
                };
                debug!("{color} castles {side}");
            }
            Move::EnPassant { to, .. } => debug!("{color} captures en passant on {to}"),
            Move::Normal {
                to,
                promotion: Some(role),
                ..
            } => {
                if uci.promotion.is_some_and(|requested| requested != role) {
                    debug!("{color} pawn on {to} promotes to {role:?} instead of requested piece");
                } else {
                    debug!("{color} pawn on {to} promotes to {role:?}");
                }
            }
            Move::Normal { .. } => (),
        }

        if log_enabled!(Level::Debug) {
            let opponent = !color;
            match self.status(opponent) {
                Status::Ongoing => (),
                Status::Check => debug!("{opponent} is in check"),
                Status::Checkmate => debug!("{opponent} is checkmated, {color} wins"),
                Status::Stalemate => debug!("{opponent} is stalemated, draw"),
            }
        }
    }

    fn pieces_of(&self, color: Color) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.board
            .pieces()
            .filter(move |placed| placed.color() == color)
    }

    fn legal_move(&self, placed: PlacedPiece, to: Square) -> Option<Move> {
        pseudo_legal_move(&self.board, placed, to)
            .filter(|&m| !is_king_attacked(&simulate(&self.board, m), placed.color()))
    }

    fn legal_moves_of(&self, placed: PlacedPiece) -> impl Iterator<Item = Move> + '_ {
        Square::all().filter_map(move |to| self.legal_move(placed, to))
    }
}

fn is_back_row(sq: Square) -> bool {
    sq.row() == Color::White.home_row() || sq.row() == Color::Black.home_row()
}

fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .is_in_check(color)
        .expect("validated position has exactly one king per color")
}

/// Describes the move of `placed` to `to`, if the piece could make it
/// according to its movement rules.
fn pseudo_legal_move(board: &Board, placed: PlacedPiece, to: Square) -> Option<Move> {
    let PlacedPiece {
        piece, square: from, ..
    } = placed;

    match piece.role {
        Role::King => {
            if let Some(side) = rules::castling_side(piece.color, from, to, board) {
                return Some(Move::Castle {
                    king: from,
                    rook: side.rook_from(piece.color),
                });
            }
        }
        Role::Pawn => {
            if rules::is_en_passant(piece.color, from, to, board) {
                return Some(Move::EnPassant { from, to });
            }
        }
        _ => (),
    }

    rules::is_pseudo_legal(piece, from, to, board).then(|| Move::Normal {
        role: piece.role,
        from,
        capture: board.piece_at(to).map(|captured| captured.role),
        to,
        promotion: (piece.role == Role::Pawn && to.row() == piece.color.promotion_row())
            .then_some(Role::Queen),
    })
}

/// The placement after `m` on a copy of `board`, for checking the safety of
/// the king. Moved flags, side to move and last move are left alone.
fn simulate(board: &Board, m: Move) -> Board {
    let mut after = *board;
    match m {
        Move::Normal { from, to, .. } => {
            after.relocate(from, to);
        }
        Move::EnPassant { from, to } => {
            after.relocate(from, to);
            after.remove_piece_at(Square::from_row_col(from.row(), to.col()));
        }
        Move::Castle { king, rook } => {
            let color = Color::from_white(king.row() == Color::White.home_row());
            let side = CastlingSide::from_king_side(king.col() < rook.col());
            after.relocate(king, side.king_to(color));
            after.relocate(rook, side.rook_to(color));
        }
    }
    after
}

/// Commits `m` for the side to move.
fn do_move(board: &mut Board, m: Move) {
    let color = board.turn();

    match m {
        Move::Normal {
            from,
            to,
            promotion,
            ..
        } => {
            board.relocate(from, to);
            board.set_moved(to);
            if let Some(role) = promotion {
                board.set_piece_at(to, role.of(color), true);
            }
        }
        Move::EnPassant { from, to } => {
            board.remove_piece_at(Square::from_row_col(from.row(), to.col()));
            board.relocate(from, to);
            board.set_moved(to);
        }
        Move::Castle { king, rook } => {
            let side = CastlingSide::from_king_side(king.col() < rook.col());
            board.relocate(king, side.king_to(color));
            board.relocate(rook, side.rook_to(color));
            board.set_moved(side.king_to(color));
            board.set_moved(side.rook_to(color));
        }
    }

    board.set_last_move(Some(LastMove {
        from: m.from(),
        to: m.to(),
        role: m.role(),
    }));
    board.toggle_turn();
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    fn uci(s: &str) -> Uci {
        s.parse().expect("valid uci")
    }

    #[test]
    fn test_initial_position() {
        let pos = Chess::default();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.castling_rights(), CastlingRights::all());
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.status(Color::White), Status::Ongoing);
        assert_eq!(pos.outcome(), None);
        assert_eq!(
            pos.legal_destinations(Square::G1),
            Bitboard::from(Square::F3).with(Square::H3)
        );
        assert_eq!(pos.legal_destinations(Square::E4), Bitboard::EMPTY);
    }

    #[test]
    fn test_outcome() {
        for (s, outcome) in [
            ("1-0", Outcome::from_winner(Some(Color::White))),
            ("0-1", Outcome::from_winner(Some(Color::Black))),
            ("1/2-1/2", Outcome::from_winner(None)),
        ] {
            assert_eq!(s.parse::<Outcome>(), Ok(outcome));
            assert_eq!(outcome.to_string(), s);
        }
        assert_eq!(
            Outcome::Decisive {
                winner: Color::Black
            }
            .winner(),
            Some(Color::Black)
        );
        assert_eq!(Outcome::Draw.winner(), None);
        assert_eq!("*".parse::<Outcome>(), Err(ParseOutcomeError));
        assert_eq!("1-1".parse::<Outcome>(), Err(ParseOutcomeError));
    }

    #[test]
    fn test_from_board_validation() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king(), false);
        assert_eq!(
            Chess::from_board(board),
            Err(PositionError::MissingKing(Color::Black))
        );

        board.set_piece_at(Square::E8, Color::Black.king(), false);
        assert!(Chess::from_board(board).is_ok());

        board.set_piece_at(Square::A1, Color::Black.pawn(), true);
        assert_eq!(Chess::from_board(board), Err(PositionError::PawnsOnBackrank));

        board.remove_piece_at(Square::A1);
        board.set_piece_at(Square::E4, Color::White.rook(), true);
        board.set_turn(Color::White);
        assert_eq!(Chess::from_board(board), Err(PositionError::OppositeCheck));

        board.set_turn(Color::Black);
        let pos = Chess::from_board(board).expect("black to move in check");
        assert_eq!(pos.status(Color::Black), Status::Check);
    }

    #[test]
    fn test_play_updates_counters() {
        let mut pos = Chess::default();
        pos.play(uci("g1f3")).expect("legal");
        assert_eq!(pos.halfmoves(), 1);
        assert_eq!(pos.fullmoves().get(), 1);
        pos.play(uci("e7e5")).expect("legal");
        assert_eq!(pos.halfmoves(), 0);
        assert_eq!(pos.fullmoves().get(), 2);
        assert_eq!(pos.ep_square(), Some(Square::E6));
        assert_eq!(pos.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn test_rejections() {
        let mut pos = Chess::default();
        assert_eq!(pos.play(uci("e4e5")), Err(PlayError::NoPiece));
        assert_eq!(pos.play(uci("e7e5")), Err(PlayError::WrongTurn));
        assert_eq!(pos.play(uci("e2e5")), Err(PlayError::IllegalMove));
        assert_eq!(pos.play(uci("e1g1")), Err(PlayError::IllegalCastling));
        assert_eq!(pos.play(uci("e2d3")), Err(PlayError::IllegalEnPassant));
        assert_eq!(pos, Chess::default());
    }

    #[test]
    fn test_pinned_piece() {
        let board = {
            let mut board = Board::empty();
            board.set_piece_at(Square::E1, Color::White.king(), true);
            board.set_piece_at(Square::E2, Color::White.knight(), true);
            board.set_piece_at(Square::E8, Color::Black.rook(), true);
            board.set_piece_at(Square::A8, Color::Black.king(), true);
            board
        };
        let mut pos = Chess::from_board(board).expect("valid");
        assert!(pos.is_pseudo_legal(Square::E2, Square::C3));
        assert!(!pos.is_legal(Square::E2, Square::C3, Color::White));
        assert_eq!(pos.play(uci("e2c3")), Err(PlayError::LeavesKingInCheck));
        assert!(pos.is_legal(Square::E1, Square::D1, Color::White));
    }
}
