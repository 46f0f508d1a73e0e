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

//! A chess rules engine: piece movement, castling, en passant, promotion,
//! check, checkmate and stalemate on an 8x8 board.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use gambit::{Chess, Color};
//!
//! let pos = Chess::default();
//! let legals = pos.legal_moves(Color::White);
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! # use gambit::Chess;
//! use gambit::Square;
//!
//! let mut pos = Chess::default();
//!
//! // 1. e4
//! assert!(pos.apply_move(Square::E2, Square::E4));
//!
//! // Not Black's pawn.
//! assert!(!pos.apply_move(Square::D2, Square::D4));
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use gambit::Chess;
//! use gambit::{Color, Status};
//!
//! let pos = Chess::default();
//! assert!(!pos.is_checkmate(Color::White));
//! assert!(!pos.is_stalemate(Color::White));
//! assert_eq!(pos.status(Color::White), Status::Ongoing);
//! assert_eq!(pos.outcome(), None); // no winner yet
//! ```
//!
//! Also supports [FEN](fen) and [UCI](uci) formats for positions and moves,
//! and a [compact binary format](packed) for positions.
//!
//! # Board orientation
//!
//! Squares are indexed by row and column. Row 0 is the eighth rank, where
//! Black starts, and row 7 is the first rank. White pawns move towards
//! row 0.
//!
//! # Logging
//!
//! Special moves, check, checkmate and stalemate are reported on the
//! `debug` level of the [`log`](https://docs.rs/log/0.4) facade. Rejected
//! moves are reported on the `trace` level.
//!
//! # Feature flags
//!
//! * `alloc`: Enables APIs which require the
//!   [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate
//!   (e.g. FEN string rendering).
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for move requests and their parts, for fuzzing.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![no_std]
#![doc(html_root_url = "https://docs.rs/gambit/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod castling_side;
mod color;
mod m;
mod perft;
mod position;
mod role;
mod square;
mod types;
mod util;

pub mod bitboard;
pub mod board;
pub mod fen;
pub mod packed;
pub mod rules;
pub mod uci;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling_side::{CastlingRights, CastlingSide};
pub use color::{Color, ParseColorError};
pub use m::{Move, MoveList};
pub use perft::{debug_perft, perft};
pub use position::{
    Chess, Outcome, ParseOutcomeError, ParseStatusError, PlayError, PositionError, Status,
};
pub use role::Role;
pub use square::{ParseSquareError, Square};
pub use types::{LastMove, Piece, PlacedPiece};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
