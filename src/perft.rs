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

use log::debug;

use crate::{position::Chess, uci::Uci};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless the terminal
/// position is at the maximum depth. This is a standard way to test move
/// generation against known node counts.
///
/// # Examples
///
/// ```
/// use gambit::{perft, Chess};
///
/// let pos = Chess::default();
/// assert_eq!(perft(&pos, 1), 20);
/// assert_eq!(perft(&pos, 2), 400);
/// ```
pub fn perft(pos: &Chess, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.legal_moves(pos.turn());

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|&m| {
                    let mut child = pos.clone();
                    child.play_unchecked(m);
                    perft(&child, depth - 1)
                })
                .sum()
        }
    }
}

/// Like [`perft()`], but logs the node count below each legal move of the
/// root position.
pub fn debug_perft(pos: &Chess, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        pos.legal_moves(pos.turn())
            .iter()
            .map(|&m| {
                let mut child = pos.clone();
                child.play_unchecked(m);
                let nodes = perft(&child, depth - 1);
                debug!("{} {} {}: {}", Uci::from(m), m, depth - 1, nodes);
                nodes
            })
            .sum()
    }
}
