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

//! Move requests in coordinate notation, like `e2e4` or `e7e8q`.
//!
//! # Examples
//!
//! Parse and play a move request:
//!
//! ```
//! use gambit::{uci::Uci, Chess, Move, Role, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//!
//! let mut pos = Chess::default();
//! let m = pos.play(uci)?;
//! assert_eq!(m, Move::Normal {
//!     role: Role::Knight,
//!     from: Square::G1,
//!     capture: None,
//!     to: Square::F3,
//!     promotion: None,
//! });
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Castling is written as the two column move of the king:
//!
//! ```
//! use gambit::{uci::Uci, Move, Square};
//!
//! let m = Move::Castle { king: Square::E1, rook: Square::H1 };
//! assert_eq!(Uci::from(m).to_string(), "e1g1");
//! ```

use core::{error::Error, fmt, str::FromStr};

use crate::{m::Move, role::Role, square::Square};

/// Error when parsing an invalid move request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// A move request: origin, destination and optionally the piece a pawn
/// should promote to.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}

impl From<Move> for Uci {
    fn from(m: Move) -> Uci {
        Uci {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }
}

impl Uci {
    /// Parses a move request like `e2e4` or `e7e8q`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if `uci` is not syntactically valid.
    /// Promotions to a pawn or a king are rejected as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use gambit::{uci::Uci, Role, Square};
    ///
    /// let uci = Uci::from_ascii(b"b7b8q")?;
    /// assert_eq!(uci, Uci {
    ///     from: Square::B7,
    ///     to: Square::B8,
    ///     promotion: Some(Role::Queen),
    /// });
    ///
    /// assert!(Uci::from_ascii(b"e2").is_err());
    /// assert!(Uci::from_ascii(b"e7e8k").is_err());
    /// # Ok::<_, gambit::uci::ParseUciError>(())
    /// ```
    pub fn from_ascii(uci: &[u8]) -> Result<Uci, ParseUciError> {
        if uci.len() != 4 && uci.len() != 5 {
            return Err(ParseUciError);
        }

        let from = Square::from_ascii(&uci[0..2]).map_err(|_| ParseUciError)?;
        let to = Square::from_ascii(&uci[2..4]).map_err(|_| ParseUciError)?;

        let promotion = match uci.get(4) {
            Some(&ch) => match Role::from_char(char::from(ch)) {
                Some(Role::Pawn | Role::King) | None => return Err(ParseUciError),
                Some(role) if ch.is_ascii_lowercase() => Some(role),
                Some(_) => return Err(ParseUciError),
            },
            None => None,
        };

        Ok(Uci {
            from,
            to,
            promotion,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uci {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uci {
    fn deserialize<D>(deserializer: D) -> Result<Uci, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UciVisitor;

        impl serde::de::Visitor<'_> for UciVisitor {
            type Value = Uci;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("uci move")
            }

            fn visit_str<E>(self, value: &str) -> Result<Uci, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(UciVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn test_parse_uci() {
        assert_eq!(
            "e2e4".parse::<Uci>(),
            Ok(Uci {
                from: Square::E2,
                to: Square::E4,
                promotion: None,
            })
        );
        assert_eq!(
            "a2a1n".parse::<Uci>().map(|uci| uci.promotion),
            Ok(Some(Role::Knight))
        );
        assert!("e2e4 ".parse::<Uci>().is_err());
        assert!("e2e9".parse::<Uci>().is_err());
        assert!("e7e8Q".parse::<Uci>().is_err());
        assert!("e7e8p".parse::<Uci>().is_err());
        assert!("".parse::<Uci>().is_err());
    }

    #[test]
    fn test_uci_display() {
        for uci in ["e2e4", "h7h8q", "a2a1r"] {
            assert_eq!(uci.parse::<Uci>().expect("valid").to_string(), uci);
        }
    }

    #[test]
    fn test_from_move() {
        let m = Move::Castle {
            king: Square::E8,
            rook: Square::A8,
        };
        assert_eq!(Uci::from(m).to_string(), "e8c8");

        let m = Move::EnPassant {
            from: Square::E5,
            to: Square::D6,
        };
        assert_eq!(Uci::from(m).to_string(), "e5d6");
    }
}
