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

use core::{array::TryFromSliceError, convert::TryFrom as _, num::TryFromIntError};

pub(crate) fn overflow_error() -> TryFromIntError {
    // TryFromIntError has a private constructor, so provoke one.
    u32::try_from(u64::MAX).unwrap_err()
}

pub(crate) fn try_from_slice_error() -> TryFromSliceError {
    // Same for TryFromSliceError.
    <[u8; 0]>::try_from(&[0u8][..]).unwrap_err()
}
