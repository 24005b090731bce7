// CurveBox, hybrid file encryption on Curve25519
// Copyright (C) 2025 CurveBox authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// the field arithmetic uses the signed radix-2^16 representation of
// TweetNaCl (https://tweetnacl.cr.yp.to); the ladder follows RFC 7748

mod field;
pub(crate) mod scalarmult;
