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

/// Every error aborts the operation in progress and leaves no partial
/// output; nothing is retried internally.
///
/// A tampered ciphertext is not detectable: the scheme carries no
/// authentication tag, so decryption of modified input succeeds and
/// returns garbage.
#[derive(Debug)]
pub enum Error {
    /// Key material was not exactly 32 bytes.
    InvalidKeyLength,
    /// Ciphertext shorter than the 32-byte ephemeral-key prefix.
    MalformedInput,
    /// The OS random source could not supply bytes.
    EntropyUnavailable,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeyLength => write!(f, "Key: material must be exactly 32 bytes."),
            Self::MalformedInput => write!(
                f,
                "Ciphertext: shorter than the 32-byte ephemeral-key prefix."
            ),
            Self::EntropyUnavailable => write!(f, "Entropy: OS random source unavailable."),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
