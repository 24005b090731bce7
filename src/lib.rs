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

//! Hybrid ("ECIES-style") encryption on Curve25519.
//!
//! [`encrypt`] generates a fresh ephemeral X25519 key pair, derives a shared
//! secret with the recipient's public key, and XORs the plaintext with a
//! keystream expanded from that secret. The ciphertext is the 32-byte
//! ephemeral public key followed by the masked payload; there is no magic
//! number, no length prefix and no padding, so the ciphertext is always
//! exactly 32 bytes longer than the plaintext.
//!
//! # Security caveats
//!
//! This scheme provides confidentiality only. There is no authentication
//! tag: any tampering with a ciphertext silently decrypts to garbage
//! instead of producing an error. Callers that need integrity must layer a
//! MAC or an AEAD on top.
//!
//! The keystream expansion is the legacy rotate-and-XOR construction of the
//! original tool, kept byte-for-byte for compatibility with existing
//! ciphertexts. It is not a vetted stream cipher.

mod curve25519;
mod ecies;
mod x25519;
pub mod errors;

pub use ecies::{decrypt, encrypt};
pub use x25519::{KEY_LENGTH, KeyPair, PrivateKey, PublicKey, SharedSecret};
