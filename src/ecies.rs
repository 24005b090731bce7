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

use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::x25519::{KEY_LENGTH, KeyPair, PrivateKey, PublicKey};

// Expands a shared secret into `n` keystream bytes. The 32-byte window
// starts as the secret; at the start of every period after the first it is
// rotated one byte left, then the low byte of the period index is XORed
// into position 0. Byte-compatible with existing ciphertexts; this is a
// deterministic expansion, not a vetted stream cipher.
pub(crate) fn expand_keystream(secret: &[u8; 32], n: usize) -> Vec<u8> {
    let mut window = *secret;
    let mut output = Vec::with_capacity(n);
    for i in 0..n {
        if i > 0 && i % 32 == 0 {
            window.rotate_left(1);
            window[0] ^= (i / 32) as u8;
        }
        output.push(window[i % 32]);
    }
    window.zeroize();
    output
}

/// Encrypts `plaintext` to the holder of `recipient`'s private key.
///
/// Output layout: 32-byte ephemeral public key, then the XOR-masked
/// payload; always exactly `plaintext.len() + 32` bytes. Fails only when
/// the OS entropy source cannot supply the ephemeral key.
pub fn encrypt(recipient: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let ephemeral = KeyPair::generate()?;
    let shared = ephemeral.private_key().shared_secret(recipient);

    let mut output = Vec::with_capacity(KEY_LENGTH + plaintext.len());
    output.extend_from_slice(ephemeral.public_key().as_bytes());
    output.extend_from_slice(plaintext);

    let mut keystream = expand_keystream(shared.as_bytes(), plaintext.len());
    for (c, k) in output[KEY_LENGTH..].iter_mut().zip(keystream.iter()) {
        *c ^= k;
    }
    keystream.zeroize();
    Ok(output)
}

/// Recovers the plaintext from a blob produced by [`encrypt`].
///
/// Fails with [`Error::MalformedInput`] when the blob is shorter than the
/// 32-byte ephemeral-key prefix (exactly 32 bytes is a valid empty
/// plaintext). There is no integrity check: a modified blob decrypts
/// without error to different bytes.
pub fn decrypt(private_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < KEY_LENGTH {
        return Err(Error::MalformedInput);
    }
    let ephemeral: PublicKey = ciphertext[..KEY_LENGTH].try_into()?;
    let shared = private_key.shared_secret(&ephemeral);

    let mut output = ciphertext[KEY_LENGTH..].to_vec();
    let mut keystream = expand_keystream(shared.as_bytes(), output.len());
    for (p, k) in output.iter_mut().zip(keystream.iter()) {
        *p ^= k;
    }
    keystream.zeroize();
    Ok(output)
}
