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

use rand::TryRngCore;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve25519::scalarmult::{
    clamp,
    scalarmult,
    scalarmult_base
};
use crate::errors::{Error, Result};

pub const KEY_LENGTH: usize = 32;

/// An X25519 public key: the little-endian u-coordinate of a curve point.
#[derive(Clone, PartialEq)]
pub struct PublicKey([u8; KEY_LENGTH]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl From<[u8; KEY_LENGTH]> for PublicKey {
    fn from(value: [u8; KEY_LENGTH]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self> {
        let buf: [u8; KEY_LENGTH] = value.try_into().map_err(|_| Error::InvalidKeyLength)?;
        Ok(Self(buf))
    }
}

/// An X25519 private scalar, wiped on drop.
///
/// [`PrivateKey::generate`] stores the scalar clamped; keys loaded from
/// bytes are taken as-is, since the ladder clamps a copy at every use and
/// clamping is idempotent. Both at-rest conventions interoperate.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; KEY_LENGTH]);

impl PrivateKey {
    /// Draws 32 bytes from the OS entropy source and clamps them.
    ///
    /// There is no PRNG fallback: failure of the OS source is reported as
    /// [`Error::EntropyUnavailable`].
    pub fn generate() -> Result<Self> {
        let mut buf = [0u8; KEY_LENGTH];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|_| Error::EntropyUnavailable)?;
        clamp(&mut buf);
        Ok(Self(buf))
    }

    /// Public key [n]B for the base point B = 9. Never mutates the scalar.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(scalarmult_base(&self.0))
    }

    /// ECDH: the peer's public key is used as-is, without point
    /// validation; rejecting small-order inputs is the caller's concern.
    pub fn shared_secret(&self, peer: &PublicKey) -> SharedSecret {
        SharedSecret(scalarmult(&self.0, &peer.0))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl From<[u8; KEY_LENGTH]> for PrivateKey {
    fn from(value: [u8; KEY_LENGTH]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self> {
        let buf: [u8; KEY_LENGTH] = value.try_into().map_err(|_| Error::InvalidKeyLength)?;
        Ok(Self(buf))
    }
}

pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn generate() -> Result<Self> {
        let private = PrivateKey::generate()?;
        let public = private.public_key();
        Ok(Self { private, public })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

/// A 32-byte ECDH output, wiped on drop. Only ever used to seed the
/// keystream; never serialized by this crate.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; KEY_LENGTH]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use super::{KEY_LENGTH, KeyPair, PrivateKey, PublicKey};

    #[test]
    fn test_ecdh_agreement() {
        let alice = KeyPair::generate().unwrap();
        let bob = KeyPair::generate().unwrap();

        let s1 = alice.private_key().shared_secret(bob.public_key());
        let s2 = bob.private_key().shared_secret(alice.public_key());
        assert!(s1 == s2);
    }

    #[test]
    fn test_public_key_vector() {
        let k = hex!("8aed5ff130066e6945dfd0ab7c47d7ca846f9fec894cad7cc2347de566d3a002");
        let expected = hex!("5c4b1e25ae7d8e17cf6b8ea78125742f42682eef5a1b4992d872931b7bdb4273");
        let private = PrivateKey::from(k);
        assert_eq!(private.public_key().as_bytes(), &expected);
    }

    #[test]
    fn test_generate_is_clamped() {
        let private = PrivateKey::generate().unwrap();
        let buf = private.as_bytes();
        assert_eq!(buf[0] & 7, 0);
        assert_eq!(buf[31] & 128, 0);
        assert_eq!(buf[31] & 64, 64);
    }

    #[test]
    fn test_derive_does_not_mutate() {
        // deliberately unclamped scalar
        let raw = [0xffu8; KEY_LENGTH];
        let private = PrivateKey::from(raw);
        let _ = private.public_key();
        assert_eq!(private.as_bytes(), &raw);
    }

    #[test]
    fn test_key_length_validation() {
        assert!(PublicKey::try_from([0u8; 31].as_slice()).is_err());
        assert!(PublicKey::try_from([0u8; 33].as_slice()).is_err());
        assert!(PrivateKey::try_from([0u8; 31].as_slice()).is_err());
        assert!(PrivateKey::try_from([0u8; KEY_LENGTH].as_slice()).is_ok());
    }
}
