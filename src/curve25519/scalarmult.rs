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

use crate::curve25519::field::Fe;

// u-coordinate of the generator
pub(crate) const BASE_POINT: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0
];

// Forces the scalar into 8 * [2^251, 2^252). Idempotent.
pub(crate) fn clamp(scalar: &mut [u8; 32]) {
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
}

// XZ-only ladder state: (x2:z2) accumulates [n]P, (x3:z3) trails at
// [n+1]P, x1 is the fixed affine input point. The pending-swap flag and
// the step counter make the fixed 255-step schedule checkable.
struct Ladder {
    x2: Fe,
    z2: Fe,
    x3: Fe,
    z3: Fe,
    x1: Fe,
    swap: i64,
    steps: u32,
}

impl Ladder {
    fn new(u: &Fe) -> Self {
        Ladder {
            x2: Fe::ONE,
            z2: Fe::ZERO,
            x3: *u,
            z3: Fe::ONE,
            x1: *u,
            swap: 0,
            steps: 0,
        }
    }

    // one differential addition-and-doubling, preceded by the branchless
    // swap; bit must be 0 or 1
    fn step(&mut self, bit: i64) {
        self.swap ^= bit;
        self.x2.cswap(&mut self.x3, self.swap);
        self.z2.cswap(&mut self.z3, self.swap);
        self.swap = bit;

        let a = &self.x2 + &self.z2;
        let b = &self.x2 - &self.z2;
        let aa = a.sqr();
        let bb = b.sqr();
        let mut da = &self.x3 - &self.z3;
        da *= &a;
        let mut cb = &self.x3 + &self.z3;
        cb *= &b;

        self.x3 = &da + &cb;
        self.x3 = self.x3.sqr();
        self.z3 = &da - &cb;
        self.z3 = self.z3.sqr();
        self.z3 *= &self.x1;

        self.x2 = &aa * &bb;
        let e = &aa - &bb;
        self.z2 = &e * 121665;
        self.z2 += &aa;
        self.z2 *= &e;

        self.steps += 1;
    }

    fn finish(mut self) -> [u8; 32] {
        // undo the swap left pending by the last iteration
        self.x2.cswap(&mut self.x3, self.swap);
        self.z2.cswap(&mut self.z3, self.swap);

        // invert(0) = 0, so a point at infinity packs to all-zero bytes
        // instead of failing
        let zinv = self.z2.invert();
        self.x2 *= &zinv;
        self.x2.bytes()
    }
}

// X25519: multiplies the point with u-coordinate `u` by the clamped
// scalar `n`. The caller's scalar buffer is never modified; the working
// copy is wiped before returning.
//
// The top bit of a clamped scalar is always set, and the loop still runs
// all 255 positions for every input: no early exit, no data-dependent
// branch. Small-order and non-canonical u-coordinates are not rejected;
// they produce a defined (possibly all-zero) output.
pub(crate) fn scalarmult(n: &[u8; 32], u: &[u8; 32]) -> [u8; 32] {
    let mut t = *n;
    clamp(&mut t);

    let mut ladder = Ladder::new(&Fe::from_bytes(u));
    for pos in (0..255).rev() {
        let bit = ((t[pos / 8] >> (pos & 7)) & 1) as i64;
        ladder.step(bit);
    }
    t.zeroize();
    ladder.finish()
}

pub(crate) fn scalarmult_base(n: &[u8; 32]) -> [u8; 32] {
    scalarmult(n, &BASE_POINT)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rand::RngCore;

    use super::{
        BASE_POINT,
        Ladder,
        clamp,
        scalarmult,
        scalarmult_base
    };
    use crate::curve25519::field::Fe;

    #[test]
    fn test_scalarmult_rfc7748() {
        // source: https://datatracker.ietf.org/doc/html/rfc7748#section-5.2
        let k = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let base = hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        let x_expected = hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");
        let x = scalarmult(&k, &base);
        assert_eq!(x, x_expected);

        let k = hex!("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d");
        let base = hex!("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493");
        let x_expected = hex!("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957");
        let x = scalarmult(&k, &base);
        assert_eq!(x, x_expected);
    }

    #[test]
    fn test_scalarmult_iterated_once() {
        // first step of the RFC 7748 section 5.2 iteration test
        let n = hex!("0900000000000000000000000000000000000000000000000000000000000000");
        let expect_1 = hex!("422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079");
        assert_eq!(scalarmult(&n, &BASE_POINT), expect_1);
    }

    #[ignore]
    #[test]
    fn test_scalarmult_iterated_1000() {
        // this test is long, so it is ignored by default
        let mut n = hex!("0900000000000000000000000000000000000000000000000000000000000000");
        let mut base = hex!("0900000000000000000000000000000000000000000000000000000000000000");
        let expect_1_000 = hex!("684cf59ba83309552800ef566f2f4d3c1c3887c49360e3875f2eb94d99532c51");

        let mut res = scalarmult(&n, &base);
        for _ in 0..999 {
            base = n;
            n = res;
            res = scalarmult(&n, &base);
        }
        assert_eq!(res, expect_1_000);
    }

    #[test]
    fn test_scalarmult_base() {
        let k = hex!("8aed5ff130066e6945dfd0ab7c47d7ca846f9fec894cad7cc2347de566d3a002");
        let expected_x = hex!("5c4b1e25ae7d8e17cf6b8ea78125742f42682eef5a1b4992d872931b7bdb4273");
        let x = scalarmult_base(&k);
        assert_eq!(x, expected_x);
    }

    #[test]
    fn test_clamp_idempotent() {
        let mut buf = [0u8; 32];
        for _ in 0..32 {
            rand::rng().fill_bytes(&mut buf);
            let mut once = buf;
            clamp(&mut once);
            assert_eq!(once[0] & 7, 0);
            assert_eq!(once[31] & 128, 0);
            assert_eq!(once[31] & 64, 64);

            let mut twice = once;
            clamp(&mut twice);
            assert_eq!(once, twice);
        }
    }

    fn run_ladder(scalar: &[u8; 32], u: &[u8; 32]) -> ([u8; 32], u32) {
        let mut t = *scalar;
        clamp(&mut t);
        let mut ladder = Ladder::new(&Fe::from_bytes(u));
        for pos in (0..255).rev() {
            let bit = ((t[pos / 8] >> (pos & 7)) & 1) as i64;
            ladder.step(bit);
        }
        let steps = ladder.steps;
        (ladder.finish(), steps)
    }

    #[test]
    fn test_ladder_step_count() {
        // exactly 255 swap/add-double steps for every scalar value
        let base = hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        for scalar in [[0u8; 32], [0xffu8; 32]] {
            let (out, steps) = run_ladder(&scalar, &base);
            assert_eq!(steps, 255);
            assert_eq!(out, scalarmult(&scalar, &base));
        }
    }

    #[test]
    fn test_small_order_input() {
        // u = 0 is a small-order point: defined all-zero output, no error
        let mut k = [0u8; 32];
        rand::rng().fill_bytes(&mut k);
        assert_eq!(scalarmult(&k, &[0u8; 32]), [0u8; 32]);
    }
}
