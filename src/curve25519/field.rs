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

use std::ops::{
    Add, AddAssign,
    Index, IndexMut,
    Mul, MulAssign,
    Sub, SubAssign,
};

// An element of GF(2^255 - 19) as 16 signed limbs in radix 2^16.
// Limbs may drift out of [0, 2^16) between operations; `carry` brings them
// back, and `bytes` produces the canonical encoding in [0, p).
#[derive(Clone, Copy)]
pub(crate) struct Fe {
    pub(crate) buf: [i64; 16],
}

impl Fe {
    pub(crate) const ZERO: Fe = Fe { buf: [0; 16] };
    pub(crate) const ONE: Fe = Fe {
        buf: [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    };
}

impl Index<usize> for Fe {
    type Output = i64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.buf[index]
    }
}

impl IndexMut<usize> for Fe {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.buf[index]
    }
}

impl AddAssign<&Fe> for Fe {
    fn add_assign(&mut self, rhs: &Fe) {
        for (l, r) in self.buf.iter_mut().zip(rhs.buf.iter()) {
            *l += r;
        }
    }
}

impl Add<&Fe> for &Fe {
    type Output = Fe;
    fn add(self, rhs: &Fe) -> Self::Output {
        let mut out = *self;
        out += rhs;
        out
    }
}

impl SubAssign<&Fe> for Fe {
    fn sub_assign(&mut self, rhs: &Fe) {
        // limbs are signed, so no bias is needed to avoid borrows
        for (l, r) in self.buf.iter_mut().zip(rhs.buf.iter()) {
            *l -= r;
        }
    }
}

impl Sub<&Fe> for &Fe {
    type Output = Fe;
    fn sub(self, rhs: &Fe) -> Self::Output {
        let mut out = *self;
        out -= rhs;
        out
    }
}

impl MulAssign<&Fe> for Fe {
    fn mul_assign(&mut self, rhs: &Fe) {
        let mut t = [0i64; 31];
        for i in 0..16 {
            for j in 0..16 {
                t[i + j] += self[i] * rhs[j];
            }
        }

        // 2^256 = 38 mod p, so coefficient 16+k folds into k with factor 38
        for i in 0..15 {
            t[i] += 38 * t[i + 16];
        }
        self.buf.copy_from_slice(&t[..16]);
        self.carry();
        self.carry();
    }
}

impl Mul<&Fe> for &Fe {
    type Output = Fe;
    fn mul(self, rhs: &Fe) -> Self::Output {
        let mut out = *self;
        out *= rhs;
        out
    }
}

impl Mul<u32> for &Fe {
    type Output = Fe;
    fn mul(self, rhs: u32) -> Self::Output {
        let mut out = *self;
        for limb in out.buf.iter_mut() {
            *limb *= rhs as i64;
        }
        out.carry();
        out
    }
}

impl Fe {
    // one carry pass; the carry out of limb 15 wraps into limb 0 with
    // factor 38 (2 * 19). The 2^16 offset keeps the shift rounding toward
    // minus infinity correct for negative limbs.
    fn carry(&mut self) {
        for i in 0..16 {
            self[i] += 1 << 16;
            let c = self[i] >> 16;
            if i < 15 {
                self[i + 1] += c - 1;
            } else {
                self[0] += 38 * (c - 1);
            }
            self[i] -= c << 16;
        }
    }

    pub(crate) fn cmov(&mut self, other: &Fe, cond: i64) {
        let mask = -cond;
        for (l, r) in self.buf.iter_mut().zip(other.buf.iter()) {
            *l ^= mask & (*l ^ r);
        }
    }

    // branchless swap, the timing-safety primitive of the ladder:
    // cond must be 0 or 1, never a data-dependent branch
    pub(crate) fn cswap(&mut self, other: &mut Fe, cond: i64) {
        let mask = -cond;
        for (l, r) in self.buf.iter_mut().zip(other.buf.iter_mut()) {
            let t = mask & (*l ^ *r);
            *l ^= t;
            *r ^= t;
        }
    }

    pub(crate) fn sqr(&self) -> Fe {
        // same accumulation as `self * self` with the cross terms computed
        // once and doubled; the coefficient sums are identical, so the
        // result is bit-identical to the general multiplication
        let mut t = [0i64; 31];
        for i in 0..16 {
            t[2 * i] += self[i] * self[i];
            for j in (i + 1)..16 {
                t[i + j] += 2 * self[i] * self[j];
            }
        }

        for i in 0..15 {
            t[i] += 38 * t[i + 16];
        }
        let mut out = Fe::ZERO;
        out.buf.copy_from_slice(&t[..16]);
        out.carry();
        out.carry();
        out
    }

    pub(crate) fn from_bytes(input: &[u8; 32]) -> Fe {
        let mut out = Fe::ZERO;
        for i in 0..16 {
            out[i] = input[2 * i] as i64 | ((input[2 * i + 1] as i64) << 8);
        }
        // bit 255 is unused since p < 2^255
        out[15] &= 0x7fff;
        out
    }

    pub(crate) fn bytes(&self) -> [u8; 32] {
        let mut t = *self;
        t.carry();
        t.carry();
        t.carry();

        // t is now fully carried; subtract p twice with borrow propagation
        // and keep the difference whenever it does not underflow, so the
        // final value is canonical in [0, p)
        let mut m = Fe::ZERO;
        for _ in 0..2 {
            m[0] = t[0] - 0xffed;
            for i in 1..15 {
                m[i] = t[i] - 0xffff - ((m[i - 1] >> 16) & 1);
                m[i - 1] &= 0xffff;
            }
            m[15] = t[15] - 0x7fff - ((m[14] >> 16) & 1);
            let borrow = (m[15] >> 16) & 1;
            m[14] &= 0xffff;
            t.cmov(&m, 1 - borrow);
        }

        let mut output = [0u8; 32];
        for i in 0..16 {
            output[2 * i] = (t[i] & 0xff) as u8;
            output[2 * i + 1] = (t[i] >> 8) as u8;
        }
        output
    }

    // returns z^(p-2) = 1/z by Fermat; the chain squares on every step and
    // multiplies except at exponent bits 2 and 4, so the sequence of field
    // operations never depends on the value. invert(0) returns 0.
    pub(crate) fn invert(&self) -> Fe {
        let mut c = *self;
        for i in (0..=253).rev() {
            c = c.sqr();
            if i != 2 && i != 4 {
                c *= self;
            }
        }
        c
    }
}
