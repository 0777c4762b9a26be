// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

use crate::numeric::radius::{MANT_MAX, MANT_MIN, Radius, Repr};
use crate::numeric::rounding::Rounding;

/// Iterations of the averaging step in [`isqrt`]. Five is the smallest count
/// that, together with the final correction, is exact on the whole domain.
const ISQRT_ITERATIONS: usize = 5;

/// Bound on the mantissae `add_rnd` accepts, so that the sum cannot reach
/// the sign bit.
const ADD_MANT_LIMIT: i64 = 1 << 62;

impl Radius {
    /// Product of two radii, rounded in direction `rnd`.
    pub fn mul_rnd(self, other: Radius, rnd: Rounding) -> Radius {
        match (self.0, other.0) {
            (Repr::Infinite, _) | (_, Repr::Infinite) => Radius::infinite(),
            (Repr::Zero, _) | (_, Repr::Zero) => Radius::zero(),
            (Repr::Finite { mant: a, exp: e }, Repr::Finite { mant: b, exp: f }) => {
                debug_assert!(a < MANT_MAX && b < MANT_MAX);
                // 31 bits times 31 bits fits in 62
                Radius::normalize_parts(a * b, i128::from(e) + i128::from(f), rnd)
            }
        }
    }

    #[inline]
    pub fn sqr_rnd(self, rnd: Rounding) -> Radius {
        self.mul_rnd(self, rnd)
    }

    /// Upper bound on the square.
    #[inline]
    pub fn sqr(self) -> Radius {
        self.sqr_rnd(Rounding::Up)
    }

    /// Sum of two radii, rounded in direction `rnd`.
    ///
    /// The operands need not be normalised, but both mantissae must be below
    /// 2^62, which is the case for products of two normalised mantissae.
    pub fn add_rnd(self, other: Radius, rnd: Rounding) -> Radius {
        match (self.0, other.0) {
            (Repr::Infinite, _) | (_, Repr::Infinite) => Radius::infinite(),
            (Repr::Zero, _) => other,
            (_, Repr::Zero) => self,
            (Repr::Finite { mant: a, exp: e }, Repr::Finite { mant: b, exp: f }) => {
                debug_assert!(
                    (1..ADD_MANT_LIMIT).contains(&a) && (1..ADD_MANT_LIMIT).contains(&b),
                    "add_rnd mantissae out of range: {a}, {b}"
                );
                let (hi, lo, exp) = if e >= f { (a, b, e) } else { (b, a, f) };
                let d = e.abs_diff(f);
                // a shift of 64 or more leaves nothing of the smaller operand
                let sum = if d >= 64 { hi } else { hi + (lo >> d) };
                let lost = u64::from(lo.trailing_zeros()) < d;
                let sum = if lost && rnd.is_up() { sum + 1 } else { sum };
                Radius::finite(sum, exp).normalize(rnd)
            }
        }
    }

    /// Upper bound on `self / other`.
    ///
    /// Only the upward direction exists. Dividing by zero, or zero by zero,
    /// gives infinity.
    pub fn div_up(self, other: Radius) -> Radius {
        match (self.0, other.0) {
            (Repr::Infinite, _) | (_, Repr::Infinite) => Radius::infinite(),
            (Repr::Zero, Repr::Zero) => Radius::infinite(),
            (Repr::Zero, _) => Radius::zero(),
            (_, Repr::Zero) => Radius::infinite(),
            (Repr::Finite { mant: a, exp: e }, Repr::Finite { mant: b, exp: f }) => {
                let num = a << 32;
                let q = num / b;
                let q = if num % b != 0 { q + 1 } else { q };
                Radius::normalize_parts(q, i128::from(e) - 32 - i128::from(f), Rounding::Up)
            }
        }
    }

    /// `self / 2^e`, rounded in direction `rnd`.
    ///
    /// Exact unless the quotient falls below the exponent range: then
    /// `Rounding::Up` gives the smallest positive radius and
    /// `Rounding::Down` gives zero.
    #[inline]
    pub fn div_2exp_rnd(self, e: u64, rnd: Rounding) -> Radius {
        match self.0 {
            Repr::Finite { mant, exp } => {
                Radius::normalize_parts(mant, i128::from(exp) - i128::from(e), rnd)
            }
            _ => self,
        }
    }

    /// Upper bound on `self / 2^e`.
    #[inline]
    pub fn div_2exp(self, e: u64) -> Radius {
        self.div_2exp_rnd(e, Rounding::Up)
    }

    /// Square root, rounded in direction `rnd`.
    pub fn sqrt_rnd(self, rnd: Rounding) -> Radius {
        let Repr::Finite { mant, exp } = self.0 else {
            return self;
        };
        debug_assert!((MANT_MIN..MANT_MAX).contains(&mant));

        // an odd exponent moves one factor 2 into the mantissa
        let (n, exp) = if exp.rem_euclid(2) == 0 {
            (mant, exp / 2 - 15)
        } else {
            (2 * mant, (exp - 1) / 2 - 15)
        };
        let root = isqrt(n);
        let exact = root * root == n << 30;
        let root = if exact || rnd.is_up() { root } else { root - 1 };
        // isqrt reaches 2^31 only for n = 2^32 - 2, where the shift back is exact
        Radius::finite(root, exp).normalize(rnd)
    }

    /// Upper bound on the square root.
    #[inline]
    pub fn sqrt(self) -> Radius {
        self.sqrt_rnd(Rounding::Up)
    }
}

/// Returns `ceil(sqrt(n * 2^30))` for `2^30 <= n < 2^32`.
///
/// Averaging `s` and `N / s`, rounded up, never undershoots the geometric
/// mean, so the iteration descends from above onto the ceiling of the
/// root, or one past it when `N` is a perfect square; the last comparison
/// removes that excess.
pub fn isqrt(n: i64) -> i64 {
    debug_assert!(
        (MANT_MIN..MANT_MAX << 1).contains(&n),
        "isqrt argument {n} outside [2^30, 2^32)"
    );
    let big_n = (n as u64) << 30;
    let mut s: u64 = 1 << 31;
    for _ in 0..ISQRT_ITERATIONS {
        let t = s << 1;
        s = (s * s + big_n + t - 1) / t;
    }
    if (s - 1) * (s - 1) >= big_n {
        (s - 1) as i64
    } else {
        s as i64
    }
}

impl Add for Radius {
    type Output = Radius;

    /// Upper bound on the sum.
    fn add(self, rhs: Radius) -> Radius {
        self.add_rnd(rhs, Rounding::Up)
    }
}

impl AddAssign for Radius {
    fn add_assign(&mut self, rhs: Radius) {
        *self = self.add_rnd(rhs, Rounding::Up);
    }
}

impl Mul for Radius {
    type Output = Radius;

    /// Upper bound on the product.
    fn mul(self, rhs: Radius) -> Radius {
        self.mul_rnd(rhs, Rounding::Up)
    }
}

impl MulAssign for Radius {
    fn mul_assign(&mut self, rhs: Radius) {
        *self = self.mul_rnd(rhs, Rounding::Up);
    }
}

impl Div for Radius {
    type Output = Radius;

    fn div(self, rhs: Radius) -> Radius {
        self.div_up(rhs)
    }
}

impl DivAssign for Radius {
    fn div_assign(&mut self, rhs: Radius) {
        *self = self.div_up(rhs);
    }
}
