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

use std::cmp::Ordering;
use std::fmt;

use num_traits::{One, ToPrimitive, Zero};

use crate::numeric::rounding::Rounding;

/// Smallest mantissa of a normalised positive radius.
pub const MANT_MIN: i64 = 1 << 30;
/// Exclusive upper end of the normalised mantissa range.
pub const MANT_MAX: i64 = MANT_MIN << 1;
/// Significant bits carried by a positive radius.
pub const MANT_BITS: i64 = 31;
/// Largest exponent of a finite radius.
pub const EXP_MAX: i64 = 1 << 61;
/// Smallest exponent of a positive radius.
pub const EXP_MIN: i64 = -EXP_MAX;

/// A non-negative error bound `mant * 2^exp`, or infinity.
///
/// The radius is deliberately coarse: a positive value always has exactly
/// 31 significant bits (`MANT_MIN <= mant < MANT_MAX`), whatever the
/// precision of the quantity it bounds. Every operation takes its operands
/// by value and builds a fresh result, so updating a radius from itself
/// (`r = r.sqrt_rnd(rnd)`, `r += r`) is always safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Radius(pub(crate) Repr);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Repr {
    Zero,
    /// Normalised, with `EXP_MIN <= exp <= EXP_MAX`, outside of this crate.
    /// Inside an operation the mantissa may transiently be any positive
    /// value below 2^62 and the exponent up to twice the range.
    Finite { mant: i64, exp: i64 },
    Infinite,
}

impl Radius {
    /* ========= Constructors ========= */

    #[inline]
    pub const fn zero() -> Self {
        Radius(Repr::Zero)
    }

    #[inline]
    pub const fn one() -> Self {
        Radius(Repr::Finite {
            mant: MANT_MIN,
            exp: -30,
        })
    }

    /// No finite bound is known.
    #[inline]
    pub const fn infinite() -> Self {
        Radius(Repr::Infinite)
    }

    /// Largest finite radius, `(2^31 - 1) * 2^EXP_MAX`.
    #[inline]
    pub const fn max_finite() -> Self {
        Radius(Repr::Finite {
            mant: MANT_MAX - 1,
            exp: EXP_MAX,
        })
    }

    /// Smallest positive radius, `2^30 * 2^EXP_MIN`.
    #[inline]
    pub const fn min_positive() -> Self {
        Radius(Repr::Finite {
            mant: MANT_MIN,
            exp: EXP_MIN,
        })
    }

    /// Builds `mant * 2^exp` from any non-negative mantissa, rounding in the
    /// requested direction when `mant` has more than 31 significant bits or
    /// the value lies outside the exponent range.
    pub fn from_parts(mant: i64, exp: i64, rnd: Rounding) -> Self {
        debug_assert!(mant >= 0, "radius mantissa must be non-negative, got {mant}");
        Radius::normalize_parts(mant, i128::from(exp), rnd)
    }

    /// Raw, possibly unnormalised value; callers must normalise before the
    /// radius leaves the crate.
    #[inline]
    pub(crate) const fn finite(mant: i64, exp: i64) -> Self {
        Radius(Repr::Finite { mant, exp })
    }

    #[inline]
    pub fn set_zero(&mut self) {
        *self = Radius::zero();
    }

    #[inline]
    pub fn set_one(&mut self) {
        *self = Radius::one();
    }

    #[inline]
    pub fn set_infinite(&mut self) {
        *self = Radius::infinite();
    }

    /* ========= Queries ========= */

    #[inline]
    pub fn is_zero(self) -> bool {
        matches!(self.0, Repr::Zero)
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self.0, Repr::Infinite)
    }

    /// True if the radius is strictly below 1/2.
    #[inline]
    pub fn is_less_than_half(self) -> bool {
        match self.0 {
            Repr::Zero => true,
            Repr::Finite { exp, .. } => exp < -MANT_BITS,
            Repr::Infinite => false,
        }
    }

    /// Exponent `e` such that the radius is `m * 2^e` with `1/2 <= m < 1`.
    ///
    /// Zero reports `i64::MIN` and infinity `i64::MAX`.
    #[inline]
    pub fn normalized_exponent(self) -> i64 {
        match self.0 {
            Repr::Zero => i64::MIN,
            Repr::Finite { exp, .. } => exp + MANT_BITS,
            Repr::Infinite => i64::MAX,
        }
    }

    /// Mantissa and exponent of a positive radius.
    #[inline]
    pub fn parts(self) -> Option<(i64, i64)> {
        match self.0 {
            Repr::Finite { mant, exp } => Some((mant, exp)),
            _ => None,
        }
    }

    /* ========= Normalisation ========= */

    /// Restores the 31-bit mantissa invariant.
    #[inline]
    pub(crate) fn normalize(self, rnd: Rounding) -> Radius {
        match self.0 {
            Repr::Finite { mant, exp } => Radius::normalize_parts(mant, i128::from(exp), rnd),
            _ => self,
        }
    }

    /// Normalises `mant * 2^exp` and brings the exponent into
    /// `EXP_MIN..=EXP_MAX`.
    ///
    /// Shifting left is exact. Shifting right truncates, so with
    /// `Rounding::Up` one ulp is added back whenever a non-zero bit was
    /// shifted out. Exponents are tracked in `i128` so that sums of two
    /// in-range exponents cannot wrap.
    pub(crate) fn normalize_parts(mant: i64, exp: i128, rnd: Rounding) -> Radius {
        debug_assert!(mant >= 0, "negative radius mantissa {mant}");
        if mant == 0 {
            return Radius::zero();
        }

        let k = leading_bit(mant);
        let (mant, exp) = if k <= 30 {
            let shift = 30 - k;
            (mant << shift, exp - i128::from(shift))
        } else {
            let shift = k - 30;
            let lost = mant.trailing_zeros() < shift;
            let (mant, exp) = (mant >> shift, exp + i128::from(shift));
            if !(lost && rnd.is_up()) {
                (mant, exp)
            } else if mant + 1 == MANT_MAX {
                (MANT_MIN, exp + 1)
            } else {
                (mant + 1, exp)
            }
        };
        Radius::clamp_exponent(mant, exp, rnd)
    }

    /// Replaces an out-of-range result by the nearest representable bound
    /// on the correct side.
    fn clamp_exponent(mant: i64, exp: i128, rnd: Rounding) -> Radius {
        match i64::try_from(exp) {
            Ok(exp) if (EXP_MIN..=EXP_MAX).contains(&exp) => Radius::finite(mant, exp),
            _ if exp > 0 => match rnd {
                Rounding::Up => Radius::infinite(),
                Rounding::Down => Radius::max_finite(),
            },
            _ => match rnd {
                Rounding::Up => Radius::min_positive(),
                Rounding::Down => Radius::zero(),
            },
        }
    }
}

/// Position of the leading bit of a positive integer, from 0 to 62.
#[inline]
fn leading_bit(n: i64) -> u32 {
    debug_assert!(n > 0);
    63 - n.leading_zeros()
}

/// `mant * 2^exp` as a double, saturating to zero or infinity.
fn ldexp(mant: i64, exp: i64) -> f64 {
    let exp = exp.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    libm::ldexp(mant as f64, exp)
}

impl PartialOrd for Radius {
    fn partial_cmp(&self, other: &Radius) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares by value. Relies on both sides being normalised, which holds
/// for every radius a caller can observe.
impl Ord for Radius {
    fn cmp(&self, other: &Radius) -> Ordering {
        match (self.0, other.0) {
            (Repr::Zero, Repr::Zero) | (Repr::Infinite, Repr::Infinite) => Ordering::Equal,
            (Repr::Zero, _) | (_, Repr::Infinite) => Ordering::Less,
            (_, Repr::Zero) | (Repr::Infinite, _) => Ordering::Greater,
            (Repr::Finite { mant: a, exp: e }, Repr::Finite { mant: b, exp: f }) => {
                e.cmp(&f).then(a.cmp(&b))
            }
        }
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Infinite => write!(f, "∞"),
            Repr::Zero => write!(f, "Z"),
            Repr::Finite { mant, exp } => {
                write!(f, "{} {} {}", ldexp(mant, exp), mant, exp)
            }
        }
    }
}

impl Zero for Radius {
    fn zero() -> Self {
        Radius::zero()
    }

    fn is_zero(&self) -> bool {
        Radius::is_zero(*self)
    }
}

impl One for Radius {
    fn one() -> Self {
        Radius::one()
    }
}

impl ToPrimitive for Radius {
    fn to_i64(&self) -> Option<i64> {
        self.to_f64()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_f64()?.to_u64()
    }

    /// The radius as a double. The 31-bit mantissa converts exactly, so
    /// only the scaling rounds, and only below the normal range; overflow
    /// gives infinity.
    fn to_f64(&self) -> Option<f64> {
        Some(match self.0 {
            Repr::Zero => 0.0,
            Repr::Finite { mant, exp } => ldexp(mant, exp),
            Repr::Infinite => f64::INFINITY,
        })
    }
}
