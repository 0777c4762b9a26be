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

use num_traits::float::FloatCore;
use rug::Float;
use rug::float::Round;

use crate::numeric::radius::Radius;
use crate::numeric::rounding::Rounding;

impl Radius {
    /// Radius from a non-negative double, rounded in direction `rnd`.
    ///
    /// NaN and infinities carry no finite bound and give an infinite radius.
    pub fn from_f64_rnd(d: f64, rnd: Rounding) -> Radius {
        if !d.is_finite() {
            return Radius::infinite();
        }
        debug_assert!(d >= 0.0, "radius from negative double {d}");
        if d == 0.0 {
            return Radius::zero();
        }
        // exact 53-bit integer significand and its binary exponent
        let (mant, exp, _) = FloatCore::integer_decode(d);
        Radius::finite(mant as i64, i64::from(exp)).normalize(rnd)
    }

    /// Radius bounding `|z|` from above or below.
    ///
    /// The magnitude is first rounded to a double in the same direction, so
    /// the two roundings compose into a one-sided bound. A lower bound may
    /// collapse to zero for values below the subnormal range, and an upper
    /// bound overflowing the double range is infinite.
    pub fn from_float_abs_rnd(z: &Float, rnd: Rounding) -> Radius {
        if z.is_zero() {
            return Radius::zero();
        }
        if !z.is_finite() {
            return Radius::infinite();
        }
        let d = z.as_abs().to_f64_round(Round::from(rnd));
        Radius::from_f64_rnd(d, rnd)
    }
}
