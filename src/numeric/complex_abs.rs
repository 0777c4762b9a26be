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

use rug::{Complex, Float};

use crate::numeric::radius::{Radius, Repr};
use crate::numeric::rounding::Rounding;

impl Radius {
    /// Bound on the modulus `|z|` of a complex number.
    ///
    /// `Rounding::Up` gives an upper bound, `Rounding::Down` a lower one.
    #[inline]
    pub fn complex_abs_rnd(z: &Complex, rnd: Rounding) -> Radius {
        Radius::complex_abs_parts_rnd(z.real(), z.imag(), rnd)
    }

    /// Bound on `sqrt(re^2 + im^2)`.
    pub fn complex_abs_parts_rnd(re: &Float, im: &Float, rnd: Rounding) -> Radius {
        let re = Radius::from_float_abs_rnd(re, rnd);
        let im = Radius::from_float_abs_rnd(im, rnd);

        match (re.0, im.0) {
            (Repr::Zero, _) => im,
            (_, Repr::Zero) => re,
            (Repr::Finite { mant: a, exp: e }, Repr::Finite { mant: b, exp: f }) => {
                // squarings are exact, and their sum still fits; doubled
                // in-range exponents stay within i64
                let re2 = Radius::finite(a * a, 2 * e);
                let im2 = Radius::finite(b * b, 2 * f);
                re2.add_rnd(im2, rnd).sqrt_rnd(rnd)
            }
            _ => Radius::infinite(),
        }
    }
}
