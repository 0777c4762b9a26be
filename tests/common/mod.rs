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

#![allow(dead_code)]

use radius::numeric::radius::{MANT_MAX, MANT_MIN};
use radius::numeric::Radius;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rug::{Integer, Rational};

/// Exact value of a positive radius.
pub fn exact(r: Radius) -> Rational {
    let (mant, exp) = r.parts().expect("positive radius");
    let shift = exp.unsigned_abs() as u32;
    if exp >= 0 {
        Rational::from((Integer::from(mant) << shift, Integer::from(1)))
    } else {
        Rational::from((Integer::from(mant), Integer::from(1) << shift))
    }
}

pub fn exact_f64(d: f64) -> Rational {
    Rational::from_f64(d).expect("finite double")
}

pub fn assert_normalized(r: Radius) {
    if let Some((mant, _)) = r.parts() {
        assert!(
            (MANT_MIN..MANT_MAX).contains(&mant),
            "unnormalised radius {r}"
        );
    }
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_cafe)
}

/// Positive double with a random exponent in a range the radius arithmetic
/// cannot overflow.
pub fn random_positive(rng: &mut StdRng) -> f64 {
    let m: f64 = rng.random_range(0.5..1.0);
    let e: i32 = rng.random_range(-300..300);
    m * 2f64.powi(e)
}
