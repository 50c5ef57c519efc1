/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Shared exponent pixel conversion
//!
//! A radiance pixel is three 8 bit mantissas sharing one exponent byte
//! biased by 128. The routines here convert between that and floats
//! and produce the same bytes the radiance tools produce.
//!
//! `frexp`/`ldexp` work on the double bit pattern directly.

/// `2^64`, used to lift subnormals into the normal range
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Values whose largest channel is below this are stored as black
const BLACK_THRESHOLD: f64 = 1e-32;

/// Build `2^exp` for an exponent within the normal double range
#[inline]
fn pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Calculate `x * 2^exp`
///
/// Exponents outside the normal range are applied in steps so
/// intermediate factors stay representable.
pub fn ldexp(mut x: f64, mut exp: i32) -> f64 {
    while exp > 1023 {
        x *= pow2(1023);
        exp -= 1023;

        if !x.is_finite() {
            return x;
        }
    }
    while exp < -1022 {
        x *= pow2(-1022);
        exp += 1022;

        if x == 0.0 {
            return x;
        }
    }
    x * pow2(exp)
}

/// Split `v` into a fraction and exponent such that `v == f * 2^e`
/// and `0.5 <= |f| < 1.0`.
///
/// Zero, infinities and NaN are returned unchanged with an exponent of zero.
pub fn frexp(v: f64) -> (f64, i32) {
    if v == 0.0 || !v.is_finite() {
        return (v, 0);
    }
    let mut biased = ((v.to_bits() >> 52) & 0x7ff) as i32;

    if biased == 0 {
        // subnormal, scale up so the exponent field is populated
        biased = (((v * TWO_POW_64).to_bits() >> 52) & 0x7ff) as i32 - 64;
    }
    let exp = biased - 1022;

    (ldexp(v, -exp), exp)
}

/// Convert an RGBE pixel into linear RGB floats
///
/// A zero exponent byte is black no matter what the mantissas hold.
#[inline]
pub fn rgbe_to_float(rgbe: [u8; 4]) -> [f32; 3] {
    if rgbe[3] == 0 {
        return [0.0; 3];
    }
    // 128 bias plus 8 bits of mantissa
    let scale = ldexp(1.0, i32::from(rgbe[3]) - 136);

    [
        (f64::from(rgbe[0]) * scale) as f32,
        (f64::from(rgbe[1]) * scale) as f32,
        (f64::from(rgbe[2]) * scale) as f32
    ]
}

/// Convert a linear RGB pixel into RGBE
///
/// Mantissas are truncated toward zero and wrapped to 8 bits, as are
/// exponents. Negative or out of range channels therefore wrap instead
/// of clamping, matching what radiance writes for such input.
#[inline]
pub fn float_to_rgbe(rgb: [f32; 3]) -> [u8; 4] {
    let [r, g, b] = rgb.map(f64::from);
    let v = r.max(g).max(b);

    if v < BLACK_THRESHOLD {
        return [0; 4];
    }
    let (fraction, exp) = frexp(v);
    let scale = fraction / v * 256.0;

    [
        wrap_to_u8(r * scale),
        wrap_to_u8(g * scale),
        wrap_to_u8(b * scale),
        exp.wrapping_add(128) as u8
    ]
}

/// Truncate toward zero, then keep the low 8 bits
#[inline(always)]
fn wrap_to_u8(value: f64) -> u8 {
    value as i64 as u8
}
