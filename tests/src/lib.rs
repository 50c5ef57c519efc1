/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use xxhash_rust::xxh3::xxh3_128;

mod format;
mod malformed;
mod roundtrip;

/// Header the encoder writes for an image of the given size
pub fn encoded_header(width: usize, height: usize) -> Vec<u8> {
    format!(
        "#?RADIANCE\n# Made with radiant-hdr\nFORMAT=32-bit_rle_rgbe\nEXPOSURE=1.0\n\n-Y {height} +X {width}\n"
    )
    .into_bytes()
}

/// A deterministic image with flat areas, ramps and a wide dynamic range
pub fn synthetic_image(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        for x in 0..width {
            let band = (x / 5 + y) % 4;
            let pixel = match band {
                0 => [0.25, 0.25, 0.25],
                1 => [x as f32 * 0.5 + 1.0, 0.1, y as f32 + 0.5],
                2 => [1e-3 * (x + 1) as f32, 2e-3, 3e-3],
                _ => [4096.0, 12.5 * (y + 1) as f32, 0.0]
            };
            data.extend_from_slice(&pixel);
        }
    }
    data
}

/// Assert two rasters agree within one step of the shared exponent mantissa
pub fn assert_close(expected: &[f32], found: &[f32]) {
    assert_eq!(expected.len(), found.len());

    for (i, (a, b)) in expected.chunks_exact(3).zip(found.chunks_exact(3)).enumerate() {
        let max = a.iter().fold(0.0_f32, |x, y| x.max(*y));

        for (x, y) in a.iter().zip(b) {
            assert!(
                (x - y).abs() <= max / 128.0,
                "pixel {i}: expected {a:?} found {b:?}"
            );
        }
    }
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
