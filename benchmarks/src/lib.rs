/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use radiant_hdr::HdrEncoder;

/// Width and height of the image every benchmark works on
pub const BENCH_DIMENSIONS: (usize, usize) = (1024, 512);

/// A smooth gradient with a few bright highlights.
///
/// Gradients give the run length coder long dumps while
/// the highlights and the dark border give it runs
pub fn bench_image(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        for x in 0..width {
            let pixel = if x < 16 || y < 16 {
                [0.0; 3]
            } else if (x / 64 + y / 64) % 7 == 0 {
                [850.0, 640.0, 300.0]
            } else {
                let u = x as f32 / width as f32;
                let v = y as f32 / height as f32;
                [u * 4.0, v * 2.0, (u + v) * 0.5]
            };
            data.extend_from_slice(&pixel);
        }
    }
    data
}

/// The benchmark image encoded as a radiance file
pub fn bench_file() -> Vec<u8> {
    let (width, height) = BENCH_DIMENSIONS;
    let data = bench_image(width, height);

    HdrEncoder::new(&data, width, height).encode().unwrap()
}
