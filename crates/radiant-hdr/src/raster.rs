/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::errors::HdrEncodeErrors;
use crate::HdrEncoder;

/// A decoded radiance image
///
/// Pixels are linear `f32` RGB, interleaved, row-major starting at the
/// top row, the length is always `width * height * 3`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width:  usize,
    height: usize,
    data:   Vec<f32>
}

impl Raster {
    /// Create a raster, failing if `data` does not hold exactly
    /// `width * height * 3` values
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Raster, HdrEncodeErrors> {
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(3))
            .ok_or(HdrEncodeErrors::Static("overflow detected"))?;

        if data.len() != expected {
            return Err(HdrEncodeErrors::WrongInputSize(expected, data.len()));
        }
        Ok(Raster::from_parts(width, height, data))
    }

    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<f32>) -> Raster {
        Raster {
            width,
            height,
            data
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Interleaved RGB values
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Return the RGB value at column `x` of row `y`, or `None` if
    /// out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * 3;
        let rgb = self.data.get(start..start + 3)?;

        Some([rgb[0], rgb[1], rgb[2]])
    }

    /// Destroy the raster returning width, height and pixels
    pub fn into_parts(self) -> (usize, usize, Vec<f32>) {
        (self.width, self.height, self.data)
    }

    /// Encode this raster as a radiance file
    pub fn encode(&self) -> Result<Vec<u8>, HdrEncodeErrors> {
        HdrEncoder::new(&self.data, self.width, self.height).encode()
    }
}
