/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A RADIANCE HDR decoder and encoder
//!
//!
//! # Features
//! - Minimal interface, few dependencies
//! - Byte exact with the radiance reference tools, including run length coded scanlines
//! - No unsafe
//! - Fuzz tested decoder
//!
//! # Usage notes
//! The decoder returns data in `&[f32]` types with the exponent already applied to the numbers
//! it does not return raw RGBE data, though the conversion routines are exposed in [`rgbe`].
//!
//! ```
//! let data = vec![0.5_f32; 16 * 2 * 3];
//! let bytes = radiant_hdr::encode(16, 2, &data).unwrap();
//!
//! let raster = radiant_hdr::decode(&bytes).unwrap();
//! assert_eq!((raster.width(), raster.height()), (16, 2));
//! assert_eq!(raster.data(), &data[..]);
//! ```
//!
//! # Metadata
//! - Radiance images usually store metadata in key value pairs.
//!
//! During decoding, we extract this metadata from the headers into a map which we provide
//! via the `metadata` method, the decoder does not in any way interpret the metadata to understand
//! the image characteristics or colorspace, it is the caller's work to do that.
//!
//! # Limits
//! Widths and heights above `2^24` and headers above 10240 bytes are rejected before
//! anything is allocated for the image.
#![forbid(unsafe_code)]
pub extern crate zune_core;

pub use decoder::HdrDecoder;
pub use encoder::HdrEncoder;
pub use errors::{HdrDecodeErrors, HdrEncodeErrors};
pub use header::{MAX_DIMENSION, MAX_HEADER_SIZE, SUPPORTED_FORMAT};
pub use raster::Raster;

mod decoder;
mod encoder;
mod errors;
mod header;
mod raster;
mod rle;
pub mod rgbe;

/// Decode a radiance file held in memory
pub fn decode(bytes: &[u8]) -> Result<Raster, HdrDecodeErrors> {
    HdrDecoder::new(bytes).decode_raster()
}

/// Encode RGB floats as a radiance file
///
/// Returns an empty vector if `width` or `height` is zero
/// or `rgb` is empty.
pub fn encode(width: usize, height: usize, rgb: &[f32]) -> Result<Vec<u8>, HdrEncodeErrors> {
    HdrEncoder::new(rgb, width, height).encode()
}
