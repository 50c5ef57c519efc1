/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::num::ParseIntError;

use zune_core::colorspace::ColorSpace;

/// HDR decoding errors
///
/// All errors are terminal, a decoder that returned one of these
/// should not be used to decode further.
pub enum HdrDecodeErrors {
    /// Magic bytes do not start with `#?RADIANCE` or `#?RGBE`
    CorruptMagic,
    /// The `FORMAT` field is missing or not `32-bit_rle_rgbe`, or the
    /// resolution line is not in `-Y <height> +X <width>` order
    UnsupportedFormat(String),
    /// The header grew past the given size without a resolution line
    HeaderTooLarge(usize),
    /// Too large dimensions for a given dimension
    DimensionTooLarge(&'static str, usize, usize),
    /// A zero width or height in the resolution line
    ZeroDimension,
    /// The decoder could not convert string to int
    ParseError(ParseIntError),
    /// An RLE scanline header was malformed or disagreed with the image width
    ///
    /// Contains the header bytes found and the expected width
    InvalidScanlineHeader([u8; 4], usize),
    /// A run or dump would write past the end of a scanline plane
    BadRleData { row: usize, plane: usize },
    /// The stream ended early, contains bytes needed and bytes left
    UnexpectedEof(usize, usize),
    /// The output array is too small to contain the whole
    /// image
    TooSmallOutputArray(usize, usize)
}

impl Debug for HdrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HdrDecodeErrors::CorruptMagic => {
                writeln!(
                    f,
                    "Invalid magic bytes, file does not start with #?RADIANCE or #?RGBE"
                )
            }
            HdrDecodeErrors::UnsupportedFormat(reason) => {
                writeln!(f, "Unsupported format: {reason}")
            }
            HdrDecodeErrors::HeaderTooLarge(limit) => {
                writeln!(
                    f,
                    "Header exceeds {limit} bytes without a resolution line, file is malformed or truncated"
                )
            }
            HdrDecodeErrors::DimensionTooLarge(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            HdrDecodeErrors::ZeroDimension => {
                writeln!(f, "Image width or height is zero")
            }
            HdrDecodeErrors::ParseError(err) => {
                writeln!(f, "Could not parse integer {:?}", err)
            }
            HdrDecodeErrors::InvalidScanlineHeader(header, width) => {
                writeln!(
                    f,
                    "Invalid scanline header {header:?}, expected [2, 2, hi, lo] encoding width {width}"
                )
            }
            HdrDecodeErrors::BadRleData { row, plane } => {
                writeln!(
                    f,
                    "Bad RLE data in row {row}, plane {plane}: record overruns the scanline"
                )
            }
            HdrDecodeErrors::UnexpectedEof(needed, left) => {
                writeln!(
                    f,
                    "Unexpected end of stream, needed {needed} bytes but only {left} remain"
                )
            }
            HdrDecodeErrors::TooSmallOutputArray(expected, found) => {
                writeln!(f, "Too small of an output array, expected array of at least length {} but found {}", expected, found)
            }
        }
    }
}

impl HdrDecodeErrors {
    /// Turn a failed read on a byte reader into an [`UnexpectedEof`](Self::UnexpectedEof),
    /// `left` is the number of bytes the reader had before the read
    pub(crate) fn eof(needed: usize, left: usize) -> impl FnOnce(&'static str) -> HdrDecodeErrors {
        move |_| HdrDecodeErrors::UnexpectedEof(needed, left)
    }
}

impl From<ParseIntError> for HdrDecodeErrors {
    fn from(value: ParseIntError) -> Self {
        HdrDecodeErrors::ParseError(value)
    }
}

impl Display for HdrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}
impl std::error::Error for HdrDecodeErrors {}

/// HDR encoding errors
pub enum HdrEncodeErrors {
    /// The colorspace provided by user is not supported by HDR
    UnsupportedColorspace(ColorSpace),
    /// The input size was expected to be of a certain size but isn't
    WrongInputSize(usize, usize),
    /// A dump or run record was asked to carry more bytes than
    /// its count byte can describe.
    ///
    /// This is an internal invariant, the encoder never produces
    /// such records.
    InvalidRleChunk(&'static str, usize),
    /// Generic message
    Static(&'static str),
    IoErrors(std::io::Error)
}

impl Debug for HdrEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HdrEncodeErrors::UnsupportedColorspace(color) => {
                writeln!(f, "Unsupported colorspace {color:?} for Radiance, Radiance only works with RGB f32 data")
            }
            HdrEncodeErrors::WrongInputSize(expected, found) => {
                writeln!(f, "Input array length {found} doesn't match {expected}")
            }
            HdrEncodeErrors::InvalidRleChunk(kind, length) => {
                writeln!(f, "Cannot emit {kind} record of {length} bytes")
            }
            HdrEncodeErrors::Static(err) => writeln!(f, "{}", err),
            HdrEncodeErrors::IoErrors(err) => writeln!(f, "I/O error {:?}", err)
        }
    }
}

impl Display for HdrEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for HdrEncodeErrors {}

impl From<&'static str> for HdrEncodeErrors {
    fn from(value: &'static str) -> Self {
        HdrEncodeErrors::Static(value)
    }
}
impl From<std::io::Error> for HdrEncodeErrors {
    fn from(value: std::io::Error) -> Self {
        HdrEncodeErrors::IoErrors(value)
    }
}
