/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use log::debug;
use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::{ZByteReader, ZReaderTrait};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::errors::HdrDecodeErrors;
use crate::header::{read_header, MAX_DIMENSION, MAX_HEADER_SIZE};
use crate::raster::Raster;
use crate::rgbe::rgbe_to_float;
use crate::rle::{decode_plane, is_rle_signature, read_scanline_header, width_allows_rle, MAX_RUN};

/// How the pixel data following the header is laid out
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum PixelLayout {
    /// Four raw bytes per pixel
    Flat,
    /// Run length coded scanlines
    Rle
}

/// A simple radiance HDR decoder
///
/// # Accessing metadata
///
/// Radiance files may contain metadata in their headers as key value pairs,
/// we save the metadata in a map and expose it via [`metadata`](Self::metadata).
/// The decoder does not interpret it, e.g `EXPOSURE` is not applied
/// to the decoded pixels.
pub struct HdrDecoder<T: ZReaderTrait> {
    stream:          ZByteReader<T>,
    options:         DecoderOptions,
    max_header_size: usize,
    metadata:        BTreeMap<String, String>,
    width:           usize,
    height:          usize,
    decoded_headers: bool
}

impl<T> HdrDecoder<T>
where
    T: ZReaderTrait
{
    /// Create a new HDR decoder
    ///
    /// # Arguments
    ///
    /// * `data`: Raw HDR file contents
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use radiant_hdr::HdrDecoder;
    /// // read hdr file to memory
    /// let file_data = std::fs::read("sample.hdr").unwrap();
    /// let decoder = HdrDecoder::new(&file_data);
    /// ```
    ///
    /// Images up to [`MAX_DIMENSION`] wide and high are accepted.
    pub fn new(data: T) -> HdrDecoder<T> {
        let options = DecoderOptions::default()
            .set_max_width(MAX_DIMENSION)
            .set_max_height(MAX_DIMENSION);

        Self::new_with_options(data, options)
    }

    /// Create a new HDR decoder with the specified options
    ///
    /// Only the width and height limits of `options` are respected,
    /// both are clamped to [`MAX_DIMENSION`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use radiant_hdr::zune_core::options::DecoderOptions;
    /// use radiant_hdr::HdrDecoder;
    /// let file_data = std::fs::read("sample.hdr").unwrap();
    /// // do not decode images wider than 50 pixels
    /// let options = DecoderOptions::default().set_max_width(50);
    /// let decoder = HdrDecoder::new_with_options(&file_data, options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> HdrDecoder<T> {
        HdrDecoder {
            stream: ZByteReader::new(data),
            options,
            max_header_size: MAX_HEADER_SIZE,
            width: 0,
            height: 0,
            metadata: BTreeMap::new(),
            decoded_headers: false
        }
    }

    /// Set the number of header bytes read while looking for the
    /// resolution line before the file is declared malformed
    ///
    /// Values above [`MAX_HEADER_SIZE`] are clamped to it.
    pub fn set_max_header_size(&mut self, size: usize) {
        self.max_header_size = size.min(MAX_HEADER_SIZE);
    }

    /// Get key value metadata found in the header
    ///
    /// Empty until [`decode_headers`](Self::decode_headers) succeeds.
    pub const fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Decode headers for the HDR image
    ///
    /// The struct is modified in place and data can be
    /// extracted from appropriate getters.
    pub fn decode_headers(&mut self) -> Result<(), HdrDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let header = read_header(&mut self.stream, &self.options, self.max_header_size)?;

        self.width = header.width;
        self.height = header.height;
        self.metadata = header.metadata;
        self.decoded_headers = true;

        Ok(())
    }

    /// Get image dimensions as a tuple of width and height
    /// or `None` if the image hasn't been decoded.
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Return the output colorspace of the image, always RGB
    ///
    /// # Returns
    /// -`Some(Colorspace)`: Output colorspace
    /// - None : Indicates the headers weren't decoded
    pub fn colorspace(&self) -> Option<ColorSpace> {
        self.decoded_headers.then_some(ColorSpace::RGB)
    }

    /// Return the bit depth of decoded samples, always `f32`
    pub fn depth(&self) -> Option<BitDepth> {
        self.decoded_headers.then_some(BitDepth::Float32)
    }

    /// Return the number of `f32`s required to hold a decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the image headers were not decoded or
    /// `width*height*3` calculation overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            self.width.checked_mul(self.height)?.checked_mul(3)
        } else {
            None
        }
    }

    /// Decode HDR file return a vector containing decoded
    /// coefficients
    ///
    /// # Returns
    /// - `Ok(Vec<f32>)`: The actual decoded coefficients, RGB interleaved
    /// - `Err(HdrDecodeErrors)`: Indicates an unrecoverable
    ///  error occurred during decoding.
    pub fn decode(&mut self) -> Result<Vec<f32>, HdrDecodeErrors> {
        self.decode_headers()?;
        let layout = self.pixel_layout();
        // refuse to allocate for pixels the stream cannot hold
        self.check_payload_size(layout)?;

        let size = self
            .output_buffer_size()
            .ok_or(HdrDecodeErrors::DimensionTooLarge("image", usize::MAX, usize::MAX))?;
        let mut buffer = vec![0.0f32; size];

        self.decode_pixels(layout, &mut buffer)?;

        Ok(buffer)
    }

    /// Decode into a [`Raster`] carrying the image dimensions
    pub fn decode_raster(&mut self) -> Result<Raster, HdrDecodeErrors> {
        let data = self.decode()?;

        Ok(Raster::from_parts(self.width, self.height, data))
    }

    /// Decode into a pre-allocated buffer
    ///
    /// It is an error if the buffer size is smaller than
    /// [`output_buffer_size()`](Self::output_buffer_size)
    ///
    /// If the buffer is bigger than expected, we ignore the end padding bytes
    ///
    /// # Example
    ///
    /// - Read headers and then alloc a buffer big enough to hold the image
    ///
    /// ```no_run
    /// use radiant_hdr::HdrDecoder;
    /// let data = std::fs::read("sample.hdr").unwrap();
    /// let mut decoder = HdrDecoder::new(&data);
    /// // before we get output, we must decode the headers to get width
    /// // and height
    /// decoder.decode_headers().unwrap();
    ///
    /// let mut out = vec![0.0; decoder.output_buffer_size().unwrap()];
    /// // write into out
    /// decoder.decode_into(&mut out).unwrap();
    /// ```
    pub fn decode_into(&mut self, buffer: &mut [f32]) -> Result<(), HdrDecodeErrors> {
        self.decode_headers()?;

        let output_size = self
            .output_buffer_size()
            .ok_or(HdrDecodeErrors::DimensionTooLarge("image", usize::MAX, usize::MAX))?;

        if buffer.len() < output_size {
            return Err(HdrDecodeErrors::TooSmallOutputArray(
                output_size,
                buffer.len()
            ));
        }
        let layout = self.pixel_layout();

        self.decode_pixels(layout, &mut buffer[..output_size])
    }

    /// Decide between flat and run length coded pixel data
    ///
    /// Only the first three bytes are looked at, every row of an RLE
    /// image must then carry a valid scanline header.
    fn pixel_layout(&self) -> PixelLayout {
        if !width_allows_rle(self.width) {
            return PixelLayout::Flat;
        }
        match self.stream.peek_at(0, 3) {
            Ok(bytes) if is_rle_signature(bytes) => PixelLayout::Rle,
            _ => PixelLayout::Flat
        }
    }

    /// Fail early if the remaining stream is too short to possibly hold
    /// the image, so corrupt dimensions never reach the allocator
    fn check_payload_size(&self, layout: PixelLayout) -> Result<(), HdrDecodeErrors> {
        let overflow = HdrDecodeErrors::DimensionTooLarge("image", usize::MAX, usize::MAX);

        let per_row = match layout {
            PixelLayout::Flat => self.width.checked_mul(4),
            // scanline header plus at least one two byte run per 127 bytes of each plane
            PixelLayout::Rle => Some(4 + 4 * 2 * self.width.div_ceil(MAX_RUN))
        };
        let needed = per_row
            .and_then(|row| row.checked_mul(self.height))
            .ok_or(overflow)?;

        if needed > self.stream.remaining() {
            return Err(HdrDecodeErrors::UnexpectedEof(
                needed,
                self.stream.remaining()
            ));
        }
        Ok(())
    }

    fn decode_pixels(
        &mut self, layout: PixelLayout, buffer: &mut [f32]
    ) -> Result<(), HdrDecodeErrors> {
        debug!("Decoding {:?} pixel data", layout);

        match layout {
            PixelLayout::Flat => self.decode_flat(buffer),
            PixelLayout::Rle => self.decode_rle(buffer)
        }
    }

    fn decode_flat(&mut self, buffer: &mut [f32]) -> Result<(), HdrDecodeErrors> {
        for out in buffer.chunks_exact_mut(3) {
            let left = self.stream.remaining();
            let rgbe = self
                .stream
                .get_fixed_bytes_or_err::<4>()
                .map_err(HdrDecodeErrors::eof(4, left))?;
            out.copy_from_slice(&rgbe_to_float(rgbe));
        }
        Ok(())
    }

    fn decode_rle(&mut self, buffer: &mut [f32]) -> Result<(), HdrDecodeErrors> {
        let width = self.width;
        // R, G, B and E planes back to back
        let mut planes = vec![0_u8; width * 4];

        for (row, out_scanline) in buffer.chunks_exact_mut(width * 3).enumerate() {
            read_scanline_header(&mut self.stream, width)?;

            for (channel, plane) in planes.chunks_exact_mut(width).enumerate() {
                decode_plane(&mut self.stream, plane, row, channel)?;
            }
            convert_scanline(&planes, out_scanline);
        }
        Ok(())
    }
}

/// Convert a row stored as four planes into RGB floats
fn convert_scanline(planes: &[u8], out_scanline: &mut [f32]) {
    let width = planes.len() / 4;
    let (r, rest) = planes.split_at(width);
    let (g, rest) = rest.split_at(width);
    let (b, e) = rest.split_at(width);

    for (x, out) in out_scanline.chunks_exact_mut(3).enumerate() {
        out.copy_from_slice(&rgbe_to_float([r[x], g[x], b[x], e[x]]));
    }
}
