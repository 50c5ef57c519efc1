/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance HDR encoder

use std::collections::BTreeMap;
use std::io::Write;

use log::debug;
use zune_core::colorspace::ColorSpace;

use crate::errors::HdrEncodeErrors;
use crate::header::write_header;
use crate::rgbe::float_to_rgbe;
use crate::rle::{encode_plane, scanline_header, width_allows_rle, MAX_DUMP};

/// Rough upper bound on the size of an encoded header
const HEADER_ALLOWANCE: usize = 1024;

/// A simple HDR encoder
///
/// Data is expected to be in `f32` and its size should be
/// `width*height*3`
pub struct HdrEncoder<'a> {
    data:       &'a [f32],
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    headers:    Option<&'a BTreeMap<String, String>>
}

impl<'a> HdrEncoder<'a> {
    /// Create a new HDR encoder context that can encode
    /// the provided data
    ///
    /// # Arguments
    ///  - `data`: Data to encode, RGB interleaved
    ///  - `width`, `height`: Image dimensions
    pub fn new(data: &'a [f32], width: usize, height: usize) -> HdrEncoder<'a> {
        Self {
            data,
            width,
            height,
            colorspace: ColorSpace::RGB,
            headers: None
        }
    }

    /// Declare the layout of the input data
    ///
    /// Radiance only stores RGB, encoding anything else fails with
    /// [`UnsupportedColorspace`](HdrEncodeErrors::UnsupportedColorspace).
    pub fn set_colorspace(&mut self, colorspace: ColorSpace) {
        self.colorspace = colorspace;
    }

    /// Add extra headers to be encoded with the image
    ///
    /// This must be called before you call [`encode`](crate::encoder::HdrEncoder::encode)
    /// otherwise it will have no effect.
    ///
    /// # Arguments:
    /// - headers: A map containing keys and values, the values will be encoded as key=value
    /// in the hdr header. `FORMAT` and `EXPOSURE` are written by the encoder and are skipped.
    pub fn add_headers(&mut self, headers: &'a BTreeMap<String, String>) {
        self.headers = Some(headers)
    }

    /// Calculate an upper bound on the size of the encoded image
    ///
    /// The size of the output will depend on the nature of your data,
    /// this is the worst case where every byte ends up in a dump record.
    pub fn expected_buffer_size(&self) -> Option<usize> {
        let row = if width_allows_rle(self.width) {
            let plane = self.width.checked_add(self.width.div_ceil(MAX_DUMP))?;
            plane.checked_mul(4)?.checked_add(4)?
        } else {
            self.width.checked_mul(4)?
        };
        let extra = self.headers.map_or(0, |headers| {
            headers.iter().map(|(k, v)| k.len() + v.len() + 2).sum()
        });

        row.checked_mul(self.height)?
            .checked_add(HEADER_ALLOWANCE)?
            .checked_add(extra)
    }

    /// Encode into a freshly allocated vector
    ///
    /// A zero width or height, or empty data produces an empty vector.
    ///
    /// # Examples
    /// - Encode a black image of 10x10
    ///```
    /// use radiant_hdr::HdrEncoder;
    /// let w = 10;
    /// let h = 10;
    /// let data = vec![0.0_f32; w * h * 3];
    /// let encoder = HdrEncoder::new(&data, w, h);
    /// let output = encoder.encode().unwrap();
    /// assert!(output.starts_with(b"#?RADIANCE\n"));
    ///```
    pub fn encode(&self) -> Result<Vec<u8>, HdrEncodeErrors> {
        if self.width == 0 || self.height == 0 || self.data.is_empty() {
            return Ok(Vec::new());
        }
        if self.colorspace != ColorSpace::RGB {
            return Err(HdrEncodeErrors::UnsupportedColorspace(self.colorspace));
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(HdrEncodeErrors::Static("overflow detected"))?
            .checked_mul(3)
            .ok_or(HdrEncodeErrors::Static("overflow detected"))?;

        let found = self.data.len();

        if expected != found {
            return Err(HdrEncodeErrors::WrongInputSize(expected, found));
        }
        let size = self
            .expected_buffer_size()
            .ok_or(HdrEncodeErrors::Static("overflow detected"))?;

        let mut out = Vec::with_capacity(size);

        write_header(&mut out, self.width, self.height, self.headers);

        let width = self.width;
        let use_rle = width_allows_rle(width);

        debug!("Writing {} scanlines, rle: {}", self.height, use_rle);

        // R, G, B and E planes back to back
        let mut planes = vec![0_u8; width * 4];

        for scanline in self.data.chunks_exact(width * 3) {
            if !use_rle {
                for pixel in scanline.chunks_exact(3) {
                    out.extend_from_slice(&float_to_rgbe([pixel[0], pixel[1], pixel[2]]));
                }
                continue;
            }
            for (x, pixel) in scanline.chunks_exact(3).enumerate() {
                let rgbe = float_to_rgbe([pixel[0], pixel[1], pixel[2]]);

                for (channel, byte) in rgbe.iter().enumerate() {
                    planes[channel * width + x] = *byte;
                }
            }
            out.extend_from_slice(&scanline_header(width));

            for plane in planes.chunks_exact(width) {
                encode_plane(plane, &mut out)?;
            }
        }
        Ok(out)
    }

    /// Encode into a sink
    ///
    /// # Returns
    /// - Ok(usize): The number of bytes written into out
    /// - Err(HdrEncodeErrors): An error if something occurred
    ///
    /// # Examples
    /// - Encode and directly write to a file
    ///```no_run
    /// use std::fs::File;
    /// use std::io::BufWriter;
    /// use radiant_hdr::HdrEncoder;
    /// let data = vec![0.0_f32; 10 * 10 * 3];
    /// let encoder = HdrEncoder::new(&data, 10, 10);
    /// let file = File::create("./black.hdr").unwrap();
    /// let size = encoder.encode_to(BufWriter::new(file)).unwrap();
    /// ```
    pub fn encode_to<W: Write>(&self, mut sink: W) -> Result<usize, HdrEncodeErrors> {
        let bytes = self.encode()?;
        sink.write_all(&bytes)?;
        sink.flush()?;

        Ok(bytes.len())
    }
}
