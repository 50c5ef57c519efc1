/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline run length coding
//!
//! Each row starts with `[2, 2, width_hi, width_lo]` and is followed by
//! the R, G, B and E planes, each coded as a sequence of records.
//! A count byte above 128 is a run of `count - 128` copies of the next
//! byte, otherwise it is a dump of `count` literal bytes.

use zune_core::bytestream::{ZByteReader, ZReaderTrait};

use crate::errors::{HdrDecodeErrors, HdrEncodeErrors};

/// Longest literal record
pub(crate) const MAX_DUMP: usize = 128;
/// Longest repeat record
pub(crate) const MAX_RUN: usize = 127;

/// Rows narrower than this are always stored flat
pub(crate) const MIN_RLE_WIDTH: usize = 8;
/// Rows this wide or wider are always stored flat, the width
/// no longer fits in the 15 bits of a scanline header
pub(crate) const MAX_RLE_WIDTH: usize = 0x8000;

/// Whether a row of `width` pixels may be run length coded
#[inline]
pub(crate) const fn width_allows_rle(width: usize) -> bool {
    width >= MIN_RLE_WIDTH && width < MAX_RLE_WIDTH
}

/// Whether the bytes at the start of a row look like an RLE scanline
/// header, `2, 2` followed by a byte with the high bit clear
#[inline]
pub(crate) fn is_rle_signature(bytes: &[u8]) -> bool {
    matches!(bytes, [2, 2, hi, ..] if hi & 0x80 == 0)
}

/// Header bytes for an RLE row of `width` pixels
#[inline]
pub(crate) fn scanline_header(width: usize) -> [u8; 4] {
    [2, 2, (width >> 8) as u8, (width & 255) as u8]
}

/// Consume a scanline header, checking it against the image width
pub(crate) fn read_scanline_header<T: ZReaderTrait>(
    reader: &mut ZByteReader<T>, width: usize
) -> Result<(), HdrDecodeErrors> {
    let left = reader.remaining();
    let header = reader
        .get_fixed_bytes_or_err::<4>()
        .map_err(HdrDecodeErrors::eof(4, left))?;
    let length = (usize::from(header[2]) << 8) | usize::from(header[3]);

    if !is_rle_signature(&header) || length != width {
        return Err(HdrDecodeErrors::InvalidScanlineHeader(header, width));
    }
    Ok(())
}

/// Decode one plane of a row, filling all of `plane`
///
/// `row` and `channel` only serve to describe errors.
pub(crate) fn decode_plane<T: ZReaderTrait>(
    reader: &mut ZByteReader<T>, plane: &mut [u8], row: usize, channel: usize
) -> Result<(), HdrDecodeErrors> {
    let width = plane.len();
    let mut pos = 0;

    while pos < width {
        let count = reader.get_u8_err().map_err(HdrDecodeErrors::eof(1, 0))?;
        let left = width - pos;

        if count > 128 {
            let length = usize::from(count - 128);

            if length > left {
                return Err(HdrDecodeErrors::BadRleData { row, plane: channel });
            }
            let value = reader.get_u8_err().map_err(HdrDecodeErrors::eof(1, 0))?;
            plane[pos..pos + length].fill(value);
            pos += length;
        } else {
            let length = usize::from(count);

            // an empty dump makes no progress
            if length == 0 || length > left {
                return Err(HdrDecodeErrors::BadRleData { row, plane: channel });
            }
            let left_in_stream = reader.remaining();
            let literals = reader
                .get(length)
                .map_err(HdrDecodeErrors::eof(length, left_in_stream))?;
            plane[pos..pos + length].copy_from_slice(literals);
            pos += length;
        }
    }
    Ok(())
}

/// Compress one plane of a row
///
/// Greedy: find the next three identical bytes, dump everything before
/// them, then extend that run as long as the bytes repeat.
pub(crate) fn encode_plane(plane: &[u8], out: &mut Vec<u8>) -> Result<(), HdrEncodeErrors> {
    let width = plane.len();
    let mut cur = 0;

    while cur < width {
        let run_start = plane[cur..]
            .windows(3)
            .position(|w| w[0] == w[1] && w[1] == w[2])
            .map_or(width, |offset| cur + offset);

        for chunk in plane[cur..run_start].chunks(MAX_DUMP) {
            dump(chunk, out)?;
        }
        if run_start == width {
            break;
        }
        let value = plane[run_start];
        let run_length = plane[run_start..]
            .iter()
            .take_while(|&&byte| byte == value)
            .count();

        let mut left = run_length;
        while left > 0 {
            let count = left.min(MAX_RUN);
            run(count, value, out)?;
            left -= count;
        }
        cur = run_start + run_length;
    }
    Ok(())
}

/// Emit a literal record
fn dump(bytes: &[u8], out: &mut Vec<u8>) -> Result<(), HdrEncodeErrors> {
    if bytes.is_empty() || bytes.len() > MAX_DUMP {
        return Err(HdrEncodeErrors::InvalidRleChunk("dump", bytes.len()));
    }
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Emit a repeat record
fn run(count: usize, value: u8, out: &mut Vec<u8>) -> Result<(), HdrEncodeErrors> {
    if count == 0 || count > MAX_RUN {
        return Err(HdrEncodeErrors::InvalidRleChunk("run", count));
    }
    out.push((count + 128) as u8);
    out.push(value);
    Ok(())
}
