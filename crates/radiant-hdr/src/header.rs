/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance header parsing and emission
//!
//! A header looks like
//! ```text
//! #?RADIANCE
//! # comment
//! FORMAT=32-bit_rle_rgbe
//! EXPOSURE=1.0
//!
//! -Y 512 +X 768
//! ```
//! The blank line followed by a single line is what terminates it.

use std::collections::BTreeMap;

use log::{trace, warn};
use zune_core::bytestream::{ZByteReader, ZReaderTrait};
use zune_core::options::DecoderOptions;

use crate::errors::HdrDecodeErrors;

pub(crate) const RADIANCE_MAGIC: &[u8] = b"#?RADIANCE\n";
pub(crate) const RGBE_MAGIC: &[u8] = b"#?RGBE\n";

/// The only pixel format radiance files come in
pub const SUPPORTED_FORMAT: &str = "32-bit_rle_rgbe";

/// Largest width or height the decoder will ever accept, `2^24`.
///
/// Limits in [`DecoderOptions`] above this are clamped to it.
pub const MAX_DIMENSION: usize = 1 << 24;

/// Number of header bytes read while looking for the resolution
/// line before giving up.
pub const MAX_HEADER_SIZE: usize = 10240;

/// Keys the encoder writes itself
const RESERVED_KEYS: [&str; 2] = ["FORMAT", "EXPOSURE"];

pub(crate) struct HdrHeader {
    pub width:    usize,
    pub height:   usize,
    pub metadata: BTreeMap<String, String>
}

/// Read and validate the header, leaving `reader` at the first
/// byte of pixel data
///
/// `max_header_size` is clamped to [`MAX_HEADER_SIZE`], the width and
/// height limits of `options` to [`MAX_DIMENSION`].
pub(crate) fn read_header<T: ZReaderTrait>(
    reader: &mut ZByteReader<T>, options: &DecoderOptions, max_header_size: usize
) -> Result<HdrHeader, HdrDecodeErrors> {
    let has_magic = [RADIANCE_MAGIC, RGBE_MAGIC]
        .iter()
        .any(|magic| reader.peek_at(0, magic.len()).is_ok_and(|start| start == *magic));

    if !has_magic {
        return Err(HdrDecodeErrors::CorruptMagic);
    }
    let text = accumulate_header(reader, max_header_size.min(MAX_HEADER_SIZE))?;
    let lines: Vec<&str> = text.split('\n').collect();

    // text ends in "\n\n<resolution>\n" so the split ends in ["", resolution, ""]
    let resolution = lines[lines.len() - 2];
    let metadata = parse_metadata(&lines[1..lines.len() - 3]);

    trace!("Metadata: {:?}", metadata);

    let format = lines
        .iter()
        .find_map(|line| line.trim_start().strip_prefix("FORMAT="))
        .map(str::trim)
        .ok_or_else(|| HdrDecodeErrors::UnsupportedFormat("missing FORMAT field".to_string()))?;

    if format != SUPPORTED_FORMAT {
        return Err(HdrDecodeErrors::UnsupportedFormat(format!(
            "FORMAT={format}, only {SUPPORTED_FORMAT} is supported"
        )));
    }
    let (width, height) = parse_resolution(resolution)?;

    if width == 0 || height == 0 {
        return Err(HdrDecodeErrors::ZeroDimension);
    }
    let max_height = options.get_max_height().min(MAX_DIMENSION);
    let max_width = options.get_max_width().min(MAX_DIMENSION);

    if height > max_height {
        return Err(HdrDecodeErrors::DimensionTooLarge(
            "height", max_height, height
        ));
    }
    if width > max_width {
        return Err(HdrDecodeErrors::DimensionTooLarge(
            "width", max_width, width
        ));
    }
    trace!("Width: {}", width);
    trace!("Height: {}", height);

    Ok(HdrHeader {
        width,
        height,
        metadata
    })
}

/// Collect header bytes until the text ends with a blank line, a
/// non-blank line and a newline.
///
/// Bytes are widened to chars one to one, headers are ASCII and
/// anything else is kept rather than rejected.
fn accumulate_header<T: ZReaderTrait>(
    reader: &mut ZByteReader<T>, limit: usize
) -> Result<String, HdrDecodeErrors> {
    let mut header = Vec::with_capacity(256);

    loop {
        if header.len() >= limit {
            return Err(HdrDecodeErrors::HeaderTooLarge(limit));
        }
        let byte = reader.get_u8_err().map_err(HdrDecodeErrors::eof(1, 0))?;
        header.push(byte);

        if byte == b'\n' && ends_with_resolution_line(&header) {
            break;
        }
    }
    Ok(header.iter().map(|&c| char::from(c)).collect())
}

/// Whether `header`, which ends in a newline, ends in `\n\n<line>\n`
fn ends_with_resolution_line(header: &[u8]) -> bool {
    let body = &header[..header.len() - 1];

    match body.iter().rposition(|&c| c == b'\n') {
        // the line after the last newline must be non-empty
        // and that newline must itself terminate an empty line
        Some(pos) => pos + 1 < body.len() && pos > 0 && body[pos - 1] == b'\n',
        None => false
    }
}

fn parse_metadata(lines: &[&str]) -> BTreeMap<String, String> {
    lines
        .iter()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Parse `-Y <height> +X <width>`, the only supported orientation
fn parse_resolution(line: &str) -> Result<(usize, usize), HdrDecodeErrors> {
    let tokens: Vec<&str> = line.trim().split(' ').collect();

    match tokens.as_slice() {
        ["-Y", height, "+X", width] => Ok((width.parse()?, height.parse()?)),
        _ => Err(HdrDecodeErrors::UnsupportedFormat(format!(
            "resolution line `{}`, only `-Y <height> +X <width>` is supported",
            line.trim()
        )))
    }
}

/// Write the header for an image of the given size
///
/// Extra headers are written as `key=value` lines, keys the encoder
/// controls itself are skipped.
pub(crate) fn write_header(
    out: &mut Vec<u8>, width: usize, height: usize, extra: Option<&BTreeMap<String, String>>
) {
    out.extend_from_slice(RADIANCE_MAGIC);
    out.extend_from_slice(b"# Made with radiant-hdr\n");

    if let Some(headers) = extra {
        for (key, value) in headers {
            if RESERVED_KEYS.contains(&key.trim()) {
                warn!("Ignoring reserved header key {key}");
                continue;
            }
            out.extend_from_slice(format!("{key}={value}\n").as_bytes());
        }
    }
    out.extend_from_slice(b"FORMAT=32-bit_rle_rgbe\n");
    out.extend_from_slice(b"EXPOSURE=1.0\n\n");
    out.extend_from_slice(format!("-Y {height} +X {width}\n").as_bytes());
}
