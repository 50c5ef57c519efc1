/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use radiant_hdr::{decode, HdrDecodeErrors, HdrDecoder, MAX_HEADER_SIZE};
use zune_core::options::DecoderOptions;

fn header(width: usize, height: usize) -> Vec<u8> {
    format!("#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y {height} +X {width}\n").into_bytes()
}

#[test]
fn corrupt_magic() {
    for start in [
        &b"P6\n1 1\n255\n"[..],
        b"#?RADIANCE",
        b"#?radiance\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 1\n",
        b" #?RGBE\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 1\n",
        b""
    ] {
        assert!(matches!(decode(start), Err(HdrDecodeErrors::CorruptMagic)));
    }
}

#[test]
fn header_without_terminator() {
    let mut bytes = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n".to_vec();
    bytes.resize(MAX_HEADER_SIZE + 100, b'#');

    assert!(matches!(
        decode(&bytes),
        Err(HdrDecodeErrors::HeaderTooLarge(MAX_HEADER_SIZE))
    ));
}

#[test]
fn header_limit_is_configurable() {
    let bytes = b"#?RADIANCE\n# a comment that is long enough\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 1\n";
    let mut decoder = HdrDecoder::new(bytes);
    decoder.set_max_header_size(32);

    assert!(matches!(decoder.decode(), Err(HdrDecodeErrors::HeaderTooLarge(32))));
}

#[test]
fn dimension_limits_come_from_decoder_options() {
    let bytes = header(100, 10);
    let options = DecoderOptions::default().set_max_height(8);

    assert!(matches!(
        HdrDecoder::new_with_options(&bytes, options).decode(),
        Err(HdrDecodeErrors::DimensionTooLarge("height", 8, 10))
    ));
}

#[test]
fn unsupported_format_and_orientation() {
    let cases: [&[u8]; 3] = [
        b"#?RADIANCE\nFORMAT=32-bit_rle_xyze\n\n-Y 1 +X 1\n",
        b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n+X 1 -Y 1\n",
        b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n+Y 1 +X 1\n"
    ];
    for bytes in cases {
        assert!(matches!(decode(bytes), Err(HdrDecodeErrors::UnsupportedFormat(_))));
    }
}

#[test]
fn oversized_dimensions() {
    assert!(matches!(
        decode(&header(1, (1 << 24) + 1)),
        Err(HdrDecodeErrors::DimensionTooLarge("height", 16777216, 16777217))
    ));
    // right at the limit passes the header, then runs out of data
    assert!(matches!(
        decode(&header(1 << 24, 1 << 24)),
        Err(HdrDecodeErrors::UnexpectedEof(..))
    ));
}

#[test]
fn scanline_length_mismatch() {
    let mut bytes = header(12, 1);
    bytes.extend_from_slice(&[2, 2, 0, 10]);
    bytes.extend_from_slice(&[0x88; 60]);

    assert!(matches!(
        decode(&bytes),
        Err(HdrDecodeErrors::InvalidScanlineHeader([2, 2, 0, 10], 12))
    ));
}

#[test]
fn later_scanline_header_is_checked() {
    let row = [2, 2, 0, 8, 136, 128, 136, 128, 136, 128, 136, 129];
    let mut bytes = header(8, 2);
    bytes.extend_from_slice(&row);
    bytes.extend_from_slice(&[2, 2, 0x80, 8]);
    bytes.extend_from_slice(&row[4..]);

    assert!(matches!(
        decode(&bytes),
        Err(HdrDecodeErrors::InvalidScanlineHeader([2, 2, 0x80, 8], 8))
    ));
}

#[test]
fn runs_past_the_plane_are_rejected() {
    let mut bytes = header(8, 1);
    bytes.extend_from_slice(&[2, 2, 0, 8]);
    // R is fine, G dumps 4 and then asks to dump 5 more
    bytes.extend_from_slice(&[136, 1]);
    bytes.extend_from_slice(&[4, 1, 2, 3, 4, 5, 1, 2, 3, 4, 5]);
    bytes.extend_from_slice(&[136, 1, 136, 1]);

    assert!(matches!(
        decode(&bytes),
        Err(HdrDecodeErrors::BadRleData { row: 0, plane: 1 })
    ));
}

#[test]
fn truncated_scanline_data() {
    let mut bytes = header(8, 1);
    bytes.extend_from_slice(&[2, 2, 0, 8]);
    // dump of 8 with only 7 bytes following
    bytes.extend_from_slice(&[8, 1, 2, 3, 4, 5, 6, 7]);

    assert!(matches!(
        decode(&bytes),
        Err(HdrDecodeErrors::UnexpectedEof(8, 7))
    ));
}

#[test]
fn truncated_flat_data() {
    let mut bytes = header(2, 2);
    bytes.extend_from_slice(&[128; 12]);

    assert!(matches!(decode(&bytes), Err(HdrDecodeErrors::UnexpectedEof(16, 12))));
}

#[test]
fn errors_describe_themselves() {
    let err = decode(b"nope").unwrap_err();
    let boxed: Box<dyn std::error::Error> = Box::new(err);

    assert!(boxed.to_string().contains("#?RADIANCE"));
}
