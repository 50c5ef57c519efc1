/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte level checks against hand assembled radiance streams

use std::collections::BTreeMap;

use radiant_hdr::{decode, encode, HdrDecoder, HdrEncoder};

use crate::encoded_header;

/// R is constant, G ramps, B has two runs
fn ramp_row() -> Vec<f32> {
    (0..8)
        .flat_map(|x| [1.0, x as f32 / 8.0, if x < 3 { 0.25 } else { 0.75 }])
        .collect()
}

const RAMP_ROW_BYTES: [u8; 21] = [
    2, 2, 0, 8, // scanline header
    136, 128, // R: run of 8
    8, 0, 16, 32, 48, 64, 80, 96, 112, // G: dump of 8
    131, 32, 133, 96, // B: run of 3, run of 5
    136, 129 // E: run of 8
];

#[test]
fn rle_row_matches_reference_bytes() {
    let bytes = encode(8, 1, &ramp_row()).unwrap();
    let header = encoded_header(8, 1);

    assert_eq!(&bytes[..header.len()], &header[..]);
    assert_eq!(&bytes[header.len()..], &RAMP_ROW_BYTES[..]);
}

#[test]
fn reference_bytes_decode() {
    let mut bytes = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y 2 +X 8\n".to_vec();
    bytes.extend_from_slice(&RAMP_ROW_BYTES);
    bytes.extend_from_slice(&RAMP_ROW_BYTES);

    let raster = decode(&bytes).unwrap();
    let row = ramp_row();

    assert_eq!(&raster.data()[..24], &row[..]);
    assert_eq!(&raster.data()[24..], &row[..]);
}

#[test]
fn legacy_magic_decodes() {
    let mut bytes = b"#?RGBE\n# legacy writer\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 2\n".to_vec();
    bytes.extend_from_slice(&[128, 64, 32, 129, 1, 2, 3, 0]);

    let raster = decode(&bytes).unwrap();
    assert_eq!(raster.data(), &[1.0, 0.5, 0.25, 0.0, 0.0, 0.0]);
}

#[test]
fn header_values_are_kept() {
    let bytes = b"#?RADIANCE\nSOFTWARE=renderer 2.1\nFORMAT=32-bit_rle_rgbe\nPIXASPECT=1.0\n\n-Y 1 +X 1\n\x80\x80\x80\x81";
    let mut decoder = HdrDecoder::new(bytes);
    decoder.decode().unwrap();

    let expected: BTreeMap<String, String> = [
        ("SOFTWARE", "renderer 2.1"),
        ("FORMAT", "32-bit_rle_rgbe"),
        ("PIXASPECT", "1.0")
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    assert_eq!(decoder.metadata(), &expected);
}

#[test]
fn empty_images_encode_to_nothing() {
    assert!(encode(0, 0, &[]).unwrap().is_empty());
    assert!(encode(0, 5, &[]).unwrap().is_empty());
    assert!(encode(5, 5, &[]).unwrap().is_empty());
}

#[test]
fn user_headers_precede_format() {
    let mut headers = BTreeMap::new();
    headers.insert("GAMMA".to_string(), "2.2".to_string());
    headers.insert("EXPOSURE".to_string(), "4.0".to_string());

    let data = [1.0; 3];
    let mut encoder = HdrEncoder::new(&data, 1, 1);
    encoder.add_headers(&headers);
    let bytes = encoder.encode().unwrap();

    assert!(bytes.starts_with(
        b"#?RADIANCE\n# Made with radiant-hdr\nGAMMA=2.2\nFORMAT=32-bit_rle_rgbe\nEXPOSURE=1.0\n\n-Y 1 +X 1\n"
    ));
}
