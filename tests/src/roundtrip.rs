/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use radiant_hdr::{decode, encode, HdrDecoder, HdrEncoder, Raster};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::{assert_close, encoded_header, hash, synthetic_image};

#[test]
fn rle_widths_round_trip() {
    for width in [8, 9, 31, 127, 128, 129, 300, 1024] {
        let height = 3;
        let data = synthetic_image(width, height);

        let bytes = encode(width, height, &data).unwrap();
        let pixels = &bytes[encoded_header(width, height).len()..];
        // every row starts with a scanline header
        assert_eq!(&pixels[..4], &[2, 2, (width >> 8) as u8, (width & 255) as u8]);

        let raster = decode(&bytes).unwrap();
        assert_eq!((raster.width(), raster.height()), (width, height));
        assert_close(&data, raster.data());
    }
}

#[test]
fn flat_widths_emit_four_bytes_per_pixel() {
    for (width, height) in [(1, 1), (3, 5), (7, 2), (32768, 1)] {
        let data = synthetic_image(width, height);
        let bytes = encode(width, height, &data).unwrap();

        let header = encoded_header(width, height);
        assert!(bytes.starts_with(&header));
        assert_eq!(bytes.len() - header.len(), width * height * 4);

        let raster = decode(&bytes).unwrap();
        assert_close(&data, raster.data());
    }
}

#[test]
fn widest_rle_row() {
    let width = 32767;
    let data = synthetic_image(width, 1);
    let bytes = encode(width, 1, &data).unwrap();

    let pixels = &bytes[encoded_header(width, 1).len()..];
    assert_eq!(&pixels[..4], &[2, 2, 0x7f, 0xff]);
    assert_close(&data, decode(&bytes).unwrap().data());
}

#[test]
fn reencoding_is_stable() {
    // after one trip through RGBE the values are exactly representable
    let data = synthetic_image(64, 16);
    let first = encode(64, 16, &data).unwrap();

    let decoded = decode(&first).unwrap();
    let second = decoded.encode().unwrap();

    assert_eq!(hash(&first), hash(&second));
    assert_eq!(decode(&second).unwrap(), decoded);
}

#[test]
fn decoder_reports_image_info() {
    let data = synthetic_image(20, 4);
    let bytes = encode(20, 4, &data).unwrap();

    let mut decoder = HdrDecoder::new(&bytes);
    assert_eq!(decoder.dimensions(), None);

    decoder.decode_headers().unwrap();
    assert_eq!(decoder.dimensions(), Some((20, 4)));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(decoder.depth(), Some(BitDepth::Float32));
    assert_eq!(decoder.output_buffer_size(), Some(20 * 4 * 3));
    assert_eq!(decoder.metadata().get("EXPOSURE").map(String::as_str), Some("1.0"));

    let mut out = vec![0.0; decoder.output_buffer_size().unwrap()];
    decoder.decode_into(&mut out).unwrap();
    assert_close(&data, &out);
}

#[test]
fn raster_api_round_trip() {
    let raster = Raster::new(9, 2, synthetic_image(9, 2)).unwrap();
    let bytes = raster.encode().unwrap();

    assert_eq!(bytes, HdrEncoder::new(raster.data(), 9, 2).encode().unwrap());

    let (width, height, data) = decode(&bytes).unwrap().into_parts();
    assert_eq!((width, height), (9, 2));
    assert_close(raster.data(), &data);
}
