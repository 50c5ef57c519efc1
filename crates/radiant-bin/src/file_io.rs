/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Loading and saving rasters
//!
//! Failures are reported as plain strings.

use std::collections::BTreeMap;
use std::fs::read;
use std::path::{Path, PathBuf};

use log::{debug, info};
use radiant_hdr::{HdrDecoder, HdrEncoder};

/// Where a raster comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterSource {
    Path(PathBuf),
    Buffer(Vec<u8>)
}

impl RasterSource {
    /// Interpret a location typed by a user, either a path or a
    /// `file://` URL. Network URLs are refused.
    pub fn from_location(location: &str) -> Result<RasterSource, String> {
        if let Some(path) = location.strip_prefix("file://") {
            return Ok(RasterSource::Path(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = location.split_once("://") {
            return Err(format!("Cannot load {location}, {scheme} URLs are not supported"));
        }
        Ok(RasterSource::Path(PathBuf::from(location)))
    }
}

/// A decoded raster and the header metadata it came with
#[derive(Debug, Clone)]
pub struct LoadedRaster {
    pub rgb:      Vec<f32>,
    pub width:    usize,
    pub height:   usize,
    pub metadata: BTreeMap<String, String>
}

pub fn load_raster(source: RasterSource) -> Result<LoadedRaster, String> {
    let bytes = match source {
        RasterSource::Path(path) => {
            info!("Reading {:?} to memory", path);
            read(&path).map_err(|err| format!("Could not read {}: {err}", path.display()))?
        }
        RasterSource::Buffer(bytes) => bytes
    };
    let mut decoder = HdrDecoder::new(&bytes);
    let rgb = decoder.decode().map_err(|err| err.to_string())?;

    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| "Image headers were not decoded".to_string())?;

    debug!("Decoded {width}x{height} image");

    Ok(LoadedRaster {
        rgb,
        width,
        height,
        metadata: decoder.metadata().clone()
    })
}

/// A raster to be saved under `name`
pub struct NamedRaster<'a> {
    pub rgb:    &'a [f32],
    pub width:  usize,
    pub height: usize,
    pub name:   &'a str
}

/// Encoded bytes ready to be saved or offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFile {
    pub name:  String,
    pub bytes: Vec<u8>
}

/// Encode a raster, giving the file name an `.hdr` extension if it has none
pub fn write_raster(raster: &NamedRaster) -> Result<RasterFile, String> {
    let bytes = HdrEncoder::new(raster.rgb, raster.width, raster.height)
        .encode()
        .map_err(|err| err.to_string())?;

    Ok(RasterFile {
        name: hdr_file_name(raster.name),
        bytes
    })
}

fn hdr_file_name(name: &str) -> String {
    let has_extension = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hdr") || ext.eq_ignore_ascii_case("pic"));

    if has_extension {
        name.to_string()
    } else {
        format!("{name}.hdr")
    }
}
