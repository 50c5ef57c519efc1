/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What `--probe` prints for each input
pub struct Metadata<'a> {
    file:     &'a str,
    width:    usize,
    height:   usize,
    metadata: &'a BTreeMap<String, String>
}

impl<'a> Metadata<'a> {
    pub fn new(
        file: &'a str, width: usize, height: usize, metadata: &'a BTreeMap<String, String>
    ) -> Metadata<'a> {
        Metadata {
            file,
            width,
            height,
            metadata
        }
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ImageMetadata", 4)?;

        state.serialize_field("file", self.file)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("metadata", self.metadata)?;

        state.end()
    }
}
