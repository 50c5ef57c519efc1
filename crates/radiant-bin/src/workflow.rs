/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::write;
use std::path::Path;

use clap::ArgMatches;
use log::{debug, info, warn};

use crate::file_io::{load_raster, write_raster, NamedRaster, RasterSource};
use crate::global_options::CmdOptions;
use crate::probe::Metadata;

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), String> {
    info!("Creating workflows from input");

    let inputs: Vec<&String> = args
        .get_many::<String>("in")
        .map(Iterator::collect)
        .unwrap_or_default();
    let outputs: Vec<&String> = args
        .get_many::<String>("out")
        .map(Iterator::collect)
        .unwrap_or_default();

    if outputs.len() > inputs.len() {
        warn!(
            "{} outputs given for {} inputs, extra outputs are ignored",
            outputs.len(),
            inputs.len()
        );
    }

    for (position, in_file) in inputs.iter().enumerate() {
        let raster = load_raster(RasterSource::from_location(in_file)?)?;

        if cmd_opts.probe {
            let metadata = Metadata::new(in_file, raster.width, raster.height, &raster.metadata);
            let json = serde_json::to_string_pretty(&metadata).map_err(|err| err.to_string())?;
            println!("{json}");
        }

        let Some(out_file) = outputs.get(position) else {
            debug!("No output for {in_file}, skipping encode");
            continue;
        };
        let file = write_raster(&NamedRaster {
            rgb:    &raster.rgb,
            width:  raster.width,
            height: raster.height,
            name:   out_file
        })?;

        verify_file_path(&file.name, cmd_opts)?;

        write(&file.name, &file.bytes)
            .map_err(|err| format!("Could not write {}: {err}", file.name))?;

        info!("Wrote {} bytes to {}", file.bytes.len(), file.name);
    }
    Ok(())
}

fn verify_file_path(out_file: &str, cmd_opts: &CmdOptions) -> Result<(), String> {
    if Path::new(out_file).exists() {
        if !cmd_opts.override_files {
            return Err(format!(
                "Output file {out_file} exists, pass -y to overwrite it"
            ));
        }
        info!("Overwriting path {:?} ", out_file);
    }
    Ok(())
}
