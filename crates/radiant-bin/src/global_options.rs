/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub probe:          bool,
    pub override_files: bool
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let cmd_options = CmdOptions {
        probe:          options.get_flag("probe"),
        override_files: options.get_flag("yes")
    };
    if cmd_options.override_files {
        info!("Setting all commands to yes");
    }
    cmd_options
}

/// Pick the log level from the logging flags, most verbose wins
pub fn log_level(options: &ArgMatches) -> Level {
    if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = log_level(options);

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
