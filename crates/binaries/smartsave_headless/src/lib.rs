/*
    SmartSave

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/

//! SmartSave headless front-end main library component.

#![forbid(unsafe_code)]

mod session;

pub use session::{apply_form, build_scene, run_action};

use colored::Colorize;
use smartsave_config::Action;
use smartsave_core::FsSceneStore;

pub const DEFAULT_CONFIG_FILE: &str = "./smartsave.toml";

pub fn run() {
    env_logger::init();

    // Resolve the configuration by parsing the configuration toml, if there is one, and merging it
    // with command line arguments.
    let config = match smartsave_config::read_config_file(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => match e.downcast_ref::<std::io::Error>() {
            Some(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("Configuration file not found! Check the path given with --config_file.");
                std::process::exit(1);
            }
            Some(e) => {
                eprintln!("Unknown IO error reading configuration file:\n{}", e);
                std::process::exit(1);
            }
            None => {
                eprintln!(
                    "Failed to parse configuration file. There may be a typo or otherwise invalid toml:\n{}",
                    e
                );
                std::process::exit(1);
            }
        },
    };

    let mut scene = build_scene(&config);
    let mut store = match &config.session.source_file {
        Some(source) => FsSceneStore::with_source(source),
        None => FsSceneStore::new(),
    };

    let action = config.action();
    log::debug!("Running action {} on {}", action, scene);

    match run_action(action, &mut scene, &mut store) {
        Ok(path) => match action {
            Action::Preview => println!("{} {}", "Next version:".cyan(), path.display()),
            _ => println!("{} {}", "Saved:".green(), path.display()),
        },
        Err(e) => {
            log::error!("{} failed for {}: {}", action, scene, e);
            eprintln!("{} {:#}", "Save failed:".red(), e);
            std::process::exit(1);
        }
    }
}
