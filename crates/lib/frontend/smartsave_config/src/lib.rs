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

//! The `smartsave_config` crate parses SmartSave's configuration file and overlays command line
//! arguments on top of it. Command line arguments always take priority over the configuration
//! file.
//!
//! The configuration supplies three things:
//! - the fallback values used when the open scene isn't a versioned file (`[defaults]`),
//! - the session: which scene is open and what gets written on save (`[session]`),
//! - the form: field edits made before saving, which only come from the command line.
//!
//! Features:
//! - `use_bpaf`: Read command line arguments. Without it only the configuration file is used.

mod bpaf_config;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

#[cfg(any(feature = "use_bpaf", test))]
use bpaf_config::cli_args;
pub use bpaf_config::CmdLineArgs;

use cfg_if::cfg_if;
use serde_derive::Deserialize;
use smartsave_core::SceneFileDefaults;
use strum_macros::Display;

/// What to do with the scene once the form is filled in.
#[derive(Copy, Clone, Debug, Default, Deserialize, Display, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Save at the current field values.
    #[default]
    Save,
    /// Save as one past the highest existing version of the descriptor.
    IncrementAndSave,
    /// Resolve the path an increment would use, without saving.
    Preview,
}

impl FromStr for Action {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "save" => Ok(Action::Save),
            "increment" | "increment_and_save" => Ok(Action::IncrementAndSave),
            "preview" => Ok(Action::Preview),
            _ => Err("Bad value for action".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Session {
    /// Stands in for the host application's currently open scene.
    pub current_file: Option<PathBuf>,
    /// Scene contents to write on save. Empty files are written when unset.
    pub source_file: Option<PathBuf>,
    #[serde(default)]
    pub action: Action,
}

/// Field edits applied to the scene after it has been built from the open file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub directory:  Option<PathBuf>,
    pub descriptor: Option<String>,
    pub version:    Option<u32>,
    pub extension:  Option<String>,
}

impl FormFields {
    pub fn is_empty(&self) -> bool {
        *self == FormFields::default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFileParams {
    #[serde(default)]
    pub defaults: SceneFileDefaults,
    #[serde(default)]
    pub session:  Session,
    #[serde(skip)]
    pub form:     FormFields,
}

impl ConfigFileParams {
    pub fn action(&self) -> Action {
        self.session.action
    }

    pub fn overlay(&mut self, shell_args: CmdLineArgs) {
        if let Some(current_file) = shell_args.current_file {
            self.session.current_file = Some(current_file);
        }
        if let Some(source_file) = shell_args.source_file {
            self.session.source_file = Some(source_file);
        }

        self.form = FormFields {
            directory:  shell_args.directory,
            descriptor: shell_args.descriptor,
            version:    shell_args.version,
            extension:  shell_args.extension,
        };

        if let Some(action) = shell_args.action {
            self.session.action = action;
        }

        // The switches win over --action. Preview wins if both are given; it never writes anything.
        if shell_args.preview {
            self.session.action = Action::Preview;
        }
        else if shell_args.increment {
            self.session.action = Action::IncrementAndSave;
        }
    }
}

pub fn read_config(toml_string: impl AsRef<str>, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error> {
    let mut toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;

    log::debug!("toml_config: {:?}", toml_args);

    // Command line arguments override config file arguments
    toml_args.overlay(shell_args);

    Ok(toml_args)
}

/// Read the command line, or return empty arguments if command line reading is disabled.
pub fn read_shell_args() -> CmdLineArgs {
    cfg_if! {
        if #[cfg(feature = "use_bpaf")] {
            log::debug!("Reading command line arguments...");
            cli_args().run()
        } else {
            log::debug!("Argument reading disabled...");
            CmdLineArgs::default()
        }
    }
}

/// Read the TOML configuration from a file path, parse and overlay command line arguments.
pub fn read_config_file<P>(default_path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    read_config_file_with_args(default_path, read_shell_args())
}

/// Read the TOML configuration and overlay the provided arguments.
///
/// A configuration file named with `config_file` must exist. The default path is optional: if
/// it doesn't exist, built-in defaults are used.
pub fn read_config_file_with_args<P>(default_path: P, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    // Allow configuration file path to be overridden by command line argument 'config_file'
    let toml_string = if let Some(configfile_path) = shell_args.config_file.as_ref() {
        std::fs::read_to_string(configfile_path)?
    }
    else {
        match std::fs::read_to_string(default_path.as_ref()) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "No configuration file at {}, using built-in defaults",
                    default_path.as_ref().display()
                );
                String::new()
            }
            Err(e) => return Err(e.into()),
        }
    };

    read_config(toml_string, shell_args)
}
