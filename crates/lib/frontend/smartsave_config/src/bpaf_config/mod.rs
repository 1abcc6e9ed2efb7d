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

    smartsave_config::bpaf_config/mod.rs

    Command line arguments. Every field is optional and overrides the
    matching configuration file setting.
*/

use std::path::PathBuf;

use crate::Action;

use bpaf::Bpaf;

#[derive(Bpaf, Debug, Default)]
#[bpaf(options, generate(cli_args))]
pub struct CmdLineArgs {
    /// Path to a configuration file to use instead of smartsave.toml
    #[bpaf(long("config_file"), long("configfile"))]
    pub config_file: Option<PathBuf>,

    /// Path of the currently open scene
    #[bpaf(long("current_file"), long("currentfile"))]
    pub current_file: Option<PathBuf>,

    /// Scene file whose contents are written on save
    #[bpaf(long("source_file"), long("sourcefile"))]
    pub source_file: Option<PathBuf>,

    // Form fields
    /// Directory to save into
    #[bpaf(long("dir"), long("directory"))]
    pub directory: Option<PathBuf>,

    /// Short name of the scene, e.g. 'ship'
    #[bpaf(long)]
    pub descriptor: Option<String>,

    /// Version number to save as
    #[bpaf(long)]
    pub version: Option<u32>,

    /// File extension without the leading dot
    #[bpaf(long("ext"), long("extension"))]
    pub extension: Option<String>,

    // Actions
    /// Action to run: save, increment or preview
    #[bpaf(long)]
    pub action: Option<Action>,

    /// Save as one past the highest existing version
    #[bpaf(long, switch)]
    pub increment: bool,

    /// Print the next free path without saving
    #[bpaf(long, switch)]
    pub preview: bool,
}
