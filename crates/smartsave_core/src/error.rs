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

    smartsave_core::error.rs

    Error types for the save path. Parsing and formatting never fail, so
    only persisting a scene file and reading a directory can produce these.
*/

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure reported by [crate::SceneStore::persist_as].
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Target directory does not exist: {0}")]
    DirectoryMissing(PathBuf),
    #[error("Failed to write scene file: {0}")]
    Io(#[from] io::Error),
}

impl PersistError {
    pub fn is_directory_missing(&self) -> bool {
        matches!(self, PersistError::DirectoryMissing(_))
    }
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to create directory {dir}: {source}")]
    CreateDirectory {
        dir:    PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to list directory {dir}: {source}")]
    ListDirectory {
        dir:    PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Persist(#[from] PersistError),
}
