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

    smartsave_core::host.rs

    Contracts for the collaborators the naming engine depends on: the host
    application that knows which scene is open, and the store that lists
    directories and writes scene files.

    FsSceneStore is the std::fs implementation used by the headless frontend.
    It has no idea what a scene contains; saving copies an opaque payload
    file to the resolved path.
*/

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::error::PersistError;

/// Query the host application for the path of the currently open scene.
pub trait CurrentFileQuery {
    /// The raw path of the open scene, or an empty string if there is none.
    fn current_file(&self) -> String;
}

impl CurrentFileQuery for str {
    fn current_file(&self) -> String {
        self.to_string()
    }
}

impl CurrentFileQuery for String {
    fn current_file(&self) -> String {
        self.clone()
    }
}

impl<P: AsRef<Path>> CurrentFileQuery for Option<P> {
    fn current_file(&self) -> String {
        self.as_ref()
            .map(|p| p.as_ref().to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Wraps a closure that asks the host application for the open scene.
pub struct HostQuery<F>(pub F);

impl<F> CurrentFileQuery for HostQuery<F>
where
    F: Fn() -> String,
{
    fn current_file(&self) -> String {
        (self.0)()
    }
}

/// The filesystem boundary. Implementors own all actual I/O.
pub trait SceneStore {
    /// List the file names in `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
    /// Write the current scene to `path`. Must report a missing parent directory as
    /// [PersistError::DirectoryMissing] so that the caller can create it and retry.
    fn persist_as(&mut self, path: &Path) -> Result<(), PersistError>;
    /// Create `dir` and any missing parents.
    fn create_dir_all(&mut self, dir: &Path) -> io::Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct FsSceneStore {
    source: Option<PathBuf>,
}

impl FsSceneStore {
    /// A store that writes empty scene files.
    pub fn new() -> Self {
        Self { source: None }
    }

    /// A store that saves by copying the scene at `source`.
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn write(&self, path: &Path) -> io::Result<()> {
        match &self.source {
            Some(source) => {
                if is_same_file(source, path) {
                    // Saving onto itself. Copying would truncate the source first.
                    log::debug!("persist_as(): {} is the open scene, nothing to copy", path.display());
                    return Ok(());
                }
                fs::copy(source, path).map(|_| ())
            }
            None => fs::File::create(path).map(|_| ()),
        }
    }
}

impl SceneStore for FsSceneStore {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn persist_as(&mut self, path: &Path) -> Result<(), PersistError> {
        match self.write(path) {
            Ok(()) => {
                log::debug!("persist_as(): wrote {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                    Err(PersistError::DirectoryMissing(parent.to_path_buf()))
                }
                _ => Err(PersistError::Io(e)),
            },
            Err(e) => Err(PersistError::Io(e)),
        }
    }

    fn create_dir_all(&mut self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_file_query_impls() {
        assert_eq!("scenes/ship_v001.ma".current_file(), "scenes/ship_v001.ma");
        assert_eq!(String::from("a.ma").current_file(), "a.ma");
        assert_eq!(Some(PathBuf::from("b_v002.ma")).current_file(), "b_v002.ma");
        assert_eq!(None::<PathBuf>.current_file(), "");
        assert_eq!(HostQuery(|| String::from("scenes/ship_v002.ma")).current_file(), "scenes/ship_v002.ma");
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["ship_v002.ma", "car_v001.ma", "ship_v001.ma"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let store = FsSceneStore::new();
        assert_eq!(
            store.list_dir(dir.path()).unwrap(),
            vec!["car_v001.ma", "ship_v001.ma", "ship_v002.ma"]
        );
    }

    #[test]
    fn list_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSceneStore::new();
        let err = store.list_dir(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn persist_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("a").join("b");
        let mut store = FsSceneStore::new();

        let err = store.persist_as(&missing.join("ship_v001.ma")).unwrap_err();
        assert!(err.is_directory_missing());

        store.create_dir_all(&missing).unwrap();
        store.persist_as(&missing.join("ship_v001.ma")).unwrap();
        assert!(missing.join("ship_v001.ma").is_file());
    }

    #[test]
    fn persist_copies_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("untitled.ma");
        fs::write(&source, b"//Maya ASCII scene").unwrap();

        let mut store = FsSceneStore::with_source(&source);
        let target = dir.path().join("ship_v001.ma");
        store.persist_as(&target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"//Maya ASCII scene");

        // Saving onto the source leaves it intact.
        store.persist_as(&source).unwrap();
        assert_eq!(fs::read(&source).unwrap(), b"//Maya ASCII scene");
    }

    #[test]
    fn persist_missing_source_is_not_directory_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsSceneStore::with_source(dir.path().join("gone.ma"));

        let err = store.persist_as(&dir.path().join("ship_v001.ma")).unwrap_err();
        assert!(!err.is_directory_missing());
    }
}
