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

    smartsave_core::scene_file.rs

    Implements SceneFile, the value object describing a versioned scene file:
    directory, descriptor, version and extension.

    A canonical scene filename looks like 'ship_v003.ma'. The version is
    always written with at least three digits but any number of digits is
    accepted when reading a name back.
*/

use std::{
    fmt::{self, Display},
    path::PathBuf,
};

use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::Deserialize;

use crate::{
    error::SaveError,
    host::{CurrentFileQuery, SceneStore},
    path::{extract_num, highest_version, next_version, split_path},
};

lazy_static! {
    /// descriptor, '_v', digits, '.', lowercase extension. Anchored at the start only.
    static ref VERSIONED_NAME: Regex = Regex::new(r"^[a-zA-Z]+_v[0-9]+\.[a-z]+").unwrap();
}

fn default_descriptor() -> String {
    "main".to_string()
}
const fn default_version() -> u32 {
    1
}
fn default_extension() -> String {
    "ma".to_string()
}

/// Values used when there is no open scene, or its name isn't a versioned name.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SceneFileDefaults {
    #[serde(default)]
    pub directory:  PathBuf,
    #[serde(default = "default_descriptor")]
    pub descriptor: String,
    #[serde(default = "default_version")]
    pub version:    u32,
    #[serde(default = "default_extension")]
    pub extension:  String,
}

impl Default for SceneFileDefaults {
    fn default() -> Self {
        Self {
            directory:  PathBuf::new(),
            descriptor: default_descriptor(),
            version:    default_version(),
            extension:  default_extension(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneFile {
    pub directory:  PathBuf,
    pub descriptor: String,
    pub version:    u32,
    pub extension:  String,
}

impl Default for SceneFile {
    fn default() -> Self {
        SceneFile::new(SceneFileDefaults::default())
    }
}

impl From<SceneFileDefaults> for SceneFile {
    fn from(defaults: SceneFileDefaults) -> Self {
        SceneFile::new(defaults)
    }
}

impl SceneFile {
    pub fn new(defaults: SceneFileDefaults) -> Self {
        Self {
            directory:  defaults.directory,
            descriptor: defaults.descriptor,
            version:    defaults.version,
            extension:  defaults.extension,
        }
    }

    /// Build a [SceneFile] from the path of the currently open scene.
    ///
    /// If the file name is a versioned name, all four fields are taken from it. Otherwise,
    /// including when `current_path` is empty, `defaults` is used as-is.
    pub fn parse(current_path: &str, defaults: SceneFileDefaults) -> Self {
        let (directory, file_name) = split_path(current_path);

        if !VERSIONED_NAME.is_match(&file_name) {
            log::debug!(
                "SceneFile::parse(): '{}' is not a versioned name, using defaults",
                file_name
            );
            return SceneFile::new(defaults);
        }

        // The pattern guarantees a '_' and a '.' after it, so both splits have a second part.
        let mut parts = file_name.split('_');
        let descriptor = parts.next().unwrap_or_default();
        let mut remainder = parts.next().unwrap_or_default().split('.');
        let version_token = remainder.next().unwrap_or_default();
        let extension = remainder.next().unwrap_or_default();

        let scene = Self {
            directory,
            descriptor: descriptor.to_string(),
            version: extract_num(version_token),
            extension: extension.to_string(),
        };
        log::debug!("SceneFile::parse(): parsed '{}' as {:?}", current_path, scene);
        scene
    }

    /// Build a [SceneFile] from whatever scene the host application has open.
    pub fn from_host<Q>(query: &Q, defaults: SceneFileDefaults) -> Self
    where
        Q: CurrentFileQuery + ?Sized,
    {
        SceneFile::parse(&query.current_file(), defaults)
    }

    /// The canonical file name, e.g. `ship_v003.ma`.
    pub fn basename(&self) -> String {
        format!("{}_v{:03}.{}", self.descriptor, self.version, self.extension)
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(self.basename())
    }

    /// Save the scene to [SceneFile::path].
    ///
    /// If the store reports that the target directory is missing, the directory is created and
    /// the save is attempted exactly once more. Any other failure, or a failure of the second
    /// attempt, is returned unmodified.
    pub fn save<S>(&self, store: &mut S) -> Result<PathBuf, SaveError>
    where
        S: SceneStore + ?Sized,
    {
        let path = self.path();

        match store.persist_as(&path) {
            Ok(()) => {}
            Err(e) if e.is_directory_missing() => {
                log::warn!("Directory {} missing. Generating new directory...", self.directory.display());
                store
                    .create_dir_all(&self.directory)
                    .map_err(|source| SaveError::CreateDirectory {
                        dir: self.directory.clone(),
                        source,
                    })?;
                store.persist_as(&path)?;
            }
            Err(e) => return Err(e.into()),
        }

        log::info!("Saved scene file: {}", path.display());
        Ok(path)
    }

    /// The version [SceneFile::increment_and_save] would use: one past the highest version of
    /// this descriptor found in [SceneFile::directory], or 1 if there is none.
    pub fn next_free_version<S>(&self, store: &S) -> Result<u32, SaveError>
    where
        S: SceneStore + ?Sized,
    {
        let names = store
            .list_dir(&self.directory)
            .map_err(|source| SaveError::ListDirectory {
                dir: self.directory.clone(),
                source,
            })?;

        Ok(next_version(highest_version(&names, &self.descriptor)))
    }

    /// Bump the version past every existing file of this descriptor, then save.
    pub fn increment_and_save<S>(&mut self, store: &mut S) -> Result<PathBuf, SaveError>
    where
        S: SceneStore + ?Sized,
    {
        self.version = self.next_free_version(&*store)?;
        log::debug!("increment_and_save(): saving {} as version {}", self.descriptor, self.version);
        self.save(store)
    }
}

impl Display for SceneFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::PersistError, host::HostQuery};
    use std::{
        collections::{BTreeMap, BTreeSet},
        io,
        path::Path,
    };

    /// In-memory store. `fail_after_create` makes the retry fail too.
    #[derive(Default)]
    struct MemoryStore {
        dirs: BTreeSet<PathBuf>,
        files: BTreeMap<PathBuf, Vec<String>>,
        persist_calls: usize,
        created: Vec<PathBuf>,
        fail_after_create: bool,
        deny_writes: bool,
    }

    impl MemoryStore {
        fn with_dir(dir: &str, names: &[&str]) -> Self {
            let mut store = MemoryStore::default();
            store.dirs.insert(PathBuf::from(dir));
            store
                .files
                .insert(PathBuf::from(dir), names.iter().map(|n| n.to_string()).collect());
            store
        }
    }

    impl SceneStore for MemoryStore {
        fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
            self.files
                .get(dir)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
        }

        fn persist_as(&mut self, path: &Path) -> Result<(), PersistError> {
            self.persist_calls += 1;
            if self.deny_writes {
                return Err(PersistError::Io(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
            if !self.dirs.contains(&dir) || (self.fail_after_create && !self.created.is_empty()) {
                return Err(PersistError::DirectoryMissing(dir));
            }
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.files.entry(dir).or_default().push(name);
            Ok(())
        }

        fn create_dir_all(&mut self, dir: &Path) -> io::Result<()> {
            self.created.push(dir.to_path_buf());
            self.dirs.insert(dir.to_path_buf());
            Ok(())
        }
    }

    fn scene(dir: &str, descriptor: &str, version: u32, extension: &str) -> SceneFile {
        SceneFile {
            directory:  PathBuf::from(dir),
            descriptor: descriptor.to_string(),
            version,
            extension:  extension.to_string(),
        }
    }

    #[test]
    fn basename_pads_to_three_digits() {
        assert_eq!(scene("", "x", 7, "ma").basename(), "x_v007.ma");
        assert_eq!(scene("", "x", 1234, "ma").basename(), "x_v1234.ma");
        assert_eq!(scene("", "ship", 0, "mb").basename(), "ship_v000.mb");
    }

    #[test]
    fn path_joins_directory() {
        assert_eq!(scene("", "ship", 3, "ma").path(), PathBuf::from("ship_v003.ma"));
        assert_eq!(
            scene("scenes/ship", "ship", 3, "ma").path(),
            PathBuf::from("scenes/ship/ship_v003.ma")
        );
        assert_eq!(scene("scenes", "ship", 3, "ma").to_string(), PathBuf::from("scenes/ship_v003.ma").display().to_string());
    }

    #[test]
    fn parse_versioned_name() {
        let parsed = SceneFile::parse("main_v001.ma", SceneFileDefaults::default());
        assert_eq!(parsed, scene("", "main", 1, "ma"));

        let parsed = SceneFile::parse("/work/shots/./ship_v0042.mb", SceneFileDefaults::default());
        assert_eq!(parsed, scene("/work/shots", "ship", 42, "mb"));
    }

    #[test]
    fn parse_falls_back_to_defaults() {
        let defaults = SceneFileDefaults {
            directory:  PathBuf::from("scenes"),
            descriptor: "car".to_string(),
            version:    4,
            extension:  "mb".to_string(),
        };

        for current in ["", "randomfile.txt", "ship_v001.MA", "ship_001.ma", "sh1p_v001.ma", "ship_v.ma"] {
            assert_eq!(SceneFile::parse(current, defaults.clone()), SceneFile::new(defaults.clone()));
        }
        assert_eq!(SceneFile::parse("", SceneFileDefaults::default()), scene("", "main", 1, "ma"));
    }

    #[test]
    fn parse_matches_prefix_only() {
        let parsed = SceneFile::parse("ship_v002.ma.bak", SceneFileDefaults::default());
        assert_eq!(parsed, scene("", "ship", 2, "ma"));
    }

    #[test]
    fn parse_round_trips_basename() {
        for (descriptor, version, extension) in [("ship", 1, "ma"), ("Car", 17, "mb"), ("envLayout", 1234, "ma")] {
            let original = scene("proj/scenes", descriptor, version, extension);
            let parsed = SceneFile::parse(&original.path().to_string_lossy(), SceneFileDefaults::default());
            assert_eq!(parsed, original);
        }
    }

    #[test]
    fn from_host_uses_query() {
        let open: Option<PathBuf> = Some(PathBuf::from("scenes/ship_v005.ma"));
        assert_eq!(
            SceneFile::from_host(&open, SceneFileDefaults::default()),
            scene("scenes", "ship", 5, "ma")
        );
        assert_eq!(SceneFile::from_host("", SceneFileDefaults::default()), SceneFile::default());
    }

    #[test]
    fn from_host_closure() {
        let open_scene = String::from("/work/shots/car_v012.mb");
        let query = HostQuery(|| open_scene.clone());
        assert_eq!(
            SceneFile::from_host(&query, SceneFileDefaults::default()),
            scene("/work/shots", "car", 12, "mb")
        );

        let nothing_open = HostQuery(String::new);
        assert_eq!(SceneFile::from_host(&nothing_open, SceneFileDefaults::default()), SceneFile::default());
    }

    #[test]
    fn save_writes_path() {
        let mut store = MemoryStore::with_dir("scenes", &[]);
        let path = scene("scenes", "ship", 2, "ma").save(&mut store).unwrap();

        assert_eq!(path, PathBuf::from("scenes/ship_v002.ma"));
        assert_eq!(store.persist_calls, 1);
        assert!(store.created.is_empty());
    }

    #[test]
    fn save_creates_missing_directory_and_retries_once() {
        let mut store = MemoryStore::default();
        let path = scene("new/dir", "ship", 1, "ma").save(&mut store).unwrap();

        assert_eq!(path, PathBuf::from("new/dir/ship_v001.ma"));
        assert_eq!(store.created, vec![PathBuf::from("new/dir")]);
        assert_eq!(store.persist_calls, 2);
        assert_eq!(store.list_dir(Path::new("new/dir")).unwrap(), vec!["ship_v001.ma"]);
    }

    #[test]
    fn save_gives_up_after_second_failure() {
        let mut store = MemoryStore {
            fail_after_create: true,
            ..Default::default()
        };
        let err = scene("new/dir", "ship", 1, "ma").save(&mut store).unwrap_err();

        assert!(matches!(err, SaveError::Persist(PersistError::DirectoryMissing(_))));
        assert_eq!(store.persist_calls, 2);
        assert_eq!(store.created.len(), 1);
    }

    #[test]
    fn save_surfaces_other_failures() {
        let mut store = MemoryStore {
            deny_writes: true,
            ..MemoryStore::with_dir("scenes", &[])
        };
        let err = scene("scenes", "ship", 1, "ma").save(&mut store).unwrap_err();

        assert!(matches!(err, SaveError::Persist(PersistError::Io(_))));
        assert_eq!(store.persist_calls, 1);
        assert!(store.created.is_empty());
    }

    #[test]
    fn increment_and_save_starts_at_one() {
        let mut store = MemoryStore::with_dir("scenes", &["car_v004.ma", "notes.txt"]);
        let mut ship = scene("scenes", "ship", 9, "ma");

        let path = ship.increment_and_save(&mut store).unwrap();
        assert_eq!(ship.version, 1);
        assert_eq!(path, PathBuf::from("scenes/ship_v001.ma"));
    }

    #[test]
    fn increment_and_save_bumps_highest() {
        let mut store = MemoryStore::with_dir("scenes", &["ship_v001.ma", "ship_v005.ma", "car_v009.ma"]);
        let mut ship = scene("scenes", "ship", 1, "ma");

        assert_eq!(ship.next_free_version(&store).unwrap(), 6);
        let path = ship.increment_and_save(&mut store).unwrap();
        assert_eq!(ship.version, 6);
        assert_eq!(path, PathBuf::from("scenes/ship_v006.ma"));

        ship.increment_and_save(&mut store).unwrap();
        assert_eq!(ship.version, 7);
    }

    #[test]
    fn increment_and_save_needs_listing() {
        let mut store = MemoryStore::default();
        let mut ship = scene("missing", "ship", 1, "ma");

        let err = ship.increment_and_save(&mut store).unwrap_err();
        assert!(matches!(err, SaveError::ListDirectory { .. }));
        assert_eq!(ship.version, 1);
        assert_eq!(store.persist_calls, 0);
    }

    #[test]
    fn save_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("shots").join("sh010");
        let mut store = crate::host::FsSceneStore::new();

        let mut ship = SceneFile {
            directory: target.clone(),
            ..SceneFile::parse("ship_v003.ma", SceneFileDefaults::default())
        };
        ship.save(&mut store).unwrap();
        assert!(target.join("ship_v003.ma").is_file());

        ship.increment_and_save(&mut store).unwrap();
        assert!(target.join("ship_v004.ma").is_file());
    }
}
