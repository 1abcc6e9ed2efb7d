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

    smartsave_headless::session.rs

    Applies the form fields to a scene and runs the chosen action against a
    scene store. This is everything the save dialog does, minus the dialog.
*/

use std::path::PathBuf;

use anyhow::Error;
use smartsave_config::{Action, ConfigFileParams, FormFields};
use smartsave_core::{SceneFile, SceneStore};

/// Copy every field that was filled in onto the scene. Unset fields keep the scene's value.
pub fn apply_form(scene: &mut SceneFile, form: &FormFields) {
    if let Some(directory) = &form.directory {
        scene.directory = directory.clone();
    }
    if let Some(descriptor) = &form.descriptor {
        scene.descriptor = descriptor.clone();
    }
    if let Some(version) = form.version {
        scene.version = version;
    }
    if let Some(extension) = &form.extension {
        scene.extension = extension.clone();
    }
}

/// Build the scene for this session: parse the open file (or fall back to the configured
/// defaults), then apply the form.
pub fn build_scene(config: &ConfigFileParams) -> SceneFile {
    let mut scene = SceneFile::from_host(&config.session.current_file, config.defaults.clone());
    apply_form(&mut scene, &config.form);
    scene
}

/// Run `action` on `scene`. Returns the path that was saved, or for [Action::Preview], the path
/// that an increment would save to.
pub fn run_action<S>(action: Action, scene: &mut SceneFile, store: &mut S) -> Result<PathBuf, Error>
where
    S: SceneStore,
{
    log::debug!("run_action(): {} {:?}", action, scene);

    let path = match action {
        Action::Save => scene.save(store)?,
        Action::IncrementAndSave => scene.increment_and_save(store)?,
        Action::Preview => {
            scene.version = scene.next_free_version(&*store)?;
            scene.path()
        }
    };
    Ok(path)
}
