//! High-level WRL scene loading.
//!
//! This module provides the main entry points for loading `.wrl` files and
//! attaching provenance (source directory and file name) to the parsed scene.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::scene::Scene;
use crate::vrml::options::ParseOptions;
use crate::vrml::parser::{parse_wrl, ParseResult};

/// Load a WRL file and return a Scene.
///
/// Texture urls in the scene resolve against the file's directory.
///
/// # Example
///
/// ```ignore
/// use wrl_core::vrml::{load_wrl, ParseOptions};
///
/// let scene = load_wrl("C:/VRML/output.wrl", &ParseOptions::default())?;
/// ```
pub fn load_wrl<P: AsRef<Path>>(path: P, options: &ParseOptions) -> ParseResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let scene = load_wrl_from_string(&content, directory, filename, options)?;

    log::info!(
        "Loaded {} meshes and {} unique materials from {}",
        scene.mesh_count(),
        scene.material_count(),
        path.display()
    );

    Ok(scene)
}

/// Load WRL from a string (useful for testing).
pub fn load_wrl_from_string(
    content: &str,
    directory: impl Into<PathBuf>,
    filename: impl Into<String>,
    options: &ParseOptions,
) -> ParseResult<Scene> {
    let mut scene = parse_wrl(content, options)?;
    scene.directory = directory.into();
    scene.filename = filename.into();
    Ok(scene)
}

/// Load several WRL files in parallel.
///
/// Each file is parsed independently; the results come back in the same
/// order as `paths`, and one malformed file does not affect the others.
pub fn load_wrl_batch<P>(paths: &[P], options: &ParseOptions) -> Vec<ParseResult<Scene>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            load_wrl(path, options).inspect_err(|e| {
                log::warn!("Failed to load {}: {}", path.as_ref().display(), e);
            })
        })
        .collect()
}
