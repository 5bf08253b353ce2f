//! Path helpers for mirroring source files under the backup root
//!
//! All normalization here is lexical, the same way the working directory
//! relative form of a path is computed: nothing is resolved through symlinks.

use std::path::{Component, Path, PathBuf};

use crate::error::{BkpfileError, BkpfileResult};

/// Express a relative path relative to the current working directory
///
/// Absolute paths are returned unchanged. Relative paths are made absolute
/// against the working directory, normalized, and made relative again, so
/// `./a/../b.txt` becomes `b.txt`.
pub fn relative_to_cwd(path: &Path) -> BkpfileResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|source| BkpfileError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    let absolute = normalize(&cwd.join(path));
    Ok(relative_between(&absolute, &cwd))
}

/// Split a source path into the directory part and the file name
///
/// A bare file name has `.` as its directory.
pub fn split_source(path: &Path) -> (PathBuf, String) {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, file_name)
}

/// Join a source directory under the backup root
///
/// The root and prefix of an absolute `dir` are dropped, so `/home/u/docs`
/// lands at `<root>/home/u/docs` instead of replacing the root.
pub fn mirror_dir(backup_root: &Path, dir: &Path) -> PathBuf {
    let mut joined = backup_root.to_path_buf();
    for component in dir.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    normalize(&joined)
}

/// Lexically remove `.` components and fold `..` into preceding names
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// The relative path leading from `base` to `target`, both absolute and normalized
fn relative_between(target: &Path, base: &Path) -> PathBuf {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
