//! File I/O primitives for backups
//!
//! Content comparison, a copy that carries permissions and modification time
//! across, and the heuristic used to recognize out-of-space failures.

use std::fs::{self, File, FileTimes};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{BkpfileError, BkpfileResult};

/// Phrases that identify an out-of-space error message, lowercase
const DISK_SPACE_PHRASES: [&str; 7] = [
    "no space left",
    "disk full",
    "not enough space",
    "insufficient disk space",
    "device full",
    "quota exceeded",
    "file too large",
];

/// Compare two files byte for byte
///
/// Files of different length are never identical. Two empty files are.
pub fn compare_files<A, B>(a: A, b: B) -> BkpfileResult<bool>
where
    A: AsRef<Path>,
    B: AsRef<Path>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    let data_a = fs::read(a).map_err(|e| BkpfileError::file("read", a, e))?;
    let data_b = fs::read(b).map_err(|e| BkpfileError::file("read", b, e))?;

    if data_a.len() != data_b.len() {
        return Ok(false);
    }

    Ok(data_a == data_b)
}

/// Copy `src` to `dst`, preserving permission bits and modification time
///
/// The bytes go to a hidden temp file next to `dst` first. Permissions and
/// mtime are set on the temp file, then it is renamed into place, so `dst`
/// never exists half-written.
pub fn copy_file<S, D>(src: S, dst: D) -> BkpfileResult<()>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    let src = src.as_ref();
    let dst = dst.as_ref();

    let data = fs::read(src).map_err(|e| BkpfileError::file("read", src, e))?;
    let src_meta = fs::metadata(src).map_err(|e| BkpfileError::file("stat", src, e))?;
    let modified = src_meta
        .modified()
        .map_err(|e| BkpfileError::file("read modification time of", src, e))?;

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| BkpfileError::file("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(dst);
    let result = write_with_metadata(&temp_path, &data, src_meta.permissions(), modified)
        .and_then(|()| {
            fs::rename(&temp_path, dst).map_err(|e| BkpfileError::file("rename", &temp_path, e))
        });

    if result.is_err() {
        // Best effort, the original error is what matters
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_with_metadata(
    path: &Path,
    data: &[u8],
    permissions: fs::Permissions,
    modified: SystemTime,
) -> BkpfileResult<()> {
    let mut file = File::create(path).map_err(|e| BkpfileError::file("write", path, e))?;
    file.write_all(data)
        .map_err(|e| BkpfileError::file("write", path, e))?;
    file.sync_all()
        .map_err(|e| BkpfileError::file("sync", path, e))?;

    let times = FileTimes::new()
        .set_accessed(SystemTime::now())
        .set_modified(modified);
    file.set_times(times)
        .map_err(|e| BkpfileError::file("set modification time of", path, e))?;
    drop(file);

    fs::set_permissions(path, permissions)
        .map_err(|e| BkpfileError::file("set permissions of", path, e))?;

    Ok(())
}

/// `.<name>.tmp` in the same directory as `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Whether an error message looks like the filesystem ran out of space
///
/// Matching is on the message text and is best effort: an unknown wording
/// simply returns `false`.
pub fn is_disk_space_error<E>(err: Option<&E>) -> bool
where
    E: std::fmt::Display + ?Sized,
{
    let Some(err) = err else {
        return false;
    };
    let message = err.to_string().to_lowercase();
    DISK_SPACE_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
}
