//! Filesystem layer for bkpfile
//!
//! Byte-level file comparison and copying, plus the lexical path handling
//! used to mirror a source file's location under the backup root.

pub mod file_io;
pub mod paths;

pub use file_io::{compare_files, copy_file, is_disk_space_error};
pub use paths::{mirror_dir, relative_to_cwd};
