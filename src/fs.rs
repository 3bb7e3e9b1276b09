//! Run output directories

use std::fs;
use std::io;
use std::path::Path;

/// Create the run directory and, optionally, a subdirectory beneath it
///
/// Both calls are idempotent. The run directory's own parent must already
/// exist; intermediate directories inside `subdir` are created as needed.
///
/// # Example
/// ```
/// use quakemig::fs::make_directories;
///
/// let tmp = tempfile::tempdir().unwrap();
/// let run = tmp.path().join("example_run");
/// make_directories(&run, Some("locate/picks")).unwrap();
/// make_directories(&run, Some("locate/picks")).unwrap();
/// assert!(run.join("locate/picks").is_dir());
/// ```
pub fn make_directories(run: &Path, subdir: Option<&str>) -> io::Result<()> {
    create_dir_exist_ok(run)?;

    if let Some(subdir) = subdir.filter(|s| !s.is_empty()) {
        let new_dir = run.join(subdir);
        tracing::debug!("creating {}", new_dir.display());
        fs::create_dir_all(new_dir)?;
    }
    Ok(())
}

fn create_dir_exist_ok(path: &Path) -> io::Result<()> {
    match fs::create_dir(path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        other => other,
    }
}
