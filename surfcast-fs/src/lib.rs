//! Capability-based UTF-8 file access for snapshot input and record output.
//!
//! Every helper opens an ambient directory for the parent of the target path
//! and performs the operation relative to that directory handle.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Read a UTF-8 file into a string.
///
/// # Errors
/// Returns any I/O error from opening or reading the file.
pub fn read_utf8(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = parent_dir_and_name(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// # Errors
/// Returns any I/O error from creating directories or writing the file.
pub fn write_utf8(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_dir_and_name(path)?;
    dir.write(name.as_str(), contents)
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns an error when the parent directory cannot be opened or the
/// metadata lookup fails for a reason other than absence.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_dir_and_name(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create the parent directory of `path` if it is missing.
///
/// # Errors
/// Returns any I/O error from opening the base directory or creating the
/// missing components.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("{path} has no file name")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split a directory path into an opened root (the filesystem root, a
/// Windows drive, or the current directory) and the path below it.
fn split_root(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let separator = std::path::MAIN_SEPARATOR.to_string();
    let (root, relative) = match dir.as_std_path().components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let root = Utf8PathBuf::from(prefix).join(&separator);
            let relative = dir
                .strip_prefix(&root)
                .or_else(|_| dir.strip_prefix(prefix))
                .map_err(|_| io::Error::other(format!("cannot strip {prefix} from {dir}")))?
                .to_owned();
            (root, relative)
        }
        Some(Component::RootDir) => {
            let root = Utf8PathBuf::from(&separator);
            let relative = dir
                .strip_prefix(&root)
                .map_err(|_| io::Error::other(format!("cannot strip root from {dir}")))?
                .to_owned();
            (root, relative)
        }
        _ => (Utf8PathBuf::from("."), dir.to_owned()),
    };
    let base = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    Ok((base, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workdir() -> (TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .expect("tempdir path should be UTF-8");
        (temp, root)
    }

    #[rstest]
    fn writes_into_missing_directories(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        let target = root.join("runs/2024-06-01/points.json");

        write_utf8(&target, "[]").expect("write should succeed");

        assert_eq!(read_utf8(&target).expect("read should succeed"), "[]");
        assert!(file_is_file(&target).expect("metadata lookup"));
    }

    #[rstest]
    fn overwrites_existing_file(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        let target = root.join("points.json");
        write_utf8(&target, "first").expect("first write");

        write_utf8(&target, "second").expect("second write");

        assert_eq!(read_utf8(&target).expect("read"), "second");
    }

    #[rstest]
    fn missing_file_is_not_a_file(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        assert!(!file_is_file(&root.join("absent.json")).expect("metadata lookup"));
        assert!(!file_is_file(&root).expect("directory lookup"));
    }

    #[rstest]
    fn reading_missing_file_fails(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        let err = read_utf8(&root.join("absent.json")).expect_err("should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
