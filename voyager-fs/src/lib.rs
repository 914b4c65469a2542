//! Capability-based file helpers for Voyager documents.
//!
//! Trip requests are read and plans written through `cap-std` directory
//! handles opened from `camino` UTF-8 paths. Each helper opens the narrowest
//! directory it needs with ambient authority and works relative to it.
#![forbid(unsafe_code)]

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Read a UTF-8 document into memory.
///
/// # Errors
///
/// Returns any IO error from opening or reading the file, including
/// [`io::ErrorKind::InvalidData`] for non-UTF-8 contents.
pub fn read_document(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories.
///
/// Existing files are truncated.
///
/// # Errors
///
/// Returns any IO error from creating directories or writing the file.
pub fn write_document(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name.as_str(), contents)
}

/// Whether `path` names an existing regular file.
///
/// # Errors
///
/// Returns an error when the parent directory cannot be opened or the
/// metadata lookup fails for a reason other than the file being absent.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Returns any IO error from opening the base directory or creating the
/// intermediate directories.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("{path} has no file name")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an anchor that cap-std can open ambiently (a drive or
/// root, or `.` for relative paths) and the path below it.
fn split_anchor(dir: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let separator = std::path::MAIN_SEPARATOR.to_string();
    let anchor = match dir.as_std_path().components().next() {
        Some(Component::Prefix(prefix)) => {
            let drive = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(drive).join(&separator)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(&separator),
        _ => return Ok((Utf8PathBuf::from("."), dir.to_path_buf())),
    };
    let relative = dir
        .strip_prefix(&anchor)
        .map_err(|_| io::Error::other(format!("cannot strip {anchor} from {dir}")))?;
    Ok((anchor, relative.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn writes_into_new_nested_directories(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let target = root.join("plans/2025/lisbon.json");
        write_document(&target, "{\"days\":[]}").expect("write plan");
        assert_eq!(read_document(&target).expect("read plan"), "{\"days\":[]}");
        assert!(is_regular_file(&target).expect("metadata"));
    }

    #[rstest]
    fn overwrites_existing_documents(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let target = root.join("plan.json");
        write_document(&target, "first version").expect("first write");
        write_document(&target, "second").expect("second write");
        assert_eq!(read_document(&target).expect("read plan"), "second");
    }

    #[rstest]
    fn missing_and_directory_paths_are_not_files(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        assert!(!is_regular_file(&root.join("absent.json")).expect("metadata"));
        std::fs::create_dir(root.join("folder")).expect("create folder");
        assert!(!is_regular_file(&root.join("folder")).expect("metadata"));
    }

    #[rstest]
    fn reading_a_missing_document_fails(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = read_document(&root.join("request.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    #[case("plan.json", ".", "plan.json")]
    #[case("out/plan.json", ".", "out/plan.json")]
    fn splits_relative_paths_from_current_dir(
        #[case] input: &str,
        #[case] anchor: &str,
        #[case] relative: &str,
    ) {
        let (base, rest) = split_anchor(Utf8Path::new(input)).expect("split");
        assert_eq!(base, Utf8PathBuf::from(anchor));
        assert_eq!(rest, Utf8PathBuf::from(relative));
    }

    #[cfg(unix)]
    #[rstest]
    fn splits_absolute_paths_at_root() {
        let (base, rest) = split_anchor(Utf8Path::new("/var/tmp/voyager")).expect("split");
        assert_eq!(base, Utf8PathBuf::from("/"));
        assert_eq!(rest, Utf8PathBuf::from("var/tmp/voyager"));
    }

    #[rstest]
    fn bare_file_names_need_no_parent() {
        ensure_parent_dir(Utf8Path::new("plan.json")).expect("nothing to create");
    }
}
