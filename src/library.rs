use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(OsStr::to_str).unwrap_or_default();
    AUDIO_EXTENSIONS
        .iter()
        .any(|supported| ext.eq_ignore_ascii_case(supported))
}

/// File names of supported audio files directly inside `dir`, in name
/// order. A missing directory scans as empty.
pub fn scan_dir(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    if !dir.is_dir() {
        return names;
    }

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if entry.file_type().is_file()
            && is_supported(path)
            && let Some(name) = path.file_name().and_then(OsStr::to_str)
        {
            names.push(name.to_string());
        }
    }

    names.sort();
    names
}

/// Copies `source` into `dir` keeping its file name; a no-op when the
/// destination already exists on disk.
pub fn copy_into(dir: &Path, source: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .with_context(|| format!("no file name in {}", source.display()))?;
    let destination = dir.join(name);
    if !destination.exists() {
        fs::copy(source, &destination).with_context(|| {
            format!(
                "failed to copy {} to {}",
                source.display(),
                destination.display()
            )
        })?;
    }
    Ok(destination)
}

pub fn delete(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("failed to delete {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported(Path::new("a.mp3")));
        assert!(is_supported(Path::new("a.WAV")));
        assert!(!is_supported(Path::new("a.flac")));
        assert!(!is_supported(Path::new("a")));
    }

    #[test]
    fn scan_skips_unsupported_and_nested_files() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("b.mp3"), b"x").expect("write");
        fs::write(dir.path().join("a.wav"), b"x").expect("write");
        fs::write(dir.path().join("notes.txt"), b"x").expect("write");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        fs::write(dir.path().join("sub").join("c.mp3"), b"x").expect("write");

        assert_eq!(scan_dir(dir.path()), vec!["a.wav", "b.mp3"]);
    }

    #[test]
    fn scan_of_missing_dir_is_empty() {
        assert!(scan_dir(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn copy_into_keeps_existing_destination() {
        let dir = tempdir().expect("tempdir");
        let source_dir = tempdir().expect("tempdir");
        let source = source_dir.path().join("song.mp3");
        fs::write(&source, b"new").expect("write");

        let destination = dir.path().join("song.mp3");
        fs::write(&destination, b"old").expect("write");

        let copied = copy_into(dir.path(), &source).expect("copy");
        assert_eq!(copied, destination);
        assert_eq!(fs::read(&destination).expect("read"), b"old");
    }
}
