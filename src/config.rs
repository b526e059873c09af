use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const RESOURCES_DIR: &str = "resources";
const MUSIC_DIR: &str = "music";
const ADS_DIR: &str = "announcements";

/// The two managed directories the player scans and mutates, resolved
/// beneath a base working directory at startup.
#[derive(Debug, Clone)]
pub struct Directories {
    pub base: PathBuf,
    pub music: PathBuf,
    pub ads: PathBuf,
}

pub fn resolve(base_override: Option<&Path>) -> Result<Directories> {
    let base = match base_override {
        Some(dir) => dir.to_path_buf(),
        None => match env::var("STORECAST_BASE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir().context("current directory is not accessible")?,
        },
    };

    let resources = base.join(RESOURCES_DIR);
    Ok(Directories {
        music: resources.join(MUSIC_DIR),
        ads: resources.join(ADS_DIR),
        base,
    })
}

pub fn ensure_dirs(dirs: &Directories) -> Result<()> {
    fs::create_dir_all(&dirs.music)
        .with_context(|| format!("failed to create {}", dirs.music.display()))?;
    fs::create_dir_all(&dirs.ads)
        .with_context(|| format!("failed to create {}", dirs.ads.display()))?;
    Ok(())
}

/// Canonical form used when comparing catalog paths; falls back to the
/// raw path for files that do not exist yet.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_override_dir() {
        let dirs = resolve(Some(Path::new("/srv/player"))).expect("resolve");
        assert_eq!(dirs.base, PathBuf::from("/srv/player"));
        assert_eq!(dirs.music, PathBuf::from("/srv/player/resources/music"));
        assert_eq!(
            dirs.ads,
            PathBuf::from("/srv/player/resources/announcements")
        );
    }

    #[test]
    fn ensure_dirs_creates_both_trees() {
        let base = tempfile::tempdir().expect("tempdir");
        let dirs = resolve(Some(base.path())).expect("resolve");
        ensure_dirs(&dirs).expect("ensure");
        assert!(dirs.music.is_dir());
        assert!(dirs.ads.is_dir());
    }
}
