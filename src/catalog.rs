use crate::config::{self, Directories};
use crate::library;
use crate::random::RandomSource;
use crate::song::{self, Song};
use crate::sorting;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures surfaced to the user as feedback messages; none of them
/// aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unsupported file type")]
    UnsupportedFormat,
    #[error("this song already exists")]
    DuplicateEntry,
    #[error("song not found")]
    NotFound,
    #[error("nothing is selected")]
    EmptySelection,
    #[error("row is out of range")]
    OutOfRange,
}

/// Catalog-side notifications, pushed synchronously by each mutating
/// operation and drained by the controller in the same order. The view
/// only ever renders these; it never originates them.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    PlaylistChanged(Vec<String>),
    Feedback { message: String, success: bool },
}

/// The ordered track catalog plus the flat announcement-clip list.
/// Catalog order is the display and playback sequence; announcement
/// clips are never sorted, searched or given an identity.
#[derive(Debug)]
pub struct SongCatalog {
    songs: Vec<Song>,
    ads: Vec<PathBuf>,
    dirs: Directories,
    playing_ad: bool,
    notices: Vec<Notice>,
}

impl SongCatalog {
    /// Scans the managed directories, numbers the songs in name order and
    /// shuffles the initial playback sequence.
    pub fn load(dirs: Directories, rng: &mut dyn RandomSource) -> Self {
        let mut catalog = Self {
            songs: Vec::new(),
            ads: Vec::new(),
            dirs,
            playing_ad: false,
            notices: Vec::new(),
        };
        catalog.load_music(rng);
        catalog.load_ads();
        catalog
    }

    fn load_music(&mut self, rng: &mut dyn RandomSource) {
        let names = library::scan_dir(&self.dirs.music);
        self.songs = names
            .iter()
            .enumerate()
            .map(|(i, name)| Song::new(i + 1, name, &self.dirs.music.join(name)))
            .collect();
        self.shuffle(rng);
        info!(
            "loaded {} songs from {}",
            self.songs.len(),
            self.dirs.music.display()
        );
        self.push_playlist_changed();
    }

    fn load_ads(&mut self) {
        self.ads = library::scan_dir(&self.dirs.ads)
            .iter()
            .map(|name| self.dirs.ads.join(name))
            .collect();
        info!("loaded {} announcement clips", self.ads.len());
    }

    // Fisher-Yates over the injected source.
    fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        for i in (1..self.songs.len()).rev() {
            let j = rng.pick(i + 1);
            self.songs.swap(i, j);
        }
    }

    /// Accepts a supported, not-yet-cataloged file: copies it into the
    /// music directory and appends a new entry numbered `len + 1`.
    pub fn add(&mut self, path: &Path) -> Result<(), CatalogError> {
        if path.as_os_str().is_empty() || !library::is_supported(path) {
            self.push_feedback("Unsupported file type.", false);
            return Err(CatalogError::UnsupportedFormat);
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            self.push_feedback("Unsupported file type.", false);
            return Err(CatalogError::UnsupportedFormat);
        };

        let destination = self.dirs.music.join(file_name);
        if self.position_by_path(&destination).is_some() {
            self.push_feedback("This song already exists.", false);
            return Err(CatalogError::DuplicateEntry);
        }

        if let Err(err) = library::copy_into(&self.dirs.music, path) {
            warn!("copy failed: {err:#}");
            self.push_feedback("Could not copy the file.", false);
            return Err(CatalogError::NotFound);
        }

        let number = self.songs.len() + 1;
        self.songs.push(Song::new(number, file_name, &destination));
        debug!("added {file_name}");
        self.push_playlist_changed();
        self.push_feedback("Song added successfully!", true);
        Ok(())
    }

    /// Removes the entry with this file path and deletes the file.
    pub fn remove(&mut self, path: &Path) -> Result<(), CatalogError> {
        if path.as_os_str().is_empty() {
            self.push_feedback("Invalid file path.", false);
            return Err(CatalogError::NotFound);
        }
        let Some(position) = self.position_by_path(path) else {
            self.push_feedback("Song not found.", false);
            return Err(CatalogError::NotFound);
        };

        let song = self.songs.remove(position);
        if let Err(err) = library::delete(song.path()) {
            warn!("delete failed: {err:#}");
        }
        debug!("removed {}", song.name());
        self.push_playlist_changed();
        Ok(())
    }

    /// Adds each path in order, stopping at the first unsupported file.
    /// Entries added before the stop are kept. Not reentrant: `add`
    /// pushes notices synchronously and must not call back into this.
    pub fn add_all(&mut self, paths: &[PathBuf]) {
        for path in paths {
            if library::is_supported(path) {
                let _ = self.add(path);
            } else {
                self.push_feedback("Unsupported file type.", false);
                return;
            }
        }
    }

    pub fn sort_by_number(&mut self) {
        sorting::shell_sort(&mut self.songs, |entry| song::track_number(entry.name()));
        self.push_playlist_changed();
    }

    pub fn sort_by_name(&mut self) {
        sorting::quick_sort(&mut self.songs, |entry| {
            song::sort_title(entry.name()).to_string()
        });
        self.push_playlist_changed();
    }

    /// Entries whose display name contains `query`; `""` matches all.
    pub fn search(&self, query: &str) -> Vec<&Song> {
        self.songs.iter().filter(|entry| entry.matches(query)).collect()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.songs.iter().position(|entry| entry.id() == id)
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.songs.get(index).map(Song::id)
    }

    pub fn file_path_at(&self, index: usize) -> Option<&Path> {
        self.songs.get(index).map(Song::path)
    }

    pub fn is_playing_ad(&self) -> bool {
        self.playing_ad
    }

    pub fn set_playing_ad(&mut self, state: bool) {
        self.playing_ad = state;
    }

    /// Uniform draw from the announcement list, `None` when it is empty.
    pub fn random_ad(&self, rng: &mut dyn RandomSource) -> Option<&Path> {
        if self.ads.is_empty() {
            return None;
        }
        Some(self.ads[rng.pick(self.ads.len())].as_path())
    }

    pub fn display_names(&self) -> Vec<String> {
        self.songs
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Drains queued notifications in emission order.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn position_by_path(&self, path: &Path) -> Option<usize> {
        let target = config::normalize_path(path);
        self.songs
            .iter()
            .position(|entry| config::normalize_path(entry.path()) == target)
    }

    fn push_playlist_changed(&mut self) {
        let names = self.display_names();
        self.notices.push(Notice::PlaylistChanged(names));
    }

    fn push_feedback(&mut self, message: &str, success: bool) {
        self.notices.push(Notice::Feedback {
            message: message.to_string(),
            success,
        });
    }
}
