use crate::audio::MediaPlayer;
use crate::catalog::{CatalogError, Notice, SongCatalog};
use crate::random::RandomSource;
use crate::view::View;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const AD_CHANCE_PERCENT: usize = 25;
const SKIP_REVEAL_MIN_SECS: u64 = 5;
const SKIP_REVEAL_MAX_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    PlayingTrack,
    PlayingAd,
    Paused,
}

/// Orchestrates selection, sequencing, announcement injection and
/// resumption, repeat mode, and identity-preserving selection restoration
/// across catalog mutations. Single-threaded: every method runs
/// synchronously on the shell's event loop.
pub struct PlayerController {
    catalog: SongCatalog,
    player: Box<dyn MediaPlayer>,
    view: Box<dyn View>,
    rng: Box<dyn RandomSource>,
    state: PlaybackState,
    // Identities of tracks whose playback was intercepted by an
    // announcement, most recent last. Identities rather than indices so
    // resumption survives catalog mutation while the clip plays.
    resume_stack: Vec<String>,
    current_id: Option<String>,
    selected_id: Option<String>,
    repeat: bool,
    skip_reveal_at: Option<Instant>,
}

impl PlayerController {
    pub fn new(
        catalog: SongCatalog,
        player: Box<dyn MediaPlayer>,
        view: Box<dyn View>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let mut controller = Self {
            catalog,
            player,
            view,
            rng,
            state: PlaybackState::Idle,
            resume_stack: Vec::new(),
            current_id: None,
            selected_id: None,
            repeat: false,
            skip_reveal_at: None,
        };
        controller.flush_notices();
        controller
    }

    /// Plays the track highlighted in the view. From `Paused` this only
    /// resumes; otherwise it runs the full selection pipeline and may
    /// inject an announcement first.
    pub fn play_selected(&mut self) {
        self.selected_id = self.saved_selection_id();

        if self.state == PlaybackState::Paused {
            self.player.resume();
            self.state = PlaybackState::PlayingTrack;
            return;
        }

        let Some(id) = self.selected_id.clone() else {
            let message = CatalogError::EmptySelection.to_string();
            self.view.feedback(&message, false);
            return;
        };
        let Some(index) = self.catalog.index_of(&id) else {
            return;
        };
        self.process_selection(index, false);
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::PlayingTrack {
            self.player.pause();
            self.state = PlaybackState::Paused;
        }
    }

    pub fn play_next(&mut self) {
        let next = match self.current_index() {
            Some(index) => index + 1,
            None => 0,
        };
        if next < self.catalog.len() {
            self.process_selection(next, false);
        } else {
            self.player.stop();
            self.state = PlaybackState::Idle;
        }
    }

    pub fn play_previous(&mut self) {
        if let Some(index) = self.current_index()
            && index > 0
        {
            self.process_selection(index - 1, false);
        }
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        info!("repeat {}", if self.repeat { "on" } else { "off" });
    }

    /// Only effective while an announcement is playing.
    pub fn skip_ad(&mut self) {
        if !self.catalog.is_playing_ad() {
            return;
        }
        self.player.stop();
        self.finish_ad();
    }

    /// Maps an external 0-100 volume to a 0.0-1.0 gain. Pass-through,
    /// not part of the state machine.
    pub fn set_volume(&mut self, volume: u8) {
        let level = f32::from(volume.min(100)) / 100.0;
        self.player.set_volume(level);
    }

    /// End-of-media signal from the playback collaborator.
    pub fn on_media_finished(&mut self) {
        if self.catalog.is_playing_ad() {
            self.finish_ad();
        } else {
            self.finish_track();
        }
    }

    /// Reveals the skip control once the armed deadline passes. Safe at
    /// any cadence; does nothing without an armed deadline.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.skip_reveal_at
            && now >= deadline
        {
            self.skip_reveal_at = None;
            self.view.show_skip_ad(true);
        }
    }

    /// Copies a file into the catalog, then re-resolves the remembered
    /// selection in the grown catalog.
    pub fn add(&mut self, path: &Path) {
        let remembered = self.saved_selection_id();
        let added = self.catalog.add(path).is_ok();
        self.flush_notices();
        if !added {
            return;
        }
        match remembered {
            Some(id) => self.restore_selection(Some(&id)),
            None => {
                // Nothing was highlighted before, so highlight the new row.
                let last = self.catalog.len().saturating_sub(1);
                let id = self.catalog.id_at(last).map(str::to_string);
                self.restore_selection(id.as_deref());
            }
        }
    }

    /// Removes the highlighted track after confirmation. Removing the
    /// playing track stops playback and clears `current_id`.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.saved_selection_id() else {
            let message = CatalogError::EmptySelection.to_string();
            self.view.feedback(&message, false);
            return;
        };
        self.selected_id = Some(id.clone());
        let Some(index) = self.catalog.index_of(&id) else {
            return;
        };
        let Some(path) = self.catalog.file_path_at(index).map(PathBuf::from) else {
            return;
        };

        if !self.view.confirm("Delete this song from the playlist?") {
            return;
        }
        let removed = self.catalog.remove(&path).is_ok();
        self.refresh_after_mutation(Some(&id));
        if !removed {
            return;
        }

        if self.current_id.as_deref() == Some(id.as_str()) {
            self.player.stop();
            self.current_id = None;
            self.state = PlaybackState::Idle;
        }
    }

    /// Dropped-file batch: adds until the first unsupported file, then
    /// re-resolves the remembered row, falling back to the first entry
    /// and finally to a cleared selection.
    pub fn drop_paths(&mut self, paths: &[PathBuf]) {
        if paths.is_empty() {
            return;
        }

        self.current_id = self.saved_selection_id();
        self.catalog.add_all(paths);
        self.flush_notices();

        if let Some(id) = self.current_id.clone()
            && self.catalog.index_of(&id).is_some()
        {
            self.restore_selection(Some(&id));
            return;
        }
        if let Some(first) = self.catalog.id_at(0).map(str::to_string) {
            self.restore_selection(Some(&first));
            return;
        }
        self.view.clear_selection();
    }

    pub fn sort_by_number(&mut self) {
        let remembered = self.saved_selection_id();
        self.catalog.sort_by_number();
        self.refresh_after_mutation(remembered.as_deref());
    }

    pub fn sort_by_name(&mut self) {
        let remembered = self.saved_selection_id();
        self.catalog.sort_by_name();
        self.refresh_after_mutation(remembered.as_deref());
    }

    /// Renders only the entries whose name contains `query`; the catalog
    /// and its ordering are untouched.
    pub fn search(&mut self, query: &str) {
        let names: Vec<String> = self
            .catalog
            .search(query)
            .iter()
            .map(|song| song.name().to_string())
            .collect();
        self.view.render_playlist(&names);
    }

    /// Highlights a row on the view, rejecting out-of-range rows.
    pub fn set_selection(&mut self, row: usize) {
        if row < self.catalog.len() {
            self.view.set_selected_row(row);
        } else {
            let message = CatalogError::OutOfRange.to_string();
            self.view.feedback(&message, false);
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// While an announcement plays the view's interactive controls are
    /// disabled; shells without real widgets consult this instead.
    pub fn controls_locked(&self) -> bool {
        self.catalog.is_playing_ad()
    }

    pub fn catalog(&self) -> &SongCatalog {
        &self.catalog
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn now_playing(&self) -> Option<&str> {
        let index = self.current_index()?;
        self.catalog.songs().get(index).map(|song| song.name())
    }

    // --- selection pipeline -------------------------------------------

    fn process_selection(&mut self, index: usize, update_selected: bool) {
        if update_selected {
            self.selected_id = self.catalog.id_at(index).map(str::to_string);
        }
        self.current_id = self.catalog.id_at(index).map(str::to_string);
        let restore = self.current_id.clone();
        self.restore_selection(restore.as_deref());

        if self.roll_ad_decision() {
            if let Some(id) = self.catalog.id_at(index) {
                self.resume_stack.push(id.to_string());
            }
            self.start_random_ad();
        } else {
            self.start_track(index);
        }
    }

    fn roll_ad_decision(&mut self) -> bool {
        self.rng.pick(100) < AD_CHANCE_PERCENT
    }

    fn start_track(&mut self, index: usize) {
        self.view.show_skip_ad(false);
        let Some(path) = self.catalog.file_path_at(index).map(PathBuf::from) else {
            return;
        };
        if self.play_file(&path) {
            self.state = PlaybackState::PlayingTrack;
        }
    }

    fn start_random_ad(&mut self) {
        let Some(path) = self
            .catalog
            .random_ad(self.rng.as_mut())
            .map(PathBuf::from)
        else {
            debug!("ad decision fired with no announcement clips");
            return;
        };

        self.catalog.set_playing_ad(true);
        self.view.set_controls_enabled(false);
        let spread = (SKIP_REVEAL_MAX_SECS - SKIP_REVEAL_MIN_SECS) as usize;
        let delay = SKIP_REVEAL_MIN_SECS + self.rng.pick(spread) as u64;
        self.skip_reveal_at = Some(Instant::now() + Duration::from_secs(delay));
        info!("announcement break: {}", path.display());
        if self.play_file(&path) {
            self.state = PlaybackState::PlayingAd;
        }
    }

    fn finish_ad(&mut self) {
        self.catalog.set_playing_ad(false);
        self.view.show_skip_ad(false);
        self.view.set_controls_enabled(true);
        self.skip_reveal_at = None;
        self.state = PlaybackState::Idle;

        match self.resume_stack.pop() {
            Some(id) => match self.catalog.index_of(&id) {
                Some(index) => {
                    self.view.set_selected_row(index);
                    self.play_selected();
                }
                // The interrupted track vanished while the clip played.
                None => self.play_next(),
            },
            None => self.play_next(),
        }
    }

    fn finish_track(&mut self) {
        if self.repeat {
            if let Some(index) = self.current_index() {
                self.start_track(index);
            }
            return;
        }

        let next = match self.current_index() {
            Some(index) => index + 1,
            None => 0,
        };
        if next >= self.catalog.len() {
            if !self.roll_ad_decision() {
                self.player.stop();
            }
            self.state = PlaybackState::Idle;
            return;
        }

        if self.roll_ad_decision() {
            self.process_selection(next, true);
        } else if let Some(id) = self.catalog.id_at(next).map(str::to_string) {
            self.restore_selection(Some(&id));
            self.play_selected();
        }
    }

    // Re-resolves an identity against the mutated catalog and moves the
    // highlight to it. An unresolvable identity falls back to the
    // playing track while an announcement runs; otherwise the selection
    // is left untouched.
    fn restore_selection(&mut self, id: Option<&str>) {
        let mut index = id.and_then(|id| self.catalog.index_of(id));
        if index.is_none() && self.catalog.is_playing_ad() {
            index = self.current_index();
        }
        if let Some(index) = index {
            self.view.set_selected_row(index);
            self.current_id = self.catalog.id_at(index).map(str::to_string);
        }
    }

    fn refresh_after_mutation(&mut self, id: Option<&str>) {
        self.flush_notices();
        self.restore_selection(id);
        self.view.set_controls_enabled(true);
    }

    fn saved_selection_id(&self) -> Option<String> {
        let row = self.view.selected_row()?;
        self.catalog.id_at(row).map(str::to_string)
    }

    fn current_index(&self) -> Option<usize> {
        self.current_id
            .as_deref()
            .and_then(|id| self.catalog.index_of(id))
    }

    fn play_file(&mut self, path: &Path) -> bool {
        self.player.stop();
        match self.player.play(path) {
            Ok(()) => true,
            Err(err) => {
                warn!("playback error: {err:#}");
                self.view.feedback("Could not start playback.", false);
                false
            }
        }
    }

    fn flush_notices(&mut self) {
        for notice in self.catalog.take_notices() {
            match notice {
                Notice::PlaylistChanged(names) => self.view.render_playlist(&names),
                Notice::Feedback { message, success } => self.view.feedback(&message, success),
            }
        }
    }
}
