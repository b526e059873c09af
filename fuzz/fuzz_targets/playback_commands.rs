#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::PathBuf;
use storecast::audio::NullPlayer;
use storecast::catalog::SongCatalog;
use storecast::config::Directories;
use storecast::player::PlayerController;
use storecast::random::RandomSource;
use storecast::view::View;

struct FuzzView {
    selected: Option<usize>,
}

impl View for FuzzView {
    fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_row(&mut self, index: usize) {
        self.selected = Some(index);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn set_controls_enabled(&mut self, _enabled: bool) {}

    fn show_skip_ad(&mut self, _visible: bool) {}

    fn render_playlist(&mut self, _names: &[String]) {}

    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }

    fn feedback(&mut self, _message: &str, _success: bool) {}
}

struct FuzzRandom {
    bytes: Vec<u8>,
    cursor: usize,
}

impl RandomSource for FuzzRandom {
    fn pick(&mut self, bound: usize) -> usize {
        let value = self.bytes.get(self.cursor).copied().unwrap_or(0xff);
        self.cursor += 1;
        usize::from(value) % bound
    }
}

fuzz_target!(|data: &[u8]| {
    // Nonexistent directories load as an empty catalog; the interesting
    // surface is the state machine's handling of boundary indices.
    let dirs = Directories {
        base: PathBuf::from("fuzz-base"),
        music: PathBuf::from("fuzz-base/resources/music"),
        ads: PathBuf::from("fuzz-base/resources/announcements"),
    };
    let mut rng = FuzzRandom {
        bytes: data.to_vec(),
        cursor: 0,
    };
    let catalog = SongCatalog::load(dirs, &mut rng);
    let mut controller = PlayerController::new(
        catalog,
        Box::new(NullPlayer::new()),
        Box::new(FuzzView { selected: None }),
        Box::new(rng),
    );

    for byte in data {
        match byte % 8 {
            0 => controller.set_selection(usize::from(*byte) / 8),
            1 => controller.play_selected(),
            2 => controller.play_next(),
            3 => controller.play_previous(),
            4 => controller.on_media_finished(),
            5 => controller.skip_ad(),
            6 => controller.toggle_repeat(),
            _ => controller.set_volume(*byte),
        }
    }
});
