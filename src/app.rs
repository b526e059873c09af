use crate::audio::NullPlayer;
use crate::catalog::SongCatalog;
use crate::config::{self, Directories};
use crate::player::{PlaybackState, PlayerController};
use crate::random::OsRandom;
use crate::view::View;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Line-oriented shell over the player core. Renders to stdout and
/// answers selection queries from its own highlight state; playback runs
/// on a state-only player, so end-of-media arrives via the `finish`
/// command instead of a backend callback.
struct ConsoleView {
    selected: Option<usize>,
}

impl ConsoleView {
    fn new() -> Self {
        Self { selected: None }
    }
}

impl View for ConsoleView {
    fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_row(&mut self, index: usize) {
        self.selected = Some(index);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        if !enabled {
            println!("(controls locked during the announcement)");
        }
    }

    fn show_skip_ad(&mut self, visible: bool) {
        if visible {
            println!("(skip is now available: type `skip`)");
        }
    }

    fn render_playlist(&mut self, names: &[String]) {
        if let Some(selected) = self.selected
            && selected >= names.len()
        {
            self.selected = None;
        }
        for (index, name) in names.iter().enumerate() {
            let marker = if self.selected == Some(index) { ">" } else { " " };
            println!("{marker} {index:>3}  {name}");
        }
        if names.is_empty() {
            println!("(empty playlist)");
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }

    fn feedback(&mut self, message: &str, success: bool) {
        let tag = if success { "ok" } else { "!!" };
        println!("[{tag}] {message}");
    }
}

pub fn run(dirs: Directories) -> Result<()> {
    config::ensure_dirs(&dirs)?;
    let mut rng = OsRandom::new();
    let catalog = SongCatalog::load(dirs, &mut rng);
    let mut controller = PlayerController::new(
        catalog,
        Box::new(NullPlayer::new()),
        Box::new(ConsoleView::new()),
        Box::new(rng),
    );

    print_help();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        controller.tick(Instant::now());
        if !run_command(&mut controller, &line) {
            break;
        }
        print_status(&controller);
    }
    Ok(())
}

// Returns false when the shell should exit.
fn run_command(controller: &mut PlayerController, raw: &str) -> bool {
    let input = raw.trim();
    if input.is_empty() {
        return true;
    }

    let mut command_split = input.splitn(2, char::is_whitespace);
    let command = command_split.next().unwrap_or_default();
    let rest = command_split.next().unwrap_or("").trim();

    if controller.controls_locked()
        && !matches!(command, "skip" | "finish" | "help" | "quit" | "exit")
    {
        println!("(locked during the announcement; `skip` or wait for `finish`)");
        return true;
    }

    match command {
        "help" => print_help(),
        "list" => controller.search(""),
        "select" => match rest.parse::<usize>() {
            Ok(row) => controller.set_selection(row),
            Err(_) => println!("Usage: select <row>"),
        },
        "play" => controller.play_selected(),
        "pause" => controller.pause(),
        "next" => controller.play_next(),
        "prev" => controller.play_previous(),
        "repeat" => controller.toggle_repeat(),
        "skip" => controller.skip_ad(),
        "volume" => match rest.parse::<u8>() {
            Ok(volume) => controller.set_volume(volume),
            Err(_) => println!("Usage: volume <0-100>"),
        },
        "add" => {
            if rest.is_empty() {
                println!("Usage: add <path>");
            } else {
                controller.add(&PathBuf::from(rest));
            }
        }
        "remove" => controller.remove_selected(),
        "drop" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                println!("Usage: drop <path> [path ...]");
            } else {
                controller.drop_paths(&paths);
            }
        }
        "sortnum" => controller.sort_by_number(),
        "sortname" => controller.sort_by_name(),
        "search" => controller.search(rest),
        // Stands in for the backend's end-of-media callback.
        "finish" => controller.on_media_finished(),
        "quit" | "exit" => return false,
        other => println!("unknown command {other}; try `help`"),
    }
    true
}

fn print_status(controller: &PlayerController) {
    let state = match controller.state() {
        PlaybackState::Idle => "idle",
        PlaybackState::PlayingTrack => "playing",
        PlaybackState::PlayingAd => "announcement",
        PlaybackState::Paused => "paused",
    };
    match controller.now_playing() {
        Some(name) => println!("-- {state}: {name}"),
        None => println!("-- {state}"),
    }
}

fn print_help() {
    println!("storecast commands:");
    println!("  list | select <row> | play | pause | next | prev | repeat | skip");
    println!("  volume <0-100> | add <path> | remove | drop <paths> | sortnum | sortname");
    println!("  search <text> | finish | quit");
}
