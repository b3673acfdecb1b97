use std::io;
use std::process::{Command, Stdio};

use crate::presentation::PresentationModel;
use crate::theme::Theme;

/// The rendering surface the application controller draws on.
///
/// The controller is the only component talking to this trait; everything
/// upstream of it works on plain data.
pub trait Surface {
    fn apply_theme(&mut self, theme: Theme);
    /// Busy affordance around an in-flight lookup.
    fn set_searching(&mut self, searching: bool);
    fn show_entry(&mut self, model: &PresentationModel, saved: bool);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn show_placeholder(&mut self);
    fn show_saved_words(&mut self, words: &[&str]);
    fn update_save_control(&mut self, word: &str, saved: bool);
    fn play_audio(&mut self, url: &str) -> io::Result<()>;
}

const DARK_HEADING: &str = "\x1b[1;36m";
const DARK_DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Plain stdout rendering. The theme switches the ANSI styling on and off.
pub struct TerminalSurface {
    theme: Theme,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }

    fn heading(&self) -> &'static str {
        match self.theme {
            Theme::Light => "",
            Theme::Dark => DARK_HEADING,
        }
    }

    fn dim(&self) -> &'static str {
        match self.theme {
            Theme::Light => "",
            Theme::Dark => DARK_DIM,
        }
    }

    fn reset(&self) -> &'static str {
        match self.theme {
            Theme::Light => "",
            Theme::Dark => RESET,
        }
    }
}

impl Surface for TerminalSurface {
    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        println!("Theme: {} mode", theme.as_token());
    }

    fn set_searching(&mut self, searching: bool) {
        if searching {
            println!("Searching...");
        }
    }

    fn show_entry(&mut self, model: &PresentationModel, saved: bool) {
        let heading = self.heading();
        let dim = self.dim();
        let reset = self.reset();
        println!();
        println!("{heading}{}{reset}  {}", model.word, model.phonetic);
        println!("    {}", model.part_of_speech);
        if model.audio_url.is_some() {
            println!("    {dim}pronunciation audio available, type 'audio' to play{reset}");
        }
        println!("  Definitions:");
        for definition in &model.definitions {
            println!("    {} {}", definition.label, definition.text);
            if let Some(example) = &definition.example {
                println!("        Example: {example}");
            }
        }
        println!("  Synonyms:");
        if model.synonyms.is_empty() {
            println!("    No synonyms available for this word.");
        } else {
            println!("    {}", model.synonyms.join(", "));
        }
        println!("  Source: {}", model.source_url);
        println!("  License: {}", model.license_name);
        self.update_save_control(&model.word, saved);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("! {message}");
    }

    fn hide_error(&mut self) {}

    fn show_placeholder(&mut self) {
        println!("Search for a word to see its definition.");
    }

    fn show_saved_words(&mut self, words: &[&str]) {
        if words.is_empty() {
            println!("No saved words yet.");
            return;
        }
        println!("Saved words: {}", words.join(", "));
    }

    fn update_save_control(&mut self, word: &str, saved: bool) {
        if saved {
            println!("  [saved] type 'save' to remove {word} from your saved words");
        } else {
            println!("  [not saved] type 'save' to keep {word} in your saved words");
        }
    }

    fn play_audio(&mut self, url: &str) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut command = Command::new("open");
            command.arg(url);
            command
        };
        #[cfg(target_os = "windows")]
        let mut command = {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", url]);
            command
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        };
        command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }
}
