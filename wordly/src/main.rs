use dictionary::Dictionary;
use tracing_subscriber::EnvFilter;

use app::App;
use saved_words::SavedWords;
use storage::Storage;
use surface::TerminalSurface;
use utilities::input;

mod app;
mod presentation;
mod saved_words;
mod storage;
mod surface;
mod theme;
mod utilities;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let storage = Storage::initialize().await?;
    let theme = storage.load_theme().await;
    let saved = SavedWords::load(storage.clone()).await;
    let mut app = App::new(
        Dictionary::new(),
        TerminalSurface::new(),
        storage,
        saved,
        theme,
    );
    app.startup().await?;

    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "search" | "define" | "find" => {
                    app.submit(&command_parts.collect::<Vec<&str>>().join(" "))
                        .await?;
                }
                "save" | "unsave" => {
                    app.toggle_save().await?;
                }
                "remove" => {
                    let word = command_parts.collect::<Vec<&str>>().join(" ");
                    app.remove_saved(&word).await?;
                }
                "saved" | "list" => {
                    app.show_saved_words();
                }
                "theme" => {
                    app.toggle_theme().await?;
                }
                "audio" | "play" => {
                    app.play_audio();
                }
                "dismiss" => {
                    app.dismiss_error();
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}
