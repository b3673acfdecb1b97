use std::time::Duration;

use dictionary::{Dictionary, Entry, LookupError};

use crate::presentation::present;
use crate::saved_words::SavedWords;
use crate::storage::Storage;
use crate::surface::Surface;
use crate::theme::Theme;

pub const STARTUP_WORD: &str = "hello";
const STARTUP_DELAY: Duration = Duration::from_millis(500);

const EMPTY_INPUT_MESSAGE: &str = "Please enter a word to search.";
const TRANSPORT_FALLBACK_MESSAGE: &str = "Failed to fetch word data. Please try again.";

/// Where the last search ended up. Transient; the next submission always
/// moves back through `Loading`.
#[derive(Debug)]
pub enum SearchState {
    Idle,
    Loading,
    Displaying(Entry),
    Error(String),
}

/// The word lookup seam, kept as a trait so tests can stub the network.
pub trait WordSource {
    async fn lookup(&self, word: &str) -> Result<Entry, LookupError>;
}

impl WordSource for Dictionary {
    async fn lookup(&self, word: &str) -> Result<Entry, LookupError> {
        Dictionary::lookup(self, word).await
    }
}

/// Owns all mutable application state and orchestrates user actions into
/// lookups, presentation and persistence. Nothing else touches the surface.
pub struct App<D, S> {
    dictionary: D,
    surface: S,
    storage: Storage,
    saved: SavedWords,
    theme: Theme,
    state: SearchState,
}

impl<D: WordSource, S: Surface> App<D, S> {
    pub fn new(dictionary: D, surface: S, storage: Storage, saved: SavedWords, theme: Theme) -> Self {
        Self {
            dictionary,
            surface,
            storage,
            saved,
            theme,
            state: SearchState::Idle,
        }
    }

    /// Applies the persisted preferences, then runs the example search once
    /// the initial rendering has settled.
    pub async fn startup(&mut self) -> anyhow::Result<()> {
        self.surface.apply_theme(self.theme);
        self.show_saved_words();
        self.surface.show_placeholder();
        tokio::time::sleep(STARTUP_DELAY).await;
        self.submit(STARTUP_WORD).await
    }

    pub async fn submit(&mut self, raw: &str) -> anyhow::Result<()> {
        let word = raw.trim();
        if word.is_empty() {
            self.enter_error(EMPTY_INPUT_MESSAGE.to_owned());
            return Ok(());
        }
        self.state = SearchState::Loading;
        self.surface.set_searching(true);
        match self.dictionary.lookup(word).await {
            Ok(entry) => {
                self.surface.hide_error();
                let model = present(&entry);
                let saved = self.saved.contains(&entry.word);
                self.surface.show_entry(&model, saved);
                self.state = SearchState::Displaying(entry);
            }
            Err(error) => {
                tracing::debug!("lookup for {word:?} failed: {error}");
                self.enter_error(lookup_error_message(&error));
            }
        }
        self.surface.set_searching(false);
        Ok(())
    }

    /// Saves or unsaves the currently displayed word.
    pub async fn toggle_save(&mut self) -> anyhow::Result<()> {
        let SearchState::Displaying(entry) = &self.state else {
            self.surface.show_error("No word is currently displayed.");
            return Ok(());
        };
        let word = entry.word.clone();
        let saved = if self.saved.contains(&word) {
            self.saved.remove(&word).await?;
            false
        } else {
            self.saved.add(&word).await?;
            true
        };
        self.show_saved_words();
        self.surface.update_save_control(&word, saved);
        Ok(())
    }

    /// Removes a word from the saved list, e.g. from the saved-words region.
    pub async fn remove_saved(&mut self, word: &str) -> anyhow::Result<()> {
        self.saved.remove(word).await?;
        self.show_saved_words();
        if let SearchState::Displaying(entry) = &self.state {
            if entry.word.to_lowercase() == word.to_lowercase() {
                let displayed = entry.word.clone();
                self.surface.update_save_control(&displayed, false);
            }
        }
        Ok(())
    }

    pub async fn toggle_theme(&mut self) -> anyhow::Result<()> {
        self.theme = self.theme.toggled();
        self.storage.save_theme(self.theme).await?;
        self.surface.apply_theme(self.theme);
        Ok(())
    }

    /// Plays the displayed entry's pronunciation from the start. Playback
    /// failures are logged and otherwise discarded.
    pub fn play_audio(&mut self) {
        let SearchState::Displaying(entry) = &self.state else {
            self.surface.show_error("No word is currently displayed.");
            return;
        };
        match present(entry).audio_url {
            Some(url) => {
                if let Err(error) = self.surface.play_audio(&url) {
                    tracing::debug!("audio playback failed: {error}");
                }
            }
            None => {
                self.surface
                    .show_error("No pronunciation audio is available for this word.");
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.surface.hide_error();
    }

    pub fn show_saved_words(&mut self) {
        let words: Vec<&str> = self.saved.list().collect();
        self.surface.show_saved_words(&words);
    }

    fn enter_error(&mut self, message: String) {
        self.surface.show_placeholder();
        self.surface.show_error(&message);
        self.state = SearchState::Error(message);
    }
}

fn lookup_error_message(error: &LookupError) -> String {
    match error {
        LookupError::NotFound { word } => {
            format!("No definitions found for \"{word}\". Please check the spelling and try again.")
        }
        LookupError::RequestFailed { status } => {
            format!("API request failed with status {status}")
        }
        LookupError::Transport { cause } => {
            let message = cause.to_string();
            if message.is_empty() {
                TRANSPORT_FALLBACK_MESSAGE.to_owned()
            } else {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;

    use dictionary::{Definition, Meaning};

    use super::*;
    use crate::presentation::PresentationModel;

    struct StubSource {
        responses: RefCell<VecDeque<Result<Entry, LookupError>>>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl StubSource {
        fn new(responses: Vec<Result<Entry, LookupError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl WordSource for StubSource {
        async fn lookup(&self, word: &str) -> Result<Entry, LookupError> {
            self.calls.borrow_mut().push(word.to_owned());
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected lookup")
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ApplyTheme(Theme),
        SetSearching(bool),
        ShowEntry(PresentationModel, bool),
        ShowError(String),
        HideError,
        ShowPlaceholder,
        ShowSavedWords(Vec<String>),
        UpdateSaveControl(String, bool),
        PlayAudio(String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl Surface for RecordingSurface {
        fn apply_theme(&mut self, theme: Theme) {
            self.calls.borrow_mut().push(Call::ApplyTheme(theme));
        }

        fn set_searching(&mut self, searching: bool) {
            self.calls.borrow_mut().push(Call::SetSearching(searching));
        }

        fn show_entry(&mut self, model: &PresentationModel, saved: bool) {
            self.calls
                .borrow_mut()
                .push(Call::ShowEntry(model.clone(), saved));
        }

        fn show_error(&mut self, message: &str) {
            self.calls.borrow_mut().push(Call::ShowError(message.to_owned()));
        }

        fn hide_error(&mut self) {
            self.calls.borrow_mut().push(Call::HideError);
        }

        fn show_placeholder(&mut self) {
            self.calls.borrow_mut().push(Call::ShowPlaceholder);
        }

        fn show_saved_words(&mut self, words: &[&str]) {
            let words = words.iter().map(|word| (*word).to_owned()).collect();
            self.calls.borrow_mut().push(Call::ShowSavedWords(words));
        }

        fn update_save_control(&mut self, word: &str, saved: bool) {
            self.calls
                .borrow_mut()
                .push(Call::UpdateSaveControl(word.to_owned(), saved));
        }

        fn play_audio(&mut self, url: &str) -> io::Result<()> {
            self.calls.borrow_mut().push(Call::PlayAudio(url.to_owned()));
            Err(io::Error::new(io::ErrorKind::Other, "no audio device"))
        }
    }

    fn hello_entry() -> Entry {
        Entry {
            word: "hello".to_owned(),
            phonetic: Some("/həˈləʊ/".to_owned()),
            phonetics: Vec::new(),
            meanings: vec![Meaning {
                part_of_speech: "noun".to_owned(),
                definitions: vec![Definition {
                    text: "a greeting".to_owned(),
                    example: None,
                }],
                synonyms: vec!["hi".to_owned(), "greetings".to_owned()],
            }],
            source_urls: Vec::new(),
            license_name: None,
        }
    }

    async fn app_with(
        responses: Vec<Result<Entry, LookupError>>,
    ) -> (
        tempfile::TempDir,
        App<StubSource, RecordingSurface>,
        Rc<RefCell<Vec<Call>>>,
        Rc<RefCell<Vec<String>>>,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/wordly.db", dir.path().display());
        let storage = Storage::open(&url).await.unwrap();
        let theme = storage.load_theme().await;
        let saved = SavedWords::load(storage.clone()).await;
        let source = StubSource::new(responses);
        let lookups = Rc::clone(&source.calls);
        let surface = RecordingSurface::default();
        let calls = Rc::clone(&surface.calls);
        let app = App::new(source, surface, storage, saved, theme);
        (dir, app, calls, lookups)
    }

    #[tokio::test]
    async fn submitting_a_word_displays_it() {
        let (_dir, mut app, calls, _lookups) = app_with(vec![Ok(hello_entry())]).await;
        app.submit("hello").await.unwrap();

        let calls = calls.borrow();
        assert_eq!(calls[0], Call::SetSearching(true));
        assert_eq!(calls[1], Call::HideError);
        let Call::ShowEntry(model, saved) = &calls[2] else {
            panic!("expected ShowEntry, got {:?}", calls[2]);
        };
        assert_eq!(model.part_of_speech, "noun");
        assert_eq!(model.definitions[0].label, "1.1");
        assert_eq!(model.definitions[0].text, "a greeting");
        assert_eq!(model.synonyms, vec!["hi", "greetings"]);
        assert!(!*saved);
        assert_eq!(calls[3], Call::SetSearching(false));
        assert!(matches!(app.state, SearchState::Displaying(_)));
    }

    #[tokio::test]
    async fn a_missing_word_shows_the_not_found_banner() {
        let (_dir, mut app, calls, _lookups) = app_with(vec![Err(LookupError::NotFound {
            word: "zzzqx".to_owned(),
        })])
        .await;
        app.submit("zzzqx").await.unwrap();

        let calls = calls.borrow();
        assert_eq!(calls[1], Call::ShowPlaceholder);
        assert_eq!(
            calls[2],
            Call::ShowError(
                "No definitions found for \"zzzqx\". Please check the spelling and try again."
                    .to_owned()
            )
        );
        assert_eq!(calls[3], Call::SetSearching(false));
        let SearchState::Error(message) = &app.state else {
            panic!("expected the error state, got {:?}", app.state);
        };
        assert_eq!(
            message,
            "No definitions found for \"zzzqx\". Please check the spelling and try again."
        );
    }

    #[tokio::test]
    async fn a_failed_request_reports_the_status() {
        let (_dir, mut app, calls, _lookups) =
            app_with(vec![Err(LookupError::RequestFailed { status: 502 })]).await;
        app.submit("hello").await.unwrap();

        assert!(calls
            .borrow()
            .contains(&Call::ShowError("API request failed with status 502".to_owned())));
    }

    #[tokio::test]
    async fn an_empty_submission_never_reaches_the_network() {
        let (_dir, mut app, calls, lookups) = app_with(Vec::new()).await;
        app.submit("   ").await.unwrap();

        assert!(lookups.borrow().is_empty());
        let calls = calls.borrow();
        assert!(!calls.contains(&Call::SetSearching(true)));
        assert!(calls.contains(&Call::ShowError("Please enter a word to search.".to_owned())));
        let SearchState::Error(message) = &app.state else {
            panic!("expected the error state, got {:?}", app.state);
        };
        assert_eq!(message, "Please enter a word to search.");
    }

    #[tokio::test]
    async fn toggling_save_round_trips_the_saved_list() {
        let (_dir, mut app, calls, _lookups) = app_with(vec![Ok(hello_entry())]).await;
        app.submit("hello").await.unwrap();

        app.toggle_save().await.unwrap();
        {
            let calls = calls.borrow();
            assert!(calls.contains(&Call::ShowSavedWords(vec!["hello".to_owned()])));
            assert!(calls.contains(&Call::UpdateSaveControl("hello".to_owned(), true)));
        }

        app.toggle_save().await.unwrap();
        let calls = calls.borrow();
        assert!(calls.contains(&Call::ShowSavedWords(Vec::new())));
        assert!(calls.contains(&Call::UpdateSaveControl("hello".to_owned(), false)));
    }

    #[tokio::test]
    async fn removing_the_displayed_word_updates_its_save_control() {
        let (_dir, mut app, calls, _lookups) = app_with(vec![Ok(hello_entry())]).await;
        app.submit("hello").await.unwrap();
        app.toggle_save().await.unwrap();

        app.remove_saved("HELLO").await.unwrap();
        let calls = calls.borrow();
        assert_eq!(
            calls.last(),
            Some(&Call::UpdateSaveControl("hello".to_owned(), false))
        );
    }

    #[tokio::test]
    async fn toggling_the_theme_twice_restores_and_persists_it() {
        let (_dir, mut app, calls, _lookups) = app_with(Vec::new()).await;
        app.toggle_theme().await.unwrap();
        assert_eq!(app.storage.load_theme().await, Theme::Dark);
        app.toggle_theme().await.unwrap();
        assert_eq!(app.storage.load_theme().await, Theme::Light);

        let calls = calls.borrow();
        assert!(calls.contains(&Call::ApplyTheme(Theme::Dark)));
        assert_eq!(calls.last(), Some(&Call::ApplyTheme(Theme::Light)));
    }

    #[tokio::test]
    async fn playback_failures_stay_invisible() {
        let mut entry = hello_entry();
        entry.phonetics = vec![dictionary::Phonetic {
            text: None,
            audio: Some("https://example.com/hello.mp3".to_owned()),
        }];
        let (_dir, mut app, calls, _lookups) = app_with(vec![Ok(entry)]).await;
        app.submit("hello").await.unwrap();

        app.play_audio();
        let calls = calls.borrow();
        assert!(calls.contains(&Call::PlayAudio("https://example.com/hello.mp3".to_owned())));
        // The surface reported a playback error; no banner may follow it.
        assert_ne!(
            calls.last(),
            Some(&Call::ShowError("no audio device".to_owned()))
        );
    }

    #[tokio::test]
    async fn startup_applies_preferences_and_searches_the_example_word() {
        let (_dir, mut app, calls, lookups) = app_with(vec![Ok(hello_entry())]).await;
        app.startup().await.unwrap();

        assert_eq!(lookups.borrow().as_slice(), ["hello"]);
        let calls = calls.borrow();
        assert_eq!(calls[0], Call::ApplyTheme(Theme::Light));
        assert_eq!(calls[1], Call::ShowSavedWords(Vec::new()));
        assert_eq!(calls[2], Call::ShowPlaceholder);
        assert!(matches!(app.state, SearchState::Displaying(_)));
    }
}
