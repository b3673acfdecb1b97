use reqwest::Url;
use thiserror::Error;

use api::fetch_entries;

mod api;
mod entry;

pub use entry::{Definition, Entry, Meaning, Phonetic};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no definitions found for \"{word}\"")]
    NotFound { word: String },
    #[error("api request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("transport error: {cause}")]
    Transport {
        #[source]
        cause: reqwest::Error,
    },
}

pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_base_url(Url::parse(api::API_BASE_URL).expect("the default api url is valid"))
    }

    /// Points the client at a different endpoint, keeping the
    /// `<base>/<word>` path template.
    pub fn with_base_url(base_url: Url) -> Self {
        assert!(
            !base_url.cannot_be_a_base(),
            "the dictionary endpoint must accept path segments"
        );
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Looks up `word` and returns the first entry of the api's reply.
    ///
    /// The api answers with an array of entries for the word and
    /// near-matches; only the first one is kept. An empty array is
    /// reported as [`LookupError::NotFound`].
    pub async fn lookup(&self, word: &str) -> Result<Entry, LookupError> {
        let mut entries = fetch_entries(&self.client, &self.base_url, word).await?;
        if entries.is_empty() {
            return Err(LookupError::NotFound {
                word: word.to_owned(),
            });
        }
        Ok(entries.swap_remove(0))
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
