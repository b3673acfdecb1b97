use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::entry::{Definition, Entry, Meaning, Phonetic};
use crate::LookupError;

pub(crate) const API_BASE_URL: &'static str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Deserialize)]
struct EntryDto {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<PhoneticDto>,
    #[serde(default)]
    meanings: Vec<MeaningDto>,
    #[serde(default, rename = "sourceUrls")]
    source_urls: Vec<String>,
    license: Option<LicenseDto>,
}

#[derive(Debug, Deserialize)]
struct PhoneticDto {
    text: Option<String>,
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeaningDto {
    #[serde(rename = "partOfSpeech")]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<DefinitionDto>,
    #[serde(default)]
    synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DefinitionDto {
    definition: String,
    example: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicenseDto {
    name: String,
}

pub(crate) async fn fetch_entries(
    client: &reqwest::Client,
    base_url: &Url,
    word: &str,
) -> Result<Vec<Entry>, LookupError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .expect("the base url is validated to be a valid base at construction")
        .pop_if_empty()
        .push(word);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|cause| LookupError::Transport { cause })?;
    match response.status() {
        status if status.is_success() => {
            let entries = response
                .json::<Vec<EntryDto>>()
                .await
                .map_err(|cause| LookupError::Transport { cause })?;
            Ok(entries.into_iter().map(EntryDto::into_entry).collect())
        }
        StatusCode::NOT_FOUND => Err(LookupError::NotFound {
            word: word.to_owned(),
        }),
        status => Err(LookupError::RequestFailed {
            status: status.as_u16(),
        }),
    }
}

impl EntryDto {
    fn into_entry(self) -> Entry {
        Entry {
            word: self.word,
            phonetic: non_empty(self.phonetic),
            phonetics: self
                .phonetics
                .into_iter()
                .map(|phonetic| Phonetic {
                    text: non_empty(phonetic.text),
                    audio: non_empty(phonetic.audio),
                })
                .collect(),
            meanings: self
                .meanings
                .into_iter()
                .map(|meaning| Meaning {
                    part_of_speech: meaning.part_of_speech,
                    definitions: meaning
                        .definitions
                        .into_iter()
                        .map(|definition| Definition {
                            text: definition.definition,
                            example: non_empty(definition.example),
                        })
                        .collect(),
                    synonyms: meaning.synonyms,
                })
                .collect(),
            source_urls: self.source_urls,
            license_name: self.license.map(|license| license.name),
        }
    }
}

// The api reports missing fields either by omitting them or by sending "".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
