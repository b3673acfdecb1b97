use dictionary::Entry;

const MAX_SYNONYMS: usize = 10;

pub const PHONETIC_FALLBACK: &str = "Not available";
pub const NOT_SPECIFIED: &str = "Not specified";

/// Display-ready transform of a dictionary entry, decoupled from any
/// rendering surface so it can be built and inspected without one.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationModel {
    pub word: String,
    pub phonetic: String,
    pub audio_url: Option<String>,
    pub part_of_speech: String,
    pub definitions: Vec<NumberedDefinition>,
    pub synonyms: Vec<String>,
    pub source_url: String,
    pub license_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberedDefinition {
    /// `<meaning>.<definition>`, both 1-based, e.g. "2.1".
    pub label: String,
    pub text: String,
    pub example: Option<String>,
}

pub fn present(entry: &Entry) -> PresentationModel {
    let phonetic = entry
        .phonetic
        .clone()
        .or_else(|| {
            entry
                .phonetics
                .iter()
                .find_map(|phonetic| phonetic.text.clone())
        })
        .unwrap_or_else(|| PHONETIC_FALLBACK.to_owned());
    let audio_url = entry
        .phonetics
        .iter()
        .find_map(|phonetic| phonetic.audio.clone());
    let part_of_speech = entry
        .meanings
        .first()
        .map(|meaning| meaning.part_of_speech.clone())
        .unwrap_or_else(|| NOT_SPECIFIED.to_owned());

    let mut definitions = Vec::new();
    for (meaning_index, meaning) in entry.meanings.iter().enumerate() {
        for (definition_index, definition) in meaning.definitions.iter().enumerate() {
            definitions.push(NumberedDefinition {
                label: format!("{}.{}", meaning_index + 1, definition_index + 1),
                text: definition.text.clone(),
                example: definition.example.clone(),
            });
        }
    }

    let mut synonyms: Vec<String> = Vec::new();
    for meaning in &entry.meanings {
        for synonym in &meaning.synonyms {
            if synonyms.len() == MAX_SYNONYMS {
                break;
            }
            if !synonyms.contains(synonym) {
                synonyms.push(synonym.clone());
            }
        }
    }

    PresentationModel {
        word: entry.word.clone(),
        phonetic,
        audio_url,
        part_of_speech,
        definitions,
        synonyms,
        source_url: entry
            .source_urls
            .first()
            .cloned()
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
        license_name: entry
            .license_name
            .clone()
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
    }
}
