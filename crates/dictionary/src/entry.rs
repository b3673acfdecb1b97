#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub word: String,
    pub phonetic: Option<String>,
    pub phonetics: Vec<Phonetic>,
    pub meanings: Vec<Meaning>,
    pub source_urls: Vec<String>,
    pub license_name: Option<String>,
}



#[derive(Debug, Clone, PartialEq)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
}


#[derive(Debug, Clone, PartialEq)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
    pub synonyms: Vec<String>,
}


#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
}
