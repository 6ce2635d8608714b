//! Text normalization for the rule-based path.
//!
//! Lowercases, tokenizes, drops stopwords, and lemmatizes. When the
//! linguistic resources could not be loaded the normalizer only lowercases;
//! the decision is made once at construction, never per call.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::domain::engine::InitializationWarning;

/// English function words, minus the conversational words the pattern
/// table matches on (`what`, `who`, `how`, `you`, `your`, `are`, `can`,
/// `do`, `it`).
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you're", "you've",
    "you'll", "you'd", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "which", "whom", "this", "that", "that'll", "these", "those",
    "am", "is", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
    "there", "all", "any", "both", "each", "few", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve",
    "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn",
    "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't",
    "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static DEFAULT_STOPWORDS: Lazy<HashSet<String>> =
    Lazy::new(|| ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect());

/// Irregular plural forms.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("wolves", "wolf"),
    ("leaves", "leaf"),
    ("knives", "knife"),
    ("lives", "life"),
    ("wives", "wife"),
    ("halves", "half"),
];

/// Words ending in `s` that are not plurals.
const INVARIANT_WORDS: &[&str] = &[
    "afterwards", "alias", "always", "atlas", "besides", "canvas", "christmas", "ethics",
    "lens", "mathematics", "news", "nowadays", "perhaps", "physics", "politics", "series",
    "sometimes", "species", "thanks", "towards", "whereas", "yes",
];

/// Stopword set backing full normalization.
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stopwords: HashSet<String>,
}

impl LinguisticResources {
    /// The built-in English resources.
    pub fn builtin() -> Self {
        Self {
            stopwords: DEFAULT_STOPWORDS.clone(),
        }
    }

    /// Built-in resources extended with a stopword file (one word per line,
    /// `#` starts a comment).
    ///
    /// # Errors
    ///
    /// Returns `InitializationWarning::LinguisticResources` if the file
    /// cannot be read.
    pub fn with_stopword_file(path: &Path) -> Result<Self, InitializationWarning> {
        let contents =
            fs::read_to_string(path).map_err(|e| InitializationWarning::LinguisticResources {
                reason: format!("cannot read {}: {}", path.display(), e),
            })?;

        let mut resources = Self::builtin();
        resources.stopwords.extend(
            contents
                .lines()
                .map(|line| line.split('#').next().unwrap_or("").trim().to_lowercase())
                .filter(|word| !word.is_empty()),
        );
        Ok(resources)
    }

    /// Returns true if the word carries no matching signal.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

/// Text normalizer with a capability flag fixed at construction.
#[derive(Debug, Clone)]
pub struct Normalizer {
    resources: Option<LinguisticResources>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Some(LinguisticResources::builtin()))
    }
}

impl Normalizer {
    /// Creates a normalizer; `None` means lowercase-only.
    pub fn new(resources: Option<LinguisticResources>) -> Self {
        Self { resources }
    }

    /// A normalizer that only lowercases.
    pub fn lowercase_only() -> Self {
        Self::new(None)
    }

    /// Loads resources, optionally extended from a stopword file.
    ///
    /// A load failure degrades to lowercase-only and is returned as a warning
    /// instead of an error.
    pub fn load(stopwords_path: Option<&Path>) -> (Self, Option<InitializationWarning>) {
        match stopwords_path {
            None => (Self::default(), None),
            Some(path) => match LinguisticResources::with_stopword_file(path) {
                Ok(resources) => (Self::new(Some(resources)), None),
                Err(warning) => (Self::lowercase_only(), Some(warning)),
            },
        }
    }

    /// Returns true if full normalization is active.
    pub fn has_linguistic_resources(&self) -> bool {
        self.resources.is_some()
    }

    /// Normalizes text for pattern matching.
    ///
    /// Idempotent: normalizing already-normalized text returns it unchanged.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let Some(resources) = &self.resources else {
            return lowered;
        };

        tokenize(&lowered)
            .into_iter()
            .filter(|token| !resources.is_stopword(token))
            .map(lemmatize)
            .filter(|lemma| !resources.is_stopword(lemma))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Splits on anything but alphanumerics and in-word apostrophes.
fn tokenize(text: &str) -> Vec<String> {
    text.replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Noun-oriented lemmatizer: irregular plurals, then plural suffix rules.
///
/// Stable on its own output, which keeps `normalize` idempotent.
pub fn lemmatize(token: String) -> String {
    let changed = match lemma_of(&token) {
        Cow::Borrowed(lemma) if lemma == token.as_str() => None,
        lemma => Some(lemma.into_owned()),
    };
    changed.unwrap_or(token)
}

fn lemma_of(word: &str) -> Cow<'_, str> {
    if let Some(lemma) = irregular(word) {
        return Cow::Borrowed(lemma);
    }
    if word.len() <= 3 || word.contains('\'') || INVARIANT_WORDS.contains(&word) {
        return Cow::Borrowed(word);
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return Cow::Borrowed(word);
    }

    let stem = strip_plural(word);
    // "mens" strips to "men", which is itself irregular
    match irregular(&stem) {
        Some(lemma) => Cow::Borrowed(lemma),
        None => stem,
    }
}

fn irregular(word: &str) -> Option<&'static str> {
    IRREGULAR_LEMMAS
        .iter()
        .find(|(plural, _)| *plural == word)
        .map(|(_, lemma)| *lemma)
}

fn strip_plural(word: &str) -> Cow<'_, str> {
    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return Cow::Owned(format!("{}y", stem));
        }
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            let kept = &suffix[..suffix.len() - 2];
            return Cow::Owned(format!("{}{}", stem, kept));
        }
    }
    match word.strip_suffix('s') {
        Some(stem) => Cow::Borrowed(stem),
        None => Cow::Borrowed(word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::default()
    }

    #[test]
    fn lowercases_and_drops_stopwords() {
        assert_eq!(normalizer().normalize("Tell me a JOKE"), "tell joke");
    }

    #[test]
    fn keeps_conversational_words() {
        assert_eq!(normalizer().normalize("How are you?"), "how are you");
        assert_eq!(
            normalizer().normalize("What can you do"),
            "what can you do"
        );
    }

    #[test]
    fn strips_punctuation_but_keeps_contractions() {
        assert_eq!(
            normalizer().normalize("Hello!!! How's it going?"),
            "hello how's it going"
        );
        assert_eq!(normalizer().normalize("how\u{2019}s it going"), "how's it going");
    }

    #[test]
    fn lemmatizes_plurals() {
        assert_eq!(normalizer().normalize("jokes"), "joke");
        assert_eq!(normalizer().normalize("stories"), "story");
        assert_eq!(normalizer().normalize("boxes"), "box");
        assert_eq!(normalizer().normalize("glasses"), "glass");
        assert_eq!(normalizer().normalize("children"), "child");
        assert_eq!(normalizer().normalize("feet"), "foot");
        assert_eq!(normalizer().normalize("mens"), "man");
    }

    #[test]
    fn leaves_invariant_words_alone() {
        assert_eq!(normalizer().normalize("thanks"), "thanks");
        assert_eq!(normalizer().normalize("news"), "news");
        assert_eq!(normalizer().normalize("status"), "status");
        assert_eq!(normalizer().normalize("analysis"), "analysis");
    }

    #[test]
    fn only_stopwords_normalizes_to_empty() {
        assert_eq!(normalizer().normalize("is it the one that was"), "it one");
        assert_eq!(normalizer().normalize("the and of"), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let n = normalizer();
        for input in [
            "Tell me a joke about the weather forecasts!",
            "Why did the children's toys break?",
            "How's it going, my friends' boxes?",
            "What's the TIME right now in Paris",
            "stories churches wishes buses lenses",
            "mens peoples feet geeses",
            "",
            "   ",
        ] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn lowercase_only_mode() {
        let n = Normalizer::lowercase_only();
        assert!(!n.has_linguistic_resources());
        assert_eq!(n.normalize("Tell me a JOKE!"), "tell me a joke!");
    }

    #[test]
    fn missing_stopword_file_degrades_with_warning() {
        let (n, warning) = Normalizer::load(Some(Path::new("/nonexistent/stopwords.txt")));
        assert!(!n.has_linguistic_resources());
        assert!(matches!(
            warning,
            Some(InitializationWarning::LinguisticResources { .. })
        ));
    }

    #[test]
    fn stopword_file_extends_builtin_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopwords.txt");
        fs::write(&path, "# extra words\nPlease\n\nkindly # polite\n").unwrap();

        let (n, warning) = Normalizer::load(Some(&path));
        assert!(warning.is_none());
        assert!(n.has_linguistic_resources());
        assert_eq!(n.normalize("Please kindly tell me a joke"), "tell joke");
    }

    #[test]
    fn builtin_resources_have_stopwords() {
        let resources = LinguisticResources::builtin();
        assert!(resources.is_stopword("the"));
        assert!(!resources.is_stopword("you"));
        assert!(resources.is_stopword("which"));
        assert!(!resources.is_stopword("what"));
    }

    #[test]
    fn which_is_dropped_before_matching() {
        assert_eq!(normalizer().normalize("Which model are you?"), "model are you");
    }
}
