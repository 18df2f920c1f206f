//! Text transform providers: tokenization, lemmatization and stemming.
//!
//! The analyses only rely on the [`TextTransformProvider`] contract. Two
//! backends are built in and picked with [`ProviderKind`]:
//!
//! - [`DictionaryProvider`]: case-preserving Treebank-style tokens, noun
//!   lemmas from an irregular-form dictionary plus plural rules.
//! - [`MorphologicalProvider`]: lower-cased word tokens, lemmas guessed from
//!   verb and noun morphology.
//!
//! Both stem with the Snowball English stemmer on lower-cased tokens.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;

use crate::error::{AnalysisError, Result};
use crate::lemma::{noun_lemma, verb_lemma};

/// Failure inside a transform provider.
#[derive(Debug, Error)]
#[error("{operation} failed: {reason}")]
pub struct TransformError {
    pub operation: &'static str,
    pub reason: String,
}

impl TransformError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        TransformError {
            operation,
            reason: reason.into(),
        }
    }
}

/// The three normalization primitives the analyses consume.
pub trait TextTransformProvider {
    /// Short backend name used in reports.
    fn name(&self) -> &'static str;

    /// Split text into tokens.
    fn tokenize(&self, text: &str) -> std::result::Result<Vec<String>, TransformError>;

    /// Tokenize and lemmatize text.
    fn lemmatize(&self, text: &str) -> std::result::Result<Vec<String>, TransformError>;

    /// Stem already tokenized text.
    fn stem(&self, tokens: &[String]) -> std::result::Result<BTreeSet<String>, TransformError>;

    /// Lemmatize every member of an existing token set.
    fn lemmatize_tokens(
        &self,
        tokens: &BTreeSet<String>,
    ) -> std::result::Result<BTreeSet<String>, TransformError> {
        let mut lemmas = BTreeSet::new();
        for token in tokens {
            lemmas.extend(self.lemmatize(token)?);
        }
        Ok(lemmas)
    }
}

/// Selects the transform backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    #[default]
    Dictionary,
    Morphological,
}

impl ProviderKind {
    pub fn build(self) -> Box<dyn TextTransformProvider> {
        match self {
            ProviderKind::Dictionary => Box::new(DictionaryProvider::new()),
            ProviderKind::Morphological => Box::new(MorphologicalProvider::new()),
        }
    }
}

// words with inner punctuation (3.50, e-mail, don't), ellipses, single symbols
static TREEBANK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:[-'’.,]\w+)*|\.\.\.|[^\w\s]").expect("valid token regex")
});

static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:['’]\w+)*").expect("valid word regex"));

const CLITICS: &[&str] = &["s", "m", "d", "ll", "re", "ve"];

/// Split `don't` into `do` + `n't` and `he's` into `he` + `'s`.
fn split_clitic(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    if lower.len() > 3 && lower.ends_with("n't") {
        let cut = word.len() - 3;
        return vec![word[..cut].to_string(), word[cut..].to_string()];
    }
    if let Some(pos) = word.rfind(&['\'', '’'][..]) {
        let apostrophe_len = word[pos..].chars().next().map_or(1, char::len_utf8);
        let tail = word[pos + apostrophe_len..].to_lowercase();
        if pos > 0 && CLITICS.contains(&tail.as_str()) {
            return vec![word[..pos].to_string(), word[pos..].to_string()];
        }
    }
    vec![word.to_string()]
}

fn snowball_stems(stemmer: &Stemmer, tokens: &[String]) -> BTreeSet<String> {
    tokens
        .iter()
        .map(|t| stemmer.stem(&t.to_lowercase()).into_owned())
        .collect()
}

/// Rule and dictionary based backend.
pub struct DictionaryProvider {
    stemmer: Stemmer,
    exceptions: HashMap<String, String>,
}

impl DictionaryProvider {
    pub fn new() -> Self {
        DictionaryProvider {
            stemmer: Stemmer::create(Algorithm::English),
            exceptions: HashMap::new(),
        }
    }

    /// Add irregular forms (`form -> lemma`) checked before the built-in rules.
    pub fn with_exceptions(mut self, exceptions: HashMap<String, String>) -> Self {
        self.exceptions.extend(exceptions);
        self
    }

    fn lemma_of(&self, token: &str) -> String {
        if let Some(lemma) = self.exceptions.get(token) {
            return lemma.clone();
        }
        noun_lemma(token).unwrap_or_else(|| token.to_string())
    }
}

impl Default for DictionaryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTransformProvider for DictionaryProvider {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn tokenize(&self, text: &str) -> std::result::Result<Vec<String>, TransformError> {
        Ok(TREEBANK_TOKEN
            .find_iter(text)
            .flat_map(|m| split_clitic(m.as_str()))
            .collect())
    }

    fn lemmatize(&self, text: &str) -> std::result::Result<Vec<String>, TransformError> {
        Ok(self
            .tokenize(text)?
            .iter()
            .map(|t| self.lemma_of(t))
            .collect())
    }

    fn stem(&self, tokens: &[String]) -> std::result::Result<BTreeSet<String>, TransformError> {
        Ok(snowball_stems(&self.stemmer, tokens))
    }

    // tokens are already split, lemmatize each one as is
    fn lemmatize_tokens(
        &self,
        tokens: &BTreeSet<String>,
    ) -> std::result::Result<BTreeSet<String>, TransformError> {
        Ok(tokens.iter().map(|t| self.lemma_of(t)).collect())
    }
}

/// Morphology guessing backend.
pub struct MorphologicalProvider {
    stemmer: Stemmer,
}

impl MorphologicalProvider {
    pub fn new() -> Self {
        MorphologicalProvider {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for MorphologicalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTransformProvider for MorphologicalProvider {
    fn name(&self) -> &'static str {
        "morphological"
    }

    fn tokenize(&self, text: &str) -> std::result::Result<Vec<String>, TransformError> {
        let lower = text.to_lowercase();
        Ok(WORD_TOKEN
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn lemmatize(&self, text: &str) -> std::result::Result<Vec<String>, TransformError> {
        Ok(self
            .tokenize(text)?
            .into_iter()
            .map(|t| verb_lemma(&t).or_else(|| noun_lemma(&t)).unwrap_or(t))
            .collect())
    }

    fn stem(&self, tokens: &[String]) -> std::result::Result<BTreeSet<String>, TransformError> {
        Ok(snowball_stems(&self.stemmer, tokens))
    }
}

/// Read a tab separated `form<TAB>lemma` file, one pair per line.
/// Blank lines and lines starting with `#` are skipped.
pub fn load_lemma_exceptions(path: &Path) -> Result<HashMap<String, String>> {
    let file = File::open(path).map_err(|e| AnalysisError::data_load(path, e.to_string()))?;
    let mut map = HashMap::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| AnalysisError::data_load(path, e.to_string()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((form, lemma)) = line.split_once('\t') else {
            return Err(AnalysisError::data_load(
                path,
                format!("line {}: expected 'form<TAB>lemma'", idx + 1),
            ));
        };
        map.insert(form.trim().to_string(), lemma.trim().to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dictionary_tokenizer_splits_punctuation_and_clitics() {
        let p = DictionaryProvider::new();
        let tokens = p.tokenize("Don't call me, I'll win £3.50!").unwrap();
        assert_eq!(
            tokens,
            strings(&["Do", "n't", "call", "me", ",", "I", "'ll", "win", "£", "3.50", "!"])
        );
    }

    #[test]
    fn dictionary_lemmas_are_nouns_and_keep_case() {
        let p = DictionaryProvider::new();
        let lemmas = p.lemmatize("Cats chase the leaves running").unwrap();
        assert_eq!(lemmas, strings(&["Cats", "chase", "the", "leaf", "running"]));
    }

    #[test]
    fn dictionary_exceptions_take_precedence() {
        let mut extra = HashMap::new();
        extra.insert("txt".to_string(), "text".to_string());
        let p = DictionaryProvider::new().with_exceptions(extra);
        assert_eq!(p.lemmatize("txt me").unwrap(), strings(&["text", "me"]));
    }

    #[test]
    fn stems_are_lowercased_and_deduplicated() {
        let p = DictionaryProvider::new();
        let stems = p.stem(&strings(&["Running", "runs", "run"])).unwrap();
        assert_eq!(stems.into_iter().collect::<Vec<_>>(), strings(&["run"]));
    }

    #[test]
    fn morphological_provider_reduces_verbs() {
        let p = MorphologicalProvider::new();
        assert_eq!(
            p.tokenize("I'm RUNNING, late!").unwrap(),
            strings(&["i'm", "running", "late"])
        );
        assert_eq!(
            p.lemmatize("She was running to the shops").unwrap(),
            strings(&["she", "be", "run", "to", "the", "shop"])
        );
    }

    #[test]
    fn lemmatize_tokens_unions_per_token_lemmas() {
        let p = DictionaryProvider::new();
        let tokens: BTreeSet<String> = strings(&["cats", "cat", "boxes"]).into_iter().collect();
        let lemmas = p.lemmatize_tokens(&tokens).unwrap();
        assert_eq!(lemmas.into_iter().collect::<Vec<_>>(), strings(&["box", "cat"]));
    }

    #[test]
    fn dictionary_lemmatize_tokens_keeps_clitics_whole() {
        let p = DictionaryProvider::new();
        let tokens: BTreeSet<String> = strings(&["I", "'ll", "'s", "n't"]).into_iter().collect();
        let lemmas = p.lemmatize_tokens(&tokens).unwrap();
        assert_eq!(lemmas, tokens);
    }

    #[test]
    fn provider_kind_builds_named_backend() {
        assert_eq!(ProviderKind::Dictionary.build().name(), "dictionary");
        assert_eq!(ProviderKind::Morphological.build().name(), "morphological");
    }

    #[test]
    fn exceptions_file_parses_and_rejects_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.tsv");
        std::fs::write(&good, "# irregulars\nur\tyour\n\nthx\tthanks\n").unwrap();
        let map = load_lemma_exceptions(&good).unwrap();
        assert_eq!(map.get("ur").map(String::as_str), Some("your"));
        assert_eq!(map.len(), 2);

        let bad = dir.path().join("bad.tsv");
        std::fs::write(&bad, "ur your\n").unwrap();
        assert!(load_lemma_exceptions(&bad).is_err());
    }
}
