//! Global vocabularies: the union of per-message token, lemma and stem sets.

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::corpus::{Corpus, Message};
use crate::transform::{TextTransformProvider, TransformError};

/// A set of normalized strings.
pub type TokenSet = BTreeSet<String>;

/// Which normalization a vocabulary was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Tokens,
    Lemmas,
    Stems,
}

impl TransformKind {
    pub fn describe(self) -> &'static str {
        match self {
            TransformKind::Tokens => "tokens",
            TransformKind::Lemmas => "lemmatized tokens",
            TransformKind::Stems => "stemmed tokens",
        }
    }

    /// Local set of one message under this transform. Stems are
    /// `stem(tokenize(text))`.
    pub fn apply(
        self,
        provider: &dyn TextTransformProvider,
        message: &Message,
    ) -> Result<TokenSet, TransformError> {
        match self {
            TransformKind::Tokens => Ok(provider.tokenize(&message.text)?.into_iter().collect()),
            TransformKind::Lemmas => Ok(provider.lemmatize(&message.text)?.into_iter().collect()),
            TransformKind::Stems => provider.stem(&provider.tokenize(&message.text)?),
        }
    }
}

/// Union of `transform(message)` over the whole corpus.
///
/// An empty corpus yields an empty set. The first transform error aborts the
/// fold.
pub fn build_global_vocabulary<F, I>(corpus: &Corpus, transform: F) -> Result<TokenSet, TransformError>
where
    F: Fn(&Message) -> Result<I, TransformError>,
    I: IntoIterator<Item = String>,
{
    corpus.iter().try_fold(TokenSet::new(), |mut all, message| {
        all.extend(transform(message)?);
        Ok(all)
    })
}

/// Union of already computed per-message sets.
pub fn union_of<'a>(sets: impl IntoIterator<Item = &'a TokenSet>) -> TokenSet {
    sets.into_iter().fold(TokenSet::new(), |mut all, set| {
        all.extend(set.iter().cloned());
        all
    })
}

/// One [`TokenSet`] per [`TransformKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalVocabulary {
    pub tokens: TokenSet,
    pub lemmas: TokenSet,
    pub stems: TokenSet,
}

impl GlobalVocabulary {
    pub fn build(corpus: &Corpus, provider: &dyn TextTransformProvider) -> Result<Self, TransformError> {
        let vocabulary = GlobalVocabulary {
            tokens: build_global_vocabulary(corpus, |m| TransformKind::Tokens.apply(provider, m))?,
            lemmas: build_global_vocabulary(corpus, |m| TransformKind::Lemmas.apply(provider, m))?,
            stems: build_global_vocabulary(corpus, |m| TransformKind::Stems.apply(provider, m))?,
        };
        debug!(
            "{} vocabulary: {} tokens, {} lemmas, {} stems",
            provider.name(),
            vocabulary.tokens.len(),
            vocabulary.lemmas.len(),
            vocabulary.stems.len()
        );
        Ok(vocabulary)
    }
}

/// Vocabulary sizes of one provider, for comparing normalization strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularySummary {
    pub provider: String,
    pub tokens: usize,
    pub lemmas: usize,
    pub stems: usize,
    /// Lemmas obtained by lemmatizing the global token set directly.
    pub lemmas_of_tokens: usize,
}

impl VocabularySummary {
    pub fn compute(corpus: &Corpus, provider: &dyn TextTransformProvider) -> Result<Self, TransformError> {
        let vocabulary = GlobalVocabulary::build(corpus, provider)?;
        let lemmas_of_tokens = lemmatize_token_set(&vocabulary.tokens, provider)?;
        Ok(VocabularySummary {
            provider: provider.name().to_string(),
            tokens: vocabulary.tokens.len(),
            lemmas: vocabulary.lemmas.len(),
            stems: vocabulary.stems.len(),
            lemmas_of_tokens: lemmas_of_tokens.len(),
        })
    }
}

/// Lemmatize each member of `tokens`.
pub fn lemmatize_token_set(
    tokens: &TokenSet,
    provider: &dyn TextTransformProvider,
) -> Result<TokenSet, TransformError> {
    provider.lemmatize_tokens(tokens)
}

/// Render summaries as an aligned text table.
pub fn render_vocabulary(summaries: &[VocabularySummary]) -> String {
    let mut out = format!(
        "{:<14} {:>8} {:>8} {:>8} {:>16}\n",
        "provider", "tokens", "lemmas", "stems", "lemmas(tokens)"
    );
    for s in summaries {
        out.push_str(&format!(
            "{:<14} {:>8} {:>8} {:>8} {:>16}\n",
            s.provider, s.tokens, s.lemmas, s.stems, s.lemmas_of_tokens
        ));
    }
    out
}
