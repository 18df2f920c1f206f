//! # sms_vocab
//!
//! Compare how tokenization, lemmatization and stemming shape the vocabulary
//! of a labeled SMS spam/ham corpus.
//!
//! - [`load_corpus`] reads the two-column CSV dataset.
//! - [`build_global_vocabulary`] and [`GlobalVocabulary`] aggregate token,
//!   lemma and stem sets.
//! - [`find_stem_sensitive_message`] and [`find_lemma_sensitive_message`]
//!   look for the first message whose removal changes one vocabulary but not
//!   the other.
//! - [`compute_statistics`] reports message and word counts.
//!
//! [`run_analysis`] ties these together the way the CLI uses them.

use std::path::PathBuf;

use clap::ValueEnum;
use log::info;
use serde::Serialize;

mod corpus;
mod error;
mod export;
mod lemma;
mod sensitivity;
mod statistics;
mod transform;
mod vocabulary;

pub use corpus::{Corpus, EncodingPolicy, Label, LoadOptions, Message, load_corpus};
pub use error::{AnalysisError, Result};
pub use export::save_report;
pub use lemma::{noun_lemma, verb_lemma};
pub use sensitivity::{
    Direction, RemovalSemantics, SensitiveMessage, find_lemma_sensitive_message,
    find_sensitive_message, find_stem_sensitive_message,
};
pub use statistics::{
    StatisticsReport, compute_statistics, count_words, render_statistics, sort_by_frequency,
    words,
};
pub use transform::{
    DictionaryProvider, MorphologicalProvider, ProviderKind, TextTransformProvider,
    TransformError, load_lemma_exceptions,
};
pub use vocabulary::{
    GlobalVocabulary, TokenSet, TransformKind, VocabularySummary, build_global_vocabulary,
    lemmatize_token_set, render_vocabulary, union_of,
};

/// Which parts of the analysis to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[default]
    All,
    Stats,
    Vocabulary,
    Sensitivity,
}

impl Mode {
    fn includes(self, other: Mode) -> bool {
        self == Mode::All || self == other
    }
}

/// Options for [`run_analysis`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub load: LoadOptions,
    pub provider: ProviderKind,
    pub removal: RemovalSemantics,
    pub mode: Mode,
    /// Extra `form<TAB>lemma` pairs for the dictionary provider
    pub lemma_exceptions: Option<PathBuf>,
}

/// Outcome of one sensitivity search.
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityReport {
    pub direction: Direction,
    pub provider: String,
    pub semantics: RemovalSemantics,
    pub found: Option<SensitiveMessage>,
}

/// Everything one run computed.
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub dataset: PathBuf,
    pub statistics: Option<StatisticsReport>,
    pub vocabulary: Vec<VocabularySummary>,
    pub sensitivity: Vec<SensitivityReport>,
}

/// Build the provider for `kind`, applying the lemma exception file to the
/// dictionary backend.
pub fn build_provider(
    kind: ProviderKind,
    options: &AnalysisOptions,
) -> Result<Box<dyn TextTransformProvider>> {
    match (kind, &options.lemma_exceptions) {
        (ProviderKind::Dictionary, Some(path)) => Ok(Box::new(
            DictionaryProvider::new().with_exceptions(load_lemma_exceptions(path)?),
        )),
        _ => Ok(kind.build()),
    }
}

/// Load the dataset at `path` and run the analyses selected by `options.mode`.
pub fn run_analysis(path: &std::path::Path, options: &AnalysisOptions) -> Result<FullReport> {
    let corpus = load_corpus(path, &options.load)?;
    analyze_corpus(&corpus, path.to_path_buf(), options)
}

/// Run the selected analyses on an already loaded corpus.
pub fn analyze_corpus(
    corpus: &Corpus,
    dataset: PathBuf,
    options: &AnalysisOptions,
) -> Result<FullReport> {
    let statistics = if options.mode.includes(Mode::Stats) {
        Some(compute_statistics(corpus)?)
    } else {
        None
    };

    let mut vocabulary = Vec::new();
    if options.mode.includes(Mode::Vocabulary) {
        for kind in ProviderKind::value_variants() {
            let provider = build_provider(*kind, options)?;
            vocabulary.push(VocabularySummary::compute(corpus, provider.as_ref())?);
        }
    }

    let mut sensitivity = Vec::new();
    if options.mode.includes(Mode::Sensitivity) {
        let provider = build_provider(options.provider, options)?;
        info!(
            "Running sensitivity analysis with the {} provider over {} messages",
            provider.name(),
            corpus.len()
        );
        for direction in [Direction::Stems, Direction::Lemmas] {
            let found =
                find_sensitive_message(corpus, provider.as_ref(), direction, options.removal)?;
            sensitivity.push(SensitivityReport {
                direction,
                provider: provider.name().to_string(),
                semantics: options.removal,
                found,
            });
        }
    }

    Ok(FullReport {
        dataset,
        statistics,
        vocabulary,
        sensitivity,
    })
}

/// Human readable rendering of a [`FullReport`].
pub fn render_report(report: &FullReport) -> String {
    let mut out = String::new();
    if let Some(stats) = &report.statistics {
        out.push_str(&render_statistics(stats));
    }
    if !report.vocabulary.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Vocabulary sizes:\n");
        out.push_str(&render_vocabulary(&report.vocabulary));
    }
    if !report.sensitivity.is_empty() && !out.is_empty() {
        out.push('\n');
    }
    for s in &report.sensitivity {
        let heading = match s.direction {
            Direction::Stems => "Stem-sensitive message",
            Direction::Lemmas => "Lemma-sensitive message",
        };
        let semantics = match s.semantics {
            RemovalSemantics::SetDifference => "set-difference",
            RemovalSemantics::LeaveOneOut => "leave-one-out",
        };
        match &s.found {
            Some(hit) => out.push_str(&format!(
                "{heading} ({}, {semantics}): index {} [{}] {}\n",
                s.provider, hit.index, hit.message.label, hit.message.text
            )),
            None => out.push_str(&format!("{heading} ({}, {semantics}): none\n", s.provider)),
        }
    }
    out
}
