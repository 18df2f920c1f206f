//! Message-removal sensitivity: find the first message whose removal changes
//! one global vocabulary (stems or lemmas) but not the other.
//!
//! With [`RemovalSemantics::SetDifference`] the reduced vocabulary is
//! `all - local`, compared by cardinality. Because `local` is always a subset
//! of `all`, the "stable" side only holds for messages whose local set under
//! that transform is empty. [`RemovalSemantics::LeaveOneOut`] instead asks
//! whether the vocabulary of the corpus without the message is smaller, which
//! is the case exactly when the message owns an item no other message has.

use std::collections::HashMap;

use clap::ValueEnum;
use log::info;
use serde::Serialize;

use crate::corpus::{Corpus, Message};
use crate::transform::{TextTransformProvider, TransformError};
use crate::vocabulary::{TokenSet, TransformKind, union_of};

/// How "removing a message" is evaluated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalSemantics {
    /// `|all - local|` against `|all|`.
    #[default]
    SetDifference,
    /// Union over every other message against `|all|`.
    LeaveOneOut,
}

/// Which vocabulary must shrink while the other stays put.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stems shrink, lemmas stable.
    Stems,
    /// Lemmas shrink, stems stable.
    Lemmas,
}

impl Direction {
    fn kinds(self) -> (TransformKind, TransformKind) {
        match self {
            Direction::Stems => (TransformKind::Stems, TransformKind::Lemmas),
            Direction::Lemmas => (TransformKind::Lemmas, TransformKind::Stems),
        }
    }
}

/// The first matching message and its corpus index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitiveMessage {
    pub index: usize,
    pub message: Message,
}

/// First message whose removal shrinks the stem vocabulary while the lemma
/// vocabulary keeps its size.
pub fn find_stem_sensitive_message(
    corpus: &Corpus,
    provider: &dyn TextTransformProvider,
    semantics: RemovalSemantics,
) -> Result<Option<SensitiveMessage>, TransformError> {
    find_sensitive_message(corpus, provider, Direction::Stems, semantics)
}

/// First message whose removal shrinks the lemma vocabulary while the stem
/// vocabulary keeps its size.
pub fn find_lemma_sensitive_message(
    corpus: &Corpus,
    provider: &dyn TextTransformProvider,
    semantics: RemovalSemantics,
) -> Result<Option<SensitiveMessage>, TransformError> {
    find_sensitive_message(corpus, provider, Direction::Lemmas, semantics)
}

/// First message whose removal shrinks the `direction` vocabulary while the
/// other one keeps its size, evaluated per `semantics`.
pub fn find_sensitive_message(
    corpus: &Corpus,
    provider: &dyn TextTransformProvider,
    direction: Direction,
    semantics: RemovalSemantics,
) -> Result<Option<SensitiveMessage>, TransformError> {
    let (shrinking, stable) = direction.kinds();

    // per-message local sets, computed once; the global sets are their union
    let locals: Vec<(TokenSet, TokenSet)> = corpus
        .iter()
        .map(|m| -> Result<_, TransformError> {
            Ok((shrinking.apply(provider, m)?, stable.apply(provider, m)?))
        })
        .collect::<Result<_, TransformError>>()?;

    let all_shrinking = union_of(locals.iter().map(|(s, _)| s));
    let all_stable = union_of(locals.iter().map(|(_, s)| s));

    let found = match semantics {
        RemovalSemantics::SetDifference => locals.iter().position(|(local_shrinking, local_stable)| {
            let reduced_shrinking = all_shrinking.difference(local_shrinking).count();
            let reduced_stable = all_stable.difference(local_stable).count();
            reduced_shrinking < all_shrinking.len() && reduced_stable == all_stable.len()
        }),
        RemovalSemantics::LeaveOneOut => {
            let shrinking_owners = document_frequency(locals.iter().map(|(s, _)| s));
            let stable_owners = document_frequency(locals.iter().map(|(_, s)| s));
            locals.iter().position(|(local_shrinking, local_stable)| {
                owns_unique(local_shrinking, &shrinking_owners)
                    && !owns_unique(local_stable, &stable_owners)
            })
        }
    };

    match found {
        Some(index) => {
            info!(
                "Message at index {index} causes a change in {} but not in {}",
                shrinking.describe(),
                stable.describe()
            );
            Ok(Some(SensitiveMessage {
                index,
                message: corpus.messages()[index].clone(),
            }))
        }
        None => {
            info!("No message found that satisfies the condition ({direction:?}, {semantics:?})");
            Ok(None)
        }
    }
}

/// Number of messages containing each item.
fn document_frequency<'a>(sets: impl Iterator<Item = &'a TokenSet>) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for set in sets {
        for item in set {
            *counts.entry(item.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

fn owns_unique(local: &TokenSet, counts: &HashMap<&str, usize>) -> bool {
    local.iter().any(|item| counts.get(item.as_str()) == Some(&1))
}
