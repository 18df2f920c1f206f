//! Descriptive corpus statistics.
//!
//! Words here are maximal runs of word characters in the lower-cased text,
//! independent of the transform providers.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::corpus::{Corpus, Label};
use crate::error::{AnalysisError, Result};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

/// How many entries [`StatisticsReport::most_frequent_words`] keeps.
pub const TOP_WORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub total_messages: usize,
    pub num_spam: usize,
    pub total_word_count: usize,
    pub avg_words_per_message: f64,
    /// Top words by descending count, ties in first-seen order.
    pub most_frequent_words: Vec<(String, usize)>,
    pub num_rare_words: usize,
    /// Every word with its count, in first-seen order.
    #[serde(skip)]
    pub word_frequencies: Vec<(String, usize)>,
}

///Splits text into lower-cased words (`\b\w+\b`).
/// # Example
/// ```
/// use sms_vocab::words;
/// assert_eq!(words("Call me, NOW!"), vec!["call", "me", "now"]);
/// ```
pub fn words(text: &str) -> Vec<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

///Counts each word. Returns `(word, count)` pairs in the order words were first seen.
/// # Example
/// ```
/// use sms_vocab::count_words;
/// let words = vec!["b".to_string(), "a".to_string(), "b".to_string()];
/// assert_eq!(count_words(&words), vec![("b".to_string(), 2), ("a".to_string(), 1)]);
/// ```
pub fn count_words(words: &[String]) -> Vec<(String, usize)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut frequency: Vec<(String, usize)> = Vec::new();
    for word in words {
        match position.get(word.as_str()) {
            Some(&i) => frequency[i].1 += 1,
            None => {
                position.insert(word, frequency.len());
                frequency.push((word.to_owned(), 1));
            }
        }
    }
    frequency
}

///Sort `(word, count)` pairs by descending count. The sort is stable, so equal
///counts keep their input order.
pub fn sort_by_frequency(mut frequency: Vec<(String, usize)>) -> Vec<(String, usize)> {
    frequency.sort_by(|a, b| b.1.cmp(&a.1));
    frequency
}

/// Compute the report. Fails with [`AnalysisError::EmptyCorpus`] when there is
/// nothing to average over.
pub fn compute_statistics(corpus: &Corpus) -> Result<StatisticsReport> {
    if corpus.is_empty() {
        return Err(AnalysisError::EmptyCorpus);
    }
    let total_messages = corpus.len();
    let num_spam = corpus.iter().filter(|m| m.label == Label::Spam).count();

    let all_words: Vec<String> = corpus.iter().flat_map(|m| words(&m.text)).collect();
    let total_word_count = all_words.len();
    let avg_words_per_message = total_word_count as f64 / total_messages as f64;

    let word_frequencies = count_words(&all_words);
    let num_rare_words = word_frequencies.iter().filter(|(_, c)| *c == 1).count();
    let most_frequent_words = sort_by_frequency(word_frequencies.clone())
        .into_iter()
        .take(TOP_WORDS)
        .collect();

    Ok(StatisticsReport {
        total_messages,
        num_spam,
        total_word_count,
        avg_words_per_message,
        most_frequent_words,
        num_rare_words,
        word_frequencies,
    })
}

/// Fixed-format report, one statistic per line.
pub fn render_statistics(report: &StatisticsReport) -> String {
    let top = report
        .most_frequent_words
        .iter()
        .map(|(w, c)| format!("('{w}', {c})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Total SMS messages: {}\n\
         Number of spam messages: {}\n\
         Total word count: {}\n\
         Average number of words per message: {:.2}\n\
         5 most frequent words: [{}]\n\
         Number of rare words: {}\n",
        report.total_messages,
        report.num_spam,
        report.total_word_count,
        report.avg_words_per_message,
        top,
        report.num_rare_words
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Message;

    fn scenario() -> Corpus {
        Corpus::new(vec![
            Message::new(Label::Ham, "Call me now"),
            Message::new(Label::Spam, "WIN cash now"),
            Message::new(Label::Ham, "Call now please"),
        ])
    }

    #[test]
    fn test_count() {
        let words: Vec<String> = ["one", "two", "two", "three", "three", "three"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let counted = count_words(&words);
        assert_eq!(
            counted,
            vec![
                ("one".to_string(), 1),
                ("two".to_string(), 2),
                ("three".to_string(), 3)
            ]
        );
        let sorted = sort_by_frequency(counted);
        assert_eq!(sorted[0], ("three".to_string(), 3));
        assert_eq!(sorted[2], ("one".to_string(), 1));
    }

    #[test]
    fn words_use_word_characters_only() {
        assert_eq!(words("U dun say so_early hor... U c"), vec![
            "u", "dun", "say", "so_early", "hor", "u", "c"
        ]);
        assert!(words("?!").is_empty());
    }

    #[test]
    fn scenario_statistics() {
        let r = compute_statistics(&scenario()).unwrap();
        assert_eq!(r.total_messages, 3);
        assert_eq!(r.num_spam, 1);
        assert_eq!(r.total_word_count, 9);
        assert!((r.avg_words_per_message - 3.0).abs() < f64::EPSILON);
        assert_eq!(r.most_frequent_words[0], ("now".to_string(), 3));
        assert_eq!(r.most_frequent_words[1], ("call".to_string(), 2));
        // ties broken by first appearance: me, win, cash
        let rest: Vec<&str> = r.most_frequent_words[2..].iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(rest, vec!["me", "win", "cash"]);
        assert_eq!(r.num_rare_words, 4);
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let err = compute_statistics(&Corpus::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyCorpus));
    }

    #[test]
    fn rendered_report_format() {
        let text = render_statistics(&compute_statistics(&scenario()).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "Total SMS messages: 3",
            "Number of spam messages: 1",
            "Total word count: 9",
            "Average number of words per message: 3.00",
            "5 most frequent words: [('now', 3), ('call', 2), ('me', 1), ('win', 1), ('cash', 1)]",
            "Number of rare words: 4",
        ]);
    }
}
