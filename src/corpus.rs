//! Loading the labeled SMS corpus from a delimited text file.
//!
//! The public SMS spam collection ships as a latin-1 CSV with the columns
//! `v1` (label) and `v2` (message) followed by a few mostly empty columns.
//! Column names and the byte decoding are configurable through
//! [`LoadOptions`].

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use csv::{ByteRecord, ReaderBuilder};
use log::{debug, info};
use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Class label of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Parse a label cell, ignoring surrounding whitespace and case.
    pub fn parse(raw: &str) -> Option<Label> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spam" => Some(Label::Spam),
            "ham" => Some(Label::Ham),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => f.write_str("spam"),
            Label::Ham => f.write_str("ham"),
        }
    }
}

/// One SMS message. Its identity is the position in the [`Corpus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub label: Label,
    pub text: String,
}

impl Message {
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Message {
            label,
            text: text.into(),
        }
    }
}

/// Messages in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    messages: Vec<Message>,
}

impl Corpus {
    pub fn new(messages: Vec<Message>) -> Self {
        Corpus { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl FromIterator<Message> for Corpus {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// How raw cell bytes become text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EncodingPolicy {
    /// Each byte is the code point of the same value (ISO-8859-1).
    #[default]
    Latin1,
    /// UTF-8, invalid sequences replaced by U+FFFD.
    Lossy,
    /// UTF-8, invalid sequences dropped.
    Ignore,
}

impl EncodingPolicy {
    /// Decode `bytes` into a `String`. Never fails.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            EncodingPolicy::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            EncodingPolicy::Lossy => String::from_utf8_lossy(bytes).into_owned(),
            EncodingPolicy::Ignore => bytes.utf8_chunks().map(|chunk| chunk.valid()).collect(),
        }
    }
}

/// Options for [`load_corpus`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub label_column: String,
    pub message_column: String,
    pub encoding: EncodingPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            label_column: "v1".to_string(),
            message_column: "v2".to_string(),
            encoding: EncodingPolicy::Latin1,
        }
    }
}

/// Read a CSV file with a header row into a [`Corpus`].
///
/// Only the configured label and message columns are kept. Records may have
/// any number of extra fields. Missing files, missing columns, short records
/// and labels other than `spam`/`ham` fail with [`AnalysisError::DataLoad`].
pub fn load_corpus(path: &Path, options: &LoadOptions) -> Result<Corpus> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AnalysisError::data_load(path, e.to_string()))?;

    let headers = reader
        .byte_headers()
        .map_err(|e| AnalysisError::data_load(path, e.to_string()))?
        .clone();
    let label_idx = column_index(&headers, &options.label_column, options.encoding)
        .ok_or_else(|| {
            AnalysisError::data_load(path, format!("missing column '{}'", options.label_column))
        })?;
    let message_idx = column_index(&headers, &options.message_column, options.encoding)
        .ok_or_else(|| {
            AnalysisError::data_load(
                path,
                format!("missing column '{}'", options.message_column),
            )
        })?;
    debug!(
        "Columns: label '{}' at {}, message '{}' at {}",
        options.label_column, label_idx, options.message_column, message_idx
    );

    let mut messages = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| AnalysisError::data_load(path, e.to_string()))?;
        // physical line where the record starts; quoted fields may span lines
        let line = record.position().map_or(row as u64 + 2, |p| p.line());
        let (Some(raw_label), Some(raw_text)) = (record.get(label_idx), record.get(message_idx))
        else {
            return Err(AnalysisError::data_load(
                path,
                format!("line {line}: expected at least {} fields", label_idx.max(message_idx) + 1),
            ));
        };
        let label_text = options.encoding.decode(raw_label);
        let label = Label::parse(&label_text).ok_or_else(|| {
            AnalysisError::data_load(path, format!("line {line}: unknown label '{label_text}'"))
        })?;
        messages.push(Message::new(label, options.encoding.decode(raw_text)));
    }

    info!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(Corpus::new(messages))
}

fn column_index(headers: &ByteRecord, name: &str, encoding: EncodingPolicy) -> Option<usize> {
    headers
        .iter()
        .position(|h| encoding.decode(h).trim() == name)
}
