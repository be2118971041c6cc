//! Utilities for turning documents into sequences of tokens that can be diffed.

use clap::ValueEnum;
use logging_timer::time;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use unicode_segmentation::UnicodeSegmentation;

/// The unit that a document is split into before diffing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Unicode scalar values.
    Char,
    /// Extended grapheme clusters.
    Grapheme,
    /// Words, whitespace runs and punctuation, following the unicode word boundary rules.
    #[default]
    Word,
    /// Lines, including their line terminator.
    Line,
}

/// The configuration options for tokenizing input documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct InputProcessor {
    /// How finely to split the documents.
    pub granularity: Granularity,

    /// Whether leading and trailing whitespace should be ignored when comparing tokens.
    ///
    /// Whitespace-only tokens still take part in the diff, but they compare equal to each other.
    pub strip_whitespace: bool,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            strip_whitespace: false,
        }
    }
}

impl InputProcessor {
    /// Split a document into tokens.
    ///
    /// The text of the returned tokens always concatenates back to `text`.
    #[time("info", "input_processing::{}")]
    pub fn process<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let pieces: Vec<&'a str> = match self.granularity {
            Granularity::Char => text
                .char_indices()
                .map(|(idx, c)| &text[idx..idx + c.len_utf8()])
                .collect(),
            Granularity::Grapheme => text.graphemes(true).collect(),
            Granularity::Word => text.split_word_bounds().collect(),
            Granularity::Line => text.split_inclusive('\n').collect(),
        };
        pieces
            .into_iter()
            .map(|piece| Token::new(piece, self.strip_whitespace))
            .collect()
    }
}

/// A slice of a document that is compared as a single element.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Token<'a> {
    /// The text of the token, exactly as it appears in the document.
    pub text: &'a str,

    /// The text that is used for comparisons.
    key: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, strip_whitespace: bool) -> Self {
        let key = if strip_whitespace { text.trim() } else { text };
        Self { text, key }
    }

    /// Whether the token ends a line.
    ///
    /// This is the newline predicate handed to the differ so that positions carry line numbers.
    pub fn is_newline(&self) -> bool {
        self.text.ends_with('\n')
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Concatenate the text of a run of tokens.
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|token| token.text).collect()
}
