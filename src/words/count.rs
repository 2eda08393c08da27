// src/words/count.rs
// =============================================================================
// This module splits text into words and counts how often each one appears.
//
// Two tokenization policies are supported, and a crawl uses exactly one:
// - Letters (the default): a word is a maximal run of Unicode letters
//   (general category L, matched with the regex `\p{L}+`). Digits,
//   punctuation, whitespace, combining marks and letter-like numerals such
//   as "Ⅻ" all separate words and are dropped.
// - Whitespace: split on the space character only, dropping empty pieces.
//
// Words are counted exactly as written: "Data" and "data" are different.
//
// Rust concepts:
// - HashMap: insert-or-increment, allocating only for new words
// - Iterators and closures: for splitting and sorting
// - Lifetimes: ranked() borrows words from the table instead of copying
// =============================================================================

use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    // Compiled once; the pattern is a constant so it cannot fail
    static ref LETTER_RUN: Regex = Regex::new(r"\p{L}+").unwrap();
}

/// How page text is split into words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Tokenization {
    /// Maximal runs of Unicode letters
    #[default]
    Letters,
    /// Split on literal spaces, empty pieces discarded
    Whitespace,
}

impl Tokenization {
    // Returns an iterator over the words of `text` under this policy
    //
    // Boxed because the two policies produce different iterator types
    fn tokens<'a>(self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self {
            Tokenization::Letters => Box::new(LETTER_RUN.find_iter(text).map(|m| m.as_str())),
            Tokenization::Whitespace => {
                Box::new(text.split(' ').filter(|token| !token.is_empty()))
            }
        }
    }
}

/// Word -> occurrence count for a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: HashMap<String, u64>,
}

impl WordFrequency {
    /// Counts every word in `text` using the given policy.
    pub fn count(text: &str, policy: Tokenization) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();

        for token in policy.tokens(text) {
            // Only allocate a String the first time we see a word
            match counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.to_string(), 1);
                }
            }
        }

        Self { counts }
    }

    /// How many times `word` was seen (0 if never).
    #[cfg(test)]
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of words counted, duplicates included.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// All (word, count) pairs, most frequent first.
    ///
    /// Ties are broken by the word itself so the order is deterministic.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut pairs: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(word, &count)| (word.as_str(), count))
            .collect();

        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs
    }

    /// The `n` most frequent words, in ranked order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does \p{L}+ match?
//    - \p{L} is "any character in Unicode's Letter category"
//    - The + makes it grab the longest run of letters it can
//    - find_iter() walks every such run: "big-data!" gives "big", "data"
//    - It understands every script, so "Straße" and "東京" count too
//
// 2. Why lazy_static?
//    - Compiling a regex is slow compared to running it
//    - lazy_static builds it the first time it is used, then reuses it
//
// 3. Why Box<dyn Iterator>?
//    - Each match arm builds a different iterator type
//    - A function can only return one concrete type
//    - Boxing hides the concrete type behind a trait object
//
// 4. Why sort_by with then_with?
//    - b.1.cmp(&a.1) sorts counts from high to low (note b before a)
//    - then_with() only runs when the counts are equal
//    - Without the tie-break, HashMap order would leak into the output
// -----------------------------------------------------------------------------
