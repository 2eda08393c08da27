// src/words/mod.rs
// =============================================================================
// This module turns page text into word-frequency tables.
//
// Submodules:
// - count: the tokenizer policies and the WordFrequency table
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items so callers write `words::WordFrequency`
// =============================================================================

mod count;

pub use count::{Tokenization, WordFrequency};
