//! HTML to dense word-character text.
//!
//! Extraction runs in a fixed order:
//!
//! 1. decode the raw bytes with the assumed encoding (lossy, never fails);
//! 2. drop scripts, styles and comments, parse, and concatenate text nodes;
//! 3. strip any `<...>` fragments the parser left behind;
//! 4. strip every character that is neither a word character nor whitespace;
//! 5. delete all whitespace.
//!
//! The result is a single run of word characters. Word boundaries are lost
//! on purpose: segmentation happens later in [`crate::tokenize`].

use std::fmt;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::parse::Document;

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Page text with markup, punctuation and whitespace removed.
///
/// Only word characters (Unicode letters, marks, digits and connector
/// punctuation such as `_`) remain. Construct it with [`extract`],
/// [`normalize`], or `From<&str>`, all of which enforce that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for NormalizedText {
    fn from(text: &str) -> Self {
        normalize(text)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts normalized text from raw page bytes.
///
/// `encoding` is a WHATWG encoding label such as `"utf-8"` or `"gbk"`. The
/// label wins over any charset the page declares. Unknown labels fall back to
/// UTF-8. Empty or markup-only input yields an empty [`NormalizedText`].
///
/// # Example
///
/// ```rust
/// use cipin_core::extract;
///
/// let text = extract("<p>你好，世界！</p>".as_bytes(), "utf-8");
/// assert_eq!(text.as_str(), "你好世界");
/// ```
pub fn extract(raw_html: &[u8], encoding: &str) -> NormalizedText {
    let html = decode(raw_html, encoding);
    let doc = Document::parse_with_preprocessing(&html);
    extract_document(&doc)
}

/// Extracts normalized text from an already decoded HTML string.
pub fn extract_str(html: &str) -> NormalizedText {
    extract_document(&Document::parse_with_preprocessing(html))
}

/// Extracts normalized text from a parsed document.
pub fn extract_document(doc: &Document) -> NormalizedText {
    normalize(&doc.text_content())
}

/// Applies the markup, punctuation and whitespace passes to plain text.
pub fn normalize(text: &str) -> NormalizedText {
    let without_markup = MARKUP_RE.replace_all(text, "");
    let words_only = NON_WORD_RE.replace_all(&without_markup, "");
    let dense = WHITESPACE_RE.replace_all(&words_only, "");

    NormalizedText(dense.trim().to_string())
}

/// Decodes bytes with the named encoding, replacing malformed sequences.
///
/// A byte-order mark does not override the chosen encoding.
pub fn decode(raw: &[u8], encoding: &str) -> String {
    let label = encoding.trim();
    let encoding = Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
        tracing::warn!(label, "unknown encoding label, decoding as UTF-8");
        UTF_8
    });

    let (text, had_errors) = encoding.decode_without_bom_handling(raw);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "page bytes did not match encoding, decoded lossily");
    }

    text.into_owned()
}
