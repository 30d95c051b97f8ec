//! Chinese word segmentation.
//!
//! [`Tokenizer`] wraps a jieba dictionary. Loading the bundled dictionary is
//! the most expensive step of the pipeline, so the default dictionary is
//! built once per process and shared by every tokenizer that doesn't load a
//! user dictionary.

use std::fs::File;
use std::io::BufReader;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use jieba_rs::Jieba;

use crate::extract::NormalizedText;
use crate::{CipinError, Result};

static DEFAULT_DICTIONARY: LazyLock<Arc<Jieba>> = LazyLock::new(|| Arc::new(Jieba::new()));

/// Word tokens in text order. Not unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for TokenSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Dictionary-based segmenter for text without word delimiters.
///
/// Segmentation is deterministic for a given dictionary: the same input
/// always yields the same tokens, and the tokens concatenate back to the
/// input. With `hmm` enabled, runs of characters missing from the
/// dictionary are grouped by jieba's HMM instead of being split one
/// character at a time.
#[derive(Clone)]
pub struct Tokenizer {
    jieba: Arc<Jieba>,
    hmm: bool,
}

impl Tokenizer {
    /// Creates a tokenizer over the shared bundled dictionary with HMM enabled.
    pub fn new() -> Self {
        Self { jieba: Arc::clone(&DEFAULT_DICTIONARY), hmm: true }
    }

    /// Creates a tokenizer over the bundled dictionary extended with a user
    /// dictionary file.
    ///
    /// Each line of the file is `word [freq] [tag]`, as jieba expects. The
    /// extended dictionary is private to the returned tokenizer.
    pub fn with_user_dict(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CipinError::FileNotFound(path.to_path_buf()));
        }

        let mut jieba = Jieba::new();
        let mut reader = BufReader::new(File::open(path)?);
        jieba
            .load_dict(&mut reader)
            .map_err(|e| CipinError::Dictionary(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded user dictionary");

        Ok(Self { jieba: Arc::new(jieba), hmm: true })
    }

    /// Sets whether unknown words are grouped with the HMM.
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }

    pub fn hmm(&self) -> bool {
        self.hmm
    }

    /// Segments normalized text into tokens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cipin_core::{NormalizedText, Tokenizer};
    ///
    /// let text = NormalizedText::from("我喜欢猫");
    /// let tokens = Tokenizer::new().tokenize(&text);
    /// assert_eq!(tokens.concat(), "我喜欢猫");
    /// ```
    pub fn tokenize(&self, text: &NormalizedText) -> TokenSequence {
        if text.is_empty() {
            return TokenSequence::default();
        }

        let tokens: TokenSequence = self.jieba.cut(text.as_str(), self.hmm).into_iter().collect();
        tracing::debug!(chars = text.char_count(), tokens = tokens.len(), "segmented text");

        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer").field("hmm", &self.hmm).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_empty_text_yields_no_tokens() {
        let tokens = Tokenizer::new().tokenize(&NormalizedText::default());
        assert!(tokens.is_empty());
    }

    #[rstest]
    #[case("我喜欢猫和狗我喜欢猫")]
    #[case("中华人民共和国成立于1949年")]
    #[case("Rust编程语言snake_case测试")]
    #[case("南京市长江大桥")]
    #[case("他来到了网易杭研大厦")]
    fn test_tokens_reconstruct_input(#[case] input: &str) {
        let text = NormalizedText::from(input);
        let tokens = Tokenizer::new().tokenize(&text);

        assert!(!tokens.is_empty());
        assert!(tokens.iter().all(|t| !t.is_empty()));
        assert_eq!(tokens.concat(), text.as_str());
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_segmentation_is_deterministic(#[case] hmm: bool) {
        let text = NormalizedText::from("小明硕士毕业于中国科学院计算所后在日本京都大学深造");
        let first = Tokenizer::new().with_hmm(hmm).tokenize(&text);
        let second = Tokenizer::new().with_hmm(hmm).tokenize(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_known_words_are_kept_whole() {
        let text = NormalizedText::from("中国的中国的中国");
        let tokens = Tokenizer::new().tokenize(&text);
        assert_eq!(tokens.iter().filter(|t| t.as_str() == "中国").count(), 3);
    }

    #[test]
    fn test_user_dictionary_adds_words() {
        let mut dict = tempfile::NamedTempFile::new().unwrap();
        writeln!(dict, "词频统计器 100000 n").unwrap();

        let tokenizer = Tokenizer::with_user_dict(dict.path()).unwrap();
        let tokens = tokenizer.tokenize(&NormalizedText::from("词频统计器很好用"));
        assert!(tokens.iter().any(|t| t == "词频统计器"));
    }

    #[test]
    fn test_user_dictionary_missing_file() {
        let result = Tokenizer::with_user_dict(Path::new("/nonexistent/dict.txt"));
        assert!(matches!(result, Err(CipinError::FileNotFound(_))));
    }

    #[test]
    fn test_hmm_flag() {
        assert!(Tokenizer::new().hmm());
        assert!(!Tokenizer::new().with_hmm(false).hmm());
    }

    proptest! {
        #[test]
        fn prop_tokens_concatenate_to_input(text in "[\u{4e00}-\u{9fa5}a-zA-Z0-9_]{0,64}") {
            let normalized = NormalizedText::from(text.as_str());
            let tokens = Tokenizer::new().tokenize(&normalized);

            prop_assert_eq!(tokens.concat(), normalized.as_str());
            prop_assert!(tokens.iter().all(|token| !token.is_empty()));
        }

        #[test]
        fn prop_tokens_concatenate_to_input_without_hmm(text in any::<String>()) {
            let normalized = NormalizedText::from(text.as_str());
            let tokens = Tokenizer::new().with_hmm(false).tokenize(&normalized);

            prop_assert_eq!(tokens.concat(), normalized.as_str());
        }
    }
}
