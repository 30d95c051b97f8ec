//! Stop-word sets.
//!
//! A [`StopWordSet`] is built once and then only read. The built-in Chinese
//! list is initialised on first use and shared process-wide through an `Arc`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::{CipinError, Result};

/// Common Chinese function words, pronouns and connectives.
pub const BUILTIN_STOP_WORDS: [&str; 80] = [
    "的", "了", "和", "是", "在", "我", "他", "她", "你", "我们", "大家", "这个", "那个", "一些", "有", "没有", "可以",
    "不可以", "就是", "也是", "还是", "不是", "这样", "那样", "这里", "那里", "如何", "怎么", "因为", "所以", "然后",
    "但是", "虽然", "但", "因", "所", "而", "且", "或者", "并且", "如果", "只是", "只有", "无论", "例如", "如", "即使",
    "甚至", "从", "到", "向", "对于", "关于", "很", "非常", "太", "更", "最", "比较", "只", "就", "再", "也", "还",
    "就是说", "的话", "之类", "这", "那", "他们", "它们", "自己", "一切", "不要", "不能", "应该", "需要", "可能", "什么",
    "多",
];

static BUILTIN: LazyLock<Arc<StopWordSet>> = LazyLock::new(|| Arc::new(StopWordSet::from_words(BUILTIN_STOP_WORDS)));

/// A fixed set of tokens excluded from counting.
///
/// Membership is an exact string match; no case folding or normalization is
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Creates a set that filters nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the shared built-in Chinese stop-word set.
    pub fn builtin() -> Arc<StopWordSet> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { words: words.into_iter().map(Into::into).filter(|w: &String| !w.is_empty()).collect() }
    }

    /// Parses a stop-word list with one word per line.
    ///
    /// Surrounding whitespace is trimmed. Blank lines and lines starting with
    /// `#` are skipped.
    pub fn parse(list: &str) -> Self {
        Self::from_words(
            list.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Loads a stop-word list file. See [`StopWordSet::parse`] for the format.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CipinError::FileNotFound(path.to_path_buf()));
        }

        let list = fs::read_to_string(path)?;
        let set = Self::parse(&list);
        tracing::debug!(path = %path.display(), words = set.len(), "loaded stop words");

        Ok(set)
    }

    /// Returns the union of this set and `other`.
    pub fn union(mut self, other: &StopWordSet) -> Self {
        self.words.extend(other.words.iter().cloned());
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_contains_common_words() {
        let set = StopWordSet::builtin();
        for word in ["的", "了", "我", "和", "什么", "就是说"] {
            assert!(set.contains(word), "missing {}", word);
        }
        assert!(!set.contains("猫"));
        assert_eq!(set.len(), BUILTIN_STOP_WORDS.len());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = StopWordSet::builtin();
        let b = StopWordSet::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_exact_match_only() {
        let set = StopWordSet::from_words(["The"]);
        assert!(set.contains("The"));
        assert!(!set.contains("the"));
        assert!(!set.contains("The "));
    }

    #[test]
    fn test_parse_list() {
        let set = StopWordSet::parse("# 注释\n的\n\n  了  \n#也\n和\n");
        assert_eq!(set.len(), 3);
        assert!(set.contains("了"));
        assert!(!set.contains("#也"));
        assert!(!set.contains("也"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "猫\n狗").unwrap();

        let set = StopWordSet::load(file.path()).unwrap();
        assert!(set.contains("猫"));
        assert!(set.contains("狗"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = StopWordSet::load(Path::new("/nonexistent/stopwords.txt"));
        assert!(matches!(result, Err(CipinError::FileNotFound(_))));
    }

    #[test]
    fn test_union() {
        let set = StopWordSet::from_words(["的"]).union(&StopWordSet::from_words(["猫"]));
        assert!(set.contains("的"));
        assert!(set.contains("猫"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_words_are_ignored() {
        let set: StopWordSet = ["", "的"].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(StopWordSet::empty().is_empty());
    }
}
