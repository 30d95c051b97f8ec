//! Analysis configuration.
//!
//! [`AnalysisConfig`] holds every externally supplied constant the pipeline
//! depends on. It can be built in code with [`AnalysisConfigBuilder`] or
//! loaded from a TOML file in which every key is optional:
//!
//! ```toml
//! top_n = 20
//! encoding = "utf-8"
//! stop_words_file = "stopwords.txt"
//! use_builtin_stop_words = true
//! extra_stop_words = ["网页", "登录"]
//! user_dict = "dict.txt"
//! hmm = true
//!
//! [fetch]
//! timeout = 30
//! user_agent = "cipin"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fetch::{DEFAULT_ENCODING, FetchConfig};
use crate::rank::DEFAULT_TOP_N;
use crate::{CipinError, Result};

/// Configuration for an [`Analyzer`](crate::Analyzer).
///
/// # Example
///
/// ```rust
/// use cipin_core::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .top_n(10)
///     .encoding("gbk")
///     .extra_stop_words(["网页"])
///     .build();
/// assert_eq!(config.top_n, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of ranked entries to keep (default: 20).
    pub top_n: usize,

    /// Encoding label page bytes are decoded with (default: "utf-8").
    pub encoding: String,

    /// Stop-word list file, one word per line (default: none).
    pub stop_words_file: Option<PathBuf>,

    /// Whether the built-in Chinese stop words apply (default: true).
    pub use_builtin_stop_words: bool,

    /// Additional stop words (default: empty).
    pub extra_stop_words: Vec<String>,

    /// jieba user dictionary file (default: none).
    pub user_dict: Option<PathBuf>,

    /// Whether jieba groups unknown words with its HMM (default: true).
    pub hmm: bool,

    /// HTTP settings.
    pub fetch: FetchConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            encoding: DEFAULT_ENCODING.to_string(),
            stop_words_file: None,
            use_builtin_stop_words: true,
            extra_stop_words: Vec::new(),
            user_dict: None,
            hmm: true,
            fetch: FetchConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML config file.
    ///
    /// Relative `stop_words_file` and `user_dict` paths are resolved against
    /// the directory containing the config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CipinError::FileNotFound(path.to_path_buf()));
        }

        let source = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&source)?;

        if let Some(base) = path.parent() {
            config.stop_words_file = config.stop_words_file.map(|p| resolve(base, p));
            config.user_dict = config.user_dict.map(|p| resolve(base, p));
        }

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Loads `~/.config/cipin/config.toml` if it exists, defaults otherwise.
    pub fn discover() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Location of the per-user config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("cipin").join("config.toml"))
    }

    /// Checks values that deserialization alone can't rule out.
    pub fn validate(&self) -> Result<()> {
        if self.encoding.trim().is_empty() {
            return Err(CipinError::Config("encoding must not be empty".to_string()));
        }
        if self.fetch.timeout == 0 {
            return Err(CipinError::Config("fetch timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }

    /// HTTP settings with the page encoding filled in.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig { encoding: self.encoding.clone(), ..self.fetch.clone() }
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() { base.join(path) } else { path }
}

/// Builder for AnalysisConfig.
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalysisConfig::default() }
    }

    /// Starts from an existing config, e.g. one loaded from a file.
    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn top_n(mut self, value: usize) -> Self {
        self.config.top_n = value;
        self
    }

    pub fn encoding(mut self, value: impl Into<String>) -> Self {
        self.config.encoding = value.into();
        self
    }

    pub fn stop_words_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.stop_words_file = Some(path.into());
        self
    }

    pub fn use_builtin_stop_words(mut self, value: bool) -> Self {
        self.config.use_builtin_stop_words = value;
        self
    }

    /// Appends stop words to any already configured.
    pub fn extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_stop_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn user_dict(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.user_dict = Some(path.into());
        self
    }

    pub fn hmm(mut self, value: bool) -> Self {
        self.config.hmm = value;
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalysisConfig {
        self.config
    }
}

impl Default for AnalysisConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for AnalysisConfig.
pub type CipinConfig = AnalysisConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_n, 20);
        assert_eq!(config.encoding, "utf-8");
        assert!(config.stop_words_file.is_none());
        assert!(config.use_builtin_stop_words);
        assert!(config.extra_stop_words.is_empty());
        assert!(config.user_dict.is_none());
        assert!(config.hmm);
        assert_eq!(config.fetch.timeout, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::builder()
            .top_n(5)
            .encoding("gbk")
            .stop_words_file("/tmp/stop.txt")
            .use_builtin_stop_words(false)
            .extra_stop_words(["网页"])
            .extra_stop_words(vec!["登录".to_string()])
            .user_dict("/tmp/dict.txt")
            .hmm(false)
            .timeout(5)
            .user_agent("test-agent")
            .build();

        assert_eq!(config.top_n, 5);
        assert_eq!(config.encoding, "gbk");
        assert_eq!(config.stop_words_file, Some(PathBuf::from("/tmp/stop.txt")));
        assert!(!config.use_builtin_stop_words);
        assert_eq!(config.extra_stop_words, vec!["网页".to_string(), "登录".to_string()]);
        assert_eq!(config.user_dict, Some(PathBuf::from("/tmp/dict.txt")));
        assert!(!config.hmm);
        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.fetch.user_agent, "test-agent");
    }

    #[test]
    fn test_cipin_config_type_alias() {
        let config: CipinConfig = CipinConfig::default();
        assert_eq!(config.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AnalysisConfig::from_toml_str("top_n = 3\n[fetch]\ntimeout = 7\n").unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.fetch.timeout, 7);
        assert_eq!(config.encoding, "utf-8");
        assert!(config.fetch.user_agent.contains("cipin"));
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(AnalysisConfig::from_toml_str("").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let result = AnalysisConfig::from_toml_str("top_k = 3\n");
        assert!(matches!(result, Err(CipinError::TomlError(_))));
    }

    #[test]
    fn test_from_toml_rejects_empty_encoding() {
        let result = AnalysisConfig::from_toml_str("encoding = \"  \"\n");
        assert!(matches!(result, Err(CipinError::Config(_))));
    }

    #[test]
    fn test_from_toml_rejects_zero_timeout() {
        let result = AnalysisConfig::from_toml_str("[fetch]\ntimeout = 0\n");
        assert!(matches!(result, Err(CipinError::Config(_))));
        assert!(AnalysisConfig::builder().timeout(0).build().validate().is_err());
    }

    #[test]
    fn test_fetch_config_carries_encoding() {
        let config = AnalysisConfig::builder().encoding("gbk").timeout(4).build();
        let fetch = config.fetch_config();

        assert_eq!(fetch.encoding, "gbk");
        assert_eq!(fetch.timeout, 4);
        assert_eq!(AnalysisConfig::default().fetch_config().encoding, DEFAULT_ENCODING);
    }

    #[test]
    fn test_fetch_encoding_is_not_a_fetch_table_key() {
        let result = AnalysisConfig::from_toml_str("[fetch]\nencoding = \"gbk\"\n");
        assert!(matches!(result, Err(CipinError::TomlError(_))));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "stop_words_file = \"stop.txt\"\nuser_dict = \"/abs/dict.txt\"\n").unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.stop_words_file, Some(dir.path().join("stop.txt")));
        assert_eq!(config.user_dict, Some(PathBuf::from("/abs/dict.txt")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AnalysisConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(CipinError::FileNotFound(_))));
    }

    #[test]
    fn test_default_path() {
        if let Some(path) = AnalysisConfig::default_path() {
            assert!(path.ends_with(".config/cipin/config.toml"));
        }
    }
}
