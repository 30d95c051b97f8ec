//! Main analysis API.
//!
//! [`Analyzer`] runs one page through extraction, segmentation and ranking.
//! It holds only read-only state (the tokenizer dictionary and the stop-word
//! set), so one instance can serve any number of concurrent requests; each
//! call builds its own token sequence and frequency table.
//!
//! # Example
//!
//! ```rust
//! use cipin_core::Analyzer;
//!
//! let analysis = Analyzer::new().analyze_html("<p>苹果，苹果，香蕉。</p>".as_bytes());
//! assert_eq!(analysis.ranked.entries()[0].token, "苹果");
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::extract::{NormalizedText, decode, extract_document, normalize};
use crate::formatters::{OutputFormat, render};
use crate::parse::Document;
use crate::rank::{FrequencyTable, RankedList};
use crate::stopwords::StopWordSet;
use crate::tokenize::Tokenizer;
use crate::Result;

/// The complete result of analysing one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Source URL if known.
    pub source_url: Option<String>,

    /// Page title if the input was HTML with a `<title>`.
    pub title: Option<String>,

    /// Characters of normalized text that were segmented.
    pub text_length: usize,

    /// Tokens produced by segmentation.
    pub total_tokens: usize,

    /// Tokens left after stop-word filtering.
    pub filtered_tokens: usize,

    /// Distinct tokens left after stop-word filtering.
    pub distinct_tokens: usize,

    /// Top tokens by count.
    pub ranked: RankedList,
}

impl Analysis {
    /// Renders the ranking in the given output format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        render(self, format)
    }

    /// Gets the analysis as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Entry point for word-frequency analysis.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    tokenizer: Tokenizer,
    stop_words: Arc<StopWordSet>,
}

impl Analyzer {
    /// Creates an analyzer with the default configuration.
    ///
    /// Uses the shared bundled dictionary and the shared built-in stop words.
    pub fn new() -> Self {
        Self { config: AnalysisConfig::default(), tokenizer: Tokenizer::new(), stop_words: StopWordSet::builtin() }
    }

    /// Creates an analyzer from a configuration.
    ///
    /// Loads the stop-word file and user dictionary if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a referenced file
    /// can't be read.
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let tokenizer = match &config.user_dict {
            Some(path) => Tokenizer::with_user_dict(path)?,
            None => Tokenizer::new(),
        }
        .with_hmm(config.hmm);

        let stop_words = build_stop_words(&config)?;
        tracing::debug!(stop_words = stop_words.len(), top_n = config.top_n, "analyzer ready");

        Ok(Self { config, tokenizer, stop_words })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Analyses raw HTML bytes, decoded with the configured encoding.
    ///
    /// Never fails: undecodable bytes and empty pages produce an analysis
    /// with an empty ranking.
    pub fn analyze_html(&self, raw_html: &[u8]) -> Analysis {
        self.analyze_encoded(raw_html, &self.config.encoding)
    }

    fn analyze_encoded(&self, raw_html: &[u8], encoding: &str) -> Analysis {
        let html = decode(raw_html, encoding);
        let doc = Document::parse_with_preprocessing(&html);
        let text = extract_document(&doc);

        tracing::debug!(bytes = raw_html.len(), chars = text.char_count(), "extracted text");

        self.analyze_normalized(&text, doc.title())
    }

    /// Analyses plain text rather than HTML.
    ///
    /// Punctuation and whitespace are removed before segmentation as usual.
    pub fn analyze_text(&self, text: &str) -> Analysis {
        self.analyze_normalized(&normalize(text), None)
    }

    /// Fetches a page and analyses it.
    ///
    /// # Errors
    ///
    /// Returns [`CipinError::Fetch`](crate::CipinError::Fetch) if the page
    /// was not served with status 200 or could not be reached.
    #[cfg(feature = "fetch")]
    pub async fn analyze_url(&self, url: &str) -> Result<Analysis> {
        let result = crate::fetch::fetch_url(url, &self.config.fetch_config()).await;
        let encoding = result.encoding.clone();
        let body = result.into_body()?;

        let mut analysis = self.analyze_encoded(&body, &encoding);
        analysis.source_url = Some(url.to_string());

        Ok(analysis)
    }

    fn analyze_normalized(&self, text: &NormalizedText, title: Option<String>) -> Analysis {
        let tokens = self.tokenizer.tokenize(text);
        let table = FrequencyTable::from_tokens(&tokens, &self.stop_words);

        let filtered_tokens = table.total();
        let distinct_tokens = table.len();
        let ranked = table.into_ranked(self.config.top_n);

        tracing::debug!(
            tokens = tokens.len(),
            filtered = filtered_tokens,
            distinct = distinct_tokens,
            ranked = ranked.len(),
            "ranked tokens"
        );

        Analysis {
            source_url: None,
            title,
            text_length: text.char_count(),
            total_tokens: tokens.len(),
            filtered_tokens,
            distinct_tokens,
            ranked,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_stop_words(config: &AnalysisConfig) -> Result<Arc<StopWordSet>> {
    if config.use_builtin_stop_words && config.stop_words_file.is_none() && config.extra_stop_words.is_empty() {
        return Ok(StopWordSet::builtin());
    }

    let mut set = if config.use_builtin_stop_words { (*StopWordSet::builtin()).clone() } else { StopWordSet::empty() };

    if let Some(path) = &config.stop_words_file {
        set = set.union(&StopWordSet::load(path)?);
    }

    let extra: StopWordSet = config.extra_stop_words.iter().map(String::as_str).collect();
    Ok(Arc::new(set.union(&extra)))
}

/// Convenience function for one-liner analysis with defaults.
pub fn analyze_html(raw_html: &[u8]) -> Analysis {
    Analyzer::new().analyze_html(raw_html)
}

/// Convenience function: fetch and analyse a URL with defaults.
///
/// # Example
///
/// ```no_run
/// use cipin_core::analyze_url;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let analysis = analyze_url("https://example.com/").await?;
///     for entry in &analysis.ranked {
///         println!("{} {}", entry.token, entry.count);
///     }
///     Ok(())
/// }
/// ```
#[cfg(feature = "fetch")]
pub async fn analyze_url(url: &str) -> Result<Analysis> {
    Analyzer::new().analyze_url(url).await
}

/// Convenience function: fetch and analyse a URL with a custom configuration.
#[cfg(feature = "fetch")]
pub async fn analyze_url_with_config(url: &str, config: AnalysisConfig) -> Result<Analysis> {
    Analyzer::with_config(config)?.analyze_url(url).await
}
