pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod preprocess;
pub mod rank;
pub mod stopwords;
pub mod tokenize;

pub use analyzer::{Analysis, Analyzer, analyze_html};
#[cfg(feature = "fetch")]
pub use analyzer::{analyze_url, analyze_url_with_config};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, CipinConfig};
pub use error::{CipinError, Result};
pub use extract::{NormalizedText, extract, extract_str};
pub use fetch::{DEFAULT_ENCODING, FetchConfig, FetchResult, FetchStatus, NetworkFailure};
pub use fetch::{fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use formatters::{BarConfig, JsonConfig, OutputFormat, TableConfig, render};
pub use formatters::{convert_to_bar_chart, convert_to_csv, convert_to_json, convert_to_markdown, convert_to_table};
pub use parse::Document;
pub use preprocess::preprocess_html;
pub use rank::{DEFAULT_TOP_N, FrequencyTable, RankedEntry, RankedList, rank};
pub use stopwords::{BUILTIN_STOP_WORDS, StopWordSet};
pub use tokenize::{TokenSequence, Tokenizer};
