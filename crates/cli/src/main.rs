use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cipin_core::{
    Analysis, AnalysisConfig, AnalysisConfigBuilder, Analyzer, CipinError, OutputFormat, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{format_size, print_banner, print_detail, print_error, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const STEPS: usize = 3;

/// Rank the most frequent words on a Chinese web page
#[derive(Parser, Debug)]
#[command(name = "cipin")]
#[command(author = "cipin contributors")]
#[command(version)]
#[command(about = "Rank the most frequent words on a web page", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Number of words to show [default: 20]
    #[arg(short = 'n', long = "top", value_name = "NUM")]
    top: Option<usize>,

    /// Output format (table, bar, markdown, csv, json)
    #[arg(short, long, default_value = "table", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Character encoding used to decode the page [default: utf-8]
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Additional stop-word list, one word per line
    #[arg(long = "stop-words", value_name = "FILE")]
    stop_words: Option<PathBuf>,

    /// Don't filter the built-in stop words
    #[arg(long)]
    no_builtin_stop_words: bool,

    /// Extra stop word (repeatable)
    #[arg(long = "extra-stop-word", value_name = "WORD")]
    extra_stop_words: Vec<String>,

    /// User dictionary for segmentation (jieba format)
    #[arg(long = "dict", value_name = "FILE")]
    dict: Option<PathBuf>,

    /// Disable HMM recognition of unknown words
    #[arg(long)]
    no_hmm: bool,

    /// HTTP timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Config file (default: ~/.config/cipin/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cipin_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

/// Layers flags over the config file, which is layered over the defaults.
fn resolve_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => {
            AnalysisConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => AnalysisConfig::discover().context("Failed to load config")?,
    };

    let mut builder = AnalysisConfigBuilder::from_config(base).extra_stop_words(&args.extra_stop_words);

    if let Some(top) = args.top {
        builder = builder.top_n(top);
    }
    if let Some(encoding) = &args.encoding {
        builder = builder.encoding(encoding);
    }
    if let Some(path) = &args.stop_words {
        builder = builder.stop_words_file(path);
    }
    if args.no_builtin_stop_words {
        builder = builder.use_builtin_stop_words(false);
    }
    if let Some(path) = &args.dict {
        builder = builder.user_dict(path);
    }
    if args.no_hmm {
        builder = builder.hmm(false);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent);
    }

    Ok(builder.build())
}

async fn analyze_input(analyzer: &Analyzer, input: &str, verbose: bool) -> anyhow::Result<Analysis> {
    if input.starts_with("http://") || input.starts_with("https://") {
        if verbose {
            print_step(1, STEPS, &format!("Fetching from {}", input.bright_white().underline()));
        }
        return Ok(analyzer.analyze_url(input).await?);
    }

    let bytes = if input == "-" {
        if verbose {
            print_step(1, STEPS, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        if verbose {
            print_step(1, STEPS, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
    };

    if verbose {
        print_detail("Size", format_size(bytes.len()));
    }

    Ok(analyzer.analyze_html(&bytes))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "cipin", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = resolve_config(&args)?;
    let analyzer = Analyzer::with_config(config).context("Failed to set up analyzer")?;
    let input = args.input.as_deref().unwrap_or("-");
    tracing::debug!(input, format = %args.format, "starting analysis");

    let analysis = match analyze_input(&analyzer, input, args.verbose).await {
        Ok(analysis) => analysis,
        Err(err) => match err.downcast_ref::<CipinError>() {
            Some(fetch_err @ CipinError::Fetch { .. }) => {
                print_error(&fetch_err.to_string());
                return Ok(ExitCode::FAILURE);
            }
            _ => return Err(err),
        },
    };

    if args.verbose {
        eprintln!();
        print_step(2, STEPS, "Segmenting and ranking words");
        if let Some(title) = &analysis.title {
            print_detail("Title", title);
        }
        print_detail("Characters", analysis.text_length);
        print_detail("Tokens", analysis.total_tokens);
        print_detail("After stop words", analysis.filtered_tokens);
        print_detail("Distinct", analysis.distinct_tokens);
        if analysis.ranked.is_empty() {
            print_warning("No words left after filtering");
        }
        eprintln!();
        print_step(3, STEPS, "Writing output");
        print_detail("Format", args.format);
        eprintln!();
    }

    let output = analysis.to_format(args.format).context("Failed to render output")?;

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(ExitCode::SUCCESS)
}
