//! Lexi Trie - Main entrypoint.
//!
//! Loads configuration, preloads the configured word list into a trie and
//! answers prefix queries or replays a command script against it.

use clap::{Parser, Subcommand};
use lexi_trie_lib::config::{ConfigLoader, LexiConfig, LogConfig, ENV_PREFIX};
use lexi_trie_lib::data_structures::prefix_trie::{build_trie, PrefixTrie, TrieBackend};
use lexi_trie_lib::error::{
    report_error, set_error_reporter, ErrorContext, LexiError, LexiResult, TracingErrorReporter,
};
use lexi_trie_lib::script::run_script;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the Lexi Trie tool.
#[derive(Parser, Debug)]
#[clap(name = "lexi_trie", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Override the configured trie backend
    #[clap(short, long, value_enum)]
    backend: Option<TrieBackend>,

    /// Override the configured word list
    #[clap(short, long, value_parser)]
    words: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print every stored string starting with a prefix, as a JSON array
    Sort {
        /// Prefix to enumerate (empty lists everything)
        #[clap(default_value = "")]
        prefix: String,
    },

    /// Print whether a string is stored
    Search {
        /// String to look up
        word: String,
    },

    /// Replay a command script, printing one JSON line per query
    Run {
        /// Script file
        script: PathBuf,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> LexiResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| LexiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Builds a trie of the configured backend and fills it with the word list.
fn load_trie(config: &LexiConfig) -> LexiResult<Box<dyn PrefixTrie>> {
    let mut trie = build_trie(&config.trie);
    for word in config.dictionary.load_words()? {
        trie.insert(&word);
    }
    info!(backend = %trie.backend(), words = trie.len(), "Trie loaded");
    Ok(trie)
}

fn run(args: Args, config: LexiConfig) -> LexiResult<()> {
    match args.command {
        Command::Sort { prefix } => {
            let mut trie = load_trie(&config)?;
            println!("{}", serde_json::to_string(&trie.sort(&prefix))?);
        }
        Command::Search { word } => {
            let trie = load_trie(&config)?;
            println!("{}", trie.search(&word));
        }
        Command::Run { script } => {
            let mut trie = load_trie(&config)?;
            let contents = std::fs::read_to_string(&script).map_err(|source| {
                LexiError::ReadFile {
                    path: script.clone(),
                    source,
                }
            })?;
            for outcome in run_script(trie.as_mut(), &contents)? {
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
        Command::Validate => {
            info!("Configuration validated successfully");
            println!("ok");
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, LexiConfig::default().to_toml()?)?;
            info!("Default configuration written to {:?}", output);
        }
    }
    Ok(())
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    let loaded = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load();
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{e}");
    }
    set_error_reporter(Arc::new(TracingErrorReporter));

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            report_error(&ErrorContext::new(e.into(), "config"));
            process::exit(1);
        }
    };
    if let Some(backend) = args.backend {
        config.trie.backend = backend;
    }
    if let Some(words) = &args.words {
        config.dictionary.path = Some(words.clone());
    }

    if let Err(e) = run(args, config) {
        let component = match &e {
            LexiError::Script { .. } => "script",
            LexiError::ReadFile { .. } => "input",
            _ => "lexi_trie",
        };
        report_error(&ErrorContext::new(e, component));
        process::exit(1);
    }
}
