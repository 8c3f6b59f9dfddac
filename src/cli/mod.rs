use clap::{Args, Parser, Subcommand};
use emtp::crypto::{load_keys, KeySource, TokenKey};
use emtp::normalize::phone::has_defined_rules;
use emtp::PipelineOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod init_config;
pub mod normalize;
pub mod tokenize;
pub mod version;

use config::{default_config_path, EmtpConfig};

#[derive(Parser)]
#[command(name = "emtp")]
#[command(author = "EMTP Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Match token generator for privacy-preserving record linkage", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/emtp/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Key and pipeline flags shared by commands that produce tokens
#[derive(Args, Debug, Default)]
pub struct KeyArgs {
    /// Hex-encoded key (repeatable)
    #[arg(long = "key-hex")]
    pub key_hex: Vec<String>,

    /// Base64-encoded key (repeatable)
    #[arg(long = "key-b64")]
    pub key_b64: Vec<String>,

    /// File with one "hex:" or "b64:" prefixed key per line
    /// (the configured key env var is only read when no key flag or file is given)
    #[arg(long)]
    pub key_file: Option<String>,

    /// Default phone country (overrides config)
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize a JSON file of records
    Tokenize {
        /// Input JSON file (array of records or a single record), "-" for stdin
        #[arg(long)]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Normalize a single record given on the command line
    Normalize {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,

        /// Phone number (repeatable)
        #[arg(long)]
        phone: Vec<String>,

        /// Free-form address (repeatable)
        #[arg(long)]
        address: Vec<String>,

        /// Identifier string (repeatable)
        #[arg(long)]
        id: Vec<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Write a commented default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level; logs go to stderr so JSON
    // output on stdout stays parseable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Collect key sources.
///
/// Flags and the key file (`--key-file`, else the configured one) are
/// combined. The environment variable is only a fallback when neither is
/// given, so a stale variable never adds keys to an explicit selection.
fn key_sources(args: &KeyArgs, config: &EmtpConfig) -> Vec<KeySource> {
    let mut sources: Vec<KeySource> = args
        .key_hex
        .iter()
        .cloned()
        .map(KeySource::Hex)
        .chain(args.key_b64.iter().cloned().map(KeySource::Base64))
        .collect();

    if let Some(file) = &args.key_file {
        sources.push(KeySource::File(PathBuf::from(file)));
    } else if let Some(file) = &config.keys.key_file {
        sources.push(KeySource::File(file.clone()));
    }

    if sources.is_empty() && std::env::var_os(&config.keys.env_var).is_some() {
        sources.push(KeySource::EnvVar(config.keys.env_var.clone()));
    }

    sources
}

fn resolve(
    args: &KeyArgs,
    config: &EmtpConfig,
) -> Result<(Vec<TokenKey>, PipelineOptions), Box<dyn std::error::Error>> {
    let keys = load_keys(&key_sources(args, config))?;
    let options = PipelineOptions {
        default_country: args
            .country
            .clone()
            .unwrap_or_else(|| config.pipeline.default_country.clone()),
    };
    if !has_defined_rules(&options.default_country) {
        tracing::warn!(
            country = %options.default_country,
            "phone rules are only defined for US; applying US rules"
        );
    }
    Ok((keys, options))
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    if let Commands::InitConfig { force } = cli.command {
        return init_config::execute(&config_path, force);
    }

    let config = EmtpConfig::load_or_default(&config_path)?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Tokenize {
            input,
            output,
            keys,
        } => {
            let (keys, options) = resolve(&keys, &config)?;
            tokenize::execute(input, output, keys, options).await
        }
        Commands::Normalize {
            name,
            dob,
            phone,
            address,
            id,
            keys,
        } => {
            let (keys, options) = resolve(&keys, &config)?;
            let record = normalize::record_from_flags(name, dob, phone, address, id);
            normalize::execute(record, keys, options)
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
        Commands::InitConfig { .. } => Ok(()),
    }
}
