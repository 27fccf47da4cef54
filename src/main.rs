use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imt_core::{make_mapping, split_token_list, MappingOptions};
use imt_transformer::{
    extract_tokens, make_tokenfile_info, transform, Collaborators, MinifyOptions,
    TokenFileOptions, TransformError, DEFAULT_MIN_LENGTH,
};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "imt", version, about = "Property name minification toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Minify a program and print the generated code
    Minify {
        input: PathBuf,

        /// JSON file with minify options
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,

        /// Log the time spent in every stage
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the property name tokens of a program
    Tokens { input: PathBuf },

    /// Print the token file for a program, merged with an existing one
    Tokenfile {
        input: PathBuf,

        #[arg(long, value_name = "FILE")]
        tokenfile: Option<PathBuf>,

        /// Comma separated token lines
        #[arg(long)]
        tokens: Option<String>,

        /// Comma separated names that must keep their spelling
        #[arg(long)]
        reserved_names: Option<String>,

        #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
        min_length: usize,

        /// Print only added and removed lines
        #[arg(long)]
        diff: bool,
    },

    /// Print `token:name` assignments for the listed tokens
    Mapping {
        #[arg(long, value_name = "FILE")]
        mapping_file: Option<PathBuf>,

        /// Comma separated `token:name` seeds
        #[arg(long)]
        mapping: Option<String>,

        #[arg(long, value_name = "FILE")]
        tokenfile: Option<PathBuf>,

        /// Comma separated token lines
        #[arg(long)]
        tokens: Option<String>,
    },
}

fn init_log(verbose: bool) {
    let filter = EnvFilter::try_from_env("LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn list(arg: Option<String>) -> Vec<String> {
    arg.map(|arg| split_token_list(&arg)).unwrap_or_default()
}

fn read_input(input: &Path) -> Result<String> {
    read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Minify {
            input,
            config,
            verbose,
        } => {
            let mut options = match config {
                Some(config) => MinifyOptions::from_file(config)?,
                None => MinifyOptions::default(),
            };
            options.verbose |= verbose;
            debug!("{options:?}");

            let content = read_input(&input)?;
            let output = transform(&content, &options, &Collaborators::default())?;
            println!("{}", output.content);
        }
        Commands::Tokens { input } => {
            let content = read_input(&input)?;
            print_lines(&extract_tokens(&content)?);
        }
        Commands::Tokenfile {
            input,
            tokenfile,
            tokens,
            reserved_names,
            min_length,
            diff,
        } => {
            let content = read_input(&input)?;
            let options = TokenFileOptions {
                tokenfile,
                tokens: list(tokens),
                reserved_names: list(reserved_names),
                min_length,
                diff,
                ..Default::default()
            };
            print_lines(&make_tokenfile_info(&content, &options)?);
        }
        Commands::Mapping {
            mapping_file,
            mapping,
            tokenfile,
            tokens,
        } => {
            let options = MappingOptions {
                mapping: list(mapping),
                mapping_file,
                tokens: list(tokens),
                tokenfile,
            };
            print_lines(&make_mapping(&options)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_log(matches!(cli.command, Commands::Minify { verbose: true, .. }));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(dump) = err.downcast_ref::<TransformError>().and_then(TransformError::dump) {
                eprintln!("{dump}");
            }
            ExitCode::FAILURE
        }
    }
}
