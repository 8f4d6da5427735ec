use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prismafmt::engine::CommandEngine;
use prismafmt::host::{Host, HostOptions, Mode, collect_files};
use prismafmt::language::languages;
use prismafmt::plugin::Plugin;
use prismafmt::printer::build_request;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_ENGINE: &str = "prisma-fmt";

#[derive(Parser, Debug)]
#[command(name = "prismafmt", version, about = "Prisma schema formatter")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct Indent {
    /// Indent width
    #[arg(long, default_value_t = 2)]
    tab_width: u32,
    /// Indent with tabs instead of spaces
    #[arg(long)]
    use_tabs: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format Prisma files
    Fmt {
        /// Paths (files or directories) to format (defaults to current dir)
        paths: Vec<PathBuf>,
        /// Write the formatted content back to the files
        #[arg(long)]
        write: bool,
        /// Check if files are formatted; non-zero exit if changes needed
        #[arg(long)]
        check: bool,
        #[command(flatten)]
        indent: Indent,
        /// Parser to use instead of inferring it from the file extension
        #[arg(long)]
        parser: Option<String>,
        /// Formatting engine program
        #[arg(long, env = "PRISMAFMT_ENGINE", default_value = DEFAULT_ENGINE)]
        engine: String,
        /// Extra argument passed to the engine before the request
        #[arg(long = "engine-arg", allow_hyphen_values = true)]
        engine_args: Vec<String>,
        /// Format stdin as if it were this file and print the result
        #[arg(long, conflicts_with_all = ["write", "check", "paths"])]
        stdin_filepath: Option<PathBuf>,
    },
    /// Print the registered languages as JSON
    Languages,
    /// Print the request that would be sent to the engine for a file
    Request {
        file: PathBuf,
        #[command(flatten)]
        indent: Indent,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Fmt {
            paths,
            write,
            check,
            indent,
            parser,
            engine,
            engine_args,
            stdin_filepath,
        } => {
            if write && check {
                bail!("--write and --check are mutually exclusive");
            }
            let engine = CommandEngine::new(engine).args(engine_args);
            let options = HostOptions {
                tab_width: indent.tab_width,
                use_tabs: indent.use_tabs,
                parser,
            };
            let host = Host::new(Plugin::new(Arc::new(engine)), options);

            if let Some(path) = stdin_filepath {
                return format_stdin(&host, &path);
            }

            let mode = if write {
                Mode::Write
            } else if check {
                Mode::Check
            } else {
                Mode::Stdout
            };
            let targets = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };
            let collected = collect_files(&targets);
            for err in &collected.errors {
                tracing::error!("{err}");
            }
            tracing::debug!(count = collected.files.len(), "collected files");

            let summary = host.process_files(&collected.files, mode);
            if mode == Mode::Check {
                for path in &summary.changed {
                    tracing::warn!("{} is not formatted", path.display());
                }
            }
            if summary.failed > 0 || !collected.errors.is_empty() {
                std::process::exit(2);
            }
            if mode == Mode::Check && !summary.changed.is_empty() {
                std::process::exit(1);
            }
        }
        Commands::Languages => {
            println!("{}", serde_json::to_string_pretty(languages())?);
        }
        Commands::Request { file, indent } => {
            let host = Host::new(
                Plugin::new(Arc::new(CommandEngine::new(DEFAULT_ENGINE))),
                HostOptions {
                    tab_width: indent.tab_width,
                    use_tabs: indent.use_tabs,
                    parser: None,
                },
            );
            host.resolve_parser(&file)?;
            let request = build_request(&host.print_options(&file))?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }
    Ok(())
}

fn format_stdin(host: &Host, path: &Path) -> Result<()> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("failed to read stdin")?;
    let formatted = host.format_text(&content, path)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(formatted.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
