//! fnav - keystroke-driven file system navigator.
//!
//! Usage:
//!   fnav [PATH]              Navigate interactively from PATH
//!   fnav list [PATH]         Print a listing as the navigator shows it
//!   fnav config              Print the effective settings
//!   fnav --help              Show help

mod repl;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use fuzzynav_core::{DirectoryLister, ExcludeSet, NavConfig, native_policy};
use fuzzynav_nav::Navigator;

use crate::repl::{ConsoleHost, ProjectFile};

#[derive(Parser)]
#[command(
    name = "fnav",
    version,
    about = "Keystroke-driven file system navigator",
    long_about = "fnav lists one directory at a time and interprets what you type \
                  as navigation and file commands.\n\n\
                  Type `sub/` to descend, `../` to go up, `~/` for home, `/` for the \
                  root, `*/` for bookmarks, `name:mkdir` or `name:mkfile` to create. \
                  Lines starting with `:` are editor keys; `:help` lists them."
)]
struct Cli {
    /// Directory to start in (defaults to the current directory)
    path: Option<PathBuf>,

    /// Settings file (defaults to settings.toml in the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON project file with a `folders` list
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a directory listing the way the navigator shows it
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Include hidden entries
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective settings as TOML
    Config {
        /// Also write them to the settings file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NavConfig::load_from(path)
            .wrap_err_with(|| format!("Could not load {}", path.display()))?,
        None => NavConfig::load(),
    };
    init_tracing(cli.debug || config.debug);

    match cli.command {
        Some(Command::List { path, all, format }) => run_list(&config, path, all, format),
        Some(Command::Config { save }) => run_config(&config, save),
        None => run_interactive(config, cli.path, cli.project),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked from settings.
fn init_tracing(debug: bool) {
    let default = if debug { "fuzzynav=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_interactive(config: NavConfig, path: Option<PathBuf>, project: Option<PathBuf>) -> Result<()> {
    let start = match path {
        Some(path) => path,
        None => std::env::current_dir().context("No current directory")?,
    };
    let start = start
        .canonicalize()
        .wrap_err_with(|| format!("Invalid path {}", start.display()))?;

    let project = project
        .map(|path| {
            ProjectFile::load(&path).wrap_err_with(|| format!("Could not read {}", path.display()))
        })
        .transpose()?;

    let mut navigator = Navigator::new(config);
    let stdin = io::stdin();
    let mut host = ConsoleHost::new(stdin.lock(), io::stdout(), project);
    repl::run(&mut navigator, &mut host, &start)?;
    Ok(())
}

fn run_list(config: &NavConfig, path: PathBuf, all: bool, format: OutputFormat) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    let policy = native_policy();
    let excludes = ExcludeSet::new(&config.regex_exclude);
    let entries = DirectoryLister::new(policy.as_ref())
        .list(&path, !all && config.hide_hidden(), &excludes)
        .context("Listing failed")?;

    match format {
        OutputFormat::Text => {
            for (index, entry) in entries.iter().enumerate() {
                println!("{index:>4}  {entry}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn run_config(config: &NavConfig, save: bool) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    if save {
        let path = config.save().context("Could not save settings")?;
        eprintln!("Saved to {}", path.display());
    }
    Ok(())
}
