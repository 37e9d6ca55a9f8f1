//! Command-line surface, parsed with `clap`'s derive API the way the
//! teacher's `ruff_linter` wires its own CLI args.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[value(name = "graphical", alias = "default")]
    Graphical,
    #[value(name = "github", alias = "gh")]
    Github,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "zlint", disable_version_flag = true, disable_help_flag = false)]
pub struct Cli {
    /// Files or directories to lint. Defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Print the AST of one file as JSON to stdout instead of linting it.
    #[arg(long)]
    pub print_ast: bool,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value = "graphical")]
    pub format: OutputFormat,

    /// Suppress the trailing statistics line.
    #[arg(long)]
    pub no_summary: bool,

    /// Read filenames from stdin, one per line.
    #[arg(short = 'S', long = "stdin")]
    pub stdin: bool,

    /// Apply safe fixes in place.
    #[arg(long)]
    pub fix: bool,

    /// Apply safe and dangerous fixes in place.
    #[arg(long)]
    pub fix_dangerously: bool,

    /// Exit non-zero on any warning, not just errors.
    #[arg(long)]
    pub deny_warnings: bool,

    /// Show only errors; warnings and notices are still counted.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose logging.
    #[arg(short = 'V', long = "verbose")]
    pub verbose: bool,

    /// Print version and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}
