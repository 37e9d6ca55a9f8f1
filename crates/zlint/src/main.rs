//! `zlint`: the command-line entry point. Resolves configuration, walks
//! the given paths for `.zig` files, and drives `zlint_linter`'s engine
//! over them.

mod cli;
mod config;
mod walk;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, OutputFormat};
use zlint_linter::{FixMode, Formatter, GithubFormatter, GraphicalFormatter, JsonFormatter, LintEngine, Reporter};

const EXIT_SUCCESS: u8 = 0;
const EXIT_LINT_ERRORS: u8 = 1;
const EXIT_BAD_ARGS: u8 = 2;
const EXIT_INTERNAL_ERROR: u8 = 101;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("zlint {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::from(EXIT_SUCCESS);
    }

    let log_level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new().filter_level(log_level).init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("zlint: {err}");
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let cwd = std::env::current_dir()?;

    if cli.print_ast {
        return print_ast(cli, &cwd);
    }

    let (settings, config_diagnostics) = match config::resolve_settings(&cwd) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("zlint: {err}");
            return Ok(EXIT_BAD_ARGS);
        }
    };
    for diagnostic in &config_diagnostics {
        eprintln!("zlint: {}", diagnostic.message);
    }

    let paths = if cli.stdin {
        read_paths_from_stdin()?
    } else if cli.paths.is_empty() {
        vec![cwd.clone()]
    } else {
        cli.paths.clone()
    };

    let files = walk::collect_zig_files(&paths, &settings.ignore);
    log::debug!("collected {} file(s) to lint", files.len());

    let fix_mode = if cli.fix_dangerously {
        FixMode::Dangerous
    } else if cli.fix {
        FixMode::Safe
    } else {
        FixMode::Off
    };

    let engine = LintEngine::new(settings, fix_mode);
    let formatter: Box<dyn Formatter> = match cli.format {
        OutputFormat::Graphical => Box::new(GraphicalFormatter::new(use_color())),
        OutputFormat::Github => Box::new(GithubFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    let reporter = Reporter::new(io::stdout(), formatter, cli.quiet);

    let started = std::time::Instant::now();
    let outcome = engine.run(&files, &reporter);
    if !cli.no_summary {
        reporter.print_stats(started.elapsed().as_millis());
    }
    io::stdout().flush().ok();

    let exit_code = if outcome.had_error || !config_diagnostics.is_empty() || (cli.deny_warnings && outcome.had_warning)
    {
        EXIT_LINT_ERRORS
    } else {
        EXIT_SUCCESS
    };
    Ok(exit_code)
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn read_paths_from_stdin() -> anyhow::Result<Vec<std::path::PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            paths.push(std::path::PathBuf::from(line.trim()));
        }
    }
    Ok(paths)
}

fn print_ast(cli: &Cli, cwd: &std::path::Path) -> anyhow::Result<u8> {
    let Some(path) = cli.paths.first() else {
        eprintln!("zlint: --print-ast requires exactly one file");
        return Ok(EXIT_BAD_ARGS);
    };
    let path = if path.is_absolute() { path.clone() } else { cwd.join(path) };
    let text = std::fs::read_to_string(&path)?;
    let parsed = zlint_syntax::parse(&text);
    let json = ast_to_json(&parsed.ast, parsed.ast.root());
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(if parsed.has_errors() { EXIT_LINT_ERRORS } else { EXIT_SUCCESS })
}

fn ast_to_json(ast: &zlint_syntax::Ast, node: zlint_syntax::NodeId) -> serde_json::Value {
    let span = ast.span(node);
    let children: Vec<serde_json::Value> = ast.children(node).into_iter().map(|child| ast_to_json(ast, child)).collect();
    serde_json::json!({
        "kind": format!("{:?}", ast.tag(node)),
        "span": { "start": span.start, "end": span.end },
        "children": children,
    })
}
