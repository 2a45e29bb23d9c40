use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use pjs::core::config::{self, CliOverrides, Theme};
use pjs::error::AppError;
use pjs::store::{ProjectRepository, SqliteStore};
use pjs::tui;

#[derive(Parser)]
#[command(name = "pjs", about = "Terminal journal, one project at a time")]
struct Args {
    /// Database file (default: ~/.pjs/pjs.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Editor command used to write entries
    #[arg(long)]
    editor: Option<String>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    init_logging(args.verbose);
    info!("pjs starting up");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("pjs: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// File logger at ~/.pjs/pjs.log. Nothing goes to the terminal.
fn init_logging(verbose: bool) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(log_file) = File::options().create(true).append(true).open(&path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let file_config = config::load_config()?;
    let cli = CliOverrides {
        db_path: args.db,
        editor: args.editor,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, &cli);
    info!("Using database {}", resolved.db_path.display());

    let store = Rc::new(SqliteStore::open(&resolved.db_path)?);
    ensure_project(store.as_ref(), &mut io::stdin().lock(), &mut io::stdout())?;

    tui::run(&resolved, store)
}

/// First run: ask for a project name until one is accepted.
fn ensure_project<R: BufRead, W: Write>(
    store: &dyn ProjectRepository,
    input: &mut R,
    output: &mut W,
) -> Result<(), AppError> {
    if !store.get_all_projects()?.is_empty() {
        return Ok(());
    }

    writeln!(output, "No projects yet.")?;
    loop {
        write!(output, "Name your first project: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(AppError::Setup("no project name given".to_string()));
        }
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        let project = store.create_project(name)?;
        info!("Created first project {} ({})", project.id, project.name);
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_projects_skip_prompt() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create_project("work").unwrap();
        let mut out = Vec::new();
        ensure_project(&store, &mut "".as_bytes(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_prompt_skips_blank_lines() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut out = Vec::new();
        ensure_project(&store, &mut "\n  \nGarden\n".as_bytes(), &mut out).unwrap();

        let projects = store.get_all_projects().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Garden");
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Name your first project").count(), 3);
    }

    #[test]
    fn test_eof_is_an_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut out = Vec::new();
        let result = ensure_project(&store, &mut "".as_bytes(), &mut out);
        assert!(matches!(result, Err(AppError::Setup(_))));
    }
}
