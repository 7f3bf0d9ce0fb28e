//! tabview - interactive terminal table for JSON rows.
//!
//! Usage:
//!   tabview rows.json                  # client-side pagination
//!   tabview rows.json --external       # pages served by the row store
//!   tabview rows.json -n 25            # 25 rows per page
//!   tabview rows.json --log-file t.log -v

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use tabview::config::{ActionSpec, Document, load_document};
use tabview::model::{Action, Column};
use tabview::pagination::PaginationMode;
use tabview::provider::{MemoryProvider, SharedStore};
use tabview::tui::App;
use tabview::view::{TableProps, TabularView};

/// Page sizes offered when the document names none.
const DEFAULT_PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 25, 50];

/// Interactive table viewer and editor for JSON rows.
#[derive(Parser)]
#[command(name = "tabview", about = "Interactive table viewer for JSON rows")]
struct Args {
    /// Document: an array of rows, or an object with rows, columns and actions.
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Rows per page (overrides the document).
    #[arg(short = 'n', long = "page-size")]
    page_size: Option<usize>,

    /// Let the row store cut pages instead of the view.
    #[arg(long)]
    external: bool,

    /// Write logs to this file. The terminal belongs to the table.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Tick interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,
}

fn main() {
    let args = Args::parse();

    if args.page_size == Some(0) {
        eprintln!("Error: --page-size must be positive");
        std::process::exit(1);
    }

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path, args.verbose, args.quiet) {
            eprintln!("Error: cannot open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let document = match load_document(&args.path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}: {}", args.path.display(), e);
            std::process::exit(1);
        }
    };

    let mode = if args.external {
        PaginationMode::External
    } else {
        PaginationMode::Client
    };

    let title = args
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tabview".to_string());

    let app = build_app(document, mode, args.page_size).with_title(title);
    if let Err(e) = app.run(Duration::from_millis(args.tick_ms)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Wires a document into a view fed by an in-memory store.
fn build_app(document: Document, mode: PaginationMode, page_size: Option<usize>) -> App {
    let columns = document.columns().map(|columns| {
        columns
            .into_iter()
            .map(|column| {
                if column.editable {
                    column.with_on_edit(log_edit)
                } else {
                    column
                }
            })
            .collect::<Vec<Column>>()
    });

    let provider = MemoryProvider::new(document.rows, mode);
    let actions = document
        .actions
        .iter()
        .map(|spec| build_action(spec, provider.store()))
        .collect();

    let page_size_options = if document.page_size_options.is_empty() {
        DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
    } else {
        document.page_size_options
    };

    let view = TabularView::new(TableProps {
        columns,
        actions,
        rows_per_page: page_size.or(document.rows_per_page).unwrap_or(10),
        page_size_options,
        pagination: mode,
        empty_content: document.empty_result,
        ..TableProps::default()
    })
    .with_page_sink(provider.page_sink());

    App::new(view, Box::new(provider))
}

fn log_edit(value: serde_json::Value, column: &str) {
    info!(column, value = %value, "cell edited");
}

/// `delete` removes the row from the store; other actions are only logged.
fn build_action(spec: &ActionSpec, store: SharedStore) -> Action {
    let id = spec.id.clone();
    Action::new(spec.id.clone(), spec.label.clone()).with_trigger(move |row| {
        if id == "delete" {
            if store.borrow_mut().remove(row) {
                info!(row = %row, "row deleted");
            } else {
                warn!(row = %row, "row to delete not found");
            }
        } else {
            info!(row = %row, action = %id, "action");
        }
    })
}

fn init_logging(path: &Path, verbose: u8, quiet: bool) -> std::io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("tabview={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
