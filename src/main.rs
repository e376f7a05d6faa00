use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use minibadge_core::{
    render_load_failure, CatalogError, ItemStore, Selection, Session, ViewReconciler, ViewSnapshot,
};
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod errors;
mod handlers;
mod operations;
mod state;
mod ui;

use cli::{BrowseArgs, CatalogArgs, Cli, Command, ImportArgs, ShellArgs};
use handlers::{handle_command, parse_command, Flow, HELP};
use operations::{import_catalog, load_catalog, report_load_error};
use state::AppState;
use ui::{Layout, TerminalView};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Command::Browse(args) => run_browse(args),
        Command::Shell(args) => run_shell(args),
        Command::Import(args) => run_import(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn terminal_view(args: &CatalogArgs) -> TerminalView<io::Stdout> {
    let layout = if args.rows { Layout::Rows } else { Layout::Cards };
    TerminalView::new(io::stdout(), layout).with_facets(!args.no_facets)
}

/// Apply one selection to a freshly loaded catalog and render it once.
/// Returns whether the catalog loaded.
fn present<V>(loaded: Result<ItemStore, CatalogError>, selection: Selection, view: &mut V) -> bool
where
    V: ViewReconciler + ?Sized,
{
    match loaded {
        Ok(store) => {
            let mut session = Session::new(store);
            session.apply(selection, view);
            true
        }
        Err(err) => {
            report_load_error(&err);
            render_load_failure(view);
            false
        }
    }
}

fn run_browse(args: BrowseArgs) -> Result<bool> {
    let loaded = load_catalog(&args.catalog.files);
    let selection = args.selection();

    if args.json {
        let mut view = ViewSnapshot::default();
        let ok = present(loaded, selection, &mut view);
        let json = serde_json::to_string_pretty(&view).context("Failed to serialize results")?;
        println!("{}", json);
        return Ok(ok);
    }

    let mut view = terminal_view(&args.catalog);
    let ok = present(loaded, selection, &mut view);
    view.finish().context("Failed to write results")?;
    Ok(ok)
}

fn run_shell(args: ShellArgs) -> Result<bool> {
    let mut view = terminal_view(&args.catalog);
    let mut state = AppState::new(args.catalog.files);

    println!("{}", state.get_title().bold());
    let loaded = state.load(&mut view);
    view.finish().context("Failed to write results")?;
    let Some(session) = state.session.as_mut().filter(|_| loaded) else {
        return Ok(false);
    };
    println!("{}", "Type 'help' for commands.".dimmed());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to write prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                if handle_command(session, command, &mut view) == Flow::Quit {
                    break;
                }
            }
            Err(err) => {
                eprintln!("{}", err.to_string().yellow());
                eprintln!("{}", HELP.dimmed());
            }
        }
        view.finish().context("Failed to write results")?;
    }

    Ok(true)
}

fn run_import(args: ImportArgs) -> Result<bool> {
    let written = import_catalog(&args.csv_path, &args.output)?;
    println!(
        "Wrote {} badges to {}",
        written.to_string().bold(),
        args.output.display()
    );
    Ok(true)
}
