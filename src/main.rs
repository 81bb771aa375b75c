use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use confdiff::{
    DEFAULT_CONTEXT, FileLabels, OutputFormat, RenderOptions, compute_structured_diff, render,
};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use crate::{
    app::{App, ViewMode},
    input::{RevisionSource, load_revisions},
    ui::render_ui::ui,
};

mod app;
mod input;
mod logging;
mod ui;
mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Old revision of the configuration ("-" for stdin)
    old: PathBuf,

    /// New revision of the configuration ("-" for stdin)
    new: PathBuf,

    /// Show a unified diff instead of every numbered line
    #[arg(short, long)]
    unified: bool,

    /// Unchanged lines kept around each change in unified output
    #[arg(short = 'U', long, default_value_t = DEFAULT_CONTEXT)]
    context: usize,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Label for the old revision in unified headers, e.g. "prod/web/41"
    #[arg(long)]
    old_label: Option<String>,

    /// Label for the new revision in unified headers, e.g. "prod/web/42"
    #[arg(long)]
    new_label: Option<String>,

    /// Inputs are base64 encoded, as the config service stores them
    #[arg(long)]
    base64: bool,

    /// Exit with status 1 when the revisions differ
    #[arg(long)]
    exit_code: bool,

    /// Browse the diff in an interactive terminal view
    #[arg(short, long)]
    interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        let colorize = match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_tty(),
        };
        RenderOptions {
            format: if self.unified {
                OutputFormat::Unified
            } else {
                OutputFormat::Numbered
            },
            colorize,
            context_lines: self.context,
        }
    }

    fn labels(&self) -> FileLabels {
        let old = self
            .old_label
            .clone()
            .unwrap_or_else(|| self.old.display().to_string());
        let new = self
            .new_label
            .clone()
            .unwrap_or_else(|| self.new.display().to_string());
        FileLabels::new(old, new)
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
                KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
                KeyCode::Char('d') | KeyCode::PageDown => app.scroll_down(10),
                KeyCode::Char('u') | KeyCode::PageUp => app.scroll_up(10),
                KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
                KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
                KeyCode::Char('l') | KeyCode::Right => app.scroll_right(4),
                KeyCode::Char('h') | KeyCode::Left => app.scroll_left(4),
                KeyCode::Char('L') => app.scroll_right(20),
                KeyCode::Char('H') => app.scroll_left(20),
                KeyCode::Char('s') => app.toggle_view_mode(),
                KeyCode::Char('?') => app.toggle_shortcuts(),
                _ => {}
            }
        }
    }
}

/// Runs `body` once `setup` succeeds, then always runs `restore`. The body's
/// error wins over a restore error.
fn with_restore<T>(
    setup: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    setup()?;
    let res = body();
    let restored = restore();
    let value = res?;
    restored?;
    Ok(value)
}

fn run_interactive(app: App) -> Result<()> {
    with_restore(
        || Ok(enable_raw_mode()?),
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            run_app(&mut terminal, app)
        },
        || {
            let raw = disable_raw_mode();
            execute!(io::stdout(), LeaveAlternateScreen, Show)?;
            Ok(raw?)
        },
    )
}

fn run(args: Args) -> Result<bool> {
    let old = RevisionSource {
        path: &args.old,
        base64: args.base64,
    };
    let new = RevisionSource {
        path: &args.new,
        base64: args.base64,
    };
    let (old_text, new_text) = load_revisions(&old, &new)?;

    let segments = compute_structured_diff(&old_text, &new_text);
    let differs = segments.iter().any(|s| s.kind.is_change());
    let labels = args.labels();
    let options = args.render_options();
    tracing::info!(format = ?options.format, colorize = options.colorize, differs, "rendering diff");

    if args.interactive {
        let mode = match options.format {
            OutputFormat::Numbered => ViewMode::Numbered,
            OutputFormat::Unified => ViewMode::Hunks,
        };
        run_interactive(App::new(segments, labels, options.context_lines, mode))?;
    } else {
        let output = render(&segments, &labels, &options);
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
    }

    Ok(differs)
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);
    let exit_code = args.exit_code;

    match run(args) {
        Ok(true) if exit_code => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
