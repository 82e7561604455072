use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use multical::calendar::CalendarDate;
use multical::config::{Config, Overrides, Settings};
use multical::runtime::Runtime;
use multical::state::AppState;
use multical::terminal::{Terminal, TerminalSize};
use multical::ui::frame_json::frame_to_json;
use multical::ui::renderer::Renderer;
use multical::widgets::MultiDateCalendar;
use multical::Result;

const DUMP_FRAME_SIZE: TerminalSize = TerminalSize {
    width: 80,
    height: 24,
};

#[derive(Debug, Parser)]
#[command(name = "multical")]
#[command(about = "Pick any number of dates from a month calendar in the terminal")]
struct Args {
    /// Month to open, as YYYY-MM (defaults to the current month)
    #[arg(long, value_name = "YYYY-MM")]
    month: Option<String>,

    /// Preselect a date, as DD-MM-YYYY (repeatable)
    #[arg(long, value_name = "DD-MM-YYYY")]
    select: Vec<String>,

    /// YAML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the first frame as JSON instead of opening the terminal UI
    #[arg(long)]
    dump_frame: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let overrides = Overrides {
        month: args.month,
        select: args.select,
        log_file: args.log_file,
    };
    let today = CalendarDate::today();
    let settings = Settings::resolve(config, overrides, today)?;
    init_logging(&settings)?;

    let calendar = MultiDateCalendar::new("dates", "Dates", today)
        .with_month(settings.month)
        .with_selection(settings.selection);
    let state = AppState::new(calendar);

    if args.dump_frame {
        let frame = Renderer::default().render(&state, DUMP_FRAME_SIZE);
        let json = frame_to_json(&frame, DUMP_FRAME_SIZE);
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let state = Runtime::new(state, Terminal::new()?).run()?;
    info!(
        "final selection {}",
        state.calendar().selection().display()
    );
    Ok(())
}

/// Logs go to a file only; stderr would draw over the alternate screen.
fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .init();
    Ok(())
}
