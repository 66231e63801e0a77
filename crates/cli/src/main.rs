use anyhow::Context;
use atexit_config::Settings;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod steps;

use steps::Step;

#[derive(Parser)]
#[command(name = "atexit-demo")]
#[command(about = "Register exit handlers, then terminate through atexit", long_about = None)]
#[command(version)]
struct Cli {
    /// File the `write:` handlers append to
    #[arg(long)]
    sentinel: PathBuf,

    /// Exit code passed to `atexit::exit`
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    exit_code: i32,

    /// Terminate through a fatal variant instead of `atexit::exit`
    #[arg(long, value_enum)]
    fatal: Option<FatalStyle>,

    /// Steps to apply in order: write:<text>, panic:<message>, cancel-last
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FatalStyle {
    Plain,
    Format,
    Lines,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::from_env().context("invalid ATEXIT_* settings")?;
    atexit_utils::tracing::init(&settings.log_filter)?;

    let mut last = None;
    for step in &cli.steps {
        step.apply(&cli.sentinel, &mut last);
    }
    tracing::debug!(handlers = atexit::global().len(), "scenario registered");

    let count = cli.steps.len();
    match cli.fatal {
        None => atexit::exit(cli.exit_code),
        Some(FatalStyle::Plain) => atexit::fatal!("demo failed after ", count, " steps"),
        Some(FatalStyle::Format) => atexit::fatalf!("demo failed after {count} steps"),
        Some(FatalStyle::Lines) => atexit::fatalln!("demo failed", format!("steps: {count}")),
    }
}
