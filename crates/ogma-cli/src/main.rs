use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;

mod replay;
mod script;

#[derive(Parser)]
#[command(name = "ogma")]
#[command(about = "Replay pointer interaction against a headless class diagram")]
struct Cli {
    /// Log filter, e.g. `debug` or `ogma_select=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Replay(ReplayArgs),
}

#[derive(Args)]
struct ReplayArgs {
    script: PathBuf,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Command::Replay(args) => run_replay(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read {}", args.script.display()))?;
    let script = script::parse(&text)
        .with_context(|| format!("invalid script {}", args.script.display()))?;
    info!(path = %args.script.display(), steps = script.steps.len(), "script loaded");

    let report = replay::run(&script)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for notification in &report.notifications {
        let verb = if notification.selected {
            "selected"
        } else {
            "deselected"
        };
        println!("[step {}] {} {verb}", notification.step, notification.element);
    }
    match &report.selected {
        Some(element) => println!("selection: {element}"),
        None => println!("selection: none"),
    }
    if let Some([x, y, z]) = report.coordinates {
        println!("at: {x:.3}, {y:.3}, {z:.3}");
    }
    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
