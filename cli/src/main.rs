
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{dashboard, export, import, init, layer, point, sync};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::builder().from_env_lossy()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        EnvFilter::builder().parse_lossy(format!("casemap={level}"))
    };
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Init(args) => init::run(&cli, args),
        Commands::Layer(cmd) => layer::run(&cli, cmd),
        Commands::Point(cmd) => point::run(&cli, cmd),
        Commands::Export(args) => export::run(&cli, args),
        Commands::Import(args) => import::run(&cli, args),
        Commands::Sync(cmd) => sync::run(&cli, cmd),
        Commands::Dashboard => dashboard::run(&cli),
    }
}

fn main() -> anyhow::Result<()> { run() }
