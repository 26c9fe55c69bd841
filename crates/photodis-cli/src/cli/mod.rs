mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "photodis",
    version,
    about = "Photodisintegration cross-sections and interaction lengths on the CMB"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn run_from_env() -> i32 {
    let cli = Cli::parse();
    match cli.command.execute() {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error:#}");
            1
        }
    }
}

/// Testable entry point over an explicit argument list (no program name).
pub fn run<I, S>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("photodis".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    let cli = Cli::try_parse_from(full_args)?;
    cli.command.execute()
}
