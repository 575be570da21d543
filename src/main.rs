mod aggregate;
mod captions;
mod cli;
mod error;
mod filter;
mod fmt;
mod loader;
mod metrics;
mod models;
mod pipeline;
mod settings;
mod stats;
mod tui;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoLocal;

use cli::{Cli, Commands};

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_max_level(log_level(verbose))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_path = settings::resolve_data_path(cli.data.as_deref());
    tracing::debug!(path = %data_path.display(), "resolved dataset");

    let result = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => cli::dashboard::run(&data_path),
        Commands::Report { filters } => cli::report::run(&data_path, &filters),
        Commands::Export { filters, output } => {
            cli::export::run(&data_path, &filters, output).map(|_| ())
        }
        Commands::Info => cli::info::run(&data_path),
        Commands::Demo {
            output,
            rows,
            seed,
            force,
        } => cli::demo::run(&output, rows, seed, force),
        Commands::Load { path } => cli::load::run(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(9), Level::TRACE);
    }
}
