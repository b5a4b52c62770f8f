use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("medlink=debug,info")
    } else {
        EnvFilter::new("medlink=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let data = cli::load_data(cli.data_dir.as_deref(), cli.verbose)?;

    match cli.command {
        cli::Commands::Triage(args) => {
            cli::triage::run(args, &data, cli.format, cli.verbose)?;
        }
        cli::Commands::Symptoms(args) => {
            cli::symptoms::run(args, &data, cli.format, cli.verbose)?;
        }
        cli::Commands::Conditions(args) => {
            cli::conditions::run(args, &data, cli.format, cli.verbose)?;
        }
        cli::Commands::Korean(args) => {
            cli::korean::run(args, &data, cli.format)?;
        }
        cli::Commands::Interactions(args) => {
            cli::interactions::run(args, &data, cli.format)?;
        }
        cli::Commands::Emergency(args) => {
            cli::guide::run_emergency(args, &data, cli.format)?;
        }
        cli::Commands::Safety => {
            cli::guide::run_safety(&data, cli.format)?;
        }
        cli::Commands::Data(args) => {
            cli::data::run(args, &data, cli.format)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, data)?;
        }
    }

    Ok(())
}
