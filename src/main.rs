use std::process::ExitCode;

use clap::Parser;
use crossarb::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use crossarb::adapter::inbound::cli::output::{self, OutputConfig};
use crossarb::adapter::inbound::cli::{check, run};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    let result = match cli.command {
        Commands::Run(args) => run::execute(&args).await.map(|_| ()),
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(arg.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
