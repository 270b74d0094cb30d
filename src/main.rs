use anyhow::Result;
use clap::Parser;
use log::{debug, error};
use positify::Application;
use positify::cli::Cli;
use positify::commands::run_command;

fn main() -> Result<()> {
    positify::init_logger();

    let cli = Cli::parse();
    debug!("Parsed arguments: {:?}", cli);

    let mut app = Application::load()?;
    if let Err(e) = run_command(&mut app, cli.command) {
        error!("Command failed: {:?}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    Ok(())
}
