use std::process::ExitCode;

use buildcommon::actions;
use buildcommon::env::ProcessEnv;
use buildcommon::errorln;
use clap::Parser;
use error_stack::Result;

mod cli;
mod cmd_generate;
mod error;
mod metadata;
mod resolve;
mod version;

use cli::Cli;
use error::Error;
use version::SystemRunner;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.apply_print_options();

    if let Err(e) = main_internal(&cli) {
        if cli.trace {
            eprintln!("error: {:?}", e);
        } else {
            errorln!("Failed", "{:#}", e);
        }
        actions::error(&format!("{:#}", e));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main_internal(cli: &Cli) -> Result<(), Error> {
    let config = cli.inputs.to_config();
    cmd_generate::run(&config, &ProcessEnv, &SystemRunner)?;
    Ok(())
}
