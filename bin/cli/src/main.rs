use clap::Parser;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cmds::services::ServicesSubCommand;
use crate::cmds::{resolve, services, Command, Opt};

mod cmds;
mod output;

fn main() {
    let opt = Opt::parse();

    let tracing_level = if opt.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    // diagnostics go to stderr so rendered output on stdout stays parseable
    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &opt.cmd {
        Command::Resolve(cmd) => resolve::invoke(cmd),
        Command::Services(cmd) => match &cmd.services_command {
            ServicesSubCommand::Get(cmd) => services::get(cmd),
            ServicesSubCommand::List(cmd) => services::list(cmd),
        },
    };

    match result {
        Ok(output) => {
            if let Some(output) = output {
                println!("{output}");
            }
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
}
