use clap::{Parser, Subcommand};

use crate::cmds::resolve::ResolveCommand;
use crate::cmds::services::ServicesCommand;

pub mod resolve;
pub mod services;

#[derive(Debug, Parser)]
#[command(name = "svcbind")]
pub struct Opt {
    #[arg(
        long,
        help = "Prints a verbose output during the program execution",
        global = true
    )]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[remain::sorted]
#[derive(Debug, Subcommand)]
pub enum Command {
    Resolve(ResolveCommand),
    Services(ServicesCommand),
}
