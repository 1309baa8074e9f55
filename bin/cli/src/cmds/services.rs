use clap::Parser;
use service_binding::{registry, ServiceBindingError};

use crate::output::{parse_output, render, render_all, Output};

#[derive(Parser, Debug)]
#[command(about = "Well-known service types and their default coordinates")]
pub struct ServicesCommand {
    #[command(subcommand)]
    pub services_command: ServicesSubCommand,
}

#[remain::sorted]
#[derive(Parser, Debug)]
pub enum ServicesSubCommand {
    Get(GetService),
    List(ListServices),
}

#[derive(Parser, Debug)]
#[command(about = "List well-known service types")]
pub struct ListServices {
    #[arg(long, short, value_parser = parse_output, default_value = "json")]
    pub output: Output,
}

#[derive(Parser, Debug)]
#[command(about = "Get the default coordinates of a service type")]
pub struct GetService {
    #[arg(help = "Service type, for example postgresql")]
    pub service_type: String,

    #[arg(long, short, value_parser = parse_output, default_value = "json")]
    pub output: Output,
}

pub fn list(cmd: &ListServices) -> anyhow::Result<Option<String>> {
    Ok(Some(render_all(cmd.output, &registry::all())?))
}

pub fn get(cmd: &GetService) -> anyhow::Result<Option<String>> {
    let entry = registry::lookup(&cmd.service_type)
        .ok_or_else(|| ServiceBindingError::UnknownServiceType(cmd.service_type.clone()))?;
    Ok(Some(render(cmd.output, entry)?))
}
