use std::path::{Path, PathBuf};

use clap::Parser;
use service_binding::settings::DEFAULT_CONFIG_NAME;
use service_binding::{BindingPlan, ServiceBindingSettings, ServiceQualifier};
use tracing::debug;

use crate::output::{parse_output, render_all, Output};

pub const SETTINGS_PATH_ENV: &str = "SERVICE_BINDING_CONFIG_PATH";

#[derive(Parser, Debug)]
#[command(about = "Resolve service binding requirements for an application")]
pub struct ResolveCommand {
    #[arg(long, short, help = "Name of the application the services are bound to")]
    pub app: String,

    #[arg(
        long = "qualifier",
        short,
        value_parser = parse_qualifier,
        help = "Discovered service as type or type:name. May be repeated"
    )]
    pub qualifiers: Vec<ServiceQualifier>,

    #[arg(
        long,
        short,
        env = SETTINGS_PATH_ENV,
        help = "Settings file with service overrides. Defaults to service-binding.toml when present"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Fail when a service binding cannot be resolved")]
    pub strict: bool,

    #[arg(
        long,
        short,
        value_parser = parse_output,
        default_value = "json",
        help = "How the resolved requirements should be rendered"
    )]
    pub output: Output,
}

fn parse_qualifier(src: &str) -> Result<ServiceQualifier, String> {
    src.parse().map_err(|e| format!("{e}"))
}

pub fn invoke(cmd: &ResolveCommand) -> anyhow::Result<Option<String>> {
    let settings = load_settings(cmd.config.as_deref())?;
    debug!(
        app = %cmd.app,
        qualifiers = cmd.qualifiers.len(),
        overrides = settings.services.len(),
        "resolving service bindings"
    );

    let plan = BindingPlan::resolve(&cmd.app, &cmd.qualifiers, &settings.services);
    let requirements = if cmd.strict {
        plan.ensure_resolved()?
    } else {
        plan.requirements
    };

    Ok(Some(render_all(cmd.output, &requirements)?))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<ServiceBindingSettings> {
    if let Some(path) = path {
        return Ok(ServiceBindingSettings::from_path(path)?);
    }

    // an explicit path must load, a stray file in the working directory only warns
    let default_path = Path::new(DEFAULT_CONFIG_NAME);
    if default_path.is_file() {
        return Ok(ServiceBindingSettings::from_path_or_default(default_path));
    }

    Ok(ServiceBindingSettings::from_env()?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use insta::assert_snapshot;
    use service_binding::ServiceQualifier;
    use tempfile::TempDir;

    use super::invoke;
    use crate::cmds::{Command, Opt};
    use crate::output::Output;

    fn resolve_command(args: &[&str]) -> super::ResolveCommand {
        let opt = Opt::try_parse_from(["svcbind", "resolve"].iter().chain(args)).unwrap();
        match opt.cmd {
            Command::Resolve(cmd) => cmd,
            other => panic!("expected resolve command, got {other:?}"),
        }
    }

    #[test]
    fn should_parse_arguments() {
        let cmd = resolve_command(&[
            "--app",
            "app",
            "-q",
            "postgresql",
            "--qualifier",
            "mongodb:reporting",
            "--strict",
            "--output",
            "text",
        ]);

        assert_eq!("app", cmd.app);
        assert_eq!(
            vec![
                ServiceQualifier::new("postgresql", "default"),
                ServiceQualifier::new("mongodb", "reporting"),
            ],
            cmd.qualifiers
        );
        assert!(cmd.strict);
        assert_eq!(Output::Text, cmd.output);
    }

    #[test]
    fn invalid_qualifier_should_be_rejected() {
        let result = Opt::try_parse_from(["svcbind", "resolve", "--app", "app", "-q", ":default"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_render_json() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("service-binding.toml");
        fs::write(&config, "").unwrap();

        let cmd = resolve_command(&[
            "--app",
            "app",
            "-q",
            "postgresql:default",
            "--config",
            config.to_str().unwrap(),
        ]);

        let output = invoke(&cmd).unwrap().unwrap();
        assert_snapshot!(output, @r#"
        [
          {
            "apiVersion": "postgres-operator.crunchydata.com/v1beta1",
            "kind": "PostgresCluster",
            "name": "postgresql-default",
            "binding": "app-postgresql-default"
          }
        ]
        "#);
    }

    #[test]
    fn should_render_text_with_overrides_and_manual_services() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("service-binding.toml");
        fs::write(
            &config,
            r#"
[services.mysql-default]
name = "my-mysql"
api_version = "some.group/v1"
kind = "Mysql"

[services.my-postgresql]
api_version = "foo/v1"
kind = "PostgresDB"
binding = "custom-binding"
"#,
        )
        .unwrap();

        let cmd = resolve_command(&[
            "--app",
            "app",
            "-q",
            "mysql:default",
            "--config",
            config.to_str().unwrap(),
            "--output",
            "text",
        ]);

        let output = invoke(&cmd).unwrap().unwrap();
        assert_eq!(
            "app-mysql-default\tsome.group/v1\tMysql\tmy-mysql\n\
             custom-binding\tfoo/v1\tPostgresDB\tmy-postgresql",
            output
        );
    }

    #[test]
    fn strict_should_fail_on_unresolved_service() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("service-binding.toml");
        fs::write(&config, "").unwrap();

        let cmd = resolve_command(&[
            "--app",
            "app",
            "-q",
            "redis:cache",
            "--config",
            config.to_str().unwrap(),
            "--strict",
        ]);

        let err = invoke(&cmd).unwrap_err();
        assert!(err.to_string().contains("redis:cache"));
    }

    #[test]
    fn unresolved_service_is_skipped_without_strict() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("service-binding.toml");
        fs::write(&config, "").unwrap();

        let cmd = resolve_command(&[
            "--app",
            "app",
            "-q",
            "redis:cache",
            "--config",
            config.to_str().unwrap(),
        ]);

        assert_eq!(Some("[]".to_string()), invoke(&cmd).unwrap());
    }

    #[test]
    fn missing_config_should_fail() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("missing.toml");

        let cmd = resolve_command(&[
            "--app",
            "app",
            "--config",
            config.to_str().unwrap(),
        ]);

        assert!(invoke(&cmd).is_err());
    }
}
