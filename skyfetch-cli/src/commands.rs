//! Built-in application commands.
//!
//! Commands live in the same kind of registry as providers and parse
//! their own argument tail, so the dispatcher never special-cases
//! either collection.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use skyfetch_core::registry::Registry;

use crate::app::App;

#[async_trait]
pub trait Command {
    async fn run(&self, app: &mut App, args: &[String]) -> Result<()>;
}

pub type CommandFactory = fn() -> Box<dyn Command>;

/// The built-in command table, registered once at startup.
pub fn builtin() -> Registry<CommandFactory> {
    let mut registry = Registry::new();
    registry.add("providers", providers_command as CommandFactory);
    registry.add("configurate", configurate_command as CommandFactory);
    registry
}

fn providers_command() -> Box<dyn Command> {
    Box::new(Providers)
}

fn configurate_command() -> Box<dyn Command> {
    Box::new(Configurate)
}

/// Print all registered providers, one per line.
struct Providers;

#[async_trait]
impl Command for Providers {
    async fn run(&self, app: &mut App, _args: &[String]) -> Result<()> {
        for name in app.providers.names() {
            println!("{name}");
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(name = "configurate", about = "Configure a weather provider")]
struct ConfigurateArgs {
    /// Provider to choose a location for.
    provider: Option<String>,

    /// Persist an application log level (warn, info or debug).
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

/// Help to configure weather providers.
struct Configurate;

#[async_trait]
impl Command for Configurate {
    async fn run(&self, app: &mut App, args: &[String]) -> Result<()> {
        let parsed = ConfigurateArgs::try_parse_from(
            std::iter::once("configurate".to_string()).chain(args.iter().cloned()),
        )?;

        if let Some(level) = parsed.log_level {
            app.save_log_level(&level)?;
        }

        if let Some(provider) = parsed.provider {
            app.configure_provider(&provider).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_commands_are_registered_in_order() {
        let registry = builtin();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["providers", "configurate"]);
    }

    #[test]
    fn configurate_args_accept_provider_and_log_level() {
        let parsed =
            ConfigurateArgs::try_parse_from(["configurate", "accu", "-l", "debug"]).unwrap();

        assert_eq!(parsed.provider.as_deref(), Some("accu"));
        assert_eq!(parsed.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn configurate_args_are_both_optional() {
        let parsed = ConfigurateArgs::try_parse_from(["configurate"]).unwrap();

        assert!(parsed.provider.is_none());
        assert!(parsed.log_level.is_none());
    }
}
