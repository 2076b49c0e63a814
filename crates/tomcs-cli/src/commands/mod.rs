//! CLI command definitions and dispatch.

pub mod convert;
pub mod design;
pub mod init;
pub mod poll;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tomcs_common::config::{self, TomcsConfig};

/// tomcs — design terminal UIs on a mouse-driven canvas.
#[derive(Parser, Debug)]
#[command(name = "tomcs", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the project configuration file.
    #[arg(long, short, global = true, default_value = tomcs_common::constants::CONFIG_FILE)]
    pub config: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default tomcs.json.
    Init(init::InitArgs),
    /// Open the interactive canvas designer.
    Design(design::DesignArgs),
    /// Print an image as colored half-block characters.
    Convert(convert::ConvertArgs),
    /// Run command bindings headless and print their output.
    Poll(poll::PollArgs),
}

/// Binding overrides shared by commands that run the poller.
#[derive(Args, Debug, Default, Clone)]
pub struct BindingArgs {
    /// Add or replace a binding, as `id=command`. Repeatable.
    #[arg(long = "bind", value_name = "ID=COMMAND")]
    pub bind: Vec<String>,

    /// Poll period in milliseconds.
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,
}

impl BindingArgs {
    /// Applies the overrides on top of a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a binding is malformed or the result is invalid.
    pub fn apply(&self, config: &mut TomcsConfig) -> anyhow::Result<()> {
        for raw in &self.bind {
            let (id, command) = config::parse_binding(raw)?;
            let _ = config.bindings.insert(id, command);
        }
        if let Some(interval) = self.interval {
            config.poll_interval_ms = interval;
        }
        config.validate()?;
        Ok(())
    }
}

/// Loads the configuration file, or defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be loaded.
pub fn load_config(path: &Path) -> anyhow::Result<TomcsConfig> {
    TomcsConfig::load_or_default(path)
        .with_context(|| format!("cannot load configuration from {}", path.display()))
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => init::execute(&cli.config, args),
        Command::Design(args) => design::execute(&cli.config, args),
        Command::Convert(args) => convert::execute(&cli.config, args),
        Command::Poll(args) => poll::execute(&cli.config, args),
    }
}

#[cfg(test)]
mod tests {
    use tomcs_common::types::ThemeName;

    use super::*;

    #[test]
    fn design_flags_parse() {
        let cli = Cli::try_parse_from([
            "tomcs",
            "design",
            "--theme",
            "nord",
            "--bind",
            "clock=date +%T",
            "--interval",
            "500",
        ])
        .unwrap();
        let Command::Design(args) = cli.command else {
            panic!("expected design");
        };
        assert_eq!(args.theme, Some(ThemeName::Nord));
        assert_eq!(args.bindings.bind, vec!["clock=date +%T".to_string()]);
        assert_eq!(args.bindings.interval, Some(500));
        assert_eq!(cli.config, PathBuf::from("tomcs.json"));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Cli::try_parse_from(["tomcs", "design", "--theme", "solarized"]).is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["tomcs", "convert", "logo.png", "--config", "x.json"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("x.json"));
    }

    #[test]
    fn binding_overrides_replace_file_values() {
        let mut config = TomcsConfig::default();
        let _ = config.bindings.insert("cpu".into(), "old".into());
        let args = BindingArgs {
            bind: vec!["cpu=uptime".into(), "mem=free -m".into()],
            interval: Some(250),
        };
        args.apply(&mut config).unwrap();
        assert_eq!(config.bindings.get("cpu").map(String::as_str), Some("uptime"));
        assert_eq!(config.bindings.get("mem").map(String::as_str), Some("free -m"));
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn zero_interval_override_is_rejected() {
        let mut config = TomcsConfig::default();
        let args = BindingArgs {
            bind: Vec::new(),
            interval: Some(0),
        };
        assert!(args.apply(&mut config).is_err());
    }

    #[test]
    fn malformed_binding_is_rejected() {
        let mut config = TomcsConfig::default();
        let args = BindingArgs {
            bind: vec!["no-separator".into()],
            interval: None,
        };
        assert!(args.apply(&mut config).is_err());
    }
}
