//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for simbridge
#[derive(Parser, Debug)]
#[command(name = "simbridge")]
#[command(author, version, about = "Drive an iOS simulator through a safe tool interface")]
#[command(long_about = r#"
simbridge exposes simulator operations (screenshots, taps, swipes, typing,
accessibility inspection) as tools over a line-delimited JSON-RPC channel on
stdin/stdout. Only `xcrun` and `axe` at their configured absolute paths are
ever started, and every argument is validated before it reaches them.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./simbridge.toml         Project-level config
3. ~/.config/simbridge/config.toml   Global config

Example:
  simbridge                 Run the stdio server
  simbridge check           Verify the configured executables
  simbridge --show-config   List config file locations
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the stdio JSON-RPC server (default)
    Serve,
    /// Report whether each allow-listed executable is present
    Check,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["simbridge"]);
        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_check_with_global_flags() {
        let cli = Cli::parse_from(["simbridge", "check", "-vv", "--config", "/tmp/s.toml"]);
        assert_eq!(cli.command(), Command::Check);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["simbridge", "reboot"]).is_err());
    }
}
