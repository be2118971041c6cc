//! Code related to the CLI

use crate::input_processing::Granularity;
use clap::{Parser, Subcommand, ValueEnum};
use console::{set_colors_enabled, set_colors_enabled_stderr};
use std::path::PathBuf;
use strum::{Display, EnumString};

#[derive(Debug, Parser)]
#[command(
    name = "snakediff",
    version,
    about = "Minimal edit scripts between two text documents"
)]
pub struct Args {
    /// Print debug output
    ///
    /// This will print debug logs at the trace level. This is useful for debugging and bug reports
    /// should contain debug logging info.
    #[arg(short, long)]
    pub debug: bool,

    /// Run a subcommand that doesn't perform a diff.
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// The old document. Edits are positioned relative to this file.
    pub old: Option<PathBuf>,

    /// The new document that the edits produce.
    pub new: Option<PathBuf>,

    /// The unit that the documents are split into before diffing.
    ///
    /// This overrides the granularity set in the config.
    #[arg(short, long, value_enum)]
    pub granularity: Option<Granularity>,

    /// Specify which renderer tag to use.
    ///
    /// Valid tags are "listing" and "json". If this isn't specified the default renderer from the
    /// config is used.
    #[arg(short, long)]
    pub renderer: Option<String>,

    /// Use the config provided at the given path
    ///
    /// By default, snakediff attempts to find the config at `$XDG_CONFIG_HOME/snakediff/config.json5`.
    /// On Windows the app will look in the standard config path.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the color output policy. Valid values are: "auto", "on", "off".
    ///
    /// "auto" will automatically detect whether colors should be applied by trying to determine
    /// whether the process is outputting to a TTY. "on" will enable output and "off" will disable
    /// color output regardless of whether the process detects a TTY.
    #[arg(long = "color", value_enum, default_value_t)]
    pub color_output: ColorOutputPolicy,

    /// Ignore any config files and use the default config
    ///
    /// Overrides from `SNAKEDIFF_` environment variables still apply.
    #[arg(short, long)]
    pub no_config: bool,

    /// Exit with status 1 if the documents differ.
    #[arg(long)]
    pub exit_code: bool,
}

/// Commands related to the configuration
#[derive(Debug, Eq, PartialEq, Clone, Copy, Subcommand)]
#[command(rename_all = "kebab-case")]
pub enum Command {
    /// Dump the default config to stdout
    DumpDefaultConfig,

    /// Generate shell completion scripts for snakediff
    GenCompletion {
        /// The shell to generate completion scripts for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Whether the output to the terminal should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum ColorOutputPolicy {
    /// Automatically enable color if printing to a TTY, otherwise disable color
    #[default]
    Auto,
    /// Force plaintext output
    Off,
    /// Force color output
    On,
}

/// Set terminal color settings based on the output policy.
pub fn set_term_colors(setting: ColorOutputPolicy) {
    let colors_enabled = match setting {
        ColorOutputPolicy::Auto => return,
        ColorOutputPolicy::On => true,
        ColorOutputPolicy::Off => false,
    };
    set_colors_enabled(colors_enabled);
    set_colors_enabled_stderr(colors_enabled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_diff_args() {
        let args = Args::try_parse_from([
            "snakediff", "-g", "line", "-r", "json", "--color", "off", "a.txt", "b.txt",
        ])
        .unwrap();
        assert_eq!(args.granularity, Some(Granularity::Line));
        assert_eq!(args.renderer.as_deref(), Some("json"));
        assert_eq!(args.color_output, ColorOutputPolicy::Off);
        assert_eq!(args.old, Some(PathBuf::from("a.txt")));
        assert_eq!(args.new, Some(PathBuf::from("b.txt")));
        assert_eq!(args.cmd, None);
    }

    #[test]
    fn test_paths_are_optional_with_subcommand() {
        let args = Args::try_parse_from(["snakediff", "dump-default-config"]).unwrap();
        assert_eq!(args.old, None);
        assert_eq!(args.new, None);
    }

    #[test_case(&["snakediff", "dump-default-config"], Command::DumpDefaultConfig)]
    #[test_case(
        &["snakediff", "gen-completion", "bash"],
        Command::GenCompletion { shell: clap_complete::Shell::Bash }
    )]
    fn test_subcommands(argv: &[&str], expected: Command) {
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.cmd, Some(expected));
    }
}
