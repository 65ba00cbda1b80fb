//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// msipack - MSI deployment package scaffolder
///
/// Builds deployment packages from a template tree and an installer payload,
/// stamping the generated deployment script with the derived version, artifact
/// name and resolved product code.
#[derive(Parser, Debug)]
#[command(
    name = "msipack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "MSI deployment package scaffolder",
    long_about = "msipack clones a deployment template tree into a versioned destination, \
                  installs the MSI payload into it, and rewrites the version, install file \
                  and Active Setup product code fields inside the deployment script.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  msipack build //share/installers/chrome/1.2.3/chrome.msi\n    \
                  msipack build ./payloads/1.2.3/app.msi --preflight\n    \
                  msipack build app.msi --config ./msipack.yaml\n    \
                  msipack version"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a deployment package from an installer payload
    Build(BuildArgs),

    /// Show version information
    Version,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build a package:\n    msipack build //share/installers/chrome/1.2.3/chrome.msi\n\n\
                  Validate and report without touching the destination:\n    \
                  msipack build ./1.2.3/app.msi --preflight\n\n\
                  Use an explicit configuration file:\n    \
                  msipack build app.msi --config /etc/msipack/msipack.yaml")]
pub struct BuildArgs {
    /// Path to the installer payload (.msi); UNC/network paths accepted
    pub payload: PathBuf,

    /// Validate and report derived values only; make no changes
    #[arg(long)]
    pub preflight: bool,

    /// Configuration file (defaults to ./msipack.yaml, then the user config dir)
    #[arg(long, short = 'c', env = "MSIPACK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_build() {
        let cli = Cli::try_parse_from(["msipack", "build", "./1.2.3/app.msi"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.payload, PathBuf::from("./1.2.3/app.msi"));
                assert!(!args.preflight);
                assert_eq!(args.config, None);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_build_preflight() {
        let cli =
            Cli::try_parse_from(["msipack", "build", "./1.2.3/app.msi", "--preflight"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert!(args.preflight);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_build_with_config() {
        let cli = Cli::try_parse_from([
            "msipack",
            "build",
            "app.msi",
            "--config",
            "/etc/msipack/msipack.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.config, Some(PathBuf::from("/etc/msipack/msipack.yaml")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_build_requires_payload() {
        let result = Cli::try_parse_from(["msipack", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["msipack", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from(["msipack", "-v", "build", "app.msi"]).unwrap();
        assert!(cli.verbose);
    }
}
