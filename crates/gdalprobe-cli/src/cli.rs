use clap::{ArgAction, Parser, Subcommand};
use gdalprobe_core::Profile;
use std::path::PathBuf;

/// gdalprobe - GDAL binding smoke test
#[derive(Parser, Debug)]
#[command(name = "gdalprobe")]
#[command(about = "Check that the GDAL native binding loads and answers basic queries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a gdalprobe.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the diagnostic checklist
    Check(CheckArgs),

    /// Only verify that the binding loads and report its release name
    Probe,

    /// List registered drivers
    Drivers(DriversArgs),

    /// Show the resolved configuration and where each value came from
    Config,
}

/// Checklist depth
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProfileArg {
    /// Versions, key drivers, first 15 drivers, memory dataset, environment, config options
    Full,
    /// Versions, first 10 drivers, memory dataset, environment
    Basic,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Full => Profile::Full,
            ProfileArg::Basic => Profile::Basic,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Checklist profile to run
    #[arg(long, value_enum, default_value = "full")]
    pub profile: ProfileArg,

    /// Number of drivers to list (defaults to the profile's count)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Key driver to check (repeatable, replaces the default list)
    #[arg(long = "driver", value_name = "NAME")]
    pub drivers: Vec<String>,

    /// Fail when a key driver is missing or the memory dataset check does not pass
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct DriversArgs {
    /// Only list the first N drivers
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::parse_from(["gdalprobe", "check"]);
        match cli.command {
            Commands::Check(args) => {
                assert!(matches!(args.profile, ProfileArg::Full));
                assert!(args.limit.is_none());
                assert!(args.drivers.is_empty());
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_overrides() {
        let cli = Cli::parse_from([
            "gdalprobe", "--json", "-vv", "check", "--profile", "basic", "-n", "3", "--driver",
            "GTiff", "--driver", "COG", "--strict",
        ]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(Profile::from(args.profile), Profile::Basic);
                assert_eq!(args.limit, Some(3));
                assert_eq!(args.drivers, vec!["GTiff", "COG"]);
                assert!(args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
