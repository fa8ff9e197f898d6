//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Launch records dashboard
///
/// Shows the share of successful launches per site (or success vs. failure for
/// one site) and how launch outcome relates to payload mass.
///
/// Examples:
///   launch-dash spacex_launch_dash.csv
///   launch-dash launches.parquet --verbose
///   launch-dash --site "KSC LC-39A"
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Launch records file (.csv, .json or .parquet)
    ///
    /// Must contain the columns "Launch Site", "Payload Mass (kg)", "class"
    /// and "Booster Version Category".
    #[arg(
        value_name = "FILE",
        default_value = "spacex_launch_dash.csv",
        env = "LAUNCH_DASH_DATA"
    )]
    pub data: PathBuf,

    /// Launch site selected at startup ("All Sites" or a site from the file)
    #[arg(long, value_name = "SITE", default_value = "All Sites")]
    pub site: String,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Initial window width in points
    #[arg(long, default_value = "1200", value_name = "PX")]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value = "900", value_name = "PX")]
    pub height: f32,
}

impl Args {
    /// Default log filter when RUST_LOG is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["launch-dash"]).unwrap();
        // LAUNCH_DASH_DATA may be set in the environment running the tests.
        if std::env::var_os("LAUNCH_DASH_DATA").is_none() {
            assert_eq!(args.data, PathBuf::from("spacex_launch_dash.csv"));
        }
        assert!(!args.verbose);
        assert_eq!(args.site, "All Sites");
        assert_eq!(args.log_filter(), "info");
        assert_eq!(args.width, 1200.0);
    }

    #[test]
    fn explicit_file_and_flags() {
        let args = Args::try_parse_from([
            "launch-dash",
            "runs.parquet",
            "-v",
            "--height",
            "700",
            "--site",
            "KSC LC-39A",
        ])
        .unwrap();
        assert_eq!(args.data, PathBuf::from("runs.parquet"));
        assert_eq!(args.log_filter(), "debug");
        assert_eq!(args.height, 700.0);
        assert_eq!(args.site, "KSC LC-39A");
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
