//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "imagecheckr")]
#[command(about = "Detect tampered, recompressed, and synthetic document images")]
pub struct Args {
    /// Input image file or directory
    #[arg(short, long)]
    pub input: PathBuf,

    /// Treat inputs as fetched from a remote URL (relaxes low-ELA bands)
    #[arg(long)]
    pub remote: bool,

    /// Calibration thresholds JSON file (defaults apply when omitted)
    #[arg(long)]
    pub calibration: Option<PathBuf>,

    /// Emit the full report as JSON instead of the terminal summary
    #[arg(long)]
    pub json: bool,

    /// Verbose output (per-probe metrics and contributing factors)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let args = Args::try_parse_from(["imagecheckr", "--input", "scan.jpg"]).unwrap();
        assert_eq!(args.input, PathBuf::from("scan.jpg"));
        assert!(!args.json);
        assert!(!args.remote);
        assert!(args.calibration.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "imagecheckr",
            "-i",
            "uploads/",
            "--remote",
            "--json",
            "-v",
            "--calibration",
            "cal.json",
        ])
        .unwrap();
        assert!(args.remote && args.json && args.verbose);
        assert_eq!(args.calibration, Some(PathBuf::from("cal.json")));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["imagecheckr"]).is_err());
    }
}
