// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "line-experiment")]
#[command(about = "Draws a single line segment in an orthographic 2D view", long_about = None)]
pub struct Cli {
    /// Enable debug diagnostics (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Default log filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        let cli = Cli::parse_from(["line-experiment"]);
        assert!(!cli.verbose);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::parse_from(["line-experiment", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_filter(), "debug");

        let cli = Cli::parse_from(["line-experiment", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_size_arguments() {
        assert!(Cli::try_parse_from(["line-experiment", "--width", "800"]).is_err());
    }
}
