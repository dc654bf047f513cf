//! Diagnostic logging to stderr

use clap::Args;
use tracing::level_filters::LevelFilter;

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LoggingOpts {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl LoggingOpts {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Install the global subscriber. A second call is a no-op.
    pub fn configure_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(self.to_level_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
