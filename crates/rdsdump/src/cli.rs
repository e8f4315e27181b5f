use std::fmt::Display;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};

use rdsoda::Region;

const USAGE_SHORT: &str = r#"
This program replays an RDS Spy group log through the rdsoda decoders and prints everything it could learn about the station: identity, program type, clock, RadioText Plus tags, traffic messages, and per-application counters.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program replays an RDS Spy group log through the rdsoda decoders and prints everything it could learn about the station: identity, program type, clock, RadioText Plus tags, traffic messages, and per-application counters.

RDS Spy <http://rdsspy.com/> can export received groups as a plain-text log, one group of four hex blocks per line:

    F202 2410 4652 414E @2019/05/04 02:29:17.940

Unrecoverable blocks appear as "----". Lines that are not group records are ignored, so logs may freely mix groups with headers and chatter.

Call-sign recovery from the PI code is only defined for the US (RBDS) region; use --region to declare where the log was captured.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// RDS Spy log file to replay
    pub file: String,

    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print only the group and application counters
    #[arg(short, long)]
    pub quiet: bool,

    /// Region the log was captured in
    #[arg(long, value_enum, default_value_t = RegionArg::Us)]
    pub region: RegionArg,
}

/// Receiver region, as spelled on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RegionArg {
    /// United States (RBDS)
    Us,
    /// Everywhere else
    Row,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Region {
        match arg {
            RegionArg::Us => Region::UnitedStates,
            RegionArg::Row => Region::RestOfWorld,
        }
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
