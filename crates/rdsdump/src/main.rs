use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match rdsdump() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn rdsdump() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    info!("replaying RDS Spy log: \"{}\"", &args.file);
    let groups = rdsoda::read_spy_log(&args.file)
        .with_context(|| format!("Unable to replay \"{}\"", args.file))?;

    let mut replay = app::Replay::new();
    for blocks in &groups {
        replay.process(blocks);
    }

    replay.print_report(args.region.into(), args.quiet);
    Ok(())
}

fn log_setup(args: &Args) {
    if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("rdsoda", log_filter)
            .filter_module("rdsdump", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}
