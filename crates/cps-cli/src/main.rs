//! Crop planning CSV tool.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use cps_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use cps_cli::commands::{load_options, run_columns, run_convert, run_import, run_lookup};
use cps_cli::logging::{LogConfig, LogFormat, init_logging};
use cps_cli::summary::{print_columns, print_crop, print_export_summary, print_import_report};
use tracing::error;
use tracing::level_filters::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if let Command::Columns(args) = &cli.command {
        print_columns(args.kind.record_type(), &run_columns(args.kind));
        return Ok(ExitCode::SUCCESS);
    }

    let options = load_options(&cli.csv)?;
    match &cli.command {
        Command::Import(args) => {
            let report = run_import(&args.file, args.kind, &options)?;
            print_import_report(&report);
        }
        Command::Convert(args) => {
            let summary = run_convert(
                &args.input,
                &args.output,
                args.kind,
                args.label.as_deref(),
                &options,
            )?;
            print_export_summary(&summary);
        }
        Command::Lookup(args) => match run_lookup(&args.file, &args.crop, &options)? {
            Some(crop) => print_crop(&crop),
            None => {
                eprintln!("no base crop named '{}' in {}", args.crop, args.file.display());
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Columns(_) => {}
    }
    Ok(ExitCode::SUCCESS)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
