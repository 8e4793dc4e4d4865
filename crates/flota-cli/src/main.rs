//! Fleet report exporter CLI.

use clap::Parser;
use tracing::level_filters::LevelFilter;

use flota_cli::commands::{ExportOptions, run_export, run_preview};
use flota_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;

use crate::cli::{Cli, Command, ExportArgs, LogFormatArg, LogLevelArg, SourceArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match cli.command {
        Command::Export(args) => match run_export(&export_options(&args)) {
            Ok(report) => {
                println!("{} filas exportadas", report.rows);
                for path in &report.written {
                    println!("  {}", path.display());
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Preview(args) => match run_preview(&preview_options(&args)) {
            Ok(rendered) => {
                println!("{rendered}");
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn export_options(args: &ExportArgs) -> ExportOptions {
    ExportOptions {
        rows_file: args.source.rows.clone(),
        columns_file: args.source.columns.clone(),
        formats: args.format.formats(),
        output_dir: args.output_dir.clone(),
        title: args.source.title.clone(),
        sheet_name: args.source.sheet_name.clone(),
        filename_base: args.source.filename_base.clone(),
        orientation: args.orientation.into(),
        scope: args.scope.into(),
        logo: args.logo.clone(),
        footer_color: args.footer_color.clone(),
        include_timestamp: !args.no_timestamp,
    }
}

/// Preview shares the export defaults that affect it; renderer-only
/// settings keep their defaults.
fn preview_options(args: &SourceArgs) -> ExportOptions {
    ExportOptions {
        rows_file: args.rows.clone(),
        columns_file: args.columns.clone(),
        formats: Vec::new(),
        output_dir: ".".into(),
        title: args.title.clone(),
        sheet_name: args.sheet_name.clone(),
        filename_base: args.filename_base.clone(),
        orientation: flota_model::Orientation::Portrait,
        scope: flota_model::RowScope::All,
        logo: None,
        footer_color: None,
        include_timestamp: true,
    }
}

/// Build logging configuration from CLI flags with consistent precedence:
/// an explicit `--log-level` beats `-v`/`-q`, and either disables the
/// `RUST_LOG` override.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    LogConfig {
        level_filter,
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: true,
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_overrides_verbosity() {
        let cli = Cli::parse_from([
            "flota-export",
            "--log-level",
            "debug",
            "preview",
            "rows.json",
        ]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn verbosity_alone_keeps_env_override() {
        let cli = Cli::parse_from(["flota-export", "preview", "rows.json"]);
        let config = log_config_from_cli(&cli);
        assert!(config.use_env_filter);
    }
}
