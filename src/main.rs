// Tue Jan 13 2026 - Alex

use abi_layout_probe::{
    config::{Config, OutputFormat},
    harness::Harness,
    report::{JsonSink, ReportSink, TextSink},
    ui::banner::Banner,
    utils::logging,
};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Discovers std::basic_string and nested aggregate layouts", long_about = None)]
struct Args {
    /// Characters appended before decoding
    #[arg(short, long, default_value_t = abi_layout_probe::string::DEFAULT_APPEND_COUNT)]
    count: usize,

    /// Extra growth counts to probe, comma separated
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<usize>,

    /// Upper bound when searching for the small-buffer threshold
    #[arg(long, default_value_t = 256)]
    threshold_limit: usize,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    #[arg(long)]
    no_color: bool,

    #[arg(long)]
    no_banner: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> Config {
        let format = match self.format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };
        Config::new()
            .with_append_count(self.count)
            .with_sweep_counts(self.sweep)
            .with_threshold_limit(self.threshold_limit)
            .with_output_format(format)
            .with_compact_json(self.compact)
            .with_color(!self.no_color)
            .with_banner(!self.no_banner)
            .with_verbosity(self.verbose)
    }
}

fn main() {
    let config = Args::parse().into_config();

    if !config.use_color {
        colored::control::set_override(false);
    }
    logging::init(config.verbosity, config.use_color);

    // Mismatches are data: the process reports and exits successfully.
    if let Err(e) = run(config) {
        eprintln!("{} {:#}", "[!]".red(), e);
    }
}

fn run(mut config: Config) -> anyhow::Result<()> {
    if let Err(msg) = config.validate() {
        log::warn!("{}, using defaults", msg);
        config = Config::new()
            .with_output_format(config.output_format)
            .with_compact_json(config.compact_json)
            .with_color(config.use_color)
            .with_banner(config.show_banner)
            .with_verbosity(config.verbosity);
    }

    if config.show_banner && config.output_format == OutputFormat::Text {
        Banner::default().with_color(config.use_color).print();
    }

    let stdout = io::stdout().lock();
    let mut sink: Box<dyn ReportSink> = match config.output_format {
        OutputFormat::Text => Box::new(TextSink::new(stdout).with_color(config.use_color)),
        OutputFormat::Json => Box::new(JsonSink::new(stdout).with_pretty_print(!config.compact_json)),
    };

    let harness = Harness::new(config);
    let summary = harness.run(sink.as_mut()).context("failed to write report")?;

    log::info!(
        "{} probes ({} failed), {} layout assertions ({} failed)",
        summary.probes, summary.failed_probes, summary.assertions, summary.failed_assertions
    );
    Ok(())
}
