use std::path::{Path, PathBuf};

mod terminal;

use anyhow::Context;
use clap::ArgAction;
use mdsplit::{Config, Report, Splitter};
use terminal::{Palette, Tone};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The markdown file to split
    input: PathBuf,

    /// The directory to write into. Replaced entirely if it already exists.
    output: PathBuf,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(&self.input);
        let splitter = Splitter::new(self.input, self.output).with_config(config);

        split(&splitter)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Looks for `mdsplit.toml` next to the input file.
fn load_config(input: &Path) -> Config {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    Config::load_or_default(dir)
}

#[instrument(skip(splitter))]
fn split(splitter: &Splitter) -> anyhow::Result<()> {
    let report = splitter.run()?;

    print_summary(splitter, &report);

    if let Some(error) = report.interrupted {
        return Err(error).with_context(|| {
            format!(
                "splitting {} did not complete; the output is partial",
                splitter.input().display()
            )
        });
    }

    Ok(())
}

fn print_summary(splitter: &Splitter, report: &Report) {
    let palette = Palette::detect();
    let stats = report.stats;
    let headline = format!(
        "Split {} into {}",
        splitter.input().display(),
        splitter.output().display()
    );

    if report.is_complete() {
        println!("{}", palette.paint(Tone::Complete, &headline));
    } else {
        let headline = format!("{headline} (incomplete)");
        println!("{}", palette.paint(Tone::Partial, &headline));
    }

    println!(
        "  {} {}, {} {}, {} {}",
        stats.files,
        plural(stats.files, "file", "files"),
        stats.directories,
        plural(stats.directories, "directory", "directories"),
        stats.indexes,
        plural(stats.indexes, "index", "indexes"),
    );

    let removed = report.removed();
    if removed > 0 {
        let line = format!(
            "  removed {removed} empty {}",
            plural(removed, "artifact", "artifacts")
        );
        println!("{}", palette.paint(Tone::Detail, &line));
    }
}

const fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
