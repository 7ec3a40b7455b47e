use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use moffeat::analysis::FeatureRecord;
use moffeat::batch;
use moffeat::config::Config;
use moffeat::io::{cif, table};
use moffeat::utils::{logger, report};

#[derive(Parser)]
#[command(
    name = "moffeat",
    about = "Compositional descriptors for metal-organic framework CIF files",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Per-file debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the feature table for every structure file in a directory
    #[command(visible_alias = "x")]
    Extract {
        /// Directory holding the CIF files
        dir: PathBuf,

        /// Output table ("-" for stdout)
        #[arg(short, long, value_name = "FILE", default_value = "features.csv")]
        output: PathBuf,

        /// Add per-carbon unsaturation and unit cell volume columns
        #[arg(long)]
        extended: bool,

        /// Worker threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Print composition, cell and descriptors of a single file
    Inspect {
        file: PathBuf,

        /// Emit the descriptor record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the user config directory
        #[arg(long)]
        save: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Logger setup failed: {}", e);
    }

    let config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let (cfg, msg) = Config::load();
            log::debug!("{}", msg);
            cfg
        }
    };

    match cli.command {
        Command::Extract { dir, output, extended, threads } => {
            let config = Config {
                extended_descriptors: config.extended_descriptors || extended,
                threads: threads.or(config.threads),
                ..config
            };
            extract(&dir, &output, &config)
        }
        Command::Inspect { file, json } => inspect(&file, json, &config),
        Command::Config { save } => show_config(&config, save),
    }
}

fn extract(dir: &Path, output: &Path, config: &Config) -> ExitCode {
    let report = match batch::run(dir, config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Cannot list {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let layout = config.layout();
    let written = if output == Path::new("-") {
        table::write_features_to(std::io::stdout().lock(), &layout, &report.records)
    } else {
        table::write_features(output, &layout, &report.records)
    };

    match written {
        Ok(()) => {
            if output != Path::new("-") {
                log::info!("Wrote {} rows to {}", report.records.len(), output.display());
            }
            if report.failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                log::warn!("{} files skipped", report.failures.len());
                ExitCode::from(2)
            }
        }
        Err(e) => {
            log::error!("Could not write {}: {}", output.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn inspect(file: &Path, json: bool, config: &Config) -> ExitCode {
    let content = match cif::read_text(file) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let name = file.display().to_string();
    let counts = cif::read_atom_counts(&content);
    let cell = cif::read_unit_cell(&content);
    let record = FeatureRecord::compute(&name, &counts, &config.element_features, &config.metal_types)
        .with_volume(cell.as_ref().ok().map(|c| c.volume()));

    if json {
        match serde_json::to_string_pretty(&record) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                log::error!("Failed to serialize record: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report::composition_summary(&name, &counts, &cell, &record));
    }
    ExitCode::SUCCESS
}

fn show_config(config: &Config, save: bool) -> ExitCode {
    match config.to_json() {
        Ok(text) => println!("{}", text),
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if save {
        match config.save() {
            Ok(path) => log::info!("Config saved to {:?}", path),
            Err(e) => {
                log::error!("Failed to save config: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
