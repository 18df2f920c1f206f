#![forbid(unsafe_code)]
//! # sms_vocab CLI
//!
//! Command-line interface for the `sms_vocab` crate. Loads a labeled SMS
//! corpus and prints corpus statistics, vocabulary sizes per normalization
//! backend and the removal-sensitivity results.
//!
//! ## Example
//! ```bash
//! RUST_LOG=info cargo run --release -- data/spam.csv --provider morphological --removal leave-one-out
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use log::{error, info};
use sms_vocab::{
    AnalysisOptions, EncodingPolicy, LoadOptions, Mode, ProviderKind, RemovalSemantics,
    render_report, run_analysis, save_report,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSV dataset with a header row
    path: PathBuf,

    /// Text transform backend used for the sensitivity analysis
    #[arg(long, value_enum, default_value_t = ProviderKind::Dictionary)]
    provider: ProviderKind,

    /// How removing a message is evaluated
    #[arg(long, value_enum, default_value_t = RemovalSemantics::SetDifference)]
    removal: RemovalSemantics,

    /// Which analyses to run
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Byte decoding of the dataset (latin1, lossy, ignore)
    #[arg(long, value_enum, default_value_t = EncodingPolicy::Latin1)]
    encoding: EncodingPolicy,

    /// Column holding the spam/ham label
    #[arg(long, default_value = "v1")]
    label_column: String,

    /// Column holding the message text
    #[arg(long, default_value = "v2")]
    message_column: String,

    /// Optional tab separated file of extra `form<TAB>lemma` pairs
    #[arg(long)]
    lemma_exceptions: Option<PathBuf>,

    /// If set, also write the report as JSON into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = AnalysisOptions {
        load: LoadOptions {
            label_column: cli.label_column,
            message_column: cli.message_column,
            encoding: cli.encoding,
        },
        provider: cli.provider,
        removal: cli.removal,
        mode: cli.mode,
        lemma_exceptions: cli.lemma_exceptions,
    };

    let report = match run_analysis(&cli.path, &options) {
        Ok(report) => report,
        Err(e) => {
            error!("Error analyzing {}: {}", cli.path.display(), e);
            process::exit(1);
        }
    };
    print!("{}", render_report(&report));

    if let Some(dir) = cli.export_dir {
        match save_report(&report, &dir) {
            Ok(path) => info!("Report written to {}", path.display()),
            Err(e) => {
                error!("Error exporting report: {}", e);
                process::exit(1);
            }
        }
    }
}
