//! Tradeseal CLI - publish and verify record commitments against an
//! append-only ledger journal.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{fingerprint, list, publish, verify};

#[derive(Parser)]
#[command(name = "tradeseal")]
#[command(about = "Tamper-evident audit trail for off-chain trade records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical bytes and fingerprint for a record
    Fingerprint {
        /// Input record JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Publish a record's fingerprint to the ledger
    Publish {
        /// Record identifier
        record_id: String,
        /// Path to the record snapshot JSON file
        #[arg(long)]
        store: String,
        /// Path to the ledger journal file
        #[arg(long)]
        ledger: String,
        /// Publishing principal (kind:name)
        #[arg(long, default_value = "service:recordkeeper")]
        publisher: String,
        /// Durability deadline in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify a record against its published commitment
    Verify {
        /// Record identifier
        record_id: String,
        /// Path to the record snapshot JSON file
        #[arg(long)]
        store: String,
        /// Path to the ledger journal file
        #[arg(long)]
        ledger: String,
        /// Exit non-zero for any verdict other than `verified`
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List commitment events in a ledger journal
    List {
        /// Path to the ledger journal file
        ledger: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fingerprint { input, json } => fingerprint::run(input, json),
        Commands::Publish {
            record_id,
            store,
            ledger,
            publisher,
            timeout,
            json,
        } => publish::run(record_id, store, ledger, publisher, timeout, json),
        Commands::Verify {
            record_id,
            store,
            ledger,
            strict,
            json,
        } => verify::run(record_id, store, ledger, strict, json),
        Commands::List { ledger, json } => list::run(ledger, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
