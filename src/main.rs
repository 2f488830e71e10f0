//! # Recap CLI
//!
//! Command-line interface for the recap report service.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP server
//! recap serve --listen 0.0.0.0:8080 --data-dir data
//!
//! # Generate a recap PNG straight from exported dump files
//! recap report orders-page1.json orders-page2.json --output recap.png
//!
//! # Submit dump files to a running server
//! recap submit orders-page1.json --server http://localhost:8080
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use recap::{
    RecapError,
    client::SubmissionController,
    orders::{self, stats::OrderStats},
    report,
    server::{self, ServerConfig},
    wire::{self, SubmissionPayload},
};

/// Recap - order history report utility
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory for generated reports and static assets
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Calendar year the recap covers
        #[arg(long, default_value_t = 2021)]
        year: i32,
    },

    /// Generate a recap PNG from order dump files without a server
    Report {
        /// Up to eight exported order-history JSON files
        inputs: Vec<PathBuf>,

        /// Output image path
        #[arg(long, default_value = "recap.png")]
        output: PathBuf,

        /// Calendar year the recap covers
        #[arg(long, default_value_t = 2021)]
        year: i32,
    },

    /// Submit order dump files to a running server
    Submit {
        /// Up to eight exported order-history JSON files
        inputs: Vec<PathBuf>,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), RecapError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            data_dir,
            year,
        } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                data_dir,
                report_year: year,
            })
            .await
        }

        Commands::Report {
            inputs,
            output,
            year,
        } => {
            let payload = payload_from_files(&inputs)?;
            let orders = orders::parse_dumps(&payload)?;
            if orders.is_empty() {
                return Err(RecapError::OrderDump(
                    "no orders found in the given files".to_string(),
                ));
            }
            let stats = OrderStats::compute(&orders, year);
            println!(
                "Parsed {} orders, {} delivered in {}",
                orders.len(),
                stats.order_count,
                year
            );

            let image = report::render(&stats);
            image
                .save(&output)
                .map_err(|e| RecapError::Report(format!("Failed to save report: {}", e)))?;
            println!("Saved to {}", output.display());
            Ok(())
        }

        Commands::Submit { inputs, server } => {
            let payload = payload_from_files(&inputs)?;
            let mut controller = SubmissionController::new(server.clone());

            let path = controller
                .submit(&payload)
                .await
                .map_err(|e| RecapError::Server(e.to_string()))?;
            println!("Report ready: {}/{}", server.trim_end_matches('/'), path);
            Ok(())
        }
    }
}

/// Read dump files into submission slots, in argument order.
fn payload_from_files(inputs: &[PathBuf]) -> Result<SubmissionPayload, RecapError> {
    if inputs.is_empty() {
        return Err(RecapError::OrderDump(
            "provide at least one order dump file".to_string(),
        ));
    }
    if inputs.len() > wire::SLOT_COUNT {
        return Err(RecapError::OrderDump(format!(
            "at most {} order dump files are supported, got {}",
            wire::SLOT_COUNT,
            inputs.len()
        )));
    }

    let mut slots: [String; wire::SLOT_COUNT] = Default::default();
    for (slot, path) in slots.iter_mut().zip(inputs) {
        *slot = std::fs::read_to_string(path)?;
    }
    Ok(SubmissionPayload::from_slots(slots))
}
