//! # Meshnet - Resistance Network Console
//!
//! The main binary for the Meshnet topology engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                apps/meshnet (THE BINARY)         │
//! │                                                  │
//! │  ┌───────────┐        ┌───────────────────────┐  │
//! │  │   CLI     │───────▶│  Console              │  │
//! │  │  (clap)   │        │  (tokenize + render)  │  │
//! │  └───────────┘        └───────────┬───────────┘  │
//! │                                   ▼              │
//! │                        ┌──────────────────┐      │
//! │                        │  meshnet-core    │      │
//! │                        │  (THE ENGINE)    │      │
//! │                        └──────────────────┘      │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Interpret a command script
//! meshnet run --file commands.txt --output responses.txt
//!
//! # Pipe mode
//! meshnet --quiet < commands.txt
//! ```

use clap::Parser;
use meshnet::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing. MESHNET_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MESHNET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meshnet=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner (stderr, so piped responses stay clean)
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Meshnet startup banner.
fn print_banner() {
    eprintln!(
        r"
  ███╗   ███╗███████╗███████╗██╗  ██╗███╗   ██╗███████╗████████╗
  ████╗ ████║██╔════╝██╔════╝██║  ██║████╗  ██║██╔════╝╚══██╔══╝
  ██╔████╔██║█████╗  ███████╗███████║██╔██╗ ██║█████╗     ██║
  ██║╚██╔╝██║██╔══╝  ╚════██║██╔══██║██║╚██╗██║██╔══╝     ██║
  ██║ ╚═╝ ██║███████╗███████║██║  ██║██║ ╚████║███████╗   ██║
  ╚═╝     ╚═╝╚══════╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝╚══════╝   ╚═╝

  Resistance Network Console v{}

  Deterministic • Synchronous • Verifiable
",
        env!("CARGO_PKG_VERSION")
    );
}
