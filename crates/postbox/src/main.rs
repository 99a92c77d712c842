// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Postbox - a self-hosted contact-form backend.
//!
//! This is the binary entry point for the Postbox server.

use clap::{Parser, Subcommand};

mod serve;

/// Postbox - a self-hosted contact-form backend.
#[derive(Parser, Debug)]
#[command(name = "postbox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Postbox API server.
    Serve,
    /// Load and validate configuration, then exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match postbox_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            postbox_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Config) => {
            println!(
                "postbox: configuration OK (service.name={}, storage={})",
                config.service.name, config.storage.database_path
            );
        }
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
