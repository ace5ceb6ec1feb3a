use std::io;
use std::process;

mod client;
mod commands;
mod config;
mod error;
mod query;
mod responses;
mod terminal;

use client::SasRestClient;
use config::{ClientConfig, Options};
use terminal::Terminal;

fn main() {
    // Initialize logging
    env_logger::init();

    // Optional config file path as the only argument
    let config_path = std::env::args().nth(1);
    let config = match ClientConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let client = match SasRestClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            process::exit(1);
        }
    };

    // Create terminal and run interactive session
    let options = Options::from(&config);
    let mut terminal = Terminal::new(client, options, io::stdout());
    if let Err(e) = terminal.run_interactive(io::stdin().lock()) {
        eprintln!("Terminal error: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    println!("flysas-client [config.toml]");
    println!("Environment Variables:");
    println!("  FLYSAS_API__BASE_URL=https://api.flysas.com");
    println!("  FLYSAS_API__POS=se");
    println!("  FLYSAS_ACCOUNT__USERNAME=EBxxxxxxxxx");
    println!("  FLYSAS_ACCOUNT__PASSWORD=...");
    println!("  FLYSAS_DISPLAY__TABLE=true");
    println!("  RUST_LOG=info");
}
