//! Command-line argument parsing

use clap::Parser;
use std::net::IpAddr;
use veil_common::DEFAULT_PORT;

/// Veil end-to-end-encrypted message relay
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// IP address to bind to (IPv4 or IPv6)
    #[arg(short, long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable debug logging (connects, disconnects, routing). RUST_LOG overrides.
    #[arg(long, default_value = "false")]
    pub debug: bool,
}
