//! Terminal client for the Liar Auction game server.
//!
//! Connects over WebSocket, prints every snapshot and narration the server
//! pushes, and sends typed commands as game events. Type `help` once
//! connected for the list of commands.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin liar-auction-client
//! cargo run --bin liar-auction-client -- --url ws://192.168.0.10:3000/ws
//! ```

use clap::Parser;

use liar_auction_client::run_client_session;
use liar_auction_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "liar-auction-client")]
#[command(about = "Terminal client for the Liar Auction game", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
