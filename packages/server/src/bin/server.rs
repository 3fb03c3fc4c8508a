//! Liar Auction game server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin liar-auction-server
//! cargo run --bin liar-auction-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use liar_auction_server::{
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{SessionConfig, spawn_session},
};
use liar_auction_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "liar-auction-server")]
#[command(about = "Liar Auction game server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Seconds before the next round when bidding ends without a bid
    #[arg(long, default_value_t = 3)]
    no_bid_delay_secs: u64,

    /// Seconds the result of a round stays on screen
    #[arg(long, default_value_t = 5)]
    result_delay_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = SessionConfig {
        no_bid_delay: Duration::from_secs(args.no_bid_delay_secs),
        result_delay: Duration::from_secs(args.result_delay_secs),
    };
    tracing::info!("Session delays: {:?}", config);

    // 1. MessagePusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. Session controller
    let session = spawn_session(
        pusher,
        config,
        Arc::new(SystemClock),
        StdRng::from_os_rng(),
    );

    // 3. Server
    if let Err(e) = Server::new(session).run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
