//! Hearth presence and messaging server.
//!
//! Tracks connected participants, broadcasts chat messages, routes private
//! messages and maintains the "who is typing" list over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server
//! cargo run --bin hearth-server -- --host 0.0.0.0 --port 3000
//! PORT=8080 RUST_LOG=info cargo run --bin hearth-server
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use hearth_server::{
    infrastructure::message_pusher::WebSocketMessagePusher, ui::Server,
    usecase::SessionCoordinator,
};
use hearth_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "hearth-server")]
#[command(about = "Presence and messaging server for group chat over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HEARTH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "HEARTH_LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. MessagePusher
    // 2. SessionCoordinator
    // 3. Server

    // 1. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 2. Create SessionCoordinator (single owner of presence state)
    let coordinator = Arc::new(SessionCoordinator::new(
        message_pusher,
        Arc::new(SystemClock),
    ));

    // 3. Create and run the server
    let server = Server::new(coordinator);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
