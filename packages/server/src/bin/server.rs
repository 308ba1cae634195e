//! Token-authenticated WebSocket chat relay server.
//!
//! Clients upgrade at `/ws/chat/{room}` with a bearer token; messages are
//! persisted and fanned out to every other member of the room.
//!
//! Run with:
//! ```not_rust
//! CAMPFIRE_TOKEN_SECRET=... cargo run --bin campfire-server
//! cargo run --bin campfire-server -- --host 0.0.0.0 --port 3000 --token-secret ...
//! ```

use std::sync::Arc;

use clap::Parser;

use campfire_server::{
    infrastructure::{InMemoryGroupChannel, InMemoryRoomStore, JwtTokenVerifier},
    ui::Server,
    usecase::{JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase, RoomQueryUseCase},
};
use campfire_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "campfire-server")]
#[command(about = "Token-authenticated WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// HS256 secret for verifying access tokens
    /// (falls back to the CAMPFIRE_TOKEN_SECRET environment variable)
    #[arg(long)]
    token_secret: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let token_secret = args
        .token_secret
        .or_else(|| std::env::var("CAMPFIRE_TOKEN_SECRET").ok());
    let Some(token_secret) = token_secret else {
        tracing::error!(
            "No token secret configured; pass --token-secret or set CAMPFIRE_TOKEN_SECRET"
        );
        std::process::exit(1);
    };

    // Initialize dependencies in order:
    // 1. Store and group channel
    // 2. Token verifier
    // 3. UseCases
    // 4. Server

    // 1. Create the room store (in-memory) and the group channel
    let store = Arc::new(InMemoryRoomStore::new(Arc::new(SystemClock)));
    let groups = Arc::new(InMemoryGroupChannel::new());

    // 2. Create the token verifier
    let token_verifier = Arc::new(JwtTokenVerifier::new(&token_secret));

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(store.clone(), groups.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(groups.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(store.clone(), groups.clone()));
    let room_query_usecase = Arc::new(RoomQueryUseCase::new(store.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        relay_message_usecase,
        room_query_usecase,
        token_verifier,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
