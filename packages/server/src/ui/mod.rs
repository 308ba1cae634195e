//! UI layer: HTTP/WebSocket endpoints and server wiring.

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
