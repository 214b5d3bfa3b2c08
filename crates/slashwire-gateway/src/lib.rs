//! HTTP boundary for slashwire.
//!
//! One POST route receives webhook deliveries, authenticates them, and hands
//! the verified bytes to the dispatcher. Status mapping lives here and only
//! here: 401 for any authentication failure, 400 for undecodable payloads,
//! 200 with a response envelope for everything the dispatcher answers.

pub mod server;

pub use server::{interactions_router, serve, GatewayState};
