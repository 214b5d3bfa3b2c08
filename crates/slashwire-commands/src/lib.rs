//! Command registry and dispatch engine.
//!
//! The registry maps command names to handler bindings; the dispatcher takes
//! an authenticated raw body, decodes it, and routes it to the right handler.
//! Nothing in this crate touches the network.

pub mod dispatch;
pub mod registry;

pub use dispatch::{DispatchError, InteractionDispatcher, InteractionHandler};
pub use registry::{CommandRegistry, HandlerBinding};
