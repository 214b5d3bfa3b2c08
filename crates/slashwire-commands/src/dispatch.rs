//! Interaction dispatch: decode, resolve, invoke, respond.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use slashwire_types::{Interaction, InteractionResponse, InteractionType};

use crate::registry::{CommandRegistry, HandlerBinding};

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Application code invoked for one interaction.
///
/// Handlers run concurrently across requests and may await I/O. Whatever a
/// handler returns is serialized as the webhook reply; whatever it fails
/// with stays in the log.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    async fn handle(&self, interaction: Interaction) -> Result<InteractionResponse>;
}

/// Adapter wrapping a plain async closure as a handler.
pub(crate) struct FnHandler<F>(pub F);

#[async_trait]
impl<F, Fut> InteractionHandler for FnHandler<F>
where
    F: Fn(Interaction) -> Fut + Send + Sync,
    Fut: Future<Output = Result<InteractionResponse>> + Send,
{
    async fn handle(&self, interaction: Interaction) -> Result<InteractionResponse> {
        (self.0)(interaction).await
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures the transport layer must answer with a client error. Everything
/// past decoding is converted into a response envelope by the dispatcher
/// itself and never surfaces as an `Err`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("undecodable interaction payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("command interaction carries no command name")]
    MissingCommandName,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes one authenticated request: decode the body, short-circuit PING,
/// resolve the command name, invoke the handler, produce the envelope.
///
/// Every path ends in a response or a `DispatchError`; handler failures and
/// timeouts are absorbed here so they can never hang or crash the request.
pub struct InteractionDispatcher {
    registry: Arc<CommandRegistry>,
    handler_timeout: Option<Duration>,
}

impl InteractionDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            handler_timeout: None,
        }
    }

    /// Bounds each handler invocation. The platform abandons webhook
    /// deliveries after a few seconds, so a cap just under that limit keeps
    /// a stuck handler from wasting the whole window.
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = Some(timeout);
        self
    }

    /// Decodes and dispatches a verified raw body. The bytes must be exactly
    /// the ones authentication ran over, untouched.
    pub async fn handle(&self, raw_body: &[u8]) -> Result<InteractionResponse, DispatchError> {
        let interaction: Interaction = serde_json::from_slice(raw_body)?;
        self.dispatch(interaction).await
    }

    /// Dispatches an already-decoded interaction.
    pub async fn dispatch(
        &self,
        interaction: Interaction,
    ) -> Result<InteractionResponse, DispatchError> {
        // Liveness checks never consult the registry.
        if interaction.kind == InteractionType::PING {
            return Ok(InteractionResponse::pong());
        }

        let name = match interaction.command_name() {
            Some(name) => name.to_owned(),
            // A command interaction without a name is malformed, not a miss.
            None => return Err(DispatchError::MissingCommandName),
        };

        let Some(binding) = self.registry.lookup(&name) else {
            warn!("[Dispatch] No command registered for /{}", name);
            return Ok(InteractionResponse::ephemeral(format!(
                "Unknown command: /{name}"
            )));
        };

        info!(
            "[Dispatch] Invoking /{} for interaction {}",
            name, interaction.id
        );
        Ok(self.invoke(&name, binding, interaction).await)
    }

    async fn invoke(
        &self,
        name: &str,
        binding: &HandlerBinding,
        interaction: Interaction,
    ) -> InteractionResponse {
        let invocation = binding.handler.handle(interaction);
        let outcome = match self.handler_timeout {
            Some(limit) => match tokio::time::timeout(limit, invocation).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!("[Dispatch] Handler for /{} exceeded {:?}", name, limit);
                    return failure_envelope();
                }
            },
            None => invocation.await,
        };

        match outcome {
            Ok(response) => response,
            Err(err) => {
                error!("[Dispatch] Handler for /{} failed: {:#}", name, err);
                failure_envelope()
            }
        }
    }
}

/// What the remote caller sees when a handler fails or times out. The actual
/// error never leaves the process.
fn failure_envelope() -> InteractionResponse {
    InteractionResponse::ephemeral("Something went wrong while handling the command.")
}
