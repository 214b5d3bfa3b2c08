//! Name-keyed registry of command definitions and their handlers.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use slashwire_types::{ApplicationCommand, Interaction, InteractionResponse};

use crate::dispatch::{FnHandler, InteractionHandler};

/// A registered command: the definition published to the platform plus the
/// handler invoked when the platform delivers an invocation of it. The two
/// share one lifecycle inside the registry.
#[derive(Clone)]
pub struct HandlerBinding {
    pub definition: ApplicationCommand,
    pub handler: Arc<dyn InteractionHandler>,
}

/// Holds every command the application offers, keyed by `definition.name`.
///
/// Built at startup, then shared read-only behind an `Arc`. To change the
/// command set at runtime, build a new registry and swap the `Arc` at the
/// owner; the dispatcher never mutates it.
pub struct CommandRegistry {
    bindings: HashMap<String, HandlerBinding>,
    /// Names in first-registration order, so `definitions()` is stable.
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Inserts or replaces the binding keyed by the definition's own name.
    /// Re-registering a name is not an error: the later binding wins and
    /// keeps the original slot in `definitions()`.
    pub fn register(&mut self, definition: ApplicationCommand, handler: Arc<dyn InteractionHandler>) {
        let name = definition.name.clone();
        if !self.bindings.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.bindings.insert(name, HandlerBinding { definition, handler });
    }

    /// Registers a plain async closure without declaring a handler struct.
    pub fn register_fn<F, Fut>(&mut self, definition: ApplicationCommand, handler: F)
    where
        F: Fn(Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<InteractionResponse>> + Send + 'static,
    {
        self.register(definition, Arc::new(FnHandler(handler)));
    }

    /// Exact-match lookup. Case-sensitive, matching the platform's own
    /// command-name rules; no prefix or fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&HandlerBinding> {
        self.bindings.get(name)
    }

    /// Every registered definition, in first-registration order. This is the
    /// sole data source for the publish path.
    pub fn definitions(&self) -> Vec<ApplicationCommand> {
        self.order
            .iter()
            .filter_map(|name| self.bindings.get(name))
            .map(|binding| binding.definition.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashwire_types::CallbackData;

    fn command(name: &str) -> ApplicationCommand {
        ApplicationCommand::new(name, format!("The {name} command"))
    }

    fn reply(text: &'static str) -> impl Fn(Interaction) -> std::future::Ready<Result<InteractionResponse>> {
        move |_| {
            std::future::ready(Ok(InteractionResponse::channel_message(
                CallbackData::content(text),
            )))
        }
    }

    async fn invoke(registry: &CommandRegistry, name: &str) -> InteractionResponse {
        let binding = registry.lookup(name).expect("binding registered");
        let interaction: Interaction =
            serde_json::from_str(r#"{"id":"1","type":2,"token":"t"}"#).unwrap();
        binding.handler.handle(interaction).await.unwrap()
    }

    #[test]
    fn test_lookup_unregistered_name_misses() {
        let registry = CommandRegistry::new();
        assert!(registry.lookup("missing").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = CommandRegistry::new();
        registry.register_fn(command("hello"), reply("hi"));

        assert!(registry.lookup("hello").is_some());
        assert!(registry.lookup("Hello").is_none());
        assert!(registry.lookup("HELLO").is_none());
    }

    #[tokio::test]
    async fn test_reregistration_is_last_write_wins() {
        let mut registry = CommandRegistry::new();
        registry.register_fn(command("greet"), reply("first"));
        registry.register_fn(command("greet"), reply("second"));

        assert_eq!(registry.len(), 1);
        let response = invoke(&registry, "greet").await;
        assert_eq!(response.data.unwrap().content.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_registrations_key_by_their_own_name() {
        // Three commands registered back to back must stay individually
        // reachable; collapsing them into one slot would mean the key came
        // from somewhere other than the definition.
        let mut registry = CommandRegistry::new();
        registry.register_fn(command("alpha"), reply("a"));
        registry.register_fn(command("beta"), reply("b"));
        registry.register_fn(command("gamma"), reply("c"));

        assert_eq!(registry.len(), 3);
        for (name, text) in [("alpha", "a"), ("beta", "b"), ("gamma", "c")] {
            let response = invoke(&registry, name).await;
            assert_eq!(response.data.unwrap().content.as_deref(), Some(text));
        }
    }

    #[test]
    fn test_definitions_keep_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register_fn(command("charlie"), reply("c"));
        registry.register_fn(command("alpha"), reply("a"));
        registry.register_fn(command("bravo"), reply("b"));

        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|definition| definition.name)
            .collect();
        assert_eq!(names, ["charlie", "alpha", "bravo"]);
    }

    #[test]
    fn test_replacement_keeps_original_slot() {
        let mut registry = CommandRegistry::new();
        registry.register_fn(command("charlie"), reply("c"));
        registry.register_fn(command("alpha"), reply("a"));
        registry.register_fn(
            ApplicationCommand::new("charlie", "Updated description"),
            reply("c2"),
        );

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "charlie");
        assert_eq!(definitions[0].description, "Updated description");
        assert_eq!(definitions[1].name, "alpha");
    }
}
