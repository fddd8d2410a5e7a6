use std::collections::HashMap;

use mavlink::ardupilotmega::MavMessage;
use mavlink::Message;
use tracing::{debug, info};

use crate::{BridgeError, BridgePlugin, DispatchOutcome, Result};

/// Host-side routing table: message id to the plugin that subscribed to it.
#[derive(Default)]
pub struct Router {
    plugins: Vec<Box<dyn BridgePlugin>>,
    routes: HashMap<u32, usize>,
    order: Vec<u32>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Fails without side effects if any of its kinds is
    /// already claimed.
    pub fn add_plugin(&mut self, plugin: Box<dyn BridgePlugin>) -> Result<()> {
        for entry in plugin.subscriptions() {
            if let Some(&owner) = self.routes.get(&entry.id()) {
                let owner = self
                    .plugins
                    .get(owner)
                    .map(|p| p.name())
                    .unwrap_or("unknown");
                return Err(BridgeError::DuplicateSubscription {
                    id: entry.id(),
                    owner: owner.to_string(),
                });
            }
        }

        let slot = self.plugins.len();
        for entry in plugin.subscriptions() {
            if self.routes.insert(entry.id(), slot).is_none() {
                self.order.push(entry.id());
            }
        }
        info!(
            plugin = plugin.name(),
            kinds = plugin.subscriptions().len(),
            "plugin registered"
        );
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn route(&self, message: &MavMessage) -> DispatchOutcome {
        match self
            .routes
            .get(&message.message_id())
            .and_then(|&i| self.plugins.get(i))
        {
            Some(plugin) => plugin.dispatch(message),
            None => {
                debug!(
                    id = message.message_id(),
                    name = message.message_name(),
                    "unrouted message"
                );
                DispatchOutcome::Ignored
            }
        }
    }

    /// Routed message ids in registration order.
    pub fn subscribed_kinds(&self) -> &[u32] {
        &self.order
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}
