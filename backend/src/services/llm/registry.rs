//! Client registry
//!
//! Process-wide cache of provider handles keyed by model name. Each
//! model gets exactly one live handle; concurrent requests for
//! different models never displace each other's handles.

use dashmap::DashMap;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::services::llm::client::LlmClient;

pub struct ClientRegistry {
    config: LlmConfig,
    clients: DashMap<String, Arc<LlmClient>>,
}

impl ClientRegistry {
    pub fn new(config: LlmConfig) -> Self {
        Self { config, clients: DashMap::new() }
    }

    /// Return the handle for `model`, constructing it on first use.
    pub fn get_client(&self, model: &str) -> Arc<LlmClient> {
        self.clients
            .entry(model.to_string())
            .or_insert_with(|| {
                tracing::info!("Creating LLM client for model: {}", model);
                Arc::new(LlmClient::new(model, &self.config))
            })
            .clone()
    }

    /// Number of live handles (one per distinct model seen).
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig {
            api_base: "http://localhost:9999/v1".to_string(),
            api_key: "test-key".to_string(),
            default_model: "model-a".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_same_model_reuses_handle() {
        let registry = ClientRegistry::new(test_config());

        let first = registry.get_client("model-a");
        let second = registry.get_client("model-a");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_model_switch_creates_fresh_handle() {
        let registry = ClientRegistry::new(test_config());

        let a = registry.get_client("model-a");
        let b = registry.get_client("model-b");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.model(), "model-a");
        assert_eq!(b.model(), "model-b");
    }

    #[test]
    fn test_handle_tracks_requested_model() {
        let registry = ClientRegistry::new(test_config());

        // Switching back and forth never hands out a handle bound to
        // the wrong model.
        for model in ["model-a", "model-b", "model-a", "model-c", "model-b"] {
            let client = registry.get_client(model);
            assert_eq!(client.model(), model);
        }
        assert_eq!(registry.len(), 3);
    }
}
