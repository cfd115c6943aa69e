//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{
    backend_handler, base_url_handler, credential_storage_handler, default_model_handler,
    preferred_provider_handler, refresh_secs_handler,
};
use super::SettingHandler;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in registration order, for help output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(backend_handler()));
        registry.register(Box::new(base_url_handler()));
        registry.register(Box::new(default_model_handler()));
        registry.register(Box::new(preferred_provider_handler()));
        registry.register(Box::new(refresh_secs_handler()));
        registry.register(Box::new(credential_storage_handler()));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
