use std::sync::Arc;

use tracing::warn;

use crate::core::storage::KeyValueStore;

pub const PREFERRED_MODEL_KEY: &str = "preferred_model_id";

/// The user's preferred default model, remembered across runs.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn preferred_model(&self) -> Option<String> {
        match self.store.get(PREFERRED_MODEL_KEY) {
            Ok(value) => value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            Err(err) => {
                warn!("Could not read preferred model: {err}");
                None
            }
        }
    }

    pub fn set_preferred_model(&self, model_id: &str) {
        if let Err(err) = self.store.set(PREFERRED_MODEL_KEY, model_id) {
            warn!("Could not store preferred model: {err}");
        }
    }
}
