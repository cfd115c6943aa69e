use crate::core::config::data::{path_display, Config, DEFAULT_MODEL_REFRESH_SECS};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.describe() {
            println!("{line}");
        }
    }

    /// One `  key: value` line per setting, unset ones with their default.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self.backend {
            Some(kind) => lines.push(format!("  backend: {kind}")),
            None => lines.push(format!("  backend: (unset, default: {})", self.backend_kind())),
        }
        match &self.base_url {
            Some(url) => lines.push(format!("  base-url: {url}")),
            None => lines.push(format!("  base-url: (unset, default: {})", self.hosted_base_url())),
        }
        match &self.default_model {
            Some(model) => lines.push(format!("  default-model: {model}")),
            None => lines.push("  default-model: (unset)".to_string()),
        }
        match &self.preferred_provider {
            Some(provider) => lines.push(format!("  preferred-provider: {provider}")),
            None => lines.push(format!(
                "  preferred-provider: (unset, default: {})",
                self.preferred_provider()
            )),
        }
        match self.model_refresh_secs {
            Some(secs) => lines.push(format!("  refresh-secs: {secs}")),
            None => lines.push(format!(
                "  refresh-secs: (unset, default: {DEFAULT_MODEL_REFRESH_SECS})"
            )),
        }
        match self.credential_storage {
            Some(storage) => lines.push(format!("  credential-storage: {}", storage.as_str())),
            None => lines.push(format!(
                "  credential-storage: (unset, default: {})",
                self.credential_storage().as_str()
            )),
        }
        lines.push(format!("  data-dir: {}", path_display(self.data_dir())));
        lines
    }
}
