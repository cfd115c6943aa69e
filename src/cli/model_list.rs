//! Model listing functionality

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use crate::core::app::Services;
use crate::core::catalog::{filter_models, ModelCatalog};
use crate::core::config::Config;
use crate::core::notify::ConsoleNotifier;
use crate::ui::transcript::write_models;

pub async fn list_models(config: &Config, search: Option<String>) -> Result<(), Box<dyn Error>> {
    let services = Services::from_config(config, Arc::new(ConsoleNotifier))?;
    if !services.credentials().is_configured() {
        return Err(format!(
            "No {} configured. Run 'chathub auth' first.",
            services.backend_kind().access_label()
        )
        .into());
    }

    let selected = services
        .preferences()
        .preferred_model()
        .or_else(|| config.default_model.clone())
        .unwrap_or_default();

    println!("🤖 Available models ({} backend)", services.backend_kind());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print_catalog(
        &services.catalog(),
        search.as_deref(),
        &selected,
        &mut io::stdout(),
    )
    .await?;
    Ok(())
}

pub async fn print_catalog<W: Write>(
    catalog: &ModelCatalog,
    search: Option<&str>,
    selected: &str,
    out: &mut W,
) -> io::Result<usize> {
    let models = catalog.fetch().await;
    let matches = filter_models(&models, search.unwrap_or(""));
    write_models(out, &matches, selected)?;
    if let Some(query) = search.filter(|q| !q.trim().is_empty()) {
        writeln!(out, "{} of {} models match '{query}'", matches.len(), models.len())?;
    }
    Ok(matches.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::BackendKind;
    use crate::core::test_support::{Harness, ScriptedBackend};

    #[tokio::test]
    async fn search_narrows_the_listing() {
        let harness = Harness::new(
            ScriptedBackend::new(BackendKind::Hosted)
                .with_model_ids(&["openai/gpt-4o", "openai/gpt-4o-mini", "mistral/mixtral-8x7b"]),
        );
        harness.credentials.set("sk-or-v1-test");
        let catalog = ModelCatalog::new(
            harness.backend.clone(),
            harness.credentials.clone(),
            harness.notifier.clone(),
        );

        let mut out = Vec::new();
        let count = print_catalog(&catalog, Some("mini"), "openai/gpt-4o-mini", &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 1);
        assert!(text.starts_with("* openai/gpt-4o-mini  gpt 4o mini (OpenAI)"));
        assert!(text.ends_with("1 of 3 models match 'mini'\n"));
    }
}
