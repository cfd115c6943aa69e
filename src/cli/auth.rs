//! `chathub auth` and `chathub deauth`.

use std::error::Error;
use std::io::{self, BufRead};
use std::sync::Arc;

use crate::core::app::Services;
use crate::core::backend::BackendKind;
use crate::core::config::Config;
use crate::core::credentials::validate_access_value;
use crate::core::notify::ConsoleNotifier;
use crate::utils::input::prompt_line;

fn prompt_for(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Hosted => "Enter your OpenRouter API key: ",
        BackendKind::Local => "Enter your model server URL (e.g. http://localhost:11434): ",
    }
}

/// The value to store: the argument if given, otherwise one prompted line.
pub fn read_access_value<R: BufRead>(
    kind: BackendKind,
    value: Option<String>,
    reader: &mut R,
) -> Result<String, Box<dyn Error>> {
    let raw = match value {
        Some(value) => value,
        None => prompt_line(reader, prompt_for(kind))?
            .ok_or_else(|| format!("No {} entered", kind.access_label()))?,
    };
    Ok(validate_access_value(kind, &raw)?)
}

pub async fn run_auth(config: &Config, value: Option<String>) -> Result<(), Box<dyn Error>> {
    let services = Services::from_config(config, Arc::new(ConsoleNotifier))?;
    let kind = services.backend_kind();
    let value = read_access_value(kind, value, &mut io::stdin().lock())?;

    let mut controller = services.controller(config.controller_settings());
    controller.set_credential(&value).await;

    let count = controller.available_models().len();
    if count > 0 {
        println!("🤖 {count} models available through the {kind} backend");
    }
    Ok(())
}

pub fn run_deauth(config: &Config) -> Result<(), Box<dyn Error>> {
    let services = Services::from_config(config, Arc::new(ConsoleNotifier))?;
    if !services.credentials().is_configured() {
        println!(
            "No {} is stored for the {} backend.",
            services.backend_kind().access_label(),
            services.backend_kind()
        );
        return Ok(());
    }

    let mut controller = services.controller(config.controller_settings());
    controller.remove_credential();
    Ok(())
}
