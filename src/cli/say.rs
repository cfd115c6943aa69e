//! One-shot "say" command: a single completion, printed and not saved.

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use crate::core::app::Services;
use crate::core::completion::CompletionClient;
use crate::core::config::Config;
use crate::core::controller::DEFAULT_MODEL_ID;
use crate::core::message::Message;
use crate::core::notify::ConsoleNotifier;

pub async fn run_say(
    config: &Config,
    prompt: Vec<String>,
    model: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("Usage: chathub say <prompt>".into());
    }

    let services = Services::from_config(config, Arc::new(ConsoleNotifier))?;
    if !services.credentials().is_configured() {
        return Err(format!(
            "No {} configured. Run 'chathub auth' first.",
            services.backend_kind().access_label()
        )
        .into());
    }

    let model = model
        .or_else(|| services.preferences().preferred_model())
        .or_else(|| config.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

    let reply = say_once(&services.completion(), &model, &prompt, &mut io::stdout()).await?;
    if reply.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn say_once<W: Write>(
    completion: &CompletionClient,
    model: &str,
    prompt: &str,
    out: &mut W,
) -> io::Result<Message> {
    let reply = completion.complete(model, &[Message::user(prompt)]).await;
    if !reply.is_error() {
        writeln!(out, "{}", reply.content)?;
    }
    Ok(reply)
}
