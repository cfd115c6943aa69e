//! Interactive chat loop.
//!
//! Reads one line at a time from stdin, dispatches slash commands, and sends
//! everything else through the [`ConversationController`]. The model catalog
//! is refreshed on a timer between inputs.

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::commands::{help_text, process_input, ChatCommand, CommandResult};
use crate::core::app::{describe_endpoint, Services};
use crate::core::catalog::filter_models;
use crate::core::config::Config;
use crate::core::controller::{ConversationController, SessionDeletion};
use crate::core::notify::ConsoleNotifier;
use crate::ui::transcript::{write_message, write_models, write_sessions, write_transcript};
use crate::utils::input::sanitize_text_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn run_chat(config: Config, session: Option<String>) -> Result<(), Box<dyn Error>> {
    let services = Services::from_config(&config, Arc::new(ConsoleNotifier))?;
    let mut controller = services.controller(config.controller_settings());
    controller.reload_sessions();

    let mut out = io::stdout();
    writeln!(
        out,
        "chathub · {} backend at {}",
        services.backend_kind(),
        describe_endpoint(&config, services.credentials())
    )?;

    if controller.has_credential() {
        controller.refresh_models().await;
    } else {
        writeln!(
            out,
            "No {} configured. Run `chathub auth` to add one.",
            services.backend_kind().access_label()
        )?;
    }

    if let Some(id) = session {
        if controller.load_session(&id) {
            write_transcript(&mut out, controller.messages())?;
        }
    }

    writeln!(
        out,
        "Model: {}. Type /help for commands.",
        controller.selected_model_id()
    )?;

    let stdin = BufReader::new(tokio::io::stdin());
    drive(&mut controller, stdin, &mut out, config.model_refresh_interval()).await?;
    Ok(())
}

/// Run the loop until `/quit` or end of input.
pub async fn drive<R, W>(
    controller: &mut ConversationController,
    input: R,
    out: &mut W,
    refresh_every: Duration,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut refresh = interval_at(Instant::now() + refresh_every, refresh_every);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        write!(out, "> ")?;
        out.flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    writeln!(out)?;
                    break;
                };
                if handle_line(controller, &line, out).await? == Flow::Quit {
                    break;
                }
            }
            _ = refresh.tick() => {
                debug!("periodic model refresh");
                controller.refresh_models().await;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

pub async fn handle_line<W: Write>(
    controller: &mut ConversationController,
    line: &str,
    out: &mut W,
) -> io::Result<Flow> {
    match process_input(&sanitize_text_input(line)) {
        CommandResult::Ignore => Ok(Flow::Continue),
        CommandResult::Invalid(usage) => {
            writeln!(out, "{usage}")?;
            Ok(Flow::Continue)
        }
        CommandResult::ProcessAsMessage(text) => {
            if let Ok(reply) = controller.send_message(&text).await {
                writeln!(out)?;
                write_message(out, &reply)?;
            }
            Ok(Flow::Continue)
        }
        CommandResult::Run(command) => execute(controller, command, out).await,
    }
}

async fn execute<W: Write>(
    controller: &mut ConversationController,
    command: ChatCommand,
    out: &mut W,
) -> io::Result<Flow> {
    match command {
        ChatCommand::Help => writeln!(out, "{}", help_text())?,
        ChatCommand::NewSession => {
            let id = controller.create_new_session();
            writeln!(out, "Started a new conversation ({id}).")?;
        }
        ChatCommand::ListSessions => {
            controller.reload_sessions();
            let current = controller.current_session().map(|session| session.id.as_str());
            write_sessions(out, controller.sessions(), current, &Local::now())?;
        }
        ChatCommand::LoadSession(id) => {
            if controller.load_session(&id) {
                if let Some(session) = controller.current_session() {
                    writeln!(out, "── {} ──", session.title)?;
                }
                write_transcript(out, controller.messages())?;
            }
        }
        ChatCommand::DeleteSession(id) => match controller.delete_session(&id) {
            SessionDeletion::Removed => writeln!(out, "Deleted {id}.")?,
            SessionDeletion::ClosedCurrent => writeln!(
                out,
                "Deleted the current conversation. Your next message starts a new one."
            )?,
            SessionDeletion::Failed => {}
        },
        ChatCommand::ListModels(query) => {
            if controller.available_models().is_empty() && controller.has_credential() {
                controller.refresh_models().await;
            }
            let matches = filter_models(controller.available_models(), query.as_deref().unwrap_or(""));
            write_models(out, &matches, controller.selected_model_id())?;
        }
        ChatCommand::SelectModel(id) => {
            let known = controller.available_models().is_empty()
                || controller.available_models().iter().any(|model| model.id == id);
            controller.select_model(&id);
            if known {
                writeln!(out, "Now using {id}.")?;
            } else {
                writeln!(out, "Now using {id} (not in the current model list).")?;
            }
        }
        ChatCommand::RefreshModels => {
            if controller.has_credential() {
                controller.refresh_models().await;
                writeln!(
                    out,
                    "{} models available.",
                    controller.available_models().len()
                )?;
            } else {
                writeln!(out, "Nothing to refresh without a stored credential.")?;
            }
        }
        ChatCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
