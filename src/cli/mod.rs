//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod auth;
pub mod model_list;
pub mod say;
pub mod session_list;
pub mod settings;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::cli::auth::{run_auth, run_deauth};
use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::cli::session_list::{delete_session, list_sessions};
use crate::cli::settings::{apply_set, apply_unset, SettingRegistry};
use crate::core::config::Config;
use crate::logging::init_tracing;
use crate::ui::chat_loop::run_chat;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "chathub")]
#[command(version)]
#[command(about = "A terminal chat client for OpenRouter and local model servers")]
#[command(
    long_about = "chathub keeps persistent conversations with models served by a hosted \
OpenAI-compatible gateway (OpenRouter by default) or a local model server such as Ollama.\n\n\
Setup:\n\
  chathub auth                      Store your API key (hosted backend)\n\
  chathub set backend local         Switch to a local server, then run 'chathub auth' with its URL\n\n\
Chat commands:\n\
  /help /new /sessions /load ID /delete ID /models [QUERY] /model ID /refresh /quit\n\n\
Environment:\n\
  CHATHUB_LOG                       tracing filter when --log-level is not given (default: warn)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Diagnostic log filter, e.g. "debug" or "chathub=trace"
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat {
        /// Resume a saved conversation
        #[arg(short, long, value_name = "ID")]
        session: Option<String>,
    },
    /// Store the API key (hosted) or server URL (local)
    Auth {
        /// Value to store; prompted for when omitted
        value: Option<String>,
    },
    /// Remove the stored API key or server URL
    Deauth,
    /// List available models
    Models {
        /// Only show models whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List saved conversations
    Sessions,
    /// Delete a saved conversation
    Delete {
        /// Session id as shown by 'chathub sessions'
        id: String,
    },
    /// Send a single prompt and print the reply without saving it
    Say {
        /// Model to use instead of the preferred one
        #[arg(short, long)]
        model: Option<String>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        prompt: Vec<String>,
    },
    /// Set configuration values, or show them when no key is given
    Set {
        key: Option<String>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let result = match args.command.unwrap_or(Commands::Chat { session: None }) {
        Commands::Set { key, value } => return run_set(key, value),
        Commands::Unset { key } => return run_unset(&key),
        command => {
            let config = Config::load()?;
            dispatch(command, config).await
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn dispatch(command: Commands, config: Config) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Chat { session } => run_chat(config, session).await,
        Commands::Auth { value } => run_auth(&config, value).await,
        Commands::Deauth => run_deauth(&config),
        Commands::Models { search } => list_models(&config, search).await,
        Commands::Sessions => list_sessions(&config),
        Commands::Delete { id } => delete_session(&config, &id),
        Commands::Say { model, prompt } => run_say(&config, prompt, model).await,
        Commands::Set { key, value } => run_set(key, value),
        Commands::Unset { key } => run_unset(&key),
    }
}

fn run_set(key: Option<String>, value: Vec<String>) -> Result<(), Box<dyn Error>> {
    let Some(key) = key else {
        Config::load()?.print_all();
        return Ok(());
    };

    let registry = SettingRegistry::new();
    match apply_set(&registry, &Config::config_path(), &key, &value) {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(e) => {
            e.print(registry.keys_display_order());
            std::process::exit(1);
        }
    }
}

fn run_unset(key: &str) -> Result<(), Box<dyn Error>> {
    let registry = SettingRegistry::new();
    match apply_unset(&registry, &Config::config_path(), key) {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(e) => {
            e.print(registry.keys_display_order());
            std::process::exit(1);
        }
    }
}
