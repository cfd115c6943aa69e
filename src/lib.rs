//! chathub is a terminal chat client for hosted OpenAI-compatible gateways
//! and local model servers, with conversations persisted between runs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation controller, model catalog, completion
//!   client, persistence stores and configuration.
//! - [`ui`] runs the line-oriented chat loop and renders transcripts.
//! - [`commands`] parses the slash commands available inside the chat loop.
//! - [`api`] defines the wire payloads of the OpenAI-compatible API.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which wires [`core::app::Services`] from the
//! loaded [`core::config::Config`] and dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
