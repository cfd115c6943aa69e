use super::ChatCommand;

pub type CommandParser = fn(CommandInvocation<'_>) -> Result<ChatCommand, String>;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub parse: CommandParser,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub input: &'a str,
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

/// Commands whose name starts with `prefix`, for completion hints.
pub fn matching_commands(prefix: &str) -> Vec<&'static Command> {
    let prefix = prefix.trim_start_matches('/').to_ascii_lowercase();
    all_commands()
        .iter()
        .filter(|command| command.name.starts_with(&prefix))
        .collect()
}

fn required_arg(invocation: CommandInvocation<'_>, usage: &str) -> Result<String, String> {
    match invocation.args.split_whitespace().next() {
        Some(arg) => Ok(arg.to_string()),
        None => Err(format!("Usage: {usage}")),
    }
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands.",
        parse: |_| Ok(ChatCommand::Help),
    },
    Command {
        name: "new",
        usage: "/new",
        help: "Start a new conversation.",
        parse: |_| Ok(ChatCommand::NewSession),
    },
    Command {
        name: "sessions",
        usage: "/sessions",
        help: "List saved conversations, most recently updated first.",
        parse: |_| Ok(ChatCommand::ListSessions),
    },
    Command {
        name: "load",
        usage: "/load <session-id>",
        help: "Switch to a saved conversation.",
        parse: |invocation| required_arg(invocation, "/load <session-id>").map(ChatCommand::LoadSession),
    },
    Command {
        name: "delete",
        usage: "/delete <session-id>",
        help: "Delete a saved conversation.",
        parse: |invocation| {
            required_arg(invocation, "/delete <session-id>").map(ChatCommand::DeleteSession)
        },
    },
    Command {
        name: "models",
        usage: "/models [query]",
        help: "List available models, optionally filtered by name.",
        parse: |invocation| {
            let query = invocation.args.trim();
            Ok(ChatCommand::ListModels((!query.is_empty()).then(|| query.to_string())))
        },
    },
    Command {
        name: "model",
        usage: "/model <model-id>",
        help: "Switch the model used for new messages.",
        parse: |invocation| required_arg(invocation, "/model <model-id>").map(ChatCommand::SelectModel),
    },
    Command {
        name: "refresh",
        usage: "/refresh",
        help: "Fetch the model list again.",
        parse: |_| Ok(ChatCommand::RefreshModels),
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        parse: |_| Ok(ChatCommand::Quit),
    },
];
