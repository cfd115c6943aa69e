mod registry;

pub use registry::{all_commands, find_command, matching_commands, CommandInvocation};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    NewSession,
    ListSessions,
    LoadSession(String),
    DeleteSession(String),
    ListModels(Option<String>),
    SelectModel(String),
    RefreshModels,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Run(ChatCommand),
    /// A known command with bad arguments; carries the usage line.
    Invalid(String),
    ProcessAsMessage(String),
    /// Blank input.
    Ignore,
}

pub fn process_input(input: &str) -> CommandResult {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return CommandResult::Ignore;
    }
    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(trimmed.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(trimmed.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match find_command(command_name) {
        Some(command) => {
            let invocation = CommandInvocation {
                input: trimmed,
                args,
            };
            match (command.parse)(invocation) {
                Ok(parsed) => CommandResult::Run(parsed),
                Err(usage) => CommandResult::Invalid(usage),
            }
        }
        None => CommandResult::ProcessAsMessage(trimmed.to_string()),
    }
}

/// Help text listing every command with its usage.
pub fn help_text() -> String {
    let width = all_commands()
        .iter()
        .map(|command| command.usage.len())
        .max()
        .unwrap_or(0);
    let mut text = String::from("Commands:\n");
    for command in all_commands() {
        text.push_str(&format!("  {:<width$}  {}\n", command.usage, command.help));
    }
    text.push_str("Anything else is sent to the selected model.");
    text
}
