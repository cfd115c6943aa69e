use super::*;

#[test]
fn plain_text_is_sent_as_message() {
    assert_eq!(
        process_input("  what is rust?  "),
        CommandResult::ProcessAsMessage("what is rust?".to_string())
    );
}

#[test]
fn blank_input_is_ignored() {
    assert_eq!(process_input("   "), CommandResult::Ignore);
}

#[test]
fn unknown_slash_command_is_sent_as_message() {
    assert_eq!(
        process_input("/shrug"),
        CommandResult::ProcessAsMessage("/shrug".to_string())
    );
    assert_eq!(
        process_input("/"),
        CommandResult::ProcessAsMessage("/".to_string())
    );
}

#[test]
fn commands_parse_arguments() {
    assert_eq!(
        process_input("/load session_1700000000000_abcd1234"),
        CommandResult::Run(ChatCommand::LoadSession(
            "session_1700000000000_abcd1234".to_string()
        ))
    );
    assert_eq!(
        process_input("/MODEL openai/gpt-4o"),
        CommandResult::Run(ChatCommand::SelectModel("openai/gpt-4o".to_string()))
    );
    assert_eq!(
        process_input("/models  claude 3 "),
        CommandResult::Run(ChatCommand::ListModels(Some("claude 3".to_string())))
    );
    assert_eq!(
        process_input("/models"),
        CommandResult::Run(ChatCommand::ListModels(None))
    );
    assert_eq!(process_input("/quit"), CommandResult::Run(ChatCommand::Quit));
}

#[test]
fn missing_argument_reports_usage() {
    assert_eq!(
        process_input("/delete"),
        CommandResult::Invalid("Usage: /delete <session-id>".to_string())
    );
    assert_eq!(
        process_input("/model   "),
        CommandResult::Invalid("Usage: /model <model-id>".to_string())
    );
}

#[test]
fn prefix_matching_lists_candidates() {
    let names: Vec<_> = matching_commands("/mo").iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["models", "model"]);
    assert_eq!(matching_commands("").len(), all_commands().len());
}

#[test]
fn help_mentions_every_command() {
    let help = help_text();
    for command in all_commands() {
        assert!(help.contains(command.usage), "missing {}", command.name);
    }
}
