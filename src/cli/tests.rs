use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["chathub"]);
    assert_eq!(args.command, None);
    assert_eq!(args.log_level, None);
}

#[test]
fn chat_accepts_session_and_global_log_level() {
    let args = parse_args(&["chathub", "chat", "--session", "session_1_abcd", "--log-level", "debug"]);
    assert_eq!(
        args.command,
        Some(Commands::Chat {
            session: Some("session_1_abcd".to_string())
        })
    );
    assert_eq!(args.log_level.as_deref(), Some("debug"));
}

#[test]
fn say_collects_trailing_words() {
    let args = parse_args(&["chathub", "say", "-m", "openai/gpt-4o", "what", "is", "-1?"]);
    assert_eq!(
        args.command,
        Some(Commands::Say {
            model: Some("openai/gpt-4o".to_string()),
            prompt: vec!["what".into(), "is".into(), "-1?".into()],
        })
    );
}

#[test]
fn say_requires_a_prompt() {
    assert!(Args::try_parse_from(["chathub", "say"]).is_err());
}

#[test]
fn set_without_key_parses() {
    assert_eq!(
        parse_args(&["chathub", "set"]).command,
        Some(Commands::Set {
            key: None,
            value: Vec::new()
        })
    );
    assert_eq!(
        parse_args(&["chathub", "set", "default-model", "openai/gpt-4o"]).command,
        Some(Commands::Set {
            key: Some("default-model".into()),
            value: vec!["openai/gpt-4o".into()]
        })
    );
}

#[test]
fn auth_value_is_optional() {
    assert_eq!(
        parse_args(&["chathub", "auth"]).command,
        Some(Commands::Auth { value: None })
    );
    assert_eq!(
        parse_args(&["chathub", "models", "--search", "claude"]).command,
        Some(Commands::Models {
            search: Some("claude".into())
        })
    );
    assert_eq!(
        parse_args(&["chathub", "delete", "session_9"]).command,
        Some(Commands::Delete {
            id: "session_9".into()
        })
    );
}

#[test]
fn clap_definition_is_consistent() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}
