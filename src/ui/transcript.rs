//! Plain-text rendering of messages, sessions and models.

use std::io::{self, Write};

use chrono::{DateTime, TimeZone};

use crate::core::catalog::ModelDescriptor;
use crate::core::message::{Message, MessageStatus, Role};
use crate::core::session::ChatSession;
use crate::utils::time::format_timestamp;

fn speaker(message: &Message) -> String {
    match (message.role, message.model_id.as_deref()) {
        (Role::User, _) => "You".to_string(),
        (Role::Assistant, Some(model)) => model.to_string(),
        (Role::Assistant, None) => "Assistant".to_string(),
        (Role::System, _) => "System".to_string(),
    }
}

pub fn write_message<W: Write>(out: &mut W, message: &Message) -> io::Result<()> {
    let marker = match message.status {
        MessageStatus::Sending => " (sending...)",
        MessageStatus::Error => " (error)",
        MessageStatus::Complete => "",
    };
    writeln!(out, "{}{marker}:", speaker(message))?;
    for line in message.content.lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)
}

pub fn write_transcript<W: Write>(out: &mut W, messages: &[Message]) -> io::Result<()> {
    if messages.is_empty() {
        return writeln!(out, "(no messages yet)");
    }
    for message in messages {
        write_message(out, message)?;
    }
    Ok(())
}

/// Sessions, most recently updated first, with `*` on the current one.
pub fn write_sessions<W: Write, Tz: TimeZone>(
    out: &mut W,
    sessions: &[ChatSession],
    current: Option<&str>,
    now: &DateTime<Tz>,
) -> io::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    if sessions.is_empty() {
        return writeln!(out, "No saved conversations.");
    }

    let mut ordered: Vec<&ChatSession> = sessions.iter().collect();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    for session in ordered {
        let marker = if current == Some(session.id.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{marker} {}  {}  ({} messages, {})",
            session.id,
            session.title,
            session.messages.len(),
            format_timestamp(session.updated_at, now)
        )?;
    }
    Ok(())
}

pub fn write_models<W: Write>(
    out: &mut W,
    models: &[&ModelDescriptor],
    selected: &str,
) -> io::Result<()> {
    if models.is_empty() {
        return writeln!(out, "No models found.");
    }

    for model in models {
        let marker = if model.id == selected { '*' } else { ' ' };
        write!(
            out,
            "{marker} {}  {} ({})",
            model.id, model.display_name, model.provider_display_name
        )?;
        if let Some(context) = model.context_length {
            write!(out, "  ctx {context}")?;
        }
        if let (Some(prompt), Some(completion)) =
            (&model.prompt_cost_label, &model.completion_cost_label)
        {
            write!(out, "  in {prompt}, out {completion}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ModelInfo, ModelPricing, PriceValue};
    use crate::core::catalog::describe_model;
    use chrono::Utc;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn messages_show_speaker_and_status() {
        let user = Message::user("line one\nline two");
        let failed = Message::error("something broke", "openai/gpt-4o");

        let text = render(|out| write_transcript(out, &[user, failed]));

        assert_eq!(
            text,
            "You:\n  line one\n  line two\n\nopenai/gpt-4o (error):\n  something broke\n\n"
        );
        assert_eq!(render(|out| write_transcript(out, &[])), "(no messages yet)\n");
    }

    #[test]
    fn sessions_are_listed_newest_first() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap();
        let mut older = ChatSession::new("m");
        older.id = "session_old".into();
        older.title = "Older".into();
        older.updated_at = Utc
            .with_ymd_and_hms(2024, 3, 2, 9, 0, 0)
            .unwrap()
            .timestamp_millis();
        let mut newer = ChatSession::new("m");
        newer.id = "session_new".into();
        newer.title = "Newer".into();
        newer.updated_at = Utc
            .with_ymd_and_hms(2024, 5, 10, 14, 5, 0)
            .unwrap()
            .timestamp_millis();

        let text = render(|out| {
            write_sessions(out, &[older, newer], Some("session_old"), &now)
        });

        assert_eq!(
            text,
            "  session_new  Newer  (0 messages, Today at 14:05)\n\
             * session_old  Older  (0 messages, Mar 2)\n"
        );
    }

    #[test]
    fn models_show_marker_and_pricing() {
        let mut priced = ModelInfo {
            id: "openai/gpt-4o".into(),
            context_length: Some(128000),
            ..Default::default()
        };
        priced.pricing = Some(ModelPricing {
            prompt: Some(PriceValue::Number(0.0000025)),
            completion: Some(PriceValue::Number(0.00001)),
        });
        let plain = ModelInfo {
            id: "llama3".into(),
            ..Default::default()
        };
        let models = [
            describe_model(&priced, "openrouter"),
            describe_model(&plain, "ollama"),
        ];
        let refs: Vec<_> = models.iter().collect();

        let text = render(|out| write_models(out, &refs, "llama3"));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "  openai/gpt-4o  gpt 4o (OpenAI)  ctx 128000  in $0.002500/1K tokens, out $0.010000/1K tokens"
        );
        assert_eq!(lines[1], "* llama3  llama3 (Ollama)");
    }
}
