use super::field_args::parse_field_args;
use crate::model::FieldEdit;
use std::str::FromStr;

pub const HELP_TEXT: &str = "commands: reload | search <term> | clear | \
alumni add k=v.. | alumni edit <id> k=v.. | \
event add k=v.. | event edit <id> k=v.. | event delete <id> | event image <id> <path> | \
news add k=v.. | news edit <id> k=v.. | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTarget {
    Alumni,
    Event,
    News,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Reload,
    /// Empty term clears the search predicate.
    Search(String),
    ClearFilters,
    Create {
        target: EntityTarget,
        edits: Vec<FieldEdit>,
    },
    Edit {
        target: EntityTarget,
        id: String,
        edits: Vec<FieldEdit>,
    },
    DeleteEvent {
        id: String,
    },
    EventImage {
        id: String,
        path: String,
    },
    Help,
    Quit,
    Unknown(String),
}

fn mutation(target: EntityTarget, kind: &str, rest: &[&str], raw_tail: &str) -> AppCommand {
    match rest.first().copied() {
        Some("add") => match parse_field_args(after_words(raw_tail, 1)) {
            Ok(edits) => AppCommand::Create { target, edits },
            Err(e) => AppCommand::Unknown(e.to_string()),
        },
        Some("edit") => match rest.get(1) {
            Some(id) => match parse_field_args(after_words(raw_tail, 2)) {
                Ok(edits) => AppCommand::Edit {
                    target,
                    id: id.to_string(),
                    edits,
                },
                Err(e) => AppCommand::Unknown(e.to_string()),
            },
            None => AppCommand::Unknown(format!("usage: {} edit <id> k=v..", kind)),
        },
        Some("delete") if target == EntityTarget::Event => match rest.get(1) {
            Some(id) => AppCommand::DeleteEvent { id: id.to_string() },
            None => AppCommand::Unknown("usage: event delete <id>".to_string()),
        },
        Some("image") if target == EntityTarget::Event => match (rest.get(1), rest.get(2)) {
            (Some(id), Some(_)) => AppCommand::EventImage {
                id: id.to_string(),
                path: after_words(raw_tail, 2).trim().to_string(),
            },
            _ => AppCommand::Unknown("usage: event image <id> <path>".to_string()),
        },
        Some(other) => AppCommand::Unknown(format!("unknown {} subcommand: {}", kind, other)),
        None => AppCommand::Unknown(format!("usage: {} add|edit ..", kind)),
    }
}

/// The text after the first `n` whitespace separated words.
fn after_words(s: &str, n: usize) -> &str {
    let mut rest = s.trim_start();
    for _ in 0..n {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown("".to_string()));
        }
        let tail = after_words(s, 1);

        let cmd = match parts[0] {
            "reload" | "r" => AppCommand::Reload,
            "search" | "s" => AppCommand::Search(tail.trim().to_string()),
            "clear" => AppCommand::ClearFilters,
            "alumni" => mutation(EntityTarget::Alumni, "alumni", &parts[1..], tail),
            "event" | "events" => mutation(EntityTarget::Event, "event", &parts[1..], tail),
            "news" => mutation(EntityTarget::News, "news", &parts[1..], tail),
            "help" | "h" => AppCommand::Help,
            "quit" | "q" | "exit" => AppCommand::Quit,
            other => AppCommand::Unknown(format!("unknown command: {}", other)),
        };
        Ok(cmd)
    }
}
