//! Line-oriented terminal rendering.

use std::io::{self, Write};

use crate::types::{ChatMessage, ChatRole};

pub const TITLE: &str = "Airline Customer Service Assistant";
pub const TAGLINE: &str =
    "I'm here to assist with your travel needs. Ask about flights, seats, airports, airlines, or general questions!";
pub const PROMPT: &str = "you> ";
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// What the customer typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    Quit,
    Message(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        Input::Empty
    } else if QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
        Input::Quit
    } else {
        Input::Message(line)
    }
}

fn label(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "you",
        ChatRole::Assistant => "assistant",
    }
}

/// `label> first line`, continuation lines indented under the text.
pub fn render_message(message: &ChatMessage) -> String {
    let prefix = format!("{}> ", label(message.role));
    let indent = " ".repeat(prefix.len());
    let mut out = String::new();
    for (i, line) in message.content.lines().enumerate() {
        if i == 0 {
            out.push_str(&prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(prefix.trim_end());
    }
    out
}

pub fn write_banner<W: Write>(out: &mut W, storage_notice: &str) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;
    writeln!(out, "{TAGLINE}")?;
    writeln!(out, "[{storage_notice}]")?;
    writeln!(out, "Type 'quit' to leave.")?;
    writeln!(out)
}

pub fn write_messages<W: Write>(out: &mut W, messages: &[ChatMessage]) -> io::Result<()> {
    for message in messages {
        writeln!(out, "{}\n", render_message(message))?;
    }
    Ok(())
}

/// Assistant replies from one turn (or the error text of a failed one).
pub fn write_replies<W: Write>(out: &mut W, replies: &[String]) -> io::Result<()> {
    for reply in replies {
        writeln!(out, "{}\n", render_message(&ChatMessage::assistant(reply.as_str())))?;
    }
    Ok(())
}
