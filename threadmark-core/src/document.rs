use chrono::Local;

use crate::blocks::BlockFormatter;
use crate::conversation::{ConversationRecord, Message};
use crate::vocab::ExportVocabulary;

/// Horizontal rule between formatted messages.
pub const MESSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// The only non-deterministic inputs to a document: who exported it and
/// when. Kept behind a trait so assembly stays a pure function in tests.
pub trait ExportContext {
    fn display_name(&self) -> Option<String>;
    fn now_local(&self) -> String;
}

/// Production context: wall clock plus whatever name the config carries.
pub struct SystemContext {
    display_name: Option<String>,
}

impl SystemContext {
    pub fn new(display_name: Option<String>) -> Self {
        Self { display_name }
    }
}

impl ExportContext for SystemContext {
    fn display_name(&self) -> Option<String> {
        self.display_name.clone()
    }

    fn now_local(&self) -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Build the document header. A missing display name still produces a
/// usable header rather than an error.
pub fn build_header(ctx: &dyn ExportContext) -> String {
    match ctx.display_name().filter(|name| !name.trim().is_empty()) {
        Some(name) => format!("Exported by {} on {}", name.trim(), ctx.now_local()),
        None => format!("Exported on {}", ctx.now_local()),
    }
}

/// Render one message: segment fragments joined by a single newline under
/// an author header. Empty fragments keep their line in the join; a message
/// whose whole body is blank renders to the empty string so the assembler
/// drops it.
pub fn format_message(message: &Message, vocab: &ExportVocabulary) -> String {
    let formatter = BlockFormatter::new(vocab);
    let body = message
        .segments
        .iter()
        .map(|segment| formatter.format(segment))
        .collect::<Vec<_>>()
        .join("\n");

    if body.trim().is_empty() {
        return String::new();
    }

    let timestamp = message
        .timestamp
        .as_deref()
        .map(|t| format!(" ({t})"))
        .unwrap_or_default();

    format!("**{}{timestamp}:**\n{body}", message.sender.label())
}

/// Join every renderable message under the header.
///
/// `None` means the record produced no output at all; callers never see a
/// bare header or a stray separator.
pub fn assemble_document(
    header: &str,
    record: &ConversationRecord,
    vocab: &ExportVocabulary,
) -> Option<String> {
    let formatted: Vec<String> = record
        .messages
        .iter()
        .map(|message| format_message(message, vocab))
        .filter(|text| !text.is_empty())
        .collect();

    if formatted.is_empty() {
        return None;
    }

    Some(format!(
        "{header}\n\n\n{}",
        formatted.join(MESSAGE_SEPARATOR)
    ))
}
