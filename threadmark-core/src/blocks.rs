use serde_json::{Map, Value};

use crate::citations::inline_citations;
use crate::conversation::{ContentBlock, ResultItem, ToolKind};
use crate::fallback::{parse_structured, Fallback};
use crate::vocab::ExportVocabulary;

/// Renders one content block into a markdown fragment.
///
/// Total: every block renders to *something* (possibly the empty string);
/// unrecognized shapes degrade to a generic fenced block instead of erroring.
pub struct BlockFormatter<'a> {
    vocab: &'a ExportVocabulary,
}

impl<'a> BlockFormatter<'a> {
    pub fn new(vocab: &'a ExportVocabulary) -> Self {
        Self { vocab }
    }

    pub fn format(&self, block: &ContentBlock) -> String {
        match block {
            ContentBlock::ToolUse { name, tool, input } => self.format_tool_use(name, *tool, input),
            ContentBlock::ToolResult {
                name,
                tool,
                content,
            } => format_tool_result(name, *tool, content),
            ContentBlock::Thinking { body } => format_thinking(body),
            ContentBlock::Other {
                type_tag,
                name,
                body,
            } => format!(
                "**{}: {}**\n{}",
                type_tag,
                name.as_deref().unwrap_or_default(),
                fence("", body.as_deref().unwrap_or_default())
            ),
            ContentBlock::Text { body, citations } => {
                if citations.is_empty() {
                    body.clone()
                } else {
                    inline_citations(body, citations)
                }
            }
        }
    }

    fn format_tool_use(&self, name: &str, tool: ToolKind, input: &Map<String, Value>) -> String {
        match tool {
            ToolKind::Artifacts => {
                let command = input_str(input, "command");
                if command == self.vocab.update_command {
                    let id = input_str(input, "id");
                    let old_str = input_str(input, "old_str");
                    let new_str = input_str(input, "new_str");
                    return format!(
                        "**Tool Use: {name} (update)**\n```\nid: {id}\nold string: {old_str}\nnew string: {new_str}\n```"
                    );
                }

                // e.g. "application/vnd.ant.mermaid" fences as "mermaid"
                let code_type = input_str(input, "type");
                let language = code_type
                    .rsplit('.')
                    .next()
                    .filter(|lang| !lang.is_empty())
                    .unwrap_or("plaintext");
                format!(
                    "**Tool Use: {name}**\n{}",
                    fence(language, input_str(input, "content"))
                )
            }
            ToolKind::WebSearch => format!(
                "**Tool Use: {name}**\n{}",
                fence("", input_str(input, "query"))
            ),
            ToolKind::Repl | ToolKind::Other => {
                let snippet = Some(input_str(input, "code"))
                    .filter(|code| !code.is_empty())
                    .unwrap_or_else(|| input_str(input, "content"));
                let language = if tool == ToolKind::Repl { "javascript" } else { "" };
                format!("**Tool Use: {name}**\n{}", fence(language, snippet))
            }
        }
    }
}

fn format_tool_result(name: &str, tool: ToolKind, content: &[ResultItem]) -> String {
    match tool {
        // Artifacts results only carry a status, nothing worth keeping
        ToolKind::Artifacts => String::new(),
        ToolKind::Repl => {
            let lines: Vec<String> = content
                .iter()
                .filter_map(|item| item.text.as_deref())
                .map(format_repl_line)
                .collect();
            format!("**Tool Result: {name}**\n{}", fence("", lines.join("\n")))
        }
        ToolKind::WebSearch => {
            // Entries missing either field contribute nothing, not even a
            // blank bullet
            let bullets: Vec<String> = content
                .iter()
                .filter_map(|item| {
                    let title = item.title.as_deref().filter(|t| !t.is_empty())?;
                    let url = item.url.as_deref().filter(|u| !u.is_empty())?;
                    Some(format!("- {title} ({url})"))
                })
                .collect();
            format!("**Tool Result: {name}**\n{}", fence("", bullets.join("\n")))
        }
        ToolKind::Other => {
            let body = content
                .iter()
                .filter_map(|item| item.text.as_deref())
                .map(|text| match parse_structured(text) {
                    Fallback::Structured(value) => serde_json::to_string_pretty(&value)
                        .unwrap_or_else(|_| text.to_owned()),
                    Fallback::Plain(raw) => raw.to_owned(),
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("**Tool Result: {name}**\n{}", fence("", body))
        }
    }
}

/// REPL payloads are either structured `{status, logs}` objects or plain
/// console text.
fn format_repl_line(text: &str) -> String {
    match parse_structured(text) {
        Fallback::Structured(value) => {
            let status = value
                .get("status")
                .and_then(Value::as_str)
                .filter(|status| !status.is_empty())
                .map(|status| format!("Status: {status}\n"))
                .unwrap_or_default();

            let logs = value
                .get("logs")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .map(|entry| match entry.as_str() {
                            Some(line) => line.to_owned(),
                            None => entry.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();

            let log_text = if logs.is_empty() {
                String::new()
            } else {
                format!("\n{logs}")
            };
            format!("{status}{log_text}")
        }
        Fallback::Plain(raw) => raw.to_owned(),
    }
}

fn format_thinking(body: &str) -> String {
    let quoted = body
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("**Thinking:**\n{quoted}\n")
}

fn fence(language: &str, body: impl AsRef<str>) -> String {
    format!("```{language}\n{}\n```", body.as_ref())
}

fn input_str(input: &Map<String, Value>, key: &str) -> String {
    input
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
