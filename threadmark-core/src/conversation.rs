use serde_json::{Map, Value};

use crate::vocab::ExportVocabulary;

/// Message author in an exported conversation.
///
/// The export only ever carries two senders; anything that is not the human
/// side is treated as the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn from_export_value(value: &Value) -> Sender {
        match value.as_str() {
            Some("human") | Some("user") => Sender::User,
            _ => Sender::Assistant,
        }
    }

    /// Fixed author label used in message headers.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Assistant => "Claude",
        }
    }
}

/// A source reference anchored to a byte range of a text block.
///
/// All fields are optional at decode time; validity (all present, non-empty
/// strings) is checked by the inliner, which silently drops anything
/// incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub start_index: Option<u64>,
    pub end_index: Option<u64>,
    pub url: Option<String>,
    pub site_name: Option<String>,
}

impl Citation {
    pub fn from_export(value: &Value) -> Citation {
        // site_name lives under "metadata" in the stock export but is
        // accepted at the top level too
        let site_name = value
            .get("site_name")
            .or_else(|| value.get("metadata").and_then(|m| m.get("site_name")))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Citation {
            start_index: value.get("start_index").and_then(Value::as_u64),
            end_index: value.get("end_index").and_then(Value::as_u64),
            url: value.get("url").and_then(Value::as_str).map(str::to_owned),
            site_name,
        }
    }
}

/// Well-known tools, resolved against the vocabulary at decode time so the
/// formatter dispatches on an enum instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Artifacts,
    Repl,
    WebSearch,
    Other,
}

impl ToolKind {
    pub fn resolve(name: &str, vocab: &ExportVocabulary) -> ToolKind {
        if name == vocab.artifacts_tool {
            ToolKind::Artifacts
        } else if name == vocab.repl_tool {
            ToolKind::Repl
        } else if name == vocab.web_search_tool {
            ToolKind::WebSearch
        } else {
            ToolKind::Other
        }
    }
}

/// One entry nested inside a tool result.
///
/// Text-typed entries carry `text`; web search results carry `title`/`url`.
/// Entries of any other shape decode to all-`None` and contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultItem {
    pub text: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl ResultItem {
    pub fn from_export(value: &Value, vocab: &ExportVocabulary) -> ResultItem {
        let is_text = value
            .get("type")
            .and_then(Value::as_str)
            .map(|tag| tag == vocab.text_type)
            .unwrap_or(false);

        ResultItem {
            text: if is_text {
                value.get("text").and_then(Value::as_str).map(str::to_owned)
            } else {
                None
            },
            title: value.get("title").and_then(Value::as_str).map(str::to_owned),
            url: value.get("url").and_then(Value::as_str).map(str::to_owned),
        }
    }
}

/// One typed unit of message content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text {
        body: String,
        citations: Vec<Citation>,
    },
    ToolUse {
        name: String,
        tool: ToolKind,
        input: Map<String, Value>,
    },
    ToolResult {
        name: String,
        tool: ToolKind,
        content: Vec<ResultItem>,
    },
    Thinking {
        body: String,
    },
    Other {
        type_tag: String,
        name: Option<String>,
        body: Option<String>,
    },
}

impl ContentBlock {
    /// Classify a raw export block. Total: unknown tags become `Other`, a
    /// missing tag decodes as plain text, missing fields become defaults.
    pub fn from_export(value: &Value, vocab: &ExportVocabulary) -> ContentBlock {
        let tag = value.get("type").and_then(Value::as_str);

        match tag {
            Some(t) if t == vocab.tool_use_type => {
                let name = block_name(value);
                ContentBlock::ToolUse {
                    tool: ToolKind::resolve(&name, vocab),
                    name,
                    input: value
                        .get("input")
                        .and_then(Value::as_object)
                        .cloned()
                        .unwrap_or_default(),
                }
            }
            Some(t) if t == vocab.tool_result_type => {
                let name = block_name(value);
                ContentBlock::ToolResult {
                    tool: ToolKind::resolve(&name, vocab),
                    name,
                    content: value
                        .get("content")
                        .and_then(Value::as_array)
                        .map(|items| {
                            items
                                .iter()
                                .map(|item| ResultItem::from_export(item, vocab))
                                .collect()
                        })
                        .unwrap_or_default(),
                }
            }
            Some(t) if t == vocab.thinking_type => ContentBlock::Thinking {
                body: value
                    .get("thinking")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
            },
            Some(t) if t != vocab.text_type => ContentBlock::Other {
                type_tag: t.to_owned(),
                name: value.get("name").and_then(Value::as_str).map(str::to_owned),
                body: value.get("text").and_then(Value::as_str).map(str::to_owned),
            },
            // text tag, or no tag at all
            _ => ContentBlock::Text {
                body: value
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                citations: value
                    .get("citations")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(Citation::from_export).collect())
                    .unwrap_or_default(),
            },
        }
    }
}

fn block_name(value: &Value) -> String {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub timestamp: Option<String>,
    pub segments: Vec<ContentBlock>,
}

impl Message {
    pub fn from_export(value: &Value, vocab: &ExportVocabulary) -> Message {
        let timestamp = value
            .get("created_at")
            .or_else(|| value.get("timestamp"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let segments = value
            .get("content")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| ContentBlock::from_export(item, vocab))
                    .collect()
            })
            .unwrap_or_default();

        Message {
            sender: Sender::from_export_value(value.get("sender").unwrap_or(&Value::Null)),
            timestamp,
            segments,
        }
    }

    /// A message the provider could not extract content for: keeps its slot
    /// in the record without contributing anything to the document.
    pub fn empty(sender: Sender) -> Message {
        Message {
            sender,
            timestamp: None,
            segments: Vec::new(),
        }
    }
}

/// An exported conversation: the read-only input to the formatting core.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRecord {
    pub title: Option<String>,
    pub messages: Vec<Message>,
}

impl ConversationRecord {
    /// Decode a single conversation object from an account export.
    /// Total: a non-conversation value yields an empty record.
    pub fn from_export(value: &Value, vocab: &ExportVocabulary) -> ConversationRecord {
        let title = value
            .get("name")
            .or_else(|| value.get("title"))
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .map(str::to_owned);

        let messages = value
            .get("chat_messages")
            .or_else(|| value.get("messages"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| Message::from_export(item, vocab))
                    .collect()
            })
            .unwrap_or_default();

        ConversationRecord { title, messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vocab() -> ExportVocabulary {
        ExportVocabulary::default()
    }

    #[test]
    fn test_sender_mapping() {
        assert_eq!(Sender::from_export_value(&json!("human")), Sender::User);
        assert_eq!(Sender::from_export_value(&json!("user")), Sender::User);
        assert_eq!(
            Sender::from_export_value(&json!("assistant")),
            Sender::Assistant
        );
        // Unknown or missing senders land on the assistant side
        assert_eq!(Sender::from_export_value(&Value::Null), Sender::Assistant);
    }

    #[test]
    fn test_classify_text_block_with_citations() {
        let block = ContentBlock::from_export(
            &json!({
                "type": "text",
                "text": "Paris is the capital",
                "citations": [{
                    "start_index": 0,
                    "end_index": 20,
                    "url": "https://x",
                    "metadata": {"site_name": "Wiki"}
                }]
            }),
            &vocab(),
        );

        match block {
            ContentBlock::Text { body, citations } => {
                assert_eq!(body, "Paris is the capital");
                assert_eq!(citations.len(), 1);
                assert_eq!(citations[0].start_index, Some(0));
                assert_eq!(citations[0].site_name.as_deref(), Some("Wiki"));
            }
            other => panic!("expected text block, got {other:?}"),
        }
    }

    #[test]
    fn test_untagged_block_is_text() {
        let block = ContentBlock::from_export(&json!({"text": "hello"}), &vocab());
        assert_eq!(
            block,
            ContentBlock::Text {
                body: "hello".to_string(),
                citations: Vec::new()
            }
        );
    }

    #[test]
    fn test_classify_tool_use_resolves_kind() {
        let block = ContentBlock::from_export(
            &json!({"type": "tool_use", "name": "repl", "input": {"code": "1 + 1"}}),
            &vocab(),
        );
        match block {
            ContentBlock::ToolUse { name, tool, input } => {
                assert_eq!(name, "repl");
                assert_eq!(tool, ToolKind::Repl);
                assert_eq!(input.get("code"), Some(&json!("1 + 1")));
            }
            other => panic!("expected tool use, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_use_missing_input_is_empty() {
        let block =
            ContentBlock::from_export(&json!({"type": "tool_use", "name": "artifacts"}), &vocab());
        match block {
            ContentBlock::ToolUse { input, .. } => assert!(input.is_empty()),
            other => panic!("expected tool use, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_becomes_other() {
        let block = ContentBlock::from_export(
            &json!({"type": "voice_note", "name": "memo", "text": "raw"}),
            &vocab(),
        );
        assert_eq!(
            block,
            ContentBlock::Other {
                type_tag: "voice_note".to_string(),
                name: Some("memo".to_string()),
                body: Some("raw".to_string()),
            }
        );
    }

    #[test]
    fn test_result_item_text_requires_text_tag() {
        let v = vocab();
        let text_item = ResultItem::from_export(&json!({"type": "text", "text": "out"}), &v);
        assert_eq!(text_item.text.as_deref(), Some("out"));

        // Web search result entries are not text-typed
        let search_item = ResultItem::from_export(
            &json!({"type": "knowledge", "title": "Doc", "url": "https://d", "text": "ignored"}),
            &v,
        );
        assert_eq!(search_item.text, None);
        assert_eq!(search_item.title.as_deref(), Some("Doc"));
        assert_eq!(search_item.url.as_deref(), Some("https://d"));
    }

    #[test]
    fn test_record_from_export_tolerates_junk() {
        let record = ConversationRecord::from_export(&json!("not a conversation"), &vocab());
        assert_eq!(record.title, None);
        assert!(record.messages.is_empty());
    }

    #[test]
    fn test_record_reads_chat_messages_key() {
        let record = ConversationRecord::from_export(
            &json!({
                "name": "Trip planning",
                "chat_messages": [
                    {"sender": "human", "created_at": "2025-03-01T10:00:00Z",
                     "content": [{"type": "text", "text": "hi"}]}
                ]
            }),
            &vocab(),
        );
        assert_eq!(record.title.as_deref(), Some("Trip planning"));
        assert_eq!(record.messages.len(), 1);
        assert_eq!(record.messages[0].sender, Sender::User);
        assert_eq!(
            record.messages[0].timestamp.as_deref(),
            Some("2025-03-01T10:00:00Z")
        );
    }
}
