use serde::{Deserialize, Serialize};

/// Tag vocabulary for the upstream export format.
///
/// The export JSON identifies content blocks and tools by string tags. The
/// values below are supplied by configuration and treated as opaque — the
/// defaults match the stock Claude account export, but a config file can
/// remap any of them without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportVocabulary {
    /// Type tag for plain text blocks.
    pub text_type: String,
    /// Type tag for tool invocation blocks.
    pub tool_use_type: String,
    /// Type tag for tool result blocks.
    pub tool_result_type: String,
    /// Type tag for thinking blocks.
    pub thinking_type: String,
    /// Tool name for the artifacts tool.
    pub artifacts_tool: String,
    /// Tool name for the analysis/REPL tool.
    pub repl_tool: String,
    /// Tool name for the web search tool.
    pub web_search_tool: String,
    /// Artifacts command that rewrites an existing artifact in place.
    pub update_command: String,
}

impl Default for ExportVocabulary {
    fn default() -> Self {
        Self {
            text_type: "text".to_string(),
            tool_use_type: "tool_use".to_string(),
            tool_result_type: "tool_result".to_string(),
            thinking_type: "thinking".to_string(),
            artifacts_tool: "artifacts".to_string(),
            repl_tool: "repl".to_string(),
            web_search_tool: "web_search".to_string(),
            update_command: "update".to_string(),
        }
    }
}
