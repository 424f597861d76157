pub mod blocks;
pub mod citations;
pub mod config;
pub mod conversation;
pub mod document;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod vocab;

pub use blocks::BlockFormatter;
pub use citations::inline_citations;
pub use config::ThreadmarkConfig;
pub use conversation::{
    Citation, ContentBlock, ConversationRecord, Message, ResultItem, Sender, ToolKind,
};
pub use document::{
    assemble_document, build_header, format_message, ExportContext, SystemContext,
    MESSAGE_SEPARATOR,
};
pub use error::{ExportError, Result};
pub use fallback::{parse_structured, Fallback};
pub use pipeline::{export_path, ExportOptions, ExportSummary};
pub use vocab::ExportVocabulary;
