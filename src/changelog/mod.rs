//! Changes file parsing, formatting and writing.

pub mod format;
pub mod parser;
pub mod writer;

pub use format::{Newline, format_log};
pub use parser::{Document, HEADING, read_document};
pub use writer::{merge, write_changes_file};
