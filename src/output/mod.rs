//! Output formatting for analysis results

pub mod formatter;

pub use formatter::{ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter, ReportGenerator};
