//! Event rendering

pub mod console;
pub mod formatter;
pub mod json;

pub use console::ConsoleFormatter;
pub use formatter::EventFormatter;
pub use json::JsonFormatter;
