//! Front-end facing pieces: state, commands and output formatters

pub mod commands;
pub mod formatter;
pub mod state;

pub use commands::Command;
pub use formatter::{
    Formatter, FormatterFactory, HtmlFormatter, JsonFormatter, OutputFormat, TableFormatter,
};
pub use state::{AppState, Effect, Event, LoadTicket};
