//! Command parsing for the interactive dashboard

use super::state::Event;
use crate::error::{DashboardError, Result};

/// Parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Restrict to one region, or `all`
    Region { region: String },
    /// Free-text search over ticker and names
    Search { term: String },
    /// Reset region and search
    Clear,
    /// Reload the feed from its source
    Reload,
    /// Show help
    Help,
    /// Leave the dashboard
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// Text without a leading `/` is a search.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(DashboardError::CommandError("Empty input".to_string()));
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Search {
                term: input.to_string(),
            });
        };

        let (cmd, args) = match rest.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd.to_lowercase(), args.trim()),
            None => (rest.to_lowercase(), ""),
        };
        if cmd.is_empty() {
            return Err(DashboardError::CommandError("Empty command".to_string()));
        }

        match cmd.as_str() {
            "region" | "r" => {
                if args.is_empty() {
                    return Err(DashboardError::CommandError(
                        "Missing region for region command".to_string(),
                    ));
                }
                Ok(Command::Region {
                    region: args.to_string(),
                })
            },
            "search" | "s" | "find" => Ok(Command::Search {
                term: args.to_string(),
            }),
            "clear" | "cls" | "reset" => Ok(Command::Clear),
            "reload" | "refresh" => Ok(Command::Reload),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(DashboardError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// The state event this command maps to; `None` for help and exit
    pub fn to_event(&self) -> Option<Event> {
        match self {
            Command::Region { region } => Some(Event::SetRegion(region.clone())),
            Command::Search { term } => Some(Event::SetSearch(term.clone())),
            Command::Clear => Some(Event::ClearFilters),
            Command::Reload => Some(Event::Reload),
            Command::Help | Command::Exit => None,
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Stock Dashboard Commands
========================

  /region <R|all>   Show one region (exact match, e.g. US, UK, EU)
  /search <text>    Filter by ticker or company name
  /clear            Reset region and search
  /reload           Reload the feed from its source
  /help             Show help
  /exit             Exit

Aliases: /r = /region   /s = /search   /q = /exit

Any text without a leading / is treated as a search.
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        let cmd = Command::parse("/region UK").unwrap();
        assert_eq!(
            cmd,
            Command::Region {
                region: "UK".to_string()
            }
        );

        // Region values keep their case
        let cmd = Command::parse("/r us").unwrap();
        assert_eq!(
            cmd,
            Command::Region {
                region: "us".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_region() {
        assert!(Command::parse("/region").is_err());
        assert!(Command::parse("/region   ").is_err());
    }

    #[test]
    fn test_parse_search_keeps_spaces() {
        let cmd = Command::parse("/search Tesco PLC").unwrap();
        assert_eq!(
            cmd,
            Command::Search {
                term: "Tesco PLC".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bare_text_is_search() {
        let cmd = Command::parse("  apple ").unwrap();
        assert_eq!(
            cmd,
            Command::Search {
                term: "apple".to_string()
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/clear").unwrap(), Command::Clear);
        assert_eq!(Command::parse("/RELOAD").unwrap(), Command::Reload);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(matches!(
            Command::parse("/analyze AAPL"),
            Err(DashboardError::CommandError(_))
        ));
    }

    #[test]
    fn test_to_event() {
        assert_eq!(
            Command::parse("/region EU").unwrap().to_event(),
            Some(Event::SetRegion("EU".to_string()))
        );
        assert_eq!(Command::Clear.to_event(), Some(Event::ClearFilters));
        assert_eq!(Command::Reload.to_event(), Some(Event::Reload));
        assert_eq!(Command::Exit.to_event(), None);
    }
}
