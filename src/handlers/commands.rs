use minibadge_core::{Facet, SortSpec};
use std::fmt;

pub const HELP: &str = "\
Commands:
  search <text>          free-text search (empty text clears it)
  category [value]       filter by category (no value clears it)
  year [value]           filter by conference year
  difficulty [value]     filter by soldering difficulty
  author [value]         filter by author
  sort <field>:<order>   order is asc, desc, num-asc or num-desc
  clear                  reset filters, search and sort
  show                   show the current results again
  help                   this text
  quit                   leave";

/// One discrete user event read from the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Facet(Facet, String),
    Sort(SortSpec),
    Clear,
    Show,
    Help,
    Quit,
}

/// Command error with the offending command and a message
#[derive(Debug, PartialEq, Eq)]
pub struct CommandError {
    pub command: String,
    pub message: String,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.command, self.message)
    }
}

impl std::error::Error for CommandError {}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let error = |message: String| CommandError {
        command: word.to_string(),
        message,
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "/" => ShellCommand::Search(rest.to_string()),
        "sort" => {
            if rest.is_empty() {
                return Err(error("expected a sort such as title:asc".to_string()));
            }
            ShellCommand::Sort(rest.parse::<SortSpec>().map_err(|e| error(format!("{}", e)))?)
        }
        "clear" | "reset" => ShellCommand::Clear,
        "show" | "ls" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => match other.parse::<Facet>() {
            Ok(facet) => ShellCommand::Facet(facet, rest.to_string()),
            Err(_) => return Err(error("unknown command, try 'help'".to_string())),
        },
    };

    Ok(Some(command))
}
